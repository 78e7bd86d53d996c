//! Inline styles for the injected elements.

use crate::config::CopyButtonConfig;

pub const HIDDEN: &str = "0";
pub const SHOWN: &str = "1";

/// Small, translucent, bordered, rounded button.
pub const BUTTON: &[(&str, &str)] = &[
    ("background", "rgba(255, 255, 255, 0.8)"),
    ("border", "1px solid #ccc"),
    ("border-radius", "4px"),
    ("padding", "0.25em 0.5em"),
    ("font-size", "0.8em"),
    ("cursor", "pointer"),
    ("color", "#333"),
];

/// Pinned to the top-right corner of the `<pre>`, invisible until hovered.
pub fn container(config: &CopyButtonConfig) -> Vec<(&'static str, String)> {
    vec![
        ("position", "absolute".to_string()),
        ("top", config.offset.clone()),
        ("right", config.offset.clone()),
        ("opacity", HIDDEN.to_string()),
        ("transition", config.transition.clone()),
    ]
}
