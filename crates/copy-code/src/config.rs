//! Button captions, timings and the code-block selector.
//!
//! Every field has a default, so a page only needs to embed the fields it wants
//! to change:
//!
//! ```html
//! <script type="application/json" id="copy-code-config">
//!   { "labels": { "idle": "Copy" }, "reset_delay_ms": 1500 }
//! </script>
//! ```

use serde::Deserialize;

use crate::error::{CopyCodeError, Result};

/// Id of the optional `<script type="application/json">` element holding page overrides.
pub const CONFIG_ELEMENT_ID: &str = "copy-code-config";

const DEFAULT_SELECTOR: &str = "pre > code";
const DEFAULT_RESET_DELAY_MS: u32 = 2000;
const DEFAULT_OFFSET: &str = "0.5em";
const DEFAULT_TRANSITION: &str = "opacity 0.2s ease-in-out";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CopyButtonConfig {
    /// CSS selector used to discover code blocks.
    pub selector: String,
    pub labels: Labels,
    /// Delay before a "copied" caption goes back to idle.
    pub reset_delay_ms: u32,
    /// Distance of the button from the top-right corner of its `<pre>`.
    pub offset: String,
    /// CSS transition applied to the container's opacity.
    pub transition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub idle: String,
    pub copied: String,
    pub failed: String,
}

impl Default for CopyButtonConfig {
    fn default() -> Self {
        Self {
            selector: DEFAULT_SELECTOR.to_string(),
            labels: Labels::default(),
            reset_delay_ms: DEFAULT_RESET_DELAY_MS,
            offset: DEFAULT_OFFSET.to_string(),
            transition: DEFAULT_TRANSITION.to_string(),
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            idle: "Copy to Clipboard".to_string(),
            copied: "content copied".to_string(),
            failed: "Error!".to_string(),
        }
    }
}

impl CopyButtonConfig {
    /// Parse a (possibly partial) JSON object; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.selector.trim().is_empty() {
            return Err(CopyCodeError::Config("selector must not be empty".into()));
        }
        for (name, label) in [
            ("idle", &self.labels.idle),
            ("copied", &self.labels.copied),
            ("failed", &self.labels.failed),
        ] {
            if label.trim().is_empty() {
                return Err(CopyCodeError::Config(format!("labels.{} must not be empty", name)));
            }
        }
        Ok(())
    }
}
