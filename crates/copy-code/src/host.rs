//! The page the injector runs against.
//!
//! In the browser this is [`crate::web::WebHost`] (web-sys); in unit tests it is
//! an in-memory fake. Everything is single-threaded, so handlers are plain
//! `Fn`/`FnOnce` boxes with no `Send` bound.

use crate::error::{CopyCodeError, Result};

/// DOM events the injector listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEvent {
    Click,
    MouseEnter,
    MouseLeave,
}

impl DomEvent {
    pub fn name(self) -> &'static str {
        match self {
            DomEvent::Click => "click",
            DomEvent::MouseEnter => "mouseenter",
            DomEvent::MouseLeave => "mouseleave",
        }
    }
}

pub type Handler = Box<dyn Fn()>;
pub type ClipboardDone = Box<dyn FnOnce(std::result::Result<(), CopyCodeError>)>;
pub type TimerCallback = Box<dyn FnOnce()>;

pub trait Host: 'static {
    type Element: Clone + 'static;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Element>>;

    fn parent_element(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Upper-case tag name (`"PRE"`, `"CODE"`, ...).
    fn tag_name(&self, element: &Self::Element) -> String;

    /// Short human-readable form of `element` for diagnostics.
    fn describe(&self, element: &Self::Element) -> String;

    fn create_element(&self, tag: &str) -> Result<Self::Element>;

    fn append_child(&self, parent: &Self::Element, child: &Self::Element) -> Result<()>;

    /// Set one inline style property (`property` in CSS form, e.g. `border-radius`).
    fn set_style(&self, element: &Self::Element, property: &str, value: &str) -> Result<()>;

    fn set_text(&self, element: &Self::Element, text: &str);

    /// Text as currently rendered (`innerText`).
    fn rendered_text(&self, element: &Self::Element) -> String;

    /// Register a listener that lives as long as the page.
    fn listen(&self, element: &Self::Element, event: DomEvent, handler: Handler) -> Result<()>;

    /// Start an asynchronous clipboard write. `done` runs once the platform settles it.
    fn write_clipboard(&self, text: String, done: ClipboardDone);

    /// One-shot timer. There is no cancellation.
    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback);

    fn warn(&self, message: &str);

    fn error(&self, message: &str);
}
