//! Gives every code block a floating "copy to clipboard" button.
//!
//! The pass runs once, synchronously. After that the only moving parts are the
//! hover listeners on each `<pre>` and the click listener on each button, whose
//! clipboard write completes asynchronously.

use std::rc::Rc;

use crate::config::{CopyButtonConfig, Labels};
use crate::error::{CopyCodeError, Result};
use crate::host::{DomEvent, Host};
use crate::style;

/// Caption state of a copy button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Idle,
    Copied,
    Failed,
}

impl ButtonState {
    pub fn caption(self, labels: &Labels) -> &str {
        match self {
            ButtonState::Idle => &labels.idle,
            ButtonState::Copied => &labels.copied,
            ButtonState::Failed => &labels.failed,
        }
    }
}

/// Elements involved in one injected button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyButton<E> {
    pub pre: E,
    pub code: E,
    pub container: E,
    pub button: E,
}

pub struct Injector<H: Host> {
    host: Rc<H>,
    config: Rc<CopyButtonConfig>,
}

impl<H: Host> Injector<H> {
    pub fn new(host: Rc<H>, config: CopyButtonConfig) -> Self {
        Self {
            host,
            config: Rc::new(config),
        }
    }

    /// Attach a button to every eligible code block. Ineligible blocks and
    /// per-block DOM failures are logged and skipped.
    pub fn run(&self) -> Vec<CopyButton<H::Element>> {
        let blocks = match self.host.query_all(&self.config.selector) {
            Ok(blocks) => blocks,
            Err(err) => {
                self.host.error(&err.to_string());
                return Vec::new();
            }
        };

        blocks
            .into_iter()
            .filter_map(|code| match self.attach(code) {
                Ok(button) => Some(button),
                Err(err @ CopyCodeError::NotInPre(_)) => {
                    self.host.warn(&err.to_string());
                    None
                }
                Err(err) => {
                    self.host.error(&err.to_string());
                    None
                }
            })
            .collect()
    }

    fn attach(&self, code: H::Element) -> Result<CopyButton<H::Element>> {
        let host = &self.host;
        let pre = host
            .parent_element(&code)
            .filter(|parent| host.tag_name(parent).eq_ignore_ascii_case("pre"))
            .ok_or_else(|| CopyCodeError::NotInPre(host.describe(&code)))?;

        let container = host.create_element("div")?;
        for (property, value) in style::container(&self.config) {
            host.set_style(&container, property, &value)?;
        }

        let button = host.create_element("button")?;
        host.set_text(&button, ButtonState::Idle.caption(&self.config.labels));
        for (property, value) in style::BUTTON {
            host.set_style(&button, property, value)?;
        }
        host.append_child(&container, &button)?;

        // Listeners first: if one fails, the <pre> is left as it was.
        self.listen_click(&code, &button)?;
        self.listen_hover(&pre, &container)?;

        // The container's absolute position must resolve against this <pre>.
        host.set_style(&pre, "position", "relative")?;
        host.append_child(&pre, &container)?;

        Ok(CopyButton {
            pre,
            code,
            container,
            button,
        })
    }

    fn listen_hover(&self, pre: &H::Element, container: &H::Element) -> Result<()> {
        for (event, opacity) in [(DomEvent::MouseEnter, style::SHOWN), (DomEvent::MouseLeave, style::HIDDEN)] {
            let host = Rc::clone(&self.host);
            let container = container.clone();
            self.host.listen(
                pre,
                event,
                Box::new(move || {
                    if let Err(err) = host.set_style(&container, "opacity", opacity) {
                        host.error(&err.to_string());
                    }
                }),
            )?;
        }
        Ok(())
    }

    fn listen_click(&self, code: &H::Element, button: &H::Element) -> Result<()> {
        let host = Rc::clone(&self.host);
        let config = Rc::clone(&self.config);
        let code = code.clone();
        let target = button.clone();
        self.host.listen(
            button,
            DomEvent::Click,
            Box::new(move || copy_code(&host, &config, &code, &target)),
        )
    }
}

/// Copy the block's text as rendered right now, then reflect the outcome on the button.
fn copy_code<H: Host>(host: &Rc<H>, config: &Rc<CopyButtonConfig>, code: &H::Element, button: &H::Element) {
    let text = host.rendered_text(code);
    let done_host = Rc::clone(host);
    let config = Rc::clone(config);
    let button = button.clone();

    host.write_clipboard(
        text,
        Box::new(move |outcome| match outcome {
            Ok(()) => {
                done_host.set_text(&button, ButtonState::Copied.caption(&config.labels));
                // Not tracked: an earlier pending reset still fires on a quick re-click.
                let reset_host = Rc::clone(&done_host);
                done_host.set_timeout(
                    config.reset_delay_ms,
                    Box::new(move || reset_host.set_text(&button, ButtonState::Idle.caption(&config.labels))),
                );
            }
            Err(err) => {
                done_host.error(&err.to_string());
                done_host.set_text(&button, ButtonState::Failed.caption(&config.labels));
            }
        }),
    );
}
