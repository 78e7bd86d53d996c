//! Browser host (web-sys) and the WASM entry point.

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::config::{CONFIG_ELEMENT_ID, CopyButtonConfig};
use crate::error::{CopyCodeError, Result};
use crate::host::{ClipboardDone, DomEvent, Handler, Host, TimerCallback};
use crate::injector::Injector;

const LOG_PREFIX: &str = "[copy-code]";
const DESCRIBE_MAX_CHARS: usize = 120;

fn console_warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(&format!("{} {}", LOG_PREFIX, message)));
}

fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(&format!("{} {}", LOG_PREFIX, message)));
}

/// Best-effort text for a thrown JS value (DOMException, Error, string, ...).
fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.to_string());
    }
    format!("{:?}", value)
}

fn dom_error(value: JsValue) -> CopyCodeError {
    CopyCodeError::Dom(js_message(&value))
}

pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    /// Overrides from `<script type="application/json" id="copy-code-config">`.
    /// Invalid JSON is logged and the defaults are used.
    pub fn load_config(&self) -> CopyButtonConfig {
        let Some(json) = self
            .document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return CopyButtonConfig::default();
        };

        CopyButtonConfig::from_json(&json).unwrap_or_else(|err| {
            console_error(&format!("{}; using defaults", err));
            CopyButtonConfig::default()
        })
    }

    /// `document.readyState == "loading"`, i.e. DOMContentLoaded has not fired yet.
    fn is_loading(&self) -> bool {
        js_sys::Reflect::get(&self.document, &JsValue::from_str("readyState"))
            .ok()
            .and_then(|state| state.as_string())
            .is_some_and(|state| state == "loading")
    }

    fn clipboard_available(&self) -> bool {
        js_sys::Reflect::get(&self.window.navigator(), &JsValue::from_str("clipboard"))
            .map(|clipboard| !clipboard.is_undefined() && !clipboard.is_null())
            .unwrap_or(false)
    }
}

impl Host for WebHost {
    type Element = Element;

    fn query_all(&self, selector: &str) -> Result<Vec<Element>> {
        let list = self.document.query_selector_all(selector).map_err(dom_error)?;
        Ok((0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn parent_element(&self, element: &Element) -> Option<Element> {
        element.parent_element()
    }

    fn tag_name(&self, element: &Element) -> String {
        element.tag_name()
    }

    fn describe(&self, element: &Element) -> String {
        let html = element.outer_html();
        if html.chars().count() > DESCRIBE_MAX_CHARS {
            format!("{}...", html.chars().take(DESCRIBE_MAX_CHARS).collect::<String>())
        } else {
            html
        }
    }

    fn create_element(&self, tag: &str) -> Result<Element> {
        self.document.create_element(tag).map_err(dom_error)
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<()> {
        parent.append_child(child).map(|_| ()).map_err(dom_error)
    }

    fn set_style(&self, element: &Element, property: &str, value: &str) -> Result<()> {
        let html = element
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| CopyCodeError::Dom(format!("<{}> has no inline style", element.tag_name())))?;
        html.style().set_property(property, value).map_err(dom_error)
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn rendered_text(&self, element: &Element) -> String {
        match element.dyn_ref::<HtmlElement>() {
            Some(html) => html.inner_text(),
            None => element.text_content().unwrap_or_default(),
        }
    }

    fn listen(&self, element: &Element, event: DomEvent, handler: Handler) -> Result<()> {
        let closure = Closure::wrap(handler);
        element
            .add_event_listener_with_callback(event.name(), closure.as_ref().unchecked_ref())
            .map_err(dom_error)?;
        // Listeners live as long as the page
        closure.forget();
        Ok(())
    }

    fn write_clipboard(&self, text: String, done: ClipboardDone) {
        // navigator.clipboard is undefined outside secure contexts
        if !self.clipboard_available() {
            done(Err(CopyCodeError::Clipboard(
                "navigator.clipboard is unavailable (insecure context?)".into(),
            )));
            return;
        }

        let promise = self.window.navigator().clipboard().write_text(&text);
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|err| CopyCodeError::Clipboard(js_message(&err)));
            done(outcome);
        });
    }

    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) {
        Timeout::new(delay_ms, callback).forget();
    }

    fn warn(&self, message: &str) {
        console_warn(message);
    }

    fn error(&self, message: &str) {
        console_error(message);
    }
}

fn run(host: Rc<WebHost>) {
    let config = host.load_config();
    Injector::new(host, config).run();
}

/// Runs when the WASM module is instantiated. The module loads asynchronously,
/// so DOMContentLoaded may already be behind us.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(host) = WebHost::new() else {
        console_error("no window/document; copy buttons disabled");
        return;
    };
    let host = Rc::new(host);

    if !host.is_loading() {
        run(host);
        return;
    }

    let document = host.document.clone();
    let on_ready = Closure::once(move || run(host));
    if let Err(err) = document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref()) {
        console_error(&format!("could not wait for DOMContentLoaded: {}", js_message(&err)));
        return;
    }
    on_ready.forget();
}
