//! In-memory page for unit tests: an element arena, simulated pointer events,
//! a clipboard the test settles by hand and a virtual clock.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use crate::error::{CopyCodeError, Result};
use crate::host::{ClipboardDone, DomEvent, Handler, Host, TimerCallback};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

struct Node {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    text: String,
    style: BTreeMap<String, String>,
    listeners: Vec<(DomEvent, Rc<dyn Fn()>)>,
}

/// Outcome applied to clipboard writes when they are settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardMode {
    Accept,
    Reject(String),
}

struct Timer {
    due: u64,
    seq: u64,
    callback: TimerCallback,
}

pub struct FakeHost {
    nodes: RefCell<Vec<Node>>,
    clipboard_mode: RefCell<ClipboardMode>,
    writes: RefCell<Vec<String>>,
    pending: RefCell<VecDeque<ClipboardDone>>,
    now: Cell<u64>,
    next_seq: Cell<u64>,
    timers: RefCell<Vec<Timer>>,
    warnings: RefCell<Vec<String>>,
    errors: RefCell<Vec<String>>,
    fail_listen: Cell<Option<DomEvent>>,
}

impl FakeHost {
    pub fn new() -> Rc<Self> {
        let body = Node {
            tag: "BODY".into(),
            parent: None,
            children: Vec::new(),
            text: String::new(),
            style: BTreeMap::new(),
            listeners: Vec::new(),
        };
        Rc::new(Self {
            nodes: RefCell::new(vec![body]),
            clipboard_mode: RefCell::new(ClipboardMode::Accept),
            writes: RefCell::new(Vec::new()),
            pending: RefCell::new(VecDeque::new()),
            now: Cell::new(0),
            next_seq: Cell::new(0),
            timers: RefCell::new(Vec::new()),
            warnings: RefCell::new(Vec::new()),
            errors: RefCell::new(Vec::new()),
            fail_listen: Cell::new(None),
        })
    }

    // ── page building ────────────────────────────────────────────────────────

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    pub fn add(&self, parent: NodeId, tag: &str, text: &str) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        nodes.push(Node {
            tag: tag.to_ascii_uppercase(),
            parent: Some(parent),
            children: Vec::new(),
            text: text.to_string(),
            style: BTreeMap::new(),
            listeners: Vec::new(),
        });
        nodes[parent.0].children.push(id);
        id
    }

    /// Append `<pre><code>text</code></pre>` to the body and return the `<code>`.
    pub fn code_block(&self, text: &str) -> NodeId {
        let pre = self.add(self.body(), "pre", "");
        self.add(pre, "code", text)
    }

    // ── inspection ───────────────────────────────────────────────────────────

    pub fn style(&self, element: NodeId, property: &str) -> Option<String> {
        self.nodes.borrow()[element.0].style.get(property).cloned()
    }

    pub fn text(&self, element: NodeId) -> String {
        self.rendered_text(&element)
    }

    pub fn children(&self, element: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[element.0].children.clone()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }

    pub fn pending_writes(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    pub fn now(&self) -> u64 {
        self.now.get()
    }

    // ── simulation ───────────────────────────────────────────────────────────

    pub fn dispatch(&self, element: NodeId, event: DomEvent) {
        let handlers: Vec<Rc<dyn Fn()>> = self.nodes.borrow()[element.0]
            .listeners
            .iter()
            .filter(|(e, _)| *e == event)
            .map(|(_, h)| Rc::clone(h))
            .collect();
        for handler in handlers {
            handler();
        }
    }

    pub fn hover(&self, element: NodeId) {
        self.dispatch(element, DomEvent::MouseEnter);
    }

    pub fn unhover(&self, element: NodeId) {
        self.dispatch(element, DomEvent::MouseLeave);
    }

    pub fn click(&self, element: NodeId) {
        self.dispatch(element, DomEvent::Click);
    }

    /// Make the next `listen` call for `event` fail with a DOM error.
    pub fn fail_next_listen(&self, event: DomEvent) {
        self.fail_listen.set(Some(event));
    }

    pub fn set_clipboard(&self, mode: ClipboardMode) {
        *self.clipboard_mode.borrow_mut() = mode;
    }

    /// Settle every pending clipboard write, oldest first, with the current mode.
    pub fn settle_clipboard(&self) {
        loop {
            let Some(done) = self.pending.borrow_mut().pop_front() else {
                break;
            };
            let outcome = match &*self.clipboard_mode.borrow() {
                ClipboardMode::Accept => Ok(()),
                ClipboardMode::Reject(reason) => Err(CopyCodeError::Clipboard(reason.clone())),
            };
            done(outcome);
        }
    }

    /// Move the virtual clock forward, firing due timers in order.
    pub fn advance(&self, ms: u64) {
        let target = self.now.get() + ms;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let idx = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(i, _)| i);
                idx.map(|i| timers.remove(i))
            };
            let Some(timer) = next else {
                break;
            };
            self.now.set(timer.due);
            (timer.callback)();
        }
        self.now.set(target);
    }

    fn matches_tag(&self, node: NodeId, tag: &str) -> bool {
        self.nodes.borrow()[node.0].tag.eq_ignore_ascii_case(tag)
    }

    fn has_ancestor(&self, node: NodeId, tag: &str) -> bool {
        let mut current = self.nodes.borrow()[node.0].parent;
        while let Some(id) = current {
            if self.matches_tag(id, tag) {
                return true;
            }
            current = self.nodes.borrow()[id.0].parent;
        }
        false
    }

    fn document_order(&self) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut out = Vec::with_capacity(nodes.len());
        let mut stack = vec![self.body()];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(nodes[id.0].children.iter().rev().copied());
        }
        out
    }
}

impl Host for FakeHost {
    type Element = NodeId;

    /// Supports `tag`, `outer inner` and `outer > inner`.
    fn query_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let parts: Vec<&str> = selector.split_whitespace().collect();
        let order = self.document_order();
        let matched = match parts.as_slice() {
            [tag] => order.into_iter().filter(|&n| self.matches_tag(n, tag)).collect(),
            [outer, ">", inner] => order
                .into_iter()
                .filter(|&n| self.matches_tag(n, inner))
                .filter(|&n| self.parent_element(&n).is_some_and(|p| self.matches_tag(p, outer)))
                .collect(),
            [outer, inner] => order
                .into_iter()
                .filter(|&n| self.matches_tag(n, inner) && self.has_ancestor(n, outer))
                .collect(),
            _ => return Err(CopyCodeError::UnsupportedSelector(selector.to_string())),
        };
        Ok(matched)
    }

    fn parent_element(&self, element: &NodeId) -> Option<NodeId> {
        self.nodes.borrow()[element.0].parent
    }

    fn tag_name(&self, element: &NodeId) -> String {
        self.nodes.borrow()[element.0].tag.clone()
    }

    fn describe(&self, element: &NodeId) -> String {
        let tag = self.tag_name(element).to_ascii_lowercase();
        format!("<{}>{}</{}>", tag, self.rendered_text(element), tag)
    }

    fn create_element(&self, tag: &str) -> Result<NodeId> {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        nodes.push(Node {
            tag: tag.to_ascii_uppercase(),
            parent: None,
            children: Vec::new(),
            text: String::new(),
            style: BTreeMap::new(),
            listeners: Vec::new(),
        });
        Ok(id)
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<()> {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(old) = nodes[child.0].parent.take() {
            nodes[old.0].children.retain(|c| c != child);
        }
        nodes[child.0].parent = Some(*parent);
        nodes[parent.0].children.push(*child);
        Ok(())
    }

    fn set_style(&self, element: &NodeId, property: &str, value: &str) -> Result<()> {
        self.nodes.borrow_mut()[element.0]
            .style
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    fn set_text(&self, element: &NodeId, text: &str) {
        let mut nodes = self.nodes.borrow_mut();
        nodes[element.0].text = text.to_string();
        nodes[element.0].children.clear();
    }

    fn rendered_text(&self, element: &NodeId) -> String {
        let nodes = self.nodes.borrow();
        let mut text = String::new();
        let mut stack = vec![*element];
        while let Some(id) = stack.pop() {
            text.push_str(&nodes[id.0].text);
            stack.extend(nodes[id.0].children.iter().rev().copied());
        }
        text
    }

    fn listen(&self, element: &NodeId, event: DomEvent, handler: Handler) -> Result<()> {
        if self.fail_listen.get() == Some(event) {
            self.fail_listen.set(None);
            return Err(CopyCodeError::Dom(format!("cannot add {} listener", event.name())));
        }
        self.nodes.borrow_mut()[element.0]
            .listeners
            .push((event, Rc::from(handler)));
        Ok(())
    }

    fn write_clipboard(&self, text: String, done: ClipboardDone) {
        self.writes.borrow_mut().push(text);
        self.pending.borrow_mut().push_back(done);
    }

    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.timers.borrow_mut().push(Timer {
            due: self.now.get() + u64::from(delay_ms),
            seq,
            callback,
        });
    }

    fn warn(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}
