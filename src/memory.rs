//! Headless backend: an in-process element tree and a virtual clock.
//!
//! [`MemoryDom`] implements [`Dom`] over an arena of nodes with a fixed-advance
//! text metric, so layout is deterministic. [`ManualTimers`] implements
//! [`Timers`] over a clock that only moves when [`ManualTimers::advance`] is
//! called. Together they let the factory and measurer run without a browser,
//! for server-side chart rendering and for tests.
//!
//! Slots of discarded nodes go to a free list and are reused by later
//! creations, so a long-lived document does not grow with every measurement.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::consts::{NEUTRAL_TEXT_SHADOW, TEXT_SHADOW};
use crate::dom::{BBox, Dom, Timers};
use crate::error::DomError;

/// Horizontal advance of every glyph, as a fraction of the font size.
pub const GLYPH_ADVANCE_EM: f64 = 0.6;

/// Font size used when a node carries none.
pub const DEFAULT_FONT_SIZE_PX: f64 = 16.0;

/// Line box height, as a fraction of the font size.
pub const LINE_HEIGHT_EM: f64 = 1.2;

/// Extra width a non-neutral `text-shadow` adds to the box.
pub const SHADOW_BLEED_PX: f64 = 4.0;

/// Parse a unitless or `px` length.
fn parse_length(raw: &str) -> Option<f64> {
    match raw.trim().trim_end_matches("px").parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}

/// Handle to a node in a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryNode(usize);

#[derive(Debug, Clone, Default)]
struct NodeData {
    namespace: String,
    tag: String,
    classes: Vec<String>,
    text: String,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    children: Vec<MemoryNode>,
    parent: Option<MemoryNode>,
}

#[derive(Debug)]
struct Arena {
    nodes: Vec<NodeData>,
    /// Released slots, reused by `push`.
    free: Vec<MemoryNode>,
    body: MemoryNode,
}

impl Arena {
    fn node(&self, id: MemoryNode) -> &NodeData {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: MemoryNode) -> &mut NodeData {
        &mut self.nodes[id.0]
    }

    fn push(&mut self, data: NodeData) -> MemoryNode {
        if let Some(id) = self.free.pop() {
            *self.node_mut(id) = data;
            return id;
        }
        self.nodes.push(data);
        MemoryNode(self.nodes.len() - 1)
    }

    /// Detach `id` and return its whole subtree to the free list.
    fn release(&mut self, id: MemoryNode) {
        if id == self.body || self.free.contains(&id) {
            return;
        }
        self.detach(id);
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let data = std::mem::take(self.node_mut(current));
            stack.extend(data.children);
            self.free.push(current);
        }
    }

    fn detach(&mut self, id: MemoryNode) {
        if let Some(parent) = self.node_mut(id).parent.take() {
            self.node_mut(parent).children.retain(|c| *c != id);
        }
    }

    fn append(&mut self, parent: MemoryNode, child: MemoryNode) {
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    fn clone_subtree(&mut self, id: MemoryNode) -> MemoryNode {
        let mut data = self.node(id).clone();
        let children = std::mem::take(&mut data.children);
        data.parent = None;
        let copy = self.push(data);
        for child in children {
            let child_copy = self.clone_subtree(child);
            self.append(copy, child_copy);
        }
        copy
    }

    fn text_content(&self, id: MemoryNode) -> String {
        let node = self.node(id);
        let mut out = node.text.clone();
        for child in &node.children {
            out.push_str(&self.text_content(*child));
        }
        out
    }

    fn is_attached(&self, id: MemoryNode) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == self.body {
                return true;
            }
            cursor = self.node(current).parent;
        }
        false
    }
}

/// In-process document. Clones share the same tree.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    inner: Rc<RefCell<Arena>>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        let body = NodeData { tag: "body".to_owned(), ..NodeData::default() };
        Self { inner: Rc::new(RefCell::new(Arena { nodes: vec![body], free: Vec::new(), body: MemoryNode(0) })) }
    }
}

impl MemoryDom {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The document body.
    #[must_use]
    pub fn body(&self) -> MemoryNode {
        self.inner.borrow().body
    }

    /// Live nodes, attached or not. Discarded nodes are not counted.
    #[must_use]
    pub fn node_count(&self) -> usize {
        let arena = self.inner.borrow();
        arena.nodes.len() - arena.free.len()
    }

    /// Slots allocated by the arena, live or free.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.borrow().nodes.len()
    }

    #[must_use]
    pub fn namespace(&self, node: MemoryNode) -> String {
        self.inner.borrow().node(node).namespace.clone()
    }

    #[must_use]
    pub fn classes(&self, node: MemoryNode) -> Vec<String> {
        self.inner.borrow().node(node).classes.clone()
    }

    #[must_use]
    pub fn children(&self, node: MemoryNode) -> Vec<MemoryNode> {
        self.inner.borrow().node(node).children.clone()
    }

    #[must_use]
    pub fn parent(&self, node: MemoryNode) -> Option<MemoryNode> {
        self.inner.borrow().node(node).parent
    }

    /// Concatenated text of `node` and its descendants.
    #[must_use]
    pub fn text_content(&self, node: MemoryNode) -> String {
        self.inner.borrow().text_content(node)
    }

    /// All attributes of `node`, by name.
    #[must_use]
    pub fn attributes(&self, node: MemoryNode) -> BTreeMap<String, String> {
        self.inner.borrow().node(node).attributes.clone()
    }

    /// All inline style declarations of `node`, by property.
    #[must_use]
    pub fn styles(&self, node: MemoryNode) -> BTreeMap<String, String> {
        self.inner.borrow().node(node).styles.clone()
    }

    fn font_size(data: &NodeData) -> f64 {
        data.styles
            .get("font-size")
            .or_else(|| data.attributes.get("font-size"))
            .and_then(|raw| parse_length(raw))
            .unwrap_or(DEFAULT_FONT_SIZE_PX)
    }
}

impl Dom for MemoryDom {
    type Node = MemoryNode;

    fn create_element_ns(&self, namespace: &str, kind: &str) -> Result<MemoryNode, DomError> {
        if kind.is_empty() || kind.contains(char::is_whitespace) {
            return Err(DomError::Host(format!("invalid element name {kind:?}")));
        }
        let data = NodeData { namespace: namespace.to_owned(), tag: kind.to_owned(), ..NodeData::default() };
        Ok(self.inner.borrow_mut().push(data))
    }

    fn tag_name(&self, node: &MemoryNode) -> String {
        self.inner.borrow().node(*node).tag.clone()
    }

    fn add_class(&self, node: &MemoryNode, class: &str) -> Result<(), DomError> {
        if class.contains(char::is_whitespace) {
            return Err(DomError::Host(format!("class token contains whitespace: {class:?}")));
        }
        let mut arena = self.inner.borrow_mut();
        let classes = &mut arena.node_mut(*node).classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_owned());
        }
        Ok(())
    }

    fn set_text_content(&self, node: &MemoryNode, text: &str) {
        let mut arena = self.inner.borrow_mut();
        let children = std::mem::take(&mut arena.node_mut(*node).children);
        for child in children {
            arena.node_mut(child).parent = None;
        }
        text.clone_into(&mut arena.node_mut(*node).text);
    }

    fn set_style(&self, node: &MemoryNode, property: &str, value: &str) -> Result<(), DomError> {
        let mut arena = self.inner.borrow_mut();
        let styles = &mut arena.node_mut(*node).styles;
        if value.is_empty() {
            styles.remove(property);
        } else {
            styles.insert(property.to_owned(), value.to_owned());
        }
        Ok(())
    }

    fn style(&self, node: &MemoryNode, property: &str) -> Result<String, DomError> {
        Ok(self
            .inner
            .borrow()
            .node(*node)
            .styles
            .get(property)
            .cloned()
            .unwrap_or_default())
    }

    fn set_attribute(&self, node: &MemoryNode, name: &str, value: &str) -> Result<(), DomError> {
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(DomError::Host(format!("invalid attribute name {name:?}")));
        }
        self.inner
            .borrow_mut()
            .node_mut(*node)
            .attributes
            .insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn attribute(&self, node: &MemoryNode, name: &str) -> Option<String> {
        self.inner.borrow().node(*node).attributes.get(name).cloned()
    }

    fn clone_deep(&self, node: &MemoryNode) -> Result<MemoryNode, DomError> {
        Ok(self.inner.borrow_mut().clone_subtree(*node))
    }

    fn append_child(&self, parent: &MemoryNode, child: &MemoryNode) -> Result<(), DomError> {
        let mut arena = self.inner.borrow_mut();
        let mut cursor = Some(*parent);
        while let Some(current) = cursor {
            if current == *child {
                return Err(DomError::Host("cannot append a node to its own descendant".to_owned()));
            }
            cursor = arena.node(current).parent;
        }
        arena.append(*parent, *child);
        Ok(())
    }

    fn remove(&self, node: &MemoryNode) {
        self.inner.borrow_mut().detach(*node);
    }

    fn discard(&self, node: &MemoryNode) {
        self.inner.borrow_mut().release(*node);
    }

    fn parent_node(&self, node: &MemoryNode) -> Option<MemoryNode> {
        self.parent(*node)
    }

    fn is_attached(&self, node: &MemoryNode) -> bool {
        self.inner.borrow().is_attached(*node)
    }

    fn append_to_body(&self, node: &MemoryNode) -> Result<(), DomError> {
        let body = self.body();
        self.append_child(&body, node)
    }

    fn bbox(&self, node: &MemoryNode) -> Result<BBox, DomError> {
        let arena = self.inner.borrow();
        if !arena.is_attached(*node) {
            return Err(DomError::Layout(format!("<{}> is not attached to the document", arena.node(*node).tag)));
        }
        let data = arena.node(*node);
        let text = arena.text_content(*node);
        if text.is_empty() {
            let dimension = |name: &str| {
                data.attributes
                    .get(name)
                    .and_then(|raw| parse_length(raw))
                    .unwrap_or(0.0)
            };
            return Ok(BBox { width: dimension("width"), height: dimension("height") });
        }

        let font_size = Self::font_size(data);
        #[allow(clippy::cast_precision_loss)]
        let glyphs = text.chars().count() as f64;
        let mut width = glyphs * font_size * GLYPH_ADVANCE_EM;
        let shadow = data.styles.get(TEXT_SHADOW).map_or("", String::as_str);
        if !shadow.is_empty() && shadow != "none" && shadow != NEUTRAL_TEXT_SHADOW {
            width += SHADOW_BLEED_PX;
        }
        Ok(BBox { width, height: font_size * LINE_HEIGHT_EM })
    }
}

/// Handle to a callback scheduled on [`ManualTimers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerId(u64);

struct Scheduled {
    id: TimerId,
    due_ms: u64,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now_ms: u64,
    next_id: u64,
    queue: Vec<Scheduled>,
}

/// Virtual clock. Callbacks only run inside [`ManualTimers::advance`].
#[derive(Clone, Default)]
pub struct ManualTimers {
    inner: Rc<RefCell<Clock>>,
}

impl ManualTimers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Callbacks scheduled and not yet run or cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Move the clock forward by `ms`, running every callback that falls due,
    /// earliest first. Callbacks may schedule further callbacks.
    pub fn advance(&self, ms: u64) {
        let target = self.inner.borrow().now_ms + ms;
        loop {
            let next = {
                let mut clock = self.inner.borrow_mut();
                let due = clock
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.due_ms <= target)
                    .min_by_key(|(_, s)| (s.due_ms, s.id.0))
                    .map(|(idx, _)| idx);
                due.map(|idx| {
                    let scheduled = clock.queue.remove(idx);
                    clock.now_ms = scheduled.due_ms;
                    scheduled
                })
            };
            // Borrow released: the callback may touch the clock.
            match next {
                Some(scheduled) => (scheduled.callback)(),
                None => break,
            }
        }
        self.inner.borrow_mut().now_ms = target;
    }
}

impl Timers for ManualTimers {
    type Pending = TimerId;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId {
        let mut clock = self.inner.borrow_mut();
        let id = TimerId(clock.next_id);
        clock.next_id += 1;
        let due_ms = clock.now_ms + u64::from(delay_ms);
        clock.queue.push(Scheduled { id, due_ms, callback });
        id
    }

    fn cancel(&self, pending: TimerId) {
        self.inner.borrow_mut().queue.retain(|s| s.id != pending);
    }
}
