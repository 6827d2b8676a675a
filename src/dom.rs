//! Host capabilities the factory and measurer are written against.
//!
//! [`Dom`] covers document construction, styling and layout; [`Timers`]
//! covers deferred callbacks. The browser implementations live in the `web`
//! module (feature `web`), the headless ones in [`crate::memory`].

use crate::error::DomError;

/// Rendered extent of a node, in user units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BBox {
    pub width: f64,
    pub height: f64,
}

/// Document construction, styling and layout.
///
/// Implementations are cheap handles (`Clone`) onto a shared document; the
/// measurer keeps one inside its deferred cleanup callback.
pub trait Dom: Clone + 'static {
    /// Handle to an element in the document.
    type Node: Clone + 'static;

    /// Create a detached element of `kind` in `namespace`.
    fn create_element_ns(&self, namespace: &str, kind: &str) -> Result<Self::Node, DomError>;

    /// Tag name of `node`, as created.
    fn tag_name(&self, node: &Self::Node) -> String;

    /// Add `class` to the node's class list (set union).
    fn add_class(&self, node: &Self::Node, class: &str) -> Result<(), DomError>;

    /// Replace all children of `node` with a single text run.
    fn set_text_content(&self, node: &Self::Node, text: &str);

    /// Write an inline style property. An empty `value` removes the property.
    fn set_style(&self, node: &Self::Node, property: &str, value: &str) -> Result<(), DomError>;

    /// Read an inline style property; empty when unset.
    fn style(&self, node: &Self::Node, property: &str) -> Result<String, DomError>;

    /// Write an attribute in the null namespace, where SVG presentation and
    /// geometry attributes live.
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> Result<(), DomError>;

    /// Read an attribute by qualified name.
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Deep-clone `node`. The clone is detached.
    fn clone_deep(&self, node: &Self::Node) -> Result<Self::Node, DomError>;

    /// Append `child` to `parent`, moving it out of any previous parent.
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), DomError>;

    /// Detach `node` from its parent. No-op when already detached.
    fn remove(&self, node: &Self::Node);

    /// Detach `node` and release it. The handle must not be used afterwards.
    fn discard(&self, node: &Self::Node);

    /// Parent element of `node`, if any.
    fn parent_node(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Whether `node` is connected to the document.
    fn is_attached(&self, node: &Self::Node) -> bool;

    /// Append `node` to the document body.
    fn append_to_body(&self, node: &Self::Node) -> Result<(), DomError>;

    /// Synchronously lay out `node` and return its bounding box.
    fn bbox(&self, node: &Self::Node) -> Result<BBox, DomError>;
}

/// One-shot deferred callbacks on the host event loop.
pub trait Timers {
    /// Handle to a scheduled callback.
    type Pending: 'static;

    /// Run `callback` once after `delay_ms`.
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Pending;

    /// Cancel a scheduled callback. No-op if it already ran.
    fn cancel(&self, pending: Self::Pending);
}
