//! Browser backend over `web-sys`, with `gloo-timers` for deferred cleanup.
//!
//! Only compiled with the `web` feature; everything here needs a live
//! `window.document`.

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Element, HtmlElement, SvgElement, SvgGraphicsElement};

use crate::dom::{BBox, Dom, Timers};
use crate::error::DomError;

/// [`Dom`] over the page's `web_sys::Document`.
#[derive(Debug, Clone)]
pub struct WebDom {
    document: web_sys::Document,
}

impl WebDom {
    #[must_use]
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// Bind to `window.document`.
    ///
    /// # Errors
    ///
    /// Returns `Err` outside a browser window.
    pub fn from_window() -> Result<Self, DomError> {
        web_sys::window()
            .and_then(|w| w.document())
            .map(Self::new)
            .ok_or_else(|| DomError::Host("no window.document".to_owned()))
    }

    #[must_use]
    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }
}

/// Inline style object of an SVG or HTML element.
fn style_of(node: &Element) -> Result<CssStyleDeclaration, DomError> {
    if let Some(el) = node.dyn_ref::<SvgElement>() {
        return Ok(el.style());
    }
    if let Some(el) = node.dyn_ref::<HtmlElement>() {
        return Ok(el.style());
    }
    Err(DomError::NotAnElement(node.tag_name()))
}

impl Dom for WebDom {
    type Node = Element;

    fn create_element_ns(&self, namespace: &str, kind: &str) -> Result<Element, DomError> {
        Ok(self.document.create_element_ns(Some(namespace), kind)?)
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name()
    }

    fn add_class(&self, node: &Element, class: &str) -> Result<(), DomError> {
        Ok(node.class_list().add_1(class)?)
    }

    fn set_text_content(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) -> Result<(), DomError> {
        Ok(style_of(node)?.set_property(property, value)?)
    }

    fn style(&self, node: &Element, property: &str) -> Result<String, DomError> {
        Ok(style_of(node)?.get_property_value(property)?)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) -> Result<(), DomError> {
        Ok(node.set_attribute_ns(None, name, value)?)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn clone_deep(&self, node: &Element) -> Result<Element, DomError> {
        node.clone_node_with_deep(true)?
            .dyn_into::<Element>()
            .map_err(|_| DomError::NotAnElement(node.tag_name()))
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<(), DomError> {
        parent.append_child(child)?;
        Ok(())
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn discard(&self, node: &Element) {
        // Unreferenced elements are reclaimed by the browser.
        node.remove();
    }

    fn parent_node(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn is_attached(&self, node: &Element) -> bool {
        node.is_connected()
    }

    fn append_to_body(&self, node: &Element) -> Result<(), DomError> {
        let body = self.document.body().ok_or(DomError::NoBody)?;
        body.append_child(node)?;
        Ok(())
    }

    fn bbox(&self, node: &Element) -> Result<BBox, DomError> {
        if let Some(graphics) = node.dyn_ref::<SvgGraphicsElement>() {
            let rect = graphics.get_b_box()?;
            return Ok(BBox { width: f64::from(rect.width()), height: f64::from(rect.height()) });
        }
        let rect = node.get_bounding_client_rect();
        Ok(BBox { width: rect.width(), height: rect.height() })
    }
}

/// [`Timers`] over `setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimers;

impl Timers for BrowserTimers {
    type Pending = Timeout;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, callback)
    }

    fn cancel(&self, pending: Timeout) {
        // Dropping a `Timeout` clears it.
        drop(pending);
    }
}
