//! Element factory: build and configure SVG elements in one call.
//!
//! [`ElementFactory::create`] creates an element in the SVG namespace and
//! applies an [`ElementOptions`] to it. Unknown keys never fail the call:
//!
//! - an unrecognized **style** property is reported and skipped;
//! - an **attribute** that is not a property of the element kind is reported
//!   and written anyway.
//!
//! Reports are logged with `log::warn!`. [`ElementFactory::build`] returns them
//! instead, for callers that want to surface them elsewhere.

#[cfg(test)]
#[path = "factory_test.rs"]
mod factory_test;

use crate::consts::SVG_NS;
use crate::dom::Dom;
use crate::error::{DomError, KeyTarget, UnknownKey};
use crate::options::ElementOptions;
use crate::schema;

/// A configured element plus the diagnostics produced while configuring it.
#[derive(Debug, Clone)]
pub struct Created<N> {
    pub node: N,
    pub warnings: Vec<UnknownKey>,
}

/// Creates SVG elements in a host document.
#[derive(Debug, Clone)]
pub struct ElementFactory<D: Dom> {
    dom: D,
}

impl<D: Dom> ElementFactory<D> {
    #[must_use]
    pub fn new(dom: D) -> Self {
        Self { dom }
    }

    /// The document elements are created in.
    #[must_use]
    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// Create a `kind` element configured by `options`, logging a warning per
    /// unknown key.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the host rejects element creation or a write.
    pub fn create(&self, kind: &str, options: &ElementOptions) -> Result<D::Node, DomError> {
        let created = self.build(kind, options)?;
        for warning in &created.warnings {
            log::warn!("{warning}");
        }
        Ok(created.node)
    }

    /// Create a `kind` element configured by `options`, returning the unknown
    /// keys alongside the node instead of logging them.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the host rejects element creation or a write.
    pub fn build(&self, kind: &str, options: &ElementOptions) -> Result<Created<D::Node>, DomError> {
        let node = self.dom.create_element_ns(SVG_NS, kind)?;
        let mut warnings = Vec::new();

        if !options.class_name.is_empty() {
            self.dom.add_class(&node, &options.class_name)?;
        }
        if !options.text.is_empty() {
            self.dom.set_text_content(&node, &options.text);
        }

        for (key, value) in &options.css {
            match schema::style_property(key) {
                Some(property) => self.dom.set_style(&node, &property, value)?,
                None => warnings.push(unknown(kind, KeyTarget::Style, key, value)),
            }
        }

        for (key, value) in &options.attributes {
            if !schema::is_element_property(kind, key) {
                warnings.push(unknown(kind, KeyTarget::Attribute, key, value));
            }
            self.dom.set_attribute(&node, key, value)?;
        }

        Ok(Created { node, warnings })
    }

    // --- Named constructors ---

    /// `<g>` container group.
    ///
    /// # Errors
    ///
    /// See [`Self::create`].
    pub fn group(&self, options: &ElementOptions) -> Result<D::Node, DomError> {
        self.create("g", options)
    }

    /// `<clipPath>` clip region.
    ///
    /// # Errors
    ///
    /// See [`Self::create`].
    pub fn clip_path(&self, options: &ElementOptions) -> Result<D::Node, DomError> {
        self.create("clipPath", options)
    }

    /// `<foreignObject>` holder for embedded non-SVG content.
    ///
    /// # Errors
    ///
    /// See [`Self::create`].
    pub fn foreign_object(&self, options: &ElementOptions) -> Result<D::Node, DomError> {
        self.create("foreignObject", options)
    }

    /// `<a>` hyperlink wrapper.
    ///
    /// # Errors
    ///
    /// See [`Self::create`].
    pub fn anchor(&self, options: &ElementOptions) -> Result<D::Node, DomError> {
        self.create("a", options)
    }

    /// `<rect>`.
    ///
    /// # Errors
    ///
    /// See [`Self::create`].
    pub fn rect(&self, options: &ElementOptions) -> Result<D::Node, DomError> {
        self.create("rect", options)
    }

    /// `<line>`.
    ///
    /// # Errors
    ///
    /// See [`Self::create`].
    pub fn line(&self, options: &ElementOptions) -> Result<D::Node, DomError> {
        self.create("line", options)
    }

    /// `<text>`.
    ///
    /// # Errors
    ///
    /// See [`Self::create`].
    pub fn text(&self, options: &ElementOptions) -> Result<D::Node, DomError> {
        self.create("text", options)
    }

    /// `<title>` carrying `text`. Bypasses option processing.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the host rejects element creation.
    pub fn title(&self, text: &str) -> Result<D::Node, DomError> {
        let node = self.dom.create_element_ns(SVG_NS, "title")?;
        self.dom.set_text_content(&node, text);
        Ok(node)
    }

    /// `<path>` with path data `d`. Bypasses option processing.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the host rejects element creation or the `d` write.
    pub fn path(&self, d: &str) -> Result<D::Node, DomError> {
        let node = self.dom.create_element_ns(SVG_NS, "path")?;
        self.dom.set_attribute(&node, "d", d)?;
        Ok(node)
    }
}

fn unknown(kind: &str, target: KeyTarget, key: &str, value: &str) -> UnknownKey {
    UnknownKey { kind: kind.to_owned(), target, key: key.to_owned(), value: value.to_owned() }
}
