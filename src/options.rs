//! Element configuration accepted by [`crate::factory::ElementFactory`].

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Attribute name → stringified value.
pub type AttributeMap = BTreeMap<String, String>;

/// Style property name → stringified value. Keys may be kebab-case or camelCase.
pub type StyleMap = BTreeMap<String, String>;

/// Optional configuration applied to a freshly created element.
///
/// Empty `text` and `class_name` are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementOptions {
    pub attributes: AttributeMap,
    pub css: StyleMap,
    pub text: String,
    pub class_name: String,
}

impl ElementOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the class name.
    #[must_use]
    pub fn class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Set the text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Add an attribute. Later values for the same name win.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.insert(name.into(), value.to_string());
        self
    }

    /// Add a style declaration. Later values for the same property win.
    #[must_use]
    pub fn css(mut self, property: impl Into<String>, value: impl ToString) -> Self {
        self.css.insert(property.into(), value.to_string());
        self
    }
}
