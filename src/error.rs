//! Error and diagnostic types.
//!
//! [`DomError`] is the only error that crosses the public API: it carries
//! failures reported by the host document. [`UnknownKey`] is a diagnostic —
//! the factory logs it and keeps going, it is never returned as `Err`.

use std::fmt;

/// Failure reported by the host document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The host raised an exception (stringified).
    #[error("host error: {0}")]
    Host(String),
    /// The document has no `<body>` to attach the measurement container to.
    #[error("document has no body")]
    NoBody,
    /// A node handed back by the host was not an element (e.g. a clone of a text node).
    #[error("not an element: {0}")]
    NotAnElement(String),
    /// Layout information was requested for a node the host cannot lay out.
    #[error("layout unavailable: {0}")]
    Layout(String),
}

#[cfg(feature = "web")]
impl From<wasm_bindgen::JsValue> for DomError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        use wasm_bindgen::JsCast;

        if let Some(err) = value.dyn_ref::<js_sys::Error>() {
            return Self::Host(String::from(err.message()));
        }
        Self::Host(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// Which map an unknown key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTarget {
    /// `css` entry. Unknown style keys are skipped.
    Style,
    /// `attributes` entry. Unknown attribute keys are still written.
    Attribute,
}

impl fmt::Display for KeyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Style => f.write_str("style property"),
            Self::Attribute => f.write_str("attribute"),
        }
    }
}

/// A style or attribute key the element kind does not recognize.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("<{kind}>: unknown {target} `{key}` (value: {value:?})")]
pub struct UnknownKey {
    /// Element kind the key was applied to.
    pub kind: String,
    /// Map the key came from.
    pub target: KeyTarget,
    /// The key as supplied by the caller.
    pub key: String,
    /// The stringified value.
    pub value: String,
}
