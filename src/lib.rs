//! SVG element factory and off-screen text measurement.
//!
//! Charts and dashboards build their markup through [`factory::ElementFactory`]
//! and size labels through [`measure::TextMeasurer`]. Both are generic over the
//! host capabilities in [`dom`], so the same code runs against the browser
//! (`web` feature) or the headless [`memory`] backend.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`factory`] | Create SVG elements with class, text, styles and attributes |
//! | [`measure`] | Debounced hidden container for bounding-box measurement |
//! | [`options`] | [`options::ElementOptions`] and the attribute/style maps |
//! | [`schema`] | Allow-lists of known style properties and element properties |
//! | [`dom`] | Host capability traits ([`dom::Dom`], [`dom::Timers`]) |
//! | [`memory`] | Headless tree and virtual clock |
//! | `web` | `web-sys` / `gloo-timers` backend (feature `web`) |
//! | `logging` | Console logger setup (feature `web`) |
//! | [`config`] | Measurement container configuration |
//! | [`error`] | Host errors and unknown-key diagnostics |
//! | [`consts`] | Namespaces, delays and container defaults |

pub mod config;
pub mod consts;
pub mod dom;
pub mod error;
pub mod factory;
#[cfg(feature = "web")]
pub mod logging;
pub mod measure;
pub mod memory;
pub mod options;
pub mod schema;
#[cfg(feature = "web")]
pub mod web;

pub use dom::{BBox, Dom, Timers};
pub use error::{DomError, KeyTarget, UnknownKey};
pub use factory::{Created, ElementFactory};
pub use measure::TextMeasurer;
pub use options::{AttributeMap, ElementOptions, StyleMap};
