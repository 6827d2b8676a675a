//! Static allow-lists standing in for the browser's "is this key a property"
//! checks.
//!
//! Style keys are validated against the set of CSS properties an SVG
//! element's inline style accepts. Attribute keys are validated against the
//! reflected IDL properties of each element kind. Both lookups are purely
//! advisory: the factory decides what to do with an unknown key.

#[cfg(test)]
#[path = "schema_test.rs"]
mod schema_test;

/// CSS properties accepted on an inline style, in kebab-case, sorted.
const STYLE_PROPERTIES: &[&str] = &[
    "alignment-baseline",
    "animation",
    "background",
    "background-color",
    "baseline-shift",
    "border",
    "border-radius",
    "bottom",
    "clip",
    "clip-path",
    "clip-rule",
    "color",
    "color-interpolation",
    "color-interpolation-filters",
    "cursor",
    "direction",
    "display",
    "dominant-baseline",
    "fill",
    "fill-opacity",
    "fill-rule",
    "filter",
    "float",
    "flood-color",
    "flood-opacity",
    "font",
    "font-family",
    "font-feature-settings",
    "font-kerning",
    "font-size",
    "font-size-adjust",
    "font-stretch",
    "font-style",
    "font-variant",
    "font-weight",
    "height",
    "image-rendering",
    "left",
    "letter-spacing",
    "lighting-color",
    "line-height",
    "margin",
    "marker",
    "marker-end",
    "marker-mid",
    "marker-start",
    "mask",
    "max-height",
    "max-width",
    "min-height",
    "min-width",
    "mix-blend-mode",
    "opacity",
    "outline",
    "overflow",
    "padding",
    "paint-order",
    "pointer-events",
    "position",
    "right",
    "shape-rendering",
    "stop-color",
    "stop-opacity",
    "stroke",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "text-anchor",
    "text-decoration",
    "text-overflow",
    "text-rendering",
    "text-shadow",
    "text-transform",
    "top",
    "transform",
    "transform-box",
    "transform-origin",
    "transition",
    "unicode-bidi",
    "user-select",
    "vector-effect",
    "visibility",
    "white-space",
    "width",
    "word-spacing",
    "writing-mode",
    "z-index",
];

/// Properties every SVG element instance carries (`Element`, `Node` and
/// `SVGElement` members).
const ELEMENT_PROPERTIES: &[&str] = &[
    "attributes",
    "autofocus",
    "childNodes",
    "children",
    "classList",
    "className",
    "dataset",
    "firstChild",
    "id",
    "innerHTML",
    "lang",
    "lastChild",
    "localName",
    "namespaceURI",
    "nodeName",
    "nodeType",
    "nonce",
    "outerHTML",
    "ownerDocument",
    "ownerSVGElement",
    "parentElement",
    "parentNode",
    "part",
    "prefix",
    "shadowRoot",
    "slot",
    "style",
    "tabIndex",
    "tagName",
    "textContent",
    "viewportElement",
];

/// Global event handler properties (`onclick`, ...), without the `on` prefix.
const EVENT_HANDLERS: &[&str] = &[
    "abort",
    "animationend",
    "animationiteration",
    "animationstart",
    "auxclick",
    "blur",
    "cancel",
    "change",
    "click",
    "close",
    "contextmenu",
    "copy",
    "cut",
    "dblclick",
    "drag",
    "dragend",
    "dragenter",
    "dragleave",
    "dragover",
    "dragstart",
    "drop",
    "error",
    "focus",
    "focusin",
    "focusout",
    "input",
    "keydown",
    "keypress",
    "keyup",
    "load",
    "mousedown",
    "mouseenter",
    "mouseleave",
    "mousemove",
    "mouseout",
    "mouseover",
    "mouseup",
    "paste",
    "pointercancel",
    "pointerdown",
    "pointerenter",
    "pointerleave",
    "pointermove",
    "pointerout",
    "pointerover",
    "pointerup",
    "resize",
    "scroll",
    "select",
    "touchcancel",
    "touchend",
    "touchmove",
    "touchstart",
    "transitionend",
    "wheel",
];

/// Properties added by `SVGGraphicsElement`.
const GRAPHICS_PROPERTIES: &[&str] = &["requiredExtensions", "systemLanguage", "transform"];

const GEOMETRY_PROPERTIES: &[&str] = &["pathLength"];

/// Kind-specific reflected properties, on top of the common ones.
fn kind_properties(kind: &str) -> &'static [&'static str] {
    match kind {
        "svg" => &["height", "preserveAspectRatio", "viewBox", "width", "x", "y"],
        "clipPath" => &["clipPathUnits", "transform"],
        "rect" => &["height", "rx", "ry", "width", "x", "y"],
        "foreignObject" => &["height", "width", "x", "y"],
        "image" | "use" => &["height", "href", "preserveAspectRatio", "width", "x", "y"],
        "a" => &["download", "href", "hreflang", "ping", "referrerPolicy", "rel", "relList", "target", "text", "type"],
        "line" => &["x1", "x2", "y1", "y2"],
        "circle" => &["cx", "cy", "r"],
        "ellipse" => &["cx", "cy", "rx", "ry"],
        "polyline" | "polygon" => &["animatedPoints", "points"],
        "text" | "tspan" => &["dx", "dy", "lengthAdjust", "rotate", "textLength", "x", "y"],
        "title" | "desc" => &["text"],
        _ => &[],
    }
}

fn is_graphics(kind: &str) -> bool {
    !matches!(kind, "title" | "desc" | "clipPath" | "mask" | "linearGradient" | "radialGradient" | "stop" | "style")
}

fn is_geometry(kind: &str) -> bool {
    matches!(kind, "rect" | "line" | "path" | "circle" | "ellipse" | "polyline" | "polygon")
}

/// Convert a camelCase style key (`fontSize`) to its kebab-case property name.
///
/// Keys that are already kebab-case pass through unchanged. `cssFloat` maps to
/// `float`.
#[must_use]
pub fn kebab_case(key: &str) -> String {
    if key == "cssFloat" {
        return "float".to_owned();
    }
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Resolve a style key to the property name to write, or `None` if the key
/// is not a recognized style property.
#[must_use]
pub fn style_property(key: &str) -> Option<String> {
    let name = kebab_case(key);
    STYLE_PROPERTIES
        .binary_search(&name.as_str())
        .is_ok()
        .then_some(name)
}

/// Whether `name` is an `on<event>` handler property. Handler properties
/// are lowercase, so `onClick` is not one.
fn is_event_handler(name: &str) -> bool {
    name.strip_prefix("on")
        .is_some_and(|event| EVENT_HANDLERS.binary_search(&event).is_ok())
}

/// Whether `name` is already a property of a `kind` element instance.
#[must_use]
pub fn is_element_property(kind: &str, name: &str) -> bool {
    ELEMENT_PROPERTIES.contains(&name)
        || is_event_handler(name)
        || kind_properties(kind).contains(&name)
        || (is_graphics(kind) && GRAPHICS_PROPERTIES.contains(&name))
        || (is_geometry(kind) && GEOMETRY_PROPERTIES.contains(&name))
}
