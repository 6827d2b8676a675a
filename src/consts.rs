//! Shared constants for the svgdom crate.

// ── Namespaces ──────────────────────────────────────────────────

/// Namespace URI every element built by the factory is created in.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

// ── Measurement container ───────────────────────────────────────

/// Quiet period after the last measurement before the container is detached.
pub const CLEANUP_DELAY_MS: u32 = 500;

/// Marker class carried by the off-screen measurement container.
pub const MEASURE_CONTAINER_CLASS: &str = "svgdom-measure-tmp";

/// Width of the measurement container, large enough that text never wraps.
pub const MEASURE_CONTAINER_WIDTH_PX: u32 = 5000;

/// Stacking order of the measurement container.
pub const MEASURE_CONTAINER_Z_INDEX: i32 = 9999;

/// Tag of the measurement container. Text must sit under an `<svg>` root to lay out.
pub const MEASURE_CONTAINER_TAG: &str = "svg";

// ── Styles ──────────────────────────────────────────────────────

/// Style property neutralized on every measured node.
pub const TEXT_SHADOW: &str = "text-shadow";

/// Zero-extent shadow written over whatever the node carried.
pub const NEUTRAL_TEXT_SHADOW: &str = "0 0 0 transparent";
