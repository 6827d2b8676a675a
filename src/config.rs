//! Measurement container configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{CLEANUP_DELAY_MS, MEASURE_CONTAINER_CLASS, MEASURE_CONTAINER_WIDTH_PX, MEASURE_CONTAINER_Z_INDEX};

/// Tunables for [`crate::measure::TextMeasurer`].
///
/// Every field is optional when deserializing; missing fields take the
/// defaults from [`crate::consts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MeasureConfig {
    /// Quiet period after the last measurement before the container is detached.
    pub cleanup_delay_ms: u32,
    /// Marker class added to the container.
    pub container_class: String,
    /// Inline width of the container, in CSS pixels.
    pub container_width_px: u32,
    /// Inline `z-index` of the container.
    pub z_index: i32,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            cleanup_delay_ms: CLEANUP_DELAY_MS,
            container_class: MEASURE_CONTAINER_CLASS.to_owned(),
            container_width_px: MEASURE_CONTAINER_WIDTH_PX,
            z_index: MEASURE_CONTAINER_Z_INDEX,
        }
    }
}

impl MeasureConfig {
    /// Inline style declarations applied to a freshly created container.
    #[must_use]
    pub fn container_styles(&self) -> Vec<(&'static str, String)> {
        vec![
            ("position", "absolute".to_owned()),
            ("top", "0".to_owned()),
            ("left", "0".to_owned()),
            ("visibility", "hidden".to_owned()),
            ("z-index", self.z_index.to_string()),
            ("width", format!("{}px", self.container_width_px)),
        ]
    }
}
