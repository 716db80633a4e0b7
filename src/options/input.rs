use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Input", inline)]
#[serde(default)]
/// Pointer, touch and wheel sensitivities plus tap classification.
pub struct InputOptions {
    /// Radians of orbit per pixel of drag.
    #[schemars(title = "Drag Sensitivity", range(min = 0.001, max = 0.02), extend("step" = 0.001))]
    pub drag_sensitivity: f32,
    /// Radius change per unit of wheel delta.
    #[schemars(title = "Wheel Zoom", range(min = 0.0005, max = 0.005), extend("step" = 0.0005))]
    pub wheel_zoom_sensitivity: f32,
    /// Radius change per pixel of pinch distance change.
    #[schemars(title = "Pinch Zoom", range(min = 0.001, max = 0.02), extend("step" = 0.001))]
    pub pinch_zoom_sensitivity: f32,
    /// Floor on the elapsed time used for velocity estimates (ms).
    #[schemars(skip)]
    pub min_sample_ms: f32,
    /// Touches held longer than this are not taps (ms).
    #[schemars(skip)]
    pub tap_max_ms: f32,
    /// Moves longer than this (px) turn a press into a drag.
    #[schemars(skip)]
    pub drag_threshold_px: f32,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.005,
            wheel_zoom_sensitivity: 0.0015,
            pinch_zoom_sensitivity: 0.005,
            min_sample_ms: 16.0,
            tap_max_ms: 300.0,
            drag_threshold_px: 1.0,
        }
    }
}
