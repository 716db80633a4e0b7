use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Markers", inline)]
#[serde(default)]
/// Marker billboard sizing, placement and colors.
pub struct MarkerOptions {
    /// Billboard scale at the reference radius.
    #[schemars(title = "Base Scale", range(min = 0.02, max = 0.3), extend("step" = 0.01))]
    pub base_scale: f32,
    /// Lower bound on the billboard scale.
    #[schemars(title = "Min Scale", range(min = 0.01, max = 0.3), extend("step" = 0.01))]
    pub min_scale: f32,
    /// Upper bound on the billboard scale.
    #[schemars(title = "Max Scale", range(min = 0.01, max = 0.3), extend("step" = 0.01))]
    pub max_scale: f32,
    /// Orbit radius at which the billboard uses `base_scale`.
    #[schemars(skip)]
    pub reference_radius: f32,
    /// Radial multiplier lifting markers off the unit globe surface.
    #[schemars(skip)]
    pub surface_offset: f32,
    /// Color of the selected marker.
    #[schemars(skip)]
    pub highlight_color: [f32; 3],
    /// Color of every other marker.
    #[schemars(skip)]
    pub idle_color: [f32; 3],
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            base_scale: 0.1,
            min_scale: 0.08,
            max_scale: 0.1,
            reference_radius: 2.5,
            surface_offset: 1.02,
            // #e74c3c
            highlight_color: [0.906, 0.298, 0.235],
            idle_color: [1.0, 1.0, 1.0],
        }
    }
}
