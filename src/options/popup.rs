use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Popup", inline)]
#[serde(default)]
/// Placement of the detail popup relative to the locked marker.
pub struct PopupOptions {
    /// Horizontal offset from the projected marker (px, right is positive).
    #[schemars(title = "Offset X", range(min = -400.0, max = 400.0), extend("step" = 10.0))]
    pub offset_x: f32,
    /// Vertical offset from the projected marker (px, down is positive).
    #[schemars(title = "Offset Y", range(min = -400.0, max = 400.0), extend("step" = 10.0))]
    pub offset_y: f32,
    /// Minimum gap between the popup and the viewport edge (px).
    #[schemars(skip)]
    pub margin: f32,
    /// Popup width used until the host reports a measured size (px).
    #[schemars(skip)]
    pub fallback_width: f32,
    /// Popup height used until the host reports a measured size (px).
    #[schemars(skip)]
    pub fallback_height: f32,
}

impl Default for PopupOptions {
    fn default() -> Self {
        Self {
            offset_x: 180.0,
            offset_y: -200.0,
            margin: 10.0,
            fallback_width: 320.0,
            fallback_height: 220.0,
        }
    }
}
