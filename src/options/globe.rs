use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Globe", inline)]
#[serde(default)]
/// Ambient globe motion.
pub struct GlobeOptions {
    /// Rotation about +Y applied every frame (radians).
    #[schemars(title = "Spin Speed", range(min = 0.0, max = 0.01), extend("step" = 0.0005))]
    pub spin_per_frame: f32,
}

impl Default for GlobeOptions {
    fn default() -> Self {
        Self {
            spin_per_frame: 0.0005,
        }
    }
}
