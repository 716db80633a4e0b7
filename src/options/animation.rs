use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Fly-to transition timing.
pub struct AnimationOptions {
    /// Duration of a fly-to transition in milliseconds.
    #[schemars(title = "Fly-to Duration", range(min = 100, max = 3000), extend("step" = 50))]
    pub fly_to_ms: u64,
    /// Easing curve applied to fly-to progress.
    #[schemars(skip)]
    pub easing: EasingFunction,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            fly_to_ms: 700,
            easing: EasingFunction::QuadraticInOut,
        }
    }
}
