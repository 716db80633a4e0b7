use std::f32::consts::{FRAC_PI_2, PI};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Orbit", inline)]
#[serde(default)]
/// Orbit defaults, bounds and inertia parameters.
pub struct OrbitOptions {
    /// Camera distance from the globe center at startup.
    #[schemars(title = "Start Radius", range(min = 1.1, max = 5.0), extend("step" = 0.1))]
    pub radius: f32,
    /// Closest allowed camera distance.
    #[schemars(skip)]
    pub min_radius: f32,
    /// Farthest allowed camera distance.
    #[schemars(skip)]
    pub max_radius: f32,
    /// Azimuth at startup (radians).
    #[schemars(skip)]
    pub theta: f32,
    /// Polar angle at startup (radians).
    #[schemars(skip)]
    pub phi: f32,
    /// Smallest polar angle; keeps the camera off the north pole.
    #[schemars(skip)]
    pub min_phi: f32,
    /// Largest polar angle; keeps the camera off the south pole.
    #[schemars(skip)]
    pub max_phi: f32,
    /// Per-frame velocity multiplier applied while coasting.
    #[schemars(title = "Damping", range(min = 0.5, max = 0.99), extend("step" = 0.01))]
    pub damping: f32,
    /// Velocity components below this magnitude snap to zero.
    #[schemars(skip)]
    pub velocity_epsilon: f32,
}

impl Default for OrbitOptions {
    fn default() -> Self {
        Self {
            radius: 2.5,
            min_radius: 1.1,
            max_radius: 5.0,
            theta: 0.0,
            phi: FRAC_PI_2,
            min_phi: 0.05,
            max_phi: PI - 0.05,
            damping: 0.95,
            velocity_epsilon: 0.000_01,
        }
    }
}
