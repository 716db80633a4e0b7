//! Centralized globe options with TOML preset support.
//!
//! Every tunable constant (orbit bounds, inertia, input sensitivities,
//! fly-to timing, marker sizing, popup placement, keybindings) lives here.
//! Options serialize to/from TOML, and the UI-exposed subset is described
//! by a JSON Schema for host-side settings panels.

mod animation;
mod camera;
mod globe;
mod input;
mod keybindings;
mod marker;
mod orbit;
mod popup;

use std::path::Path;

pub use animation::AnimationOptions;
pub use camera::CameraOptions;
pub use globe::GlobeOptions;
pub use input::InputOptions;
pub use keybindings::KeybindingOptions;
pub use marker::MarkerOptions;
pub use orbit::OrbitOptions;
pub use popup::PopupOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::GlobeError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[orbit]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Orbit bounds, startup pose and inertia.
    pub orbit: OrbitOptions,
    /// Pointer, touch and wheel handling.
    pub input: InputOptions,
    /// Fly-to transition timing.
    pub animation: AnimationOptions,
    /// Marker billboard sizing and colors.
    pub marker: MarkerOptions,
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Detail popup placement.
    pub popup: PopupOptions,
    /// Ambient globe spin.
    pub globe: GlobeOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// The UI schema rendered as a JSON string.
    pub fn schema_json() -> Result<String, GlobeError> {
        serde_json::to_string(&Self::json_schema())
            .map_err(|e| GlobeError::OptionsParse(e.to_string()))
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, GlobeError> {
        toml::from_str(content)
            .map_err(|e| GlobeError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, GlobeError> {
        let content = std::fs::read_to_string(path).map_err(GlobeError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), GlobeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GlobeError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(GlobeError::Io)?;
        }
        std::fs::write(path, content).map_err(GlobeError::Io)
    }
}
