use serde::{Deserialize, Serialize};

use crate::engine::command::GlobeCommand;

/// Engine-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// close_popup = "Escape"
/// reset_view = "Home"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Close the detail popup and release the marker lock.
    ClosePopup,
    /// Return the camera to its startup orbit.
    ResetView,
}

impl KeyAction {
    /// The parameterless command this action triggers.
    #[must_use]
    pub fn to_command(self) -> GlobeCommand {
        match self {
            Self::ClosePopup => GlobeCommand::ClosePopup,
            Self::ResetView => GlobeCommand::ResetView,
        }
    }
}
