use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Keyboard bindings mapping globe actions to DOM/winit key codes.
pub struct KeybindingOptions {
    /// Maps action → key string (e.g. `ClosePopup` → `"Escape"`).
    pub bindings: HashMap<KeyAction, String>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        Self {
            bindings: HashMap::from([
                (KeyAction::ClosePopup, "Escape".into()),
                (KeyAction::ResetView, "Home".into()),
            ]),
        }
    }
}

impl KeybindingOptions {
    /// Look up the action bound to a key string.
    ///
    /// Scans the binding table directly so edits to `bindings` are seen
    /// immediately.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.bindings
            .iter()
            .find(|(_, bound)| bound.as_str() == key)
            .map(|(action, _)| *action)
    }

    /// Bind `action` to `key`, replacing any previous key for that action.
    pub fn bind(&mut self, action: KeyAction, key: impl Into<String>) {
        let _ = self.bindings.insert(action, key.into());
    }
}
