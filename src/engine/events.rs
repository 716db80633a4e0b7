//! Notifications the engine raises for its host.

use serde::Serialize;

use super::GlobeEngine;
use crate::scene::MarkerId;

/// What resolved a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSource {
    /// A click or tap hit the marker.
    Pick,
    /// A [`SelectMarker`](super::GlobeCommand::SelectMarker) command.
    Command,
    /// A fly-to completed and the camera locked on.
    FlyTo,
}

/// Host-facing notification, drained with
/// [`GlobeEngine::take_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GlobeEvent {
    /// A marker was selected.
    Selected {
        /// Selected marker.
        index: MarkerId,
        /// What resolved it.
        source: SelectionSource,
    },
    /// The camera locked onto a marker; show its detail popup.
    PopupOpened {
        /// Marker the popup describes.
        index: MarkerId,
    },
    /// The lock was released; hide the popup.
    PopupClosed,
}

impl GlobeEngine {
    /// Drain notifications raised since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<GlobeEvent> {
        std::mem::take(&mut self.events)
    }

    pub(super) fn emit(&mut self, event: GlobeEvent) {
        log::debug!("event: {event:?}");
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_tagged() {
        let json = serde_json::to_string(&GlobeEvent::Selected {
            index: MarkerId(4),
            source: SelectionSource::FlyTo,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"selected","index":4,"source":"fly_to"}"#);
        let json = serde_json::to_string(&GlobeEvent::PopupClosed).unwrap();
        assert_eq!(json, r#"{"type":"popup_closed"}"#);
    }
}
