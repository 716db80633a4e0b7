//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press, a
//! pointer gesture, a sidebar click or a programmatic call, is represented
//! as a `GlobeCommand`. Consumers construct commands and pass them to
//! [`GlobeEngine::execute`](super::GlobeEngine::execute).

use glam::Vec2;

use crate::animation::Velocity;
use crate::scene::MarkerId;

/// A discrete or parameterized operation the engine can perform.
///
/// ```ignore
/// engine.execute(GlobeCommand::SelectMarker { id: MarkerId(3) });
/// engine.execute(GlobeCommand::ZoomBy { delta: 0.2 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlobeCommand {
    // ── Orbit ───────────────────────────────────────────────────────
    /// Take manual control: cancel any fly-to, release the lock, stop
    /// inertia.
    BeginDrag,

    /// Rotate by angle deltas while dragging.
    OrbitBy {
        /// Azimuth change (radians).
        d_theta: f32,
        /// Polar change (radians).
        d_phi: f32,
        /// Velocity estimate for the release fling.
        velocity: Velocity,
    },

    /// Release manual control.
    EndDrag {
        /// Keep the last velocity as an inertia seed.
        fling: bool,
    },

    /// Change the camera distance (positive = farther).
    ZoomBy {
        /// Radius change.
        delta: f32,
    },

    /// Return to the configured startup orbit.
    ResetView,

    // ── Selection ───────────────────────────────────────────────────
    /// Pick the marker under a client-space point and fly to it.
    Pick {
        /// Client position.
        pos: Vec2,
    },

    /// Fly to a marker by id (e.g. from a sidebar list).
    SelectMarker {
        /// Marker to fly to.
        id: MarkerId,
    },

    /// Close the detail popup and release the lock.
    ClosePopup,
}
