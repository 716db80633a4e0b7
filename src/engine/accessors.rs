//! Read-only query methods for [`GlobeEngine`].

use super::{DriveMode, GlobeEngine};
use crate::animation::{OrbitTransition, TransitionToken, Velocity};
use crate::camera::{Camera, CameraController, CameraUniform, OrbitState};
use crate::options::Options;
use crate::overlay::PopupPlacement;
use crate::scene::{GlobeScene, MarkerId, MarkerInstance};

// ── Camera ──

impl GlobeEngine {
    /// Current camera distance, for scale computations.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.camera_controller.radius()
    }

    /// Current orbit coordinates.
    #[must_use]
    pub fn orbit(&self) -> OrbitState {
        self.camera_controller.orbit()
    }

    /// The derived camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera_controller.camera
    }

    /// Orbit controller (orbit, bounds, viewport, camera).
    #[must_use]
    pub fn camera_controller(&self) -> &CameraController {
        &self.camera_controller
    }

    /// Uniform block for host renderers.
    #[must_use]
    pub fn uniform(&self) -> &CameraUniform {
        &self.camera_controller.uniform
    }

    /// Fling velocity currently coasting the camera.
    #[must_use]
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }
}

// ── Drive mode ──

impl GlobeEngine {
    /// Whether a manual drag owns the orbit.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.mode, DriveMode::Dragging)
    }

    /// The running fly-to, if any.
    #[must_use]
    pub fn transition(&self) -> Option<&OrbitTransition> {
        match &self.mode {
            DriveMode::Animating(transition) => Some(transition),
            _ => None,
        }
    }

    /// Cancellation handle of the running fly-to. Cancelling it stops the
    /// transition on its next step without locking.
    #[must_use]
    pub fn active_token(&self) -> Option<TransitionToken> {
        self.live_token.clone()
    }

    /// Whether the camera is following a marker (and the popup is open).
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self.mode, DriveMode::Locked(_))
    }

    /// The marker the camera follows.
    #[must_use]
    pub fn locked_marker(&self) -> Option<MarkerId> {
        match self.mode {
            DriveMode::Locked(id) => Some(id),
            _ => None,
        }
    }
}

// ── Visual state ──

impl GlobeEngine {
    /// Popup rectangle (surface pixels) while locked.
    #[must_use]
    pub fn popup(&self) -> Option<PopupPlacement> {
        self.popup
    }

    /// Billboard scale shared by every marker.
    #[must_use]
    pub fn marker_scale(&self) -> f32 {
        self.scene.scale()
    }

    /// The highlighted marker.
    #[must_use]
    pub fn highlighted(&self) -> Option<MarkerId> {
        self.scene.highlighted()
    }

    /// Instance data for a billboard pass.
    #[must_use]
    pub fn marker_instances(&self) -> Vec<MarkerInstance> {
        self.scene.instances(&self.options.marker)
    }

    /// The globe and its markers.
    #[must_use]
    pub fn scene(&self) -> &GlobeScene {
        &self.scene
    }

    /// Mutable access to the globe, e.g. for custom marker placement or
    /// dirty-tracking acknowledgement.
    pub fn scene_mut(&mut self) -> &mut GlobeScene {
        &mut self.scene
    }

    /// Options in force.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }
}
