//! Picking, fly-to requests, and marker lock for [`GlobeEngine`].

use glam::Vec2;

use super::{DriveMode, GlobeEngine, GlobeEvent, SelectionSource};
use crate::animation::{OrbitTransition, Velocity};
use crate::scene::MarkerId;

impl GlobeEngine {
    /// Marker under a client-space point, ignoring points inside the open
    /// popup.
    #[must_use]
    pub fn pick(&self, pos: Vec2) -> Option<MarkerId> {
        let viewport = self.camera_controller.viewport();
        if self
            .popup
            .is_some_and(|popup| popup.contains_client(pos, &viewport))
        {
            log::debug!("pick inside popup ignored");
            return None;
        }
        self.picker.pick(
            &self.camera_controller.camera,
            &viewport,
            &self.scene,
            pos,
        )
    }

    /// Highlight a marker and start a fly-to toward it.
    ///
    /// Supersedes any running fly-to and releases any lock. Returns `false`
    /// (and changes nothing) for unknown ids or while a drag is active.
    pub fn select_marker(&mut self, id: MarkerId, source: SelectionSource) -> bool {
        let Some(world) = self.scene.world_position(id) else {
            log::debug!("select: no marker with index {}", id.0);
            return false;
        };
        if matches!(self.mode, DriveMode::Dragging) {
            log::debug!("select: drag in progress, ignoring marker {}", id.0);
            return false;
        }

        self.cancel_transition();
        self.release_lock();
        self.velocity = Velocity::ZERO;
        self.scene.set_highlight(Some(id));

        let bounds = self.camera_controller.bounds();
        let transition = OrbitTransition::new(
            self.camera_controller.orbit(),
            world,
            id,
            move |phi| bounds.clamp_phi(phi),
            self.fly_duration(),
            self.options.animation.easing,
        );
        self.live_token = Some(transition.token());
        self.mode = DriveMode::Animating(transition);
        self.emit(GlobeEvent::Selected { index: id, source });
        true
    }

    /// Enter locked mode on a marker and open its popup.
    pub(super) fn lock_onto(&mut self, id: MarkerId) {
        if !self.scene.contains(id) {
            log::debug!("lock: marker {} no longer exists", id.0);
            self.mode = DriveMode::Idle;
            return;
        }
        log::info!("locked onto marker {}", id.0);
        self.velocity = Velocity::ZERO;
        self.mode = DriveMode::Locked(id);
        self.emit(GlobeEvent::Selected {
            index: id,
            source: SelectionSource::FlyTo,
        });
        self.emit(GlobeEvent::PopupOpened { index: id });
    }
}
