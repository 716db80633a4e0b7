//! The globe engine: orbit camera, markers, and the interaction state
//! machine that decides which control source drives the camera.
//!
//! Split across files as separate `impl GlobeEngine` blocks: input
//! dispatch and command execution, selection and locking, events, and
//! read-only accessors.

mod accessors;
pub mod command;
mod events;
mod input;
mod selection;

use std::time::Duration;

pub use command::GlobeCommand;
pub use events::{GlobeEvent, SelectionSource};
use web_time::Instant;

use crate::animation::{OrbitTransition, StepOutcome, TransitionToken, Velocity};
use crate::camera::{CameraController, OrbitState, Viewport};
use crate::input::InputProcessor;
use crate::options::Options;
use crate::overlay::{PopupLayout, PopupPlacement};
use crate::picking::MarkerPicker;
use crate::scene::{GlobeScene, Marker, MarkerId};

/// Callback fired after every orbit mutation.
pub type CameraHook = Box<dyn FnMut(&CameraController)>;

/// Which control source owns the orbit angles.
///
/// Exactly one holds at a time. Priority when sources compete:
/// drag > transition > lock > inertia.
#[derive(Debug, Default)]
pub(crate) enum DriveMode {
    /// Inertia (possibly zero) coasts the camera.
    #[default]
    Idle,
    /// A pointer or finger is orbiting the camera.
    Dragging,
    /// A fly-to transition is running.
    Animating(OrbitTransition),
    /// The camera follows a marker every frame.
    Locked(MarkerId),
}

/// The orbit camera and interaction coordinator for a marker globe.
///
/// Owns the orbit state, the marker table, fling inertia, the live fly-to
/// transition and the marker lock, and enforces that only one of them
/// drives the camera at a time.
///
/// # Frame loop
///
/// Forward input with [`handle_input`](Self::handle_input) (or issue
/// [`GlobeCommand`]s through [`execute`](Self::execute)) as it arrives, then
/// call [`update`](Self::update) once per displayed frame. Read the camera
/// with [`camera`](Self::camera) / [`uniform`](Self::uniform) and drain
/// notifications with [`take_events`](Self::take_events).
pub struct GlobeEngine {
    options: Options,
    /// Orbit state, derived camera, and render surface.
    camera_controller: CameraController,
    scene: GlobeScene,
    processor: InputProcessor,
    picker: MarkerPicker,
    popup_layout: PopupLayout,
    /// Current popup rectangle while a marker is locked.
    popup: Option<PopupPlacement>,
    velocity: Velocity,
    mode: DriveMode,
    /// Token of the transition allowed to complete; cancelled on supersede.
    live_token: Option<TransitionToken>,
    events: Vec<GlobeEvent>,
    camera_hook: Option<CameraHook>,
}

// =============================================================================
// Core
// =============================================================================

impl GlobeEngine {
    /// Engine at the configured startup orbit with no markers.
    #[must_use]
    pub fn new(options: Options, viewport: Viewport) -> Self {
        let camera_controller =
            CameraController::new(&options.orbit, &options.camera, viewport);
        let mut scene = GlobeScene::new(&options.globe, &options.marker);
        scene.refresh_scale(camera_controller.radius(), &options.marker);
        log::info!(
            "globe engine created: radius {:.2}, {}x{} viewport",
            camera_controller.radius(),
            viewport.width,
            viewport.height
        );
        Self {
            processor: InputProcessor::new(options.input.clone()),
            camera_controller,
            scene,
            picker: MarkerPicker::default(),
            popup_layout: PopupLayout::default(),
            popup: None,
            velocity: Velocity::ZERO,
            mode: DriveMode::Idle,
            live_token: None,
            events: Vec::new(),
            camera_hook: None,
            options,
        }
    }

    /// Advance one frame.
    ///
    /// Order: globe spin, then the active drive mode (transition step, lock
    /// tracking, or inertia), then camera pose, marker scale, popup
    /// placement, and finally the camera hook.
    pub fn update(&mut self, now: Instant) {
        self.scene.advance_spin();
        self.drive(now);
        self.camera_controller.update_camera_pos();
        self.refresh_dependents();
    }

    fn drive(&mut self, now: Instant) {
        match &mut self.mode {
            DriveMode::Dragging => {}
            DriveMode::Animating(transition) => {
                match transition.step(&mut self.camera_controller, now) {
                    StepOutcome::Running => {}
                    StepOutcome::Cancelled => {
                        log::debug!("fly-to cancelled externally");
                        self.live_token = None;
                        self.mode = DriveMode::Idle;
                    }
                    StepOutcome::Completed(id) => {
                        self.live_token = None;
                        self.lock_onto(id);
                        self.track_lock();
                    }
                }
            }
            DriveMode::Locked(_) => self.track_lock(),
            DriveMode::Idle => {
                if !self.velocity.is_zero() {
                    let (d_theta, d_phi) = self.velocity.advance(
                        self.options.orbit.damping,
                        self.options.orbit.velocity_epsilon,
                    );
                    self.camera_controller.rotate_by(d_theta, d_phi);
                }
            }
        }
    }

    /// Point the camera at the locked marker's current world position.
    fn track_lock(&mut self) {
        let DriveMode::Locked(id) = self.mode else {
            return;
        };
        let Some(world) = self.scene.world_position(id) else {
            log::warn!("locked marker {} vanished; releasing lock", id.0);
            self.release_lock();
            return;
        };
        let (theta, phi) = OrbitState::angles_toward(world);
        self.camera_controller.set_angles(theta, phi);
    }

    /// Re-derive everything that follows the camera: marker scale, uniform
    /// extras, popup placement. Then fire the camera hook.
    fn refresh_dependents(&mut self) {
        let radius = self.camera_controller.radius();
        self.scene.refresh_scale(radius, &self.options.marker);
        let uniform = &mut self.camera_controller.uniform;
        uniform.marker_scale = self.scene.scale();
        uniform.locked_marker = match self.mode {
            DriveMode::Locked(id) => i32::try_from(id.0).unwrap_or(-1),
            _ => -1,
        };

        self.popup = match self.mode {
            DriveMode::Locked(id) => self
                .scene
                .world_position(id)
                .and_then(|world| {
                    self.popup_layout.place(
                        &self.camera_controller,
                        world,
                        &self.options.popup,
                    )
                })
                .or(self.popup),
            _ => None,
        };

        if let Some(hook) = self.camera_hook.as_mut() {
            hook(&self.camera_controller);
        }
    }

    /// Cancel the live transition, if any.
    fn cancel_transition(&mut self) {
        if let Some(token) = self.live_token.take() {
            token.cancel();
        }
        if matches!(self.mode, DriveMode::Animating(_)) {
            self.mode = DriveMode::Idle;
        }
    }

    /// Leave locked mode, announcing the popup close.
    fn release_lock(&mut self) {
        if matches!(self.mode, DriveMode::Locked(_)) {
            self.mode = DriveMode::Idle;
            self.popup = None;
            self.emit(GlobeEvent::PopupClosed);
        }
    }

    fn fly_duration(&self) -> Duration {
        Duration::from_millis(self.options.animation.fly_to_ms)
    }

    /// Insert or replace a marker at a latitude/longitude (degrees).
    pub fn add_marker(&mut self, id: MarkerId, lat: f32, lng: f32) {
        let marker = Marker::at_lat_lng(
            id,
            lat,
            lng,
            self.options.marker.surface_offset,
        );
        let _ = self.scene.insert(marker);
    }

    /// Replace every marker, releasing any lock or fly-to.
    pub fn set_markers(
        &mut self,
        markers: impl IntoIterator<Item = (MarkerId, f32, f32)>,
    ) {
        self.cancel_transition();
        self.release_lock();
        self.scene.clear();
        for (id, lat, lng) in markers {
            self.add_marker(id, lat, lng);
        }
        log::info!("loaded {} markers", self.scene.len());
    }

    /// Track a new render surface rectangle.
    pub fn resize(&mut self, viewport: Viewport) {
        self.camera_controller.resize(viewport);
        self.refresh_dependents();
    }

    /// Install the callback fired after every orbit mutation.
    pub fn set_camera_hook(
        &mut self,
        hook: impl FnMut(&CameraController) + 'static,
    ) {
        self.camera_hook = Some(Box::new(hook));
    }

    /// Record the popup's rendered size (`None` uses the fallback).
    pub fn set_popup_size(&mut self, size: Option<glam::Vec2>) {
        self.popup_layout.set_measured_size(size);
    }

    /// Replace options and push them to every subsystem.
    ///
    /// The current orbit is kept, clamped into the new bounds.
    pub fn set_options(&mut self, options: Options) {
        self.processor.set_options(options.input.clone());
        self.scene.set_spin_per_frame(options.globe.spin_per_frame);
        let orbit = self.camera_controller.orbit();
        let viewport = self.camera_controller.viewport();
        self.camera_controller =
            CameraController::new(&options.orbit, &options.camera, viewport);
        self.camera_controller.set_orbit(orbit);
        self.options = options;
        self.refresh_dependents();
    }
}
