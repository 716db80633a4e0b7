//! Input dispatch and command execution for [`GlobeEngine`].

use super::{DriveMode, GlobeCommand, GlobeEngine, SelectionSource};
use crate::animation::Velocity;
use crate::input::InputEvent;

// ── Unified input handler ──

impl GlobeEngine {
    /// Process a platform-agnostic input event.
    ///
    /// The input processor turns the event into zero or more commands,
    /// which run to completion before this returns. Presses and clicks
    /// inside the open popup are dropped.
    ///
    /// # Example
    ///
    /// ```ignore
    /// engine.handle_input(InputEvent::Wheel { delta_y: 120.0 });
    /// ```
    pub fn handle_input(&mut self, event: InputEvent) {
        if self.lands_on_popup(event) {
            log::debug!("press on the popup ignored");
            return;
        }
        for command in self.processor.handle_event(event) {
            self.execute(command);
        }
    }

    /// Whether a press or click falls inside the open popup. Such input
    /// belongs to the popup and must neither start a drag (which would
    /// close it) nor pick through it.
    fn lands_on_popup(&self, event: InputEvent) -> bool {
        let pos = match event {
            InputEvent::PointerDown { pos, .. } | InputEvent::Click { pos } => {
                Some(pos)
            }
            InputEvent::TouchStart { touches, .. } if touches.count() == 1 => {
                touches.first()
            }
            _ => None,
        };
        let viewport = self.camera_controller.viewport();
        pos.zip(self.popup)
            .is_some_and(|(pos, popup)| popup.contains_client(pos, &viewport))
    }

    /// Look up a key press in the keybinding table and execute its
    /// command. Returns whether the key was bound.
    pub fn handle_key(&mut self, key: &str) -> bool {
        let Some(command) =
            self.processor.handle_key_press(key, &self.options.keybindings)
        else {
            return false;
        };
        self.execute(command);
        true
    }

    /// Feed a `winit` window event through `adapter`.
    ///
    /// Handles pointer, wheel, touch, keyboard and resize events. Returns
    /// whether the event was consumed.
    #[cfg(feature = "viewer")]
    pub fn handle_window_event(
        &mut self,
        adapter: &mut crate::input::winit::WinitInputAdapter,
        event: &winit::event::WindowEvent,
        scale_factor: f64,
        now: web_time::Instant,
    ) -> bool {
        use winit::event::WindowEvent;
        match event {
            WindowEvent::Resized(size) => {
                let scale = scale_factor.max(f64::EPSILON);
                #[allow(clippy::cast_possible_truncation)]
                let width = (f64::from(size.width) / scale) as f32;
                #[allow(clippy::cast_possible_truncation)]
                let height = (f64::from(size.height) / scale) as f32;
                self.resize(crate::camera::Viewport::sized(width, height));
                true
            }
            WindowEvent::KeyboardInput { event, .. } => {
                crate::input::winit::key_string(event)
                    .is_some_and(|key| self.handle_key(&key))
            }
            _ => {
                let events = adapter.convert(event, scale_factor, now);
                let consumed = !events.is_empty();
                for input in events {
                    self.handle_input(input);
                }
                consumed
            }
        }
    }
}

// ── Command execution ──

impl GlobeEngine {
    /// Execute one command.
    ///
    /// Commands never fail: ones that do not apply in the current mode
    /// (an orbit step outside a drag, a selection of an unknown marker)
    /// are ignored.
    pub fn execute(&mut self, command: GlobeCommand) {
        match command {
            GlobeCommand::BeginDrag => self.begin_drag(),
            GlobeCommand::OrbitBy {
                d_theta,
                d_phi,
                velocity,
            } => {
                if !matches!(self.mode, DriveMode::Dragging) {
                    log::debug!("orbit step outside a drag ignored");
                    return;
                }
                self.camera_controller.rotate_by(d_theta, d_phi);
                self.velocity = velocity;
                self.refresh_dependents();
            }
            GlobeCommand::EndDrag { fling } => {
                if !matches!(self.mode, DriveMode::Dragging) {
                    return;
                }
                self.mode = DriveMode::Idle;
                if !fling {
                    self.velocity = Velocity::ZERO;
                }
            }
            GlobeCommand::ZoomBy { delta } => {
                if !delta.is_finite() {
                    return;
                }
                self.camera_controller.zoom_by(delta);
                self.refresh_dependents();
            }
            GlobeCommand::ResetView => self.reset_view(),
            GlobeCommand::Pick { pos } => {
                if let Some(id) = self.pick(pos) {
                    let _ = self.select_marker(id, SelectionSource::Pick);
                }
            }
            GlobeCommand::SelectMarker { id } => {
                let _ = self.select_marker(id, SelectionSource::Command);
            }
            GlobeCommand::ClosePopup => {
                self.release_lock();
                self.refresh_dependents();
            }
        }
    }

    /// Manual control wins over everything: cancel the fly-to, drop the
    /// lock, stop coasting.
    fn begin_drag(&mut self) {
        self.cancel_transition();
        self.release_lock();
        self.velocity = Velocity::ZERO;
        self.mode = DriveMode::Dragging;
    }

    fn reset_view(&mut self) {
        self.cancel_transition();
        self.release_lock();
        self.velocity = Velocity::ZERO;
        self.mode = DriveMode::Idle;
        self.scene.set_highlight(None);
        self.camera_controller.reset(&self.options.orbit);
        self.refresh_dependents();
        log::info!("view reset");
    }
}
