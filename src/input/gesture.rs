use glam::Vec2;
use web_time::Instant;

use crate::animation::Velocity;
use crate::options::InputOptions;

/// What the current touch gesture is doing. Decided when the gesture
/// starts and kept until every finger lifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchMode {
    /// No fingers down.
    #[default]
    None,
    /// One-finger orbit.
    Orbit,
    /// Two-finger pinch zoom.
    Pinch,
    /// Anything else (three or more fingers); ignored.
    Ignored,
}

/// One orbit step derived from a pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSample {
    /// Azimuth change.
    pub d_theta: f32,
    /// Polar change.
    pub d_phi: f32,
    /// Velocity estimate to seed inertia with.
    pub velocity: Velocity,
}

/// Tracks drag anchors, sample timing, tap timing and pinch distance.
///
/// Shared between mouse and touch: only one of them drives a drag at a
/// time, and both feed the same sampling math.
#[derive(Debug, Default)]
pub struct GestureState {
    /// Whether a drag (mouse button or one-finger orbit) is in progress.
    pub dragging: bool,
    last_pos: Vec2,
    last_sample_at: Option<Instant>,
    /// Whether the current press has moved past the drag threshold.
    moved: bool,
    /// Whether the last mouse release ended a drag.
    release_was_drag: bool,
    /// Current touch gesture.
    pub touch_mode: TouchMode,
    pinch_distance: f32,
    touch_started_at: Option<Instant>,
    multi_touch: bool,
}

impl GestureState {
    /// Start a drag anchored at `pos`.
    pub fn begin_drag(&mut self, pos: Vec2, at: Instant) {
        self.dragging = true;
        self.last_pos = pos;
        self.last_sample_at = Some(at);
        self.moved = false;
    }

    /// Record a drag sample and convert it to an orbit step.
    ///
    /// Dragging right decreases theta; dragging down decreases phi. The
    /// velocity divides by at least `min_sample_ms`, so sub-frame timestamp
    /// noise cannot spike it.
    pub fn sample(
        &mut self,
        pos: Vec2,
        at: Instant,
        options: &InputOptions,
    ) -> OrbitSample {
        let delta = pos - self.last_pos;
        let threshold = options.drag_threshold_px;
        if delta.length_squared() > threshold * threshold {
            self.moved = true;
        }
        let elapsed_ms = self.last_sample_at.map_or(0.0, |prev| {
            at.saturating_duration_since(prev).as_secs_f32() * 1000.0
        });
        self.last_pos = pos;
        self.last_sample_at = Some(at);

        let d_theta = -delta.x * options.drag_sensitivity;
        let d_phi = -delta.y * options.drag_sensitivity;
        let divisor = elapsed_ms.max(options.min_sample_ms).max(f32::EPSILON);
        OrbitSample {
            d_theta,
            d_phi,
            velocity: Velocity {
                theta: d_theta / divisor,
                phi: d_phi / divisor,
            },
        }
    }

    /// End the mouse drag, remembering whether it moved.
    pub fn end_mouse_drag(&mut self) {
        self.release_was_drag = self.dragging && self.moved;
        self.dragging = false;
    }

    /// Consume the "last release ended a drag" flag for a click.
    pub fn take_release_was_drag(&mut self) -> bool {
        std::mem::take(&mut self.release_was_drag)
    }

    /// A finger touched down; `count` is the number of contacts now active.
    pub fn touch_started(&mut self, count: usize, at: Instant) {
        self.touch_started_at = Some(at);
        if count > 1 {
            self.multi_touch = true;
        }
        if count == 1 {
            self.multi_touch = false;
        }
    }

    /// Enter pinch mode at the given finger spread.
    pub fn begin_pinch(&mut self, spread: f32) {
        self.touch_mode = TouchMode::Pinch;
        self.pinch_distance = spread;
        self.dragging = false;
    }

    /// Radius change for a new finger spread, or `None` when not pinching.
    ///
    /// Fingers moving apart give a negative delta (zoom in).
    pub fn pinch_delta(
        &mut self,
        spread: f32,
        options: &InputOptions,
    ) -> Option<f32> {
        if self.touch_mode != TouchMode::Pinch {
            return None;
        }
        let delta = (self.pinch_distance - spread) * options.pinch_zoom_sensitivity;
        self.pinch_distance = spread;
        Some(delta)
    }

    /// Drop the whole touch gesture without a tap.
    pub fn cancel_touch(&mut self) {
        self.dragging = false;
        self.touch_mode = TouchMode::None;
        self.touch_started_at = None;
        self.multi_touch = false;
        self.moved = false;
    }

    /// A finger lifted. Returns whether the lift counts as a tap.
    ///
    /// A tap must be short, leave no other fingers down, come from a
    /// single-finger gesture, and not have moved.
    pub fn touch_ended(
        &mut self,
        remaining: usize,
        at: Instant,
        options: &InputOptions,
    ) -> bool {
        let is_tap = remaining == 0
            && !self.multi_touch
            && !self.moved
            && self.touch_started_at.is_some_and(|start| {
                at.saturating_duration_since(start).as_secs_f32() * 1000.0
                    <= options.tap_max_ms
            });
        self.dragging = false;
        if remaining == 0 {
            self.touch_mode = TouchMode::None;
            self.touch_started_at = None;
            self.multi_touch = false;
            self.moved = false;
        }
        is_tap
    }
}
