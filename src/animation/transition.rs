//! Cancellable fly-to transitions between orbit angles.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use web_time::Instant;

use super::easing::EasingFunction;
use crate::camera::{shortest_angle_delta, CameraController, OrbitState};
use crate::scene::MarkerId;

/// Cancellation handle shared between a transition and whoever may need to
/// stop it.
///
/// Cloning shares the flag. Once cancelled a token stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct TransitionToken(Rc<Cell<bool>>);

impl TransitionToken {
    /// Fresh, live token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the owning transition as superseded.
    pub fn cancel(&self) {
        self.0.set(true);
    }

    /// Whether [`cancel`](Self::cancel) has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Result of advancing a transition by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The token was cancelled; nothing was mutated.
    Cancelled,
    /// Angles were updated; more frames to go.
    Running,
    /// Angles reached the target; the caller should lock onto the marker.
    Completed(MarkerId),
}

/// One in-flight fly-to: interpolates `(theta, phi)` from where the orbit
/// was when requested toward a marker's direction.
#[derive(Debug)]
pub struct OrbitTransition {
    token: TransitionToken,
    target: MarkerId,
    start_theta: f32,
    start_phi: f32,
    delta_theta: f32,
    /// Already clamped into the orbit bounds.
    target_phi: f32,
    duration: Duration,
    easing: EasingFunction,
    /// Set on the first step so the clock starts at the next frame boundary.
    started: Option<Instant>,
}

impl OrbitTransition {
    /// Plan a transition from `from` toward `target_dir`.
    ///
    /// The target polar angle is clamped by `clamp_phi`; the azimuth delta
    /// takes the shortest way around.
    #[must_use]
    pub fn new(
        from: OrbitState,
        target_dir: glam::Vec3,
        target: MarkerId,
        clamp_phi: impl Fn(f32) -> f32,
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        let (raw_theta, raw_phi) = OrbitState::angles_toward(target_dir);
        let target_phi = clamp_phi(raw_phi);
        Self {
            token: TransitionToken::new(),
            target,
            start_theta: from.theta,
            start_phi: from.phi,
            delta_theta: shortest_angle_delta(from.theta, raw_theta),
            target_phi,
            duration,
            easing,
            started: None,
        }
    }

    /// A clone of this transition's cancellation token.
    #[must_use]
    pub fn token(&self) -> TransitionToken {
        self.token.clone()
    }

    /// Marker this transition will lock onto.
    #[must_use]
    pub fn target(&self) -> MarkerId {
        self.target
    }

    /// Azimuth change applied over the whole transition.
    #[must_use]
    pub fn delta_theta(&self) -> f32 {
        self.delta_theta
    }

    /// Polar angle the transition ends at.
    #[must_use]
    pub fn target_phi(&self) -> f32 {
        self.target_phi
    }

    /// Normalized progress (0.0 to 1.0) at `now`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        let Some(started) = self.started else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Advance one frame, writing interpolated angles into `camera`.
    pub fn step(
        &mut self,
        camera: &mut CameraController,
        now: Instant,
    ) -> StepOutcome {
        if self.token.is_cancelled() {
            return StepOutcome::Cancelled;
        }
        if self.started.is_none() {
            self.started = Some(now);
        }
        let t = self.progress(now);
        if t >= 1.0 {
            camera.set_angles(self.start_theta + self.delta_theta, self.target_phi);
            return StepOutcome::Completed(self.target);
        }
        let eased = self.easing.evaluate(t);
        camera.set_angles(
            self.start_theta + self.delta_theta * eased,
            self.start_phi + (self.target_phi - self.start_phi) * eased,
        );
        StepOutcome::Running
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use glam::Vec3;

    use super::*;
    use crate::camera::{OrbitBounds, Viewport};
    use crate::options::{CameraOptions, OrbitOptions};

    fn controller() -> CameraController {
        CameraController::new(
            &OrbitOptions::default(),
            &CameraOptions::default(),
            Viewport::sized(800.0, 600.0),
        )
    }

    fn plan(ctl: &CameraController, dir: Vec3) -> OrbitTransition {
        let bounds: OrbitBounds = ctl.bounds();
        OrbitTransition::new(
            ctl.orbit(),
            dir,
            MarkerId(3),
            move |phi| bounds.clamp_phi(phi),
            Duration::from_millis(700),
            EasingFunction::QuadraticInOut,
        )
    }

    #[test]
    fn token_clones_share_cancellation() {
        let token = TransitionToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn theta_takes_the_short_way() {
        let ctl = controller();
        // theta = 3π/2 lies along -X
        let tr = plan(&ctl, Vec3::new(-1.0, 0.0, 0.0));
        assert!((tr.delta_theta() + FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn pole_target_is_clamped() {
        let ctl = controller();
        let tr = plan(&ctl, Vec3::Y);
        assert_eq!(tr.target_phi(), ctl.bounds().min_phi);
        let tr = plan(&ctl, Vec3::NEG_Y);
        assert!((tr.target_phi() - (PI - 0.05)).abs() < 1e-6);
    }

    #[test]
    fn pole_fly_to_lands_exactly_on_the_bound() {
        let mut ctl = controller();
        let mut tr = plan(&ctl, Vec3::Y);
        let t0 = Instant::now();
        let _ = tr.step(&mut ctl, t0);
        let mid = ctl.orbit().phi;
        let _ = tr.step(&mut ctl, t0 + Duration::from_millis(350));
        assert!(ctl.orbit().phi < mid);
        let done = tr.step(&mut ctl, t0 + Duration::from_millis(700));
        assert_eq!(done, StepOutcome::Completed(MarkerId(3)));
        assert_eq!(ctl.orbit().phi, ctl.bounds().min_phi);
        assert_eq!(tr.target_phi(), ctl.orbit().phi);
    }

    #[test]
    fn clock_starts_on_first_step() {
        let mut ctl = controller();
        let mut tr = plan(&ctl, Vec3::X);
        let t0 = Instant::now();
        assert_eq!(tr.progress(t0), 0.0);
        assert_eq!(tr.step(&mut ctl, t0), StepOutcome::Running);
        assert_eq!(ctl.orbit().theta, 0.0);
        let half = t0 + Duration::from_millis(350);
        assert!((tr.progress(half) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn runs_to_completion_on_target() {
        let mut ctl = controller();
        let mut tr = plan(&ctl, Vec3::X);
        let t0 = Instant::now();
        let _ = tr.step(&mut ctl, t0);
        let mid = tr.step(&mut ctl, t0 + Duration::from_millis(350));
        assert_eq!(mid, StepOutcome::Running);
        assert!((ctl.orbit().theta - FRAC_PI_2 * 0.5).abs() < 1e-3);
        let done = tr.step(&mut ctl, t0 + Duration::from_millis(800));
        assert_eq!(done, StepOutcome::Completed(MarkerId(3)));
        assert!((ctl.orbit().theta - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn cancelled_transition_does_not_mutate() {
        let mut ctl = controller();
        let mut tr = plan(&ctl, Vec3::X);
        let t0 = Instant::now();
        let _ = tr.step(&mut ctl, t0);
        let before = ctl.orbit();
        tr.token().cancel();
        let outcome = tr.step(&mut ctl, t0 + Duration::from_secs(5));
        assert_eq!(outcome, StepOutcome::Cancelled);
        assert_eq!(ctl.orbit(), before);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut ctl = controller();
        let mut tr = OrbitTransition::new(
            ctl.orbit(),
            Vec3::X,
            MarkerId(0),
            |phi| phi,
            Duration::ZERO,
            EasingFunction::Linear,
        );
        let outcome = tr.step(&mut ctl, Instant::now());
        assert_eq!(outcome, StepOutcome::Completed(MarkerId(0)));
    }
}
