//! Time-based camera motion: easing curves, fling inertia, and cancellable
//! fly-to transitions.

/// Easing curves.
pub mod easing;
/// Fling velocity and its per-frame decay.
pub mod inertia;
/// Cancellable fly-to transitions.
pub mod transition;

pub use easing::EasingFunction;
pub use inertia::Velocity;
pub use transition::{OrbitTransition, StepOutcome, TransitionToken};
