//! Camera system for the globe view.
//!
//! Provides a perspective camera positioned on a sphere around the globe,
//! the spherical orbit state that drives it, and the controller that keeps
//! the two in sync.

/// Orbit controller owning the orbit state, camera and viewport.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
/// Spherical orbit coordinates and their bounds.
pub mod orbit;

pub use controller::{CameraController, Viewport};
pub use core::{Camera, CameraUniform};
pub use orbit::{shortest_angle_delta, OrbitBounds, OrbitState};
