// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Orbit camera and interaction coordinator for an interactive 3D marker
//! globe.
//!
//! The crate owns everything between raw pointer input and a camera pose:
//! spherical orbit state with clamped bounds, drag and pinch gestures,
//! fling inertia, cancellable fly-to transitions toward a marker, a lock
//! that keeps a marker centered while the globe spins, CPU marker picking,
//! and viewport-clamped placement of a detail popup. Rendering is left to
//! the host, which reads the camera (or [`camera::CameraUniform`]) and
//! [`scene::MarkerInstance`] data every frame.
//!
//! # Key entry points
//!
//! - [`GlobeEngine`] - the coordinator; feed it input, call
//!   [`update`](GlobeEngine::update) once per frame
//! - [`GlobeCommand`] - every mutation the engine accepts
//! - [`GlobeEvent`] - selection and popup notifications for the host
//! - [`Options`] - tuning (orbit bounds, sensitivities, durations, popup
//!   layout, keybindings), loadable from TOML
//!
//! # Control model
//!
//! Exactly one source drives the orbit angles at a time. A drag beats a
//! fly-to, a fly-to beats the marker lock, and the lock beats inertia.
//! Starting a higher-priority source cancels the lower ones; a cancelled
//! fly-to never completes and never locks.
//!
//! The `viewer` feature adds a `winit` event adapter; the `web` feature
//! adds a `wasm-bindgen` front end that wires DOM listeners and a
//! `requestAnimationFrame` loop to the engine.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod input;
pub mod options;
pub mod overlay;
pub mod picking;
pub mod scene;
#[cfg(feature = "web")]
pub mod web;

pub use camera::Viewport;
pub use engine::{GlobeCommand, GlobeEngine, GlobeEvent, SelectionSource};
pub use error::GlobeError;
pub use input::InputEvent;
pub use options::Options;
pub use scene::MarkerId;
