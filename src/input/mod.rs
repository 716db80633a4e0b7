//! Input handling: event types, gesture state, and the input processor
//! that converts raw pointer/touch/wheel events into engine commands.

/// Platform-agnostic input events.
pub mod event;
/// Drag, tap and pinch tracking.
pub(crate) mod gesture;
/// Bindable keyboard actions.
pub mod keyboard;
/// Converts raw events into engine commands.
pub mod processor;
/// `winit` window-event adapter.
#[cfg(feature = "viewer")]
pub mod winit;

pub use event::{InputEvent, MouseButton, Touches};
pub use keyboard::KeyAction;
pub use processor::InputProcessor;
