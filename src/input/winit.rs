//! Adapter from `winit` window events to [`InputEvent`]s.
//!
//! `winit` reports buttons without a position and touches one at a time,
//! so the adapter tracks the cursor and the active touch set.

use glam::Vec2;
use rustc_hash::FxHashMap;
use web_time::Instant;
use winit::event::{
    ElementState, KeyEvent, MouseScrollDelta, Touch, TouchPhase, WindowEvent,
};
use winit::keyboard::PhysicalKey;

use super::event::{InputEvent, MouseButton, Touches};

/// Pixels per wheel line for `LineDelta` scrolls.
const LINE_HEIGHT_PX: f32 = 100.0;

impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Left,
        }
    }
}

/// Stateful `WindowEvent` → [`InputEvent`] converter.
#[derive(Debug, Default)]
pub struct WinitInputAdapter {
    cursor: Vec2,
    /// Active touches by id, in arrival order.
    touches: FxHashMap<u64, (u64, Vec2)>,
    next_seq: u64,
}

impl WinitInputAdapter {
    /// Convert one window event. Positions are divided by `scale_factor`
    /// to land in logical pixels.
    pub fn convert(
        &mut self,
        event: &WindowEvent,
        scale_factor: f64,
        now: Instant,
    ) -> Vec<InputEvent> {
        #[allow(clippy::cast_possible_truncation)]
        let scale = scale_factor.max(f64::EPSILON) as f32;
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let pos = Vec2::new(position.x as f32, position.y as f32) / scale;
                self.cursor = pos;
                vec![InputEvent::PointerMove { pos, at: now }]
            }
            WindowEvent::CursorLeft { .. } => vec![InputEvent::PointerLeave],
            WindowEvent::MouseInput { button, state, .. } => {
                let button = MouseButton::from(*button);
                if *state == ElementState::Pressed {
                    vec![InputEvent::PointerDown {
                        button,
                        pos: self.cursor,
                        at: now,
                    }]
                } else if button == MouseButton::Left {
                    vec![
                        InputEvent::PointerUp { button },
                        InputEvent::Click { pos: self.cursor },
                    ]
                } else {
                    vec![InputEvent::PointerUp { button }]
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let delta_y = match delta {
                    // winit lines are positive when scrolling up (away)
                    MouseScrollDelta::LineDelta(_, y) => -y * LINE_HEIGHT_PX,
                    MouseScrollDelta::PixelDelta(pos) => -(pos.y as f32) / scale,
                };
                vec![InputEvent::Wheel { delta_y }]
            }
            WindowEvent::Touch(touch) => self.convert_touch(touch, scale, now),
            _ => Vec::new(),
        }
    }

    fn convert_touch(
        &mut self,
        touch: &Touch,
        scale: f32,
        now: Instant,
    ) -> Vec<InputEvent> {
        #[allow(clippy::cast_possible_truncation)]
        let pos =
            Vec2::new(touch.location.x as f32, touch.location.y as f32) / scale;
        match touch.phase {
            TouchPhase::Started => {
                let seq = self.next_seq;
                self.next_seq += 1;
                let _ = self.touches.insert(touch.id, (seq, pos));
                vec![InputEvent::TouchStart {
                    touches: self.active(),
                    at: now,
                }]
            }
            TouchPhase::Moved => {
                if let Some(entry) = self.touches.get_mut(&touch.id) {
                    entry.1 = pos;
                }
                vec![InputEvent::TouchMove {
                    touches: self.active(),
                    at: now,
                }]
            }
            TouchPhase::Cancelled => {
                self.touches.clear();
                vec![InputEvent::TouchCancel]
            }
            TouchPhase::Ended => {
                let _ = self.touches.remove(&touch.id);
                vec![InputEvent::TouchEnd {
                    remaining: self.touches.len(),
                    pos,
                    at: now,
                }]
            }
        }
    }

    fn active(&self) -> Touches {
        let mut ordered: Vec<(u64, Vec2)> =
            self.touches.values().copied().collect();
        ordered.sort_by_key(|(seq, _)| *seq);
        Touches::from_points(ordered.into_iter().map(|(_, p)| p))
    }
}

/// Key string for a pressed key in `KeyCode` debug format (`"Escape"`,
/// `"Home"`), matching the keybinding table. Releases yield `None`.
#[must_use]
pub fn key_string(event: &KeyEvent) -> Option<String> {
    if event.state != ElementState::Pressed {
        return None;
    }
    let PhysicalKey::Code(code) = event.physical_key else {
        return None;
    };
    Some(format!("{code:?}"))
}
