//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns all transient input state (drag anchors,
//! sample timing, tap timing, pinch distance) and the input tuning. It is
//! the only thing that sits between raw pointer/touch/wheel events and the
//! engine's [`execute`](crate::GlobeEngine::execute) method.

use web_time::Instant;

use super::event::{InputEvent, MouseButton, Touches};
use super::gesture::{GestureState, OrbitSample, TouchMode};
use crate::engine::command::GlobeCommand;
use crate::options::{InputOptions, KeybindingOptions};

// ─────────────────────────────────────────────────────────────────────────────
// InputProcessor
// ─────────────────────────────────────────────────────────────────────────────

/// Converts raw input events into [`GlobeCommand`]s.
///
/// # Usage
///
/// ```ignore
/// for cmd in processor.handle_event(event) {
///     engine.execute(cmd);
/// }
/// ```
#[derive(Debug, Default)]
pub struct InputProcessor {
    gesture: GestureState,
    options: InputOptions,
}

impl InputProcessor {
    /// Create a processor with the given tuning.
    #[must_use]
    pub fn new(options: InputOptions) -> Self {
        Self {
            gesture: GestureState::default(),
            options,
        }
    }

    /// Replace the input tuning.
    pub fn set_options(&mut self, options: InputOptions) {
        self.options = options;
    }

    /// Whether a drag currently owns the orbit.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.dragging
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(
        &self,
        key: &str,
        bindings: &KeybindingOptions,
    ) -> Option<GlobeCommand> {
        bindings.lookup(key).map(|action| action.to_command())
    }

    /// Process a raw input event and return the commands it produces, in
    /// execution order.
    pub fn handle_event(&mut self, event: InputEvent) -> Vec<GlobeCommand> {
        match event {
            InputEvent::PointerDown { button, pos, at } => {
                if button != MouseButton::Left {
                    return Vec::new();
                }
                self.gesture.begin_drag(pos, at);
                vec![GlobeCommand::BeginDrag]
            }
            InputEvent::PointerMove { pos, at } => {
                if !self.gesture.dragging
                    || self.gesture.touch_mode != TouchMode::None
                {
                    return Vec::new();
                }
                let sample = self.gesture.sample(pos, at, &self.options);
                vec![orbit_command(sample)]
            }
            InputEvent::PointerUp { button } => {
                if button != MouseButton::Left {
                    return Vec::new();
                }
                self.release_mouse()
            }
            InputEvent::PointerLeave => self.release_mouse(),
            InputEvent::Click { pos } => {
                if self.gesture.take_release_was_drag() {
                    log::debug!("click ignored: tail of a drag");
                    return Vec::new();
                }
                vec![GlobeCommand::Pick { pos }]
            }
            InputEvent::TouchStart { touches, at } => {
                self.touch_start(touches, at)
            }
            InputEvent::TouchMove { touches, at } => {
                self.touch_move(touches, at)
            }
            InputEvent::TouchEnd { remaining, pos, at } => {
                self.touch_end(remaining, pos, at)
            }
            InputEvent::TouchCancel => {
                let was_orbiting = self.gesture.touch_mode == TouchMode::Orbit
                    && self.gesture.dragging;
                self.gesture.cancel_touch();
                if was_orbiting {
                    vec![GlobeCommand::EndDrag { fling: false }]
                } else {
                    Vec::new()
                }
            }
            InputEvent::Wheel { delta_y } => {
                if !delta_y.is_finite() {
                    return Vec::new();
                }
                vec![GlobeCommand::ZoomBy {
                    delta: delta_y * self.options.wheel_zoom_sensitivity,
                }]
            }
        }
    }

    fn release_mouse(&mut self) -> Vec<GlobeCommand> {
        if !self.gesture.dragging || self.gesture.touch_mode != TouchMode::None
        {
            return Vec::new();
        }
        self.gesture.end_mouse_drag();
        vec![GlobeCommand::EndDrag { fling: true }]
    }

    fn touch_start(
        &mut self,
        touches: Touches,
        at: Instant,
    ) -> Vec<GlobeCommand> {
        self.gesture.touch_started(touches.count(), at);
        match (self.gesture.touch_mode, touches.count()) {
            (mode, 1) => {
                let Some(pos) = touches.first() else {
                    return Vec::new();
                };
                if mode != TouchMode::None {
                    // the previous gesture never reported its end
                    log::debug!("stale {mode:?} touch gesture restarted");
                }
                self.gesture.touch_mode = TouchMode::Orbit;
                self.gesture.begin_drag(pos, at);
                vec![GlobeCommand::BeginDrag]
            }
            // an ignored gesture stays ignored until every finger lifts
            (mode, 2) if mode != TouchMode::Ignored => {
                let Some(spread) = touches.spread() else {
                    return Vec::new();
                };
                let was_orbiting = mode == TouchMode::Orbit;
                self.gesture.begin_pinch(spread);
                if was_orbiting {
                    vec![GlobeCommand::EndDrag { fling: false }]
                } else {
                    Vec::new()
                }
            }
            (_, n) if n > 2 => {
                let was_orbiting = self.gesture.touch_mode == TouchMode::Orbit;
                self.gesture.touch_mode = TouchMode::Ignored;
                self.gesture.dragging = false;
                if was_orbiting {
                    vec![GlobeCommand::EndDrag { fling: false }]
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }

    fn touch_move(
        &mut self,
        touches: Touches,
        at: Instant,
    ) -> Vec<GlobeCommand> {
        match self.gesture.touch_mode {
            TouchMode::Orbit if self.gesture.dragging => {
                let Some(pos) = touches.first() else {
                    return Vec::new();
                };
                let sample = self.gesture.sample(pos, at, &self.options);
                vec![orbit_command(sample)]
            }
            TouchMode::Pinch => {
                let Some(spread) = touches.spread() else {
                    log::debug!("pinch move with fewer than two touches");
                    return Vec::new();
                };
                self.gesture
                    .pinch_delta(spread, &self.options)
                    .map(|delta| GlobeCommand::ZoomBy { delta })
                    .into_iter()
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    fn touch_end(
        &mut self,
        remaining: usize,
        pos: glam::Vec2,
        at: Instant,
    ) -> Vec<GlobeCommand> {
        let was_orbiting = self.gesture.touch_mode == TouchMode::Orbit
            && self.gesture.dragging;
        let is_tap = self.gesture.touch_ended(remaining, at, &self.options);
        let mut commands = Vec::new();
        if was_orbiting {
            commands.push(GlobeCommand::EndDrag { fling: true });
        }
        if is_tap {
            commands.push(GlobeCommand::Pick { pos });
        }
        commands
    }
}

fn orbit_command(sample: OrbitSample) -> GlobeCommand {
    GlobeCommand::OrbitBy {
        d_theta: sample.d_theta,
        d_phi: sample.d_phi,
        velocity: sample.velocity,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glam::Vec2;

    use super::*;
    use crate::input::KeyAction;

    fn down(pos: Vec2, at: Instant) -> InputEvent {
        InputEvent::PointerDown {
            button: MouseButton::Left,
            pos,
            at,
        }
    }

    fn touches(points: &[Vec2]) -> Touches {
        Touches::from_points(points.iter().copied())
    }

    #[test]
    fn mouse_drag_produces_orbit_commands() {
        let t0 = Instant::now();
        let mut p = InputProcessor::default();
        assert_eq!(
            p.handle_event(down(Vec2::new(10.0, 10.0), t0)),
            vec![GlobeCommand::BeginDrag]
        );
        let cmds = p.handle_event(InputEvent::PointerMove {
            pos: Vec2::new(20.0, 10.0),
            at: t0 + Duration::from_millis(16),
        });
        let [GlobeCommand::OrbitBy { d_theta, d_phi, .. }] = cmds[..] else {
            panic!("expected one orbit command, got {cmds:?}");
        };
        assert!((d_theta + 0.05).abs() < 1e-6);
        assert_eq!(d_phi, 0.0);
        assert_eq!(
            p.handle_event(InputEvent::PointerUp {
                button: MouseButton::Left
            }),
            vec![GlobeCommand::EndDrag { fling: true }]
        );
    }

    #[test]
    fn hover_without_press_does_nothing() {
        let mut p = InputProcessor::default();
        let cmds = p.handle_event(InputEvent::PointerMove {
            pos: Vec2::ONE,
            at: Instant::now(),
        });
        assert!(cmds.is_empty());
        assert!(p.handle_event(InputEvent::PointerLeave).is_empty());
    }

    #[test]
    fn right_button_is_ignored() {
        let mut p = InputProcessor::default();
        let cmds = p.handle_event(InputEvent::PointerDown {
            button: MouseButton::Right,
            pos: Vec2::ZERO,
            at: Instant::now(),
        });
        assert!(cmds.is_empty());
        assert!(!p.is_dragging());
    }

    #[test]
    fn click_after_drag_is_suppressed() {
        let t0 = Instant::now();
        let mut p = InputProcessor::default();
        let _ = p.handle_event(down(Vec2::ZERO, t0));
        let _ = p.handle_event(InputEvent::PointerMove {
            pos: Vec2::new(40.0, 0.0),
            at: t0,
        });
        let _ = p.handle_event(InputEvent::PointerUp {
            button: MouseButton::Left,
        });
        assert!(p
            .handle_event(InputEvent::Click {
                pos: Vec2::new(40.0, 0.0)
            })
            .is_empty());
    }

    #[test]
    fn still_click_picks() {
        let t0 = Instant::now();
        let mut p = InputProcessor::default();
        let _ = p.handle_event(down(Vec2::new(5.0, 5.0), t0));
        let _ = p.handle_event(InputEvent::PointerUp {
            button: MouseButton::Left,
        });
        assert_eq!(
            p.handle_event(InputEvent::Click {
                pos: Vec2::new(5.0, 5.0)
            }),
            vec![GlobeCommand::Pick {
                pos: Vec2::new(5.0, 5.0)
            }]
        );
    }

    #[test]
    fn wheel_scales_delta() {
        let mut p = InputProcessor::default();
        let cmds = p.handle_event(InputEvent::Wheel { delta_y: 100.0 });
        let [GlobeCommand::ZoomBy { delta }] = cmds[..] else {
            panic!("expected zoom, got {cmds:?}");
        };
        assert!((delta - 0.15).abs() < 1e-6);
        assert!(p
            .handle_event(InputEvent::Wheel { delta_y: f32::NAN })
            .is_empty());
    }

    #[test]
    fn one_finger_tap_ends_drag_then_picks() {
        let t0 = Instant::now();
        let mut p = InputProcessor::default();
        let at = Vec2::new(50.0, 60.0);
        assert_eq!(
            p.handle_event(InputEvent::TouchStart {
                touches: touches(&[at]),
                at: t0,
            }),
            vec![GlobeCommand::BeginDrag]
        );
        let cmds = p.handle_event(InputEvent::TouchEnd {
            remaining: 0,
            pos: at,
            at: t0 + Duration::from_millis(100),
        });
        assert_eq!(
            cmds,
            vec![
                GlobeCommand::EndDrag { fling: true },
                GlobeCommand::Pick { pos: at }
            ]
        );
    }

    #[test]
    fn second_finger_switches_to_pinch() {
        let t0 = Instant::now();
        let mut p = InputProcessor::default();
        let a = Vec2::new(100.0, 100.0);
        let _ = p.handle_event(InputEvent::TouchStart {
            touches: touches(&[a]),
            at: t0,
        });
        let cmds = p.handle_event(InputEvent::TouchStart {
            touches: touches(&[a, Vec2::new(200.0, 100.0)]),
            at: t0,
        });
        assert_eq!(cmds, vec![GlobeCommand::EndDrag { fling: false }]);

        // spread grows 100 → 140: zoom in by 0.2
        let cmds = p.handle_event(InputEvent::TouchMove {
            touches: touches(&[a, Vec2::new(240.0, 100.0)]),
            at: t0,
        });
        let [GlobeCommand::ZoomBy { delta }] = cmds[..] else {
            panic!("expected zoom, got {cmds:?}");
        };
        assert!((delta + 0.2).abs() < 1e-5);

        // a single-touch move inside a pinch gesture is degenerate
        assert!(p
            .handle_event(InputEvent::TouchMove {
                touches: touches(&[a]),
                at: t0,
            })
            .is_empty());

        // lifting both fingers never taps
        assert!(p
            .handle_event(InputEvent::TouchEnd {
                remaining: 1,
                pos: a,
                at: t0,
            })
            .is_empty());
        assert!(p
            .handle_event(InputEvent::TouchEnd {
                remaining: 0,
                pos: a,
                at: t0,
            })
            .is_empty());
    }

    #[test]
    fn one_finger_orbit_samples_touch() {
        let t0 = Instant::now();
        let mut p = InputProcessor::default();
        let _ = p.handle_event(InputEvent::TouchStart {
            touches: touches(&[Vec2::new(300.0, 200.0)]),
            at: t0,
        });
        let cmds = p.handle_event(InputEvent::TouchMove {
            touches: touches(&[Vec2::new(200.0, 200.0)]),
            at: t0 + Duration::from_millis(50),
        });
        let [GlobeCommand::OrbitBy { velocity, .. }] = cmds[..] else {
            panic!("expected orbit, got {cmds:?}");
        };
        assert!((velocity.theta - 0.01).abs() < 1e-6);
        // the lift after a real drag is not a tap
        let cmds = p.handle_event(InputEvent::TouchEnd {
            remaining: 0,
            pos: Vec2::new(200.0, 200.0),
            at: t0 + Duration::from_millis(60),
        });
        assert_eq!(cmds, vec![GlobeCommand::EndDrag { fling: true }]);
    }

    #[test]
    fn touch_cancel_ends_orbit_without_fling() {
        let t0 = Instant::now();
        let mut p = InputProcessor::default();
        let _ = p.handle_event(InputEvent::TouchStart {
            touches: touches(&[Vec2::new(10.0, 10.0)]),
            at: t0,
        });
        assert_eq!(
            p.handle_event(InputEvent::TouchCancel),
            vec![GlobeCommand::EndDrag { fling: false }]
        );
        assert!(!p.is_dragging());
        // nothing left to cancel
        assert!(p.handle_event(InputEvent::TouchCancel).is_empty());
        // the mouse works again
        assert_eq!(
            p.handle_event(down(Vec2::ZERO, t0)),
            vec![GlobeCommand::BeginDrag]
        );
    }

    #[test]
    fn single_finger_start_restarts_a_stale_gesture() {
        let t0 = Instant::now();
        let mut p = InputProcessor::default();
        let _ = p.handle_event(InputEvent::TouchStart {
            touches: touches(&[Vec2::new(10.0, 10.0)]),
            at: t0,
        });
        // the end of that gesture never arrived
        let later = t0 + Duration::from_secs(5);
        assert_eq!(
            p.handle_event(InputEvent::TouchStart {
                touches: touches(&[Vec2::new(80.0, 40.0)]),
                at: later,
            }),
            vec![GlobeCommand::BeginDrag]
        );
        let cmds = p.handle_event(InputEvent::TouchEnd {
            remaining: 0,
            pos: Vec2::new(80.0, 40.0),
            at: later + Duration::from_millis(50),
        });
        assert_eq!(
            cmds,
            vec![
                GlobeCommand::EndDrag { fling: true },
                GlobeCommand::Pick {
                    pos: Vec2::new(80.0, 40.0)
                }
            ]
        );
    }

    #[test]
    fn ignored_gesture_does_not_become_a_pinch() {
        let t0 = Instant::now();
        let mut p = InputProcessor::default();
        let a = Vec2::new(100.0, 100.0);
        let b = Vec2::new(200.0, 100.0);
        let c = Vec2::new(150.0, 200.0);
        let _ = p.handle_event(InputEvent::TouchStart {
            touches: touches(&[a]),
            at: t0,
        });
        let _ = p.handle_event(InputEvent::TouchStart {
            touches: touches(&[a, b]),
            at: t0,
        });
        let _ = p.handle_event(InputEvent::TouchStart {
            touches: Touches::from_points([a, b, c]),
            at: t0,
        });
        // three fingers: lift two, add one
        let _ = p.handle_event(InputEvent::TouchEnd {
            remaining: 2,
            pos: c,
            at: t0,
        });
        let _ = p.handle_event(InputEvent::TouchEnd {
            remaining: 1,
            pos: b,
            at: t0,
        });
        assert!(p
            .handle_event(InputEvent::TouchStart {
                touches: touches(&[a, b]),
                at: t0,
            })
            .is_empty());
        assert!(p
            .handle_event(InputEvent::TouchMove {
                touches: touches(&[a, Vec2::new(300.0, 100.0)]),
                at: t0,
            })
            .is_empty());
    }

    #[test]
    fn key_press_uses_bindings() {
        let p = InputProcessor::default();
        let bindings = KeybindingOptions::default();
        assert_eq!(
            p.handle_key_press("Escape", &bindings),
            Some(KeyAction::ClosePopup.to_command())
        );
        assert_eq!(p.handle_key_press("KeyX", &bindings), None);
    }
}
