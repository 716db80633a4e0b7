use glam::Vec2;
use web_time::Instant;

/// Platform-agnostic input events.
///
/// Positions are client (CSS) pixels, the same space as the surface
/// [`Viewport`](crate::camera::Viewport). Timestamped variants carry the
/// moment the platform delivered them so velocity estimates are
/// reproducible.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// converts them into [`GlobeCommand`](crate::GlobeCommand) values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse button pressed over the surface.
    PointerDown {
        /// Which button changed.
        button: MouseButton,
        /// Client position.
        pos: Vec2,
        /// Delivery time.
        at: Instant,
    },
    /// Cursor moved.
    PointerMove {
        /// Client position.
        pos: Vec2,
        /// Delivery time.
        at: Instant,
    },
    /// Mouse button released.
    PointerUp {
        /// Which button changed.
        button: MouseButton,
    },
    /// Cursor left the surface.
    PointerLeave,
    /// Click (press and release on the surface), delivered after
    /// [`PointerUp`](Self::PointerUp).
    Click {
        /// Client position.
        pos: Vec2,
    },
    /// A finger touched down. `touches` lists every active contact.
    TouchStart {
        /// Active contacts after the change.
        touches: Touches,
        /// Delivery time.
        at: Instant,
    },
    /// One or more fingers moved.
    TouchMove {
        /// Active contacts after the change.
        touches: Touches,
        /// Delivery time.
        at: Instant,
    },
    /// A finger lifted.
    TouchEnd {
        /// Contacts still on the surface.
        remaining: usize,
        /// Where the lifted finger was.
        pos: Vec2,
        /// Delivery time.
        at: Instant,
    },
    /// The platform aborted the touch gesture (a system gesture or scroll
    /// took over). Every contact is gone and nothing counts as a tap.
    TouchCancel,
    /// Scroll wheel; positive `delta_y` zooms out.
    Wheel {
        /// Vertical wheel delta in pixels.
        delta_y: f32,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Right,
            _ => Self::Left,
        }
    }
}

/// Active touch contacts; the first two positions are kept.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Touches {
    points: [Vec2; 2],
    count: usize,
}

impl Touches {
    /// Collect contacts from an iterator of client positions.
    pub fn from_points(points: impl IntoIterator<Item = Vec2>) -> Self {
        let mut touches = Self::default();
        for p in points {
            if touches.count < 2 {
                touches.points[touches.count] = p;
            }
            touches.count += 1;
        }
        touches
    }

    /// Number of active contacts (may exceed the two stored).
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// First contact, if any.
    #[must_use]
    pub fn first(&self) -> Option<Vec2> {
        (self.count >= 1).then_some(self.points[0])
    }

    /// Distance between the first two contacts, if there are two.
    #[must_use]
    pub fn spread(&self) -> Option<f32> {
        (self.count >= 2).then(|| self.points[0].distance(self.points[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touches_keep_first_two() {
        let t = Touches::from_points([
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 4.0),
            Vec2::new(100.0, 100.0),
        ]);
        assert_eq!(t.count(), 3);
        assert_eq!(t.first(), Some(Vec2::ZERO));
        assert_eq!(t.spread(), Some(5.0));
    }

    #[test]
    fn single_touch_has_no_spread() {
        let t = Touches::from_points([Vec2::new(1.0, 2.0)]);
        assert_eq!(t.spread(), None);
        assert_eq!(Touches::default().first(), None);
    }

    #[test]
    fn dom_button_codes() {
        assert_eq!(MouseButton::from_dom(0), MouseButton::Left);
        assert_eq!(MouseButton::from_dom(1), MouseButton::Middle);
        assert_eq!(MouseButton::from_dom(2), MouseButton::Right);
    }
}
