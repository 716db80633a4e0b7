//! Momentum left over from a fling.

/// Angular velocity in radians per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity {
    /// Azimuth component.
    pub theta: f32,
    /// Polar component.
    pub phi: f32,
}

impl Velocity {
    /// Zero velocity.
    pub const ZERO: Self = Self {
        theta: 0.0,
        phi: 0.0,
    };

    /// Whether both components are exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.theta == 0.0 && self.phi == 0.0
    }

    /// Return the delta to apply this frame, then decay by `damping`.
    ///
    /// Components whose magnitude falls below `epsilon` after decay snap to
    /// exactly zero.
    pub fn advance(&mut self, damping: f32, epsilon: f32) -> (f32, f32) {
        let delta = (self.theta, self.phi);
        self.theta = decay(self.theta, damping, epsilon);
        self.phi = decay(self.phi, damping, epsilon);
        delta
    }
}

fn decay(v: f32, damping: f32, epsilon: f32) -> f32 {
    let next = v * damping;
    if next.abs() < epsilon {
        0.0
    } else {
        next
    }
}
