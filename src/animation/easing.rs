//! Easing curves for fly-to progress.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Quadratic ease-in-out: accelerate to the midpoint, then decelerate.
    #[default]
    QuadraticInOut,
    /// Cubic Hermite interpolation with configurable control points.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First control point.
        c1: f32,
        /// Second control point.
        c2: f32,
    },
}

impl EasingFunction {
    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::QuadraticIn => t * t,
            Self::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Self::QuadraticInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Self::CubicHermite { c1, c2 } => {
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadratic_in_out_endpoints_and_midpoint() {
        let ease = EasingFunction::QuadraticInOut;
        assert_eq!(ease.evaluate(0.0), 0.0);
        assert_eq!(ease.evaluate(0.5), 0.5);
        assert_eq!(ease.evaluate(1.0), 1.0);
        assert_eq!(ease.evaluate(0.25), 0.125);
        assert_eq!(ease.evaluate(0.75), 0.875);
    }

    #[test]
    fn quadratic_in_out_is_monotone() {
        let ease = EasingFunction::QuadraticInOut;
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = ease.evaluate(i as f32 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(EasingFunction::Linear.evaluate(-0.5), 0.0);
        assert_eq!(EasingFunction::Linear.evaluate(1.5), 1.0);
        assert_eq!(EasingFunction::QuadraticInOut.evaluate(2.0), 1.0);
    }

    #[test]
    fn quadratic_in_and_out() {
        assert_eq!(EasingFunction::QuadraticIn.evaluate(0.5), 0.25);
        assert_eq!(EasingFunction::QuadraticOut.evaluate(0.5), 0.75);
    }

    #[test]
    fn cubic_hermite_endpoints() {
        let hermite = EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 };
        assert_eq!(hermite.evaluate(0.0), 0.0);
        assert!((hermite.evaluate(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn default_is_quadratic_in_out() {
        assert_eq!(EasingFunction::default(), EasingFunction::QuadraticInOut);
    }
}
