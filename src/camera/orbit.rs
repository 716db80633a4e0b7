use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::options::OrbitOptions;

/// Limits applied to every orbit mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitBounds {
    /// Closest allowed camera distance.
    pub min_radius: f32,
    /// Farthest allowed camera distance.
    pub max_radius: f32,
    /// Smallest polar angle.
    pub min_phi: f32,
    /// Largest polar angle.
    pub max_phi: f32,
}

impl OrbitBounds {
    /// Bounds taken from the orbit options.
    #[must_use]
    pub fn from_options(options: &OrbitOptions) -> Self {
        Self {
            min_radius: options.min_radius,
            max_radius: options.max_radius,
            min_phi: options.min_phi,
            max_phi: options.max_phi,
        }
    }

    /// Clamp a polar angle into `[min_phi, max_phi]`.
    ///
    /// Inverted bounds resolve to `min_phi`.
    #[must_use]
    pub fn clamp_phi(&self, phi: f32) -> f32 {
        clamp_low_wins(phi, self.min_phi, self.max_phi)
    }

    /// Clamp a radius into `[min_radius, max_radius]`.
    ///
    /// Inverted bounds resolve to `min_radius`.
    #[must_use]
    pub fn clamp_radius(&self, radius: f32) -> f32 {
        clamp_low_wins(radius, self.min_radius, self.max_radius)
    }
}

/// `max(lo, min(hi, v))`, which unlike `f32::clamp` tolerates `hi < lo`.
pub(crate) fn clamp_low_wins(v: f32, lo: f32, hi: f32) -> f32 {
    lo.max(hi.min(v))
}

/// Spherical camera coordinates around the globe center.
///
/// `theta` is the azimuth and is left unbounded; `phi` is the polar angle
/// measured from +Y. The camera always looks at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Distance from the origin.
    pub radius: f32,
    /// Azimuth in radians.
    pub theta: f32,
    /// Polar angle in radians.
    pub phi: f32,
}

impl OrbitState {
    /// Startup orbit from options, clamped into its bounds.
    #[must_use]
    pub fn from_options(options: &OrbitOptions) -> Self {
        let bounds = OrbitBounds::from_options(options);
        Self {
            radius: bounds.clamp_radius(options.radius),
            theta: options.theta,
            phi: bounds.clamp_phi(options.phi),
        }
    }

    /// Camera position for these coordinates.
    #[must_use]
    pub fn eye_position(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(
            self.radius * sin_phi * sin_theta,
            self.radius * cos_phi,
            self.radius * sin_phi * cos_theta,
        )
    }

    /// Inverse of [`eye_position`](Self::eye_position) for a direction:
    /// returns `(theta, phi)` with `phi` unclamped.
    ///
    /// A zero vector yields `(0, π/2)`.
    #[must_use]
    pub fn angles_toward(direction: Vec3) -> (f32, f32) {
        let Some(dir) = direction.try_normalize() else {
            return (0.0, PI * 0.5);
        };
        let phi = dir.y.clamp(-1.0, 1.0).acos();
        let theta = dir.x.atan2(dir.z);
        (theta, phi)
    }

    /// Clamp radius and polar angle into `bounds`.
    pub fn clamp(&mut self, bounds: &OrbitBounds) {
        self.radius = bounds.clamp_radius(self.radius);
        self.phi = bounds.clamp_phi(self.phi);
    }
}

/// Signed difference `to - from` normalized into `(-π, π]`, i.e. the
/// shortest way around the circle.
#[must_use]
pub fn shortest_angle_delta(from: f32, to: f32) -> f32 {
    let delta = (to - from).rem_euclid(TAU);
    if delta > PI {
        delta - TAU
    } else {
        delta
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn default_orbit_sits_on_positive_z() {
        let orbit = OrbitState::from_options(&OrbitOptions::default());
        let eye = orbit.eye_position();
        assert!(close(eye.x, 0.0));
        assert!(close(eye.y, 0.0));
        assert!(close(eye.z, 2.5));
    }

    #[test]
    fn angles_invert_eye_position() {
        let orbit = OrbitState {
            radius: 3.0,
            theta: 1.2,
            phi: 0.7,
        };
        let (theta, phi) = OrbitState::angles_toward(orbit.eye_position());
        assert!(close(theta, 1.2));
        assert!(close(phi, 0.7));
    }

    #[test]
    fn north_pole_direction_has_zero_phi() {
        let (theta, phi) = OrbitState::angles_toward(Vec3::Y);
        assert_eq!(phi, 0.0);
        assert_eq!(theta, 0.0);
    }

    #[test]
    fn zero_direction_falls_back_to_equator() {
        assert_eq!(OrbitState::angles_toward(Vec3::ZERO), (0.0, FRAC_PI_2));
    }

    #[test]
    fn shortest_delta_goes_the_short_way() {
        assert!(close(shortest_angle_delta(0.0, 3.0 * FRAC_PI_2), -FRAC_PI_2));
        assert!(close(shortest_angle_delta(0.0, FRAC_PI_2), FRAC_PI_2));
        assert!(close(shortest_angle_delta(3.0, -3.0), TAU - 6.0));
        assert!(close(shortest_angle_delta(2.0 * TAU, 0.25), 0.25));
    }

    #[test]
    fn shortest_delta_range_is_half_open() {
        assert!(close(shortest_angle_delta(0.0, PI), PI));
        for i in 0..64 {
            let to = i as f32 * 0.37 - 12.0;
            let d = shortest_angle_delta(0.4, to);
            assert!(d > -PI - 1e-6 && d <= PI + 1e-6);
        }
    }

    #[test]
    fn clamp_pins_radius_and_phi() {
        let bounds = OrbitBounds::from_options(&OrbitOptions::default());
        let mut orbit = OrbitState {
            radius: 9.0,
            theta: 42.0,
            phi: -1.0,
        };
        orbit.clamp(&bounds);
        assert_eq!(orbit.radius, 5.0);
        assert_eq!(orbit.phi, 0.05);
        assert_eq!(orbit.theta, 42.0);
    }

    #[test]
    fn inverted_bounds_pin_to_the_low_end() {
        let bounds = OrbitBounds {
            min_radius: 6.0,
            max_radius: 5.0,
            min_phi: 2.0,
            max_phi: 1.0,
        };
        assert_eq!(bounds.clamp_radius(2.5), 6.0);
        assert_eq!(bounds.clamp_radius(9.0), 6.0);
        assert_eq!(bounds.clamp_phi(0.0), 2.0);
        assert_eq!(bounds.clamp_phi(3.0), 2.0);
    }
}
