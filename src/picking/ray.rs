use glam::Vec3;

/// Half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Ray from `origin` along `direction` (normalized here).
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance to the first intersection with a sphere, if it lies ahead.
    ///
    /// An origin inside the sphere reports the exit point.
    #[must_use]
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.dot(oc) - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let near = -b - root;
        if near >= 0.0 {
            return Some(near);
        }
        let far = -b + root;
        (far >= 0.0).then_some(far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_sphere_ahead() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let t = ray.intersect_sphere(Vec3::ZERO, 1.0).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
        assert!((ray.at(t) - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn misses_offset_sphere() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(ray.intersect_sphere(Vec3::new(3.0, 0.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn ignores_sphere_behind() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(ray.intersect_sphere(Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn inside_reports_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap();
        assert!((t - 2.0).abs() < 1e-5);
    }
}
