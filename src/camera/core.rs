use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

use crate::options::CameraOptions;
use crate::picking::Ray;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// Uniform block holding the view-projection matrix and per-frame globe
/// state, laid out for direct upload by a host renderer.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera forward direction.
    pub forward: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Uniform billboard scale applied to every marker.
    pub marker_scale: f32,
    /// Index of the locked marker (-1 if none).
    pub locked_marker: i32,
    /// Padding for GPU alignment.
    pub(crate) _pad: [f32; 2],
}

impl Camera {
    /// Build a camera looking at the origin from `eye`.
    #[must_use]
    pub fn new(eye: Vec3, aspect: f32, options: &CameraOptions) -> Self {
        Self {
            eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }

    /// Just the projection matrix.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        // perspective_rh uses a [0,1] depth range
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Unit vector from the eye toward the target.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// Project a world point to normalized device coordinates.
    ///
    /// Returns `None` for points at or behind the eye plane.
    #[must_use]
    pub fn project(&self, world: Vec3) -> Option<Vec3> {
        let clip = self.build_matrix() * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        Some(clip.xyz() / clip.w)
    }

    /// Distance of a world point along the view direction.
    #[must_use]
    pub fn view_depth(&self, world: Vec3) -> f32 {
        (world - self.eye).dot(self.forward())
    }

    /// Ray from the eye through a point given in normalized device
    /// coordinates (`x`, `y` in `[-1, 1]`, `+y` up).
    #[must_use]
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let forward = self.forward();
        let right = forward.cross(self.up).normalize_or_zero();
        let up = right.cross(forward);
        let half_h = (self.fovy.to_radians() * 0.5).tan();
        let half_w = half_h * self.aspect;
        let dir = forward + right * (ndc.x * half_w) + up * (ndc.y * half_h);
        Ray::new(self.eye, dir)
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.0,
            forward: [0.0, 0.0, -1.0],
            fovy: 75.0,
            marker_scale: 0.1,
            locked_marker: -1,
            _pad: [0.0; 2],
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.eye.to_array();
        self.aspect = camera.aspect;
        self.forward = camera.forward().to_array();
        self.fovy = camera.fovy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(eye: Vec3) -> Camera {
        Camera::new(eye, 1.0, &CameraOptions::default())
    }

    #[test]
    fn target_projects_to_screen_center() {
        let cam = camera_at(Vec3::new(0.0, 0.0, 2.5));
        let ndc = cam.project(Vec3::ZERO).unwrap();
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn points_behind_eye_do_not_project() {
        let cam = camera_at(Vec3::new(0.0, 0.0, 2.5));
        assert!(cam.project(Vec3::new(0.0, 0.0, 5.0)).is_none());
    }

    #[test]
    fn center_ray_points_at_target() {
        let cam = camera_at(Vec3::new(0.0, 0.0, 2.5));
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
        assert_eq!(ray.origin, cam.eye);
    }

    #[test]
    fn ray_passes_through_projected_point() {
        let cam = camera_at(Vec3::new(1.0, 0.5, 2.0));
        let world = Vec3::new(0.3, 0.4, 0.2);
        let ndc = cam.project(world).unwrap();
        let ray = cam.ray_from_ndc(ndc.truncate());
        let to_point = (world - ray.origin).normalize();
        assert!(to_point.dot(ray.direction) > 0.9999);
    }

    #[test]
    fn uniform_tracks_camera() {
        let cam = camera_at(Vec3::new(0.0, 0.0, 3.0));
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&cam);
        assert_eq!(uniform.position, [0.0, 0.0, 3.0]);
        assert_eq!(uniform.forward, [0.0, 0.0, -1.0]);
        assert_eq!(bytemuck::bytes_of(&uniform).len(), 112);
    }
}
