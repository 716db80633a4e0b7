use glam::{Vec2, Vec3};

use crate::camera::core::{Camera, CameraUniform};
use crate::camera::orbit::{OrbitBounds, OrbitState};
use crate::options::{CameraOptions, OrbitOptions};

/// Bounding rectangle of the render surface in client (CSS) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Left edge in client coordinates.
    pub left: f32,
    /// Top edge in client coordinates.
    pub top: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Viewport anchored at the client origin.
    #[must_use]
    pub fn sized(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    /// Width over height, or 1 for a degenerate surface.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Client coordinates to normalized device coordinates (`+y` up).
    ///
    /// Returns `None` for a zero-sized surface.
    #[must_use]
    pub fn client_to_ndc(&self, client: Vec2) -> Option<Vec2> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        Some(Vec2::new(
            (client.x - self.left) / self.width * 2.0 - 1.0,
            -(client.y - self.top) / self.height * 2.0 + 1.0,
        ))
    }

    /// Normalized device coordinates back to surface-relative pixels.
    #[must_use]
    pub fn ndc_to_surface(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::sized(800.0, 600.0)
    }
}

/// Orbit camera controller: owns the spherical orbit state, its bounds,
/// the derived camera pose and the render surface rectangle.
///
/// Every mutator re-derives the camera pose before returning, so readers
/// never observe a camera that lags the orbit.
pub struct CameraController {
    orbit: OrbitState,
    bounds: OrbitBounds,
    viewport: Viewport,
    /// The camera derived from the orbit state.
    pub camera: Camera,
    /// Uniform block mirroring the camera.
    pub uniform: CameraUniform,
}

impl CameraController {
    /// Create a controller at the configured startup orbit.
    #[must_use]
    pub fn new(
        orbit: &OrbitOptions,
        camera: &CameraOptions,
        viewport: Viewport,
    ) -> Self {
        let state = OrbitState::from_options(orbit);
        let mut controller = Self {
            orbit: state,
            bounds: OrbitBounds::from_options(orbit),
            viewport,
            camera: Camera::new(state.eye_position(), viewport.aspect(), camera),
            uniform: CameraUniform::new(),
        };
        controller.update_camera_pos();
        controller
    }

    /// Re-derive the camera pose from the orbit state.
    ///
    /// Pure in the orbit state: calling it twice without an intervening
    /// mutation yields the same pose.
    pub fn update_camera_pos(&mut self) {
        self.camera.eye = self.orbit.eye_position();
        self.camera.target = Vec3::ZERO;
        self.camera.up = Vec3::Y;
        self.uniform.update_view_proj(&self.camera);
    }

    /// Current orbit coordinates.
    #[must_use]
    pub fn orbit(&self) -> OrbitState {
        self.orbit
    }

    /// Orbit bounds in force.
    #[must_use]
    pub fn bounds(&self) -> OrbitBounds {
        self.bounds
    }

    /// Render surface rectangle.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current camera distance.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.orbit.radius
    }

    /// Add angle deltas, clamp, and refresh the pose.
    pub fn rotate_by(&mut self, d_theta: f32, d_phi: f32) {
        self.orbit.theta += d_theta;
        self.orbit.phi += d_phi;
        self.orbit.clamp(&self.bounds);
        self.update_camera_pos();
    }

    /// Overwrite the angles, clamp, and refresh the pose.
    pub fn set_angles(&mut self, theta: f32, phi: f32) {
        self.orbit.theta = theta;
        self.orbit.phi = phi;
        self.orbit.clamp(&self.bounds);
        self.update_camera_pos();
    }

    /// Overwrite the whole orbit, clamp, and refresh the pose.
    pub fn set_orbit(&mut self, orbit: OrbitState) {
        self.orbit = orbit;
        self.orbit.clamp(&self.bounds);
        self.update_camera_pos();
    }

    /// Add to the radius, clamp, and refresh the pose.
    pub fn zoom_by(&mut self, delta: f32) {
        self.orbit.radius += delta;
        self.orbit.clamp(&self.bounds);
        self.update_camera_pos();
    }

    /// Return to the configured startup orbit.
    pub fn reset(&mut self, orbit: &OrbitOptions) {
        self.bounds = OrbitBounds::from_options(orbit);
        self.orbit = OrbitState::from_options(orbit);
        self.update_camera_pos();
    }

    /// Track a new render surface rectangle.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.aspect = viewport.aspect();
        self.update_camera_pos();
    }

    /// Project a world point to surface-relative pixels.
    ///
    /// Returns `None` when the point is behind the camera.
    #[must_use]
    pub fn project_to_surface(&self, world: Vec3) -> Option<Vec2> {
        let ndc = self.camera.project(world)?;
        Some(self.viewport.ndc_to_surface(ndc.truncate()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> CameraController {
        CameraController::new(
            &OrbitOptions::default(),
            &CameraOptions::default(),
            Viewport::sized(800.0, 600.0),
        )
    }

    #[test]
    fn rotate_keeps_phi_in_bounds() {
        let mut ctl = controller();
        ctl.rotate_by(0.0, 10.0);
        assert_eq!(ctl.orbit().phi, ctl.bounds().max_phi);
        ctl.rotate_by(0.0, -10.0);
        assert_eq!(ctl.orbit().phi, ctl.bounds().min_phi);
    }

    #[test]
    fn zoom_keeps_radius_in_bounds() {
        let mut ctl = controller();
        ctl.zoom_by(100.0);
        assert_eq!(ctl.radius(), 5.0);
        ctl.zoom_by(-100.0);
        assert_eq!(ctl.radius(), 1.1);
    }

    #[test]
    fn pose_recompute_is_idempotent() {
        let mut ctl = controller();
        ctl.rotate_by(0.3, -0.2);
        ctl.update_camera_pos();
        let first = ctl.camera.clone();
        ctl.update_camera_pos();
        assert_eq!(ctl.camera, first);
    }

    #[test]
    fn camera_distance_matches_radius() {
        let mut ctl = controller();
        ctl.rotate_by(1.0, 0.4);
        ctl.zoom_by(0.7);
        assert!((ctl.camera.eye.length() - ctl.radius()).abs() < 1e-5);
    }

    #[test]
    fn client_to_ndc_uses_surface_rect() {
        let vp = Viewport {
            left: 100.0,
            top: 50.0,
            width: 200.0,
            height: 100.0,
        };
        assert_eq!(vp.client_to_ndc(Vec2::new(200.0, 100.0)), Some(Vec2::ZERO));
        assert_eq!(
            vp.client_to_ndc(Vec2::new(100.0, 50.0)),
            Some(Vec2::new(-1.0, 1.0))
        );
        assert_eq!(Viewport::sized(0.0, 10.0).client_to_ndc(Vec2::ZERO), None);
    }

    #[test]
    fn origin_projects_to_surface_center() {
        let ctl = controller();
        let px = ctl.project_to_surface(Vec3::ZERO).unwrap();
        assert!((px - Vec2::new(400.0, 300.0)).length() < 1e-3);
    }
}
