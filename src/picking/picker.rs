use glam::Vec2;

use super::ray::Ray;
use crate::camera::{Camera, Viewport};
use crate::scene::{GlobeScene, MarkerId};

/// Radius of the opaque globe the markers sit on.
const GLOBE_RADIUS: f32 = 1.0;

/// Screen-space marker picker.
///
/// Markers render as screen-constant billboards, so each one is hit-tested
/// as a sphere whose radius grows with its view depth. The globe itself
/// occludes markers on its far side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPicker {
    /// World radius per unit of billboard scale per unit of view depth.
    pub radius_factor: f32,
}

impl Default for MarkerPicker {
    fn default() -> Self {
        Self { radius_factor: 0.5 }
    }
}

impl MarkerPicker {
    /// Pick the marker under a client-space point.
    ///
    /// Returns the nearest hit. Ties resolve to the marker inserted first,
    /// so the result only depends on camera, viewport and scene state.
    #[must_use]
    pub fn pick(
        &self,
        camera: &Camera,
        viewport: &Viewport,
        scene: &GlobeScene,
        client: Vec2,
    ) -> Option<MarkerId> {
        let ndc = viewport.client_to_ndc(client)?;
        let ray = camera.ray_from_ndc(ndc);
        self.pick_ray(camera, &ray, scene)
    }

    /// Pick along an explicit ray.
    #[must_use]
    pub fn pick_ray(
        &self,
        camera: &Camera,
        ray: &Ray,
        scene: &GlobeScene,
    ) -> Option<MarkerId> {
        let globe_hit = ray.intersect_sphere(glam::Vec3::ZERO, GLOBE_RADIUS);
        let mut best: Option<(MarkerId, f32)> = None;
        for (id, position) in scene.world_positions() {
            let depth = camera.view_depth(position);
            if depth <= 0.0 {
                continue;
            }
            let radius = self.radius_factor * scene.scale() * depth;
            let Some(t) = ray.intersect_sphere(position, radius) else {
                continue;
            };
            if globe_hit.is_some_and(|g| g < t) {
                continue;
            }
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((id, t)),
            }
        }
        best.map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::camera::CameraController;
    use crate::options::{
        CameraOptions, GlobeOptions, MarkerOptions, OrbitOptions,
    };
    use crate::scene::Marker;

    fn setup() -> (CameraController, GlobeScene) {
        let ctl = CameraController::new(
            &OrbitOptions::default(),
            &CameraOptions::default(),
            Viewport::sized(800.0, 600.0),
        );
        let mut scene =
            GlobeScene::new(&GlobeOptions::default(), &MarkerOptions::default());
        // lng -90 faces +Z, toward the default camera
        let _ = scene.insert(Marker::at_lat_lng(MarkerId(0), 0.0, -90.0, 1.02));
        // far side, directly behind the globe
        let _ = scene.insert(Marker::at_lat_lng(MarkerId(1), 0.0, 90.0, 1.02));
        (ctl, scene)
    }

    #[test]
    fn center_click_hits_facing_marker() {
        let (ctl, scene) = setup();
        let picked = MarkerPicker::default().pick(
            &ctl.camera,
            &ctl.viewport(),
            &scene,
            Vec2::new(400.0, 300.0),
        );
        assert_eq!(picked, Some(MarkerId(0)));
    }

    #[test]
    fn far_side_marker_is_occluded() {
        let (ctl, mut scene) = setup();
        scene.clear();
        let _ = scene.insert(Marker::at_lat_lng(MarkerId(1), 0.0, 90.0, 1.02));
        let picked = MarkerPicker::default().pick(
            &ctl.camera,
            &ctl.viewport(),
            &scene,
            Vec2::new(400.0, 300.0),
        );
        assert_eq!(picked, None);
    }

    #[test]
    fn corner_click_misses() {
        let (ctl, scene) = setup();
        let picked = MarkerPicker::default().pick(
            &ctl.camera,
            &ctl.viewport(),
            &scene,
            Vec2::new(5.0, 5.0),
        );
        assert_eq!(picked, None);
    }

    #[test]
    fn picking_is_deterministic() {
        let (ctl, scene) = setup();
        let picker = MarkerPicker::default();
        let at = Vec2::new(401.0, 299.0);
        let first = picker.pick(&ctl.camera, &ctl.viewport(), &scene, at);
        for _ in 0..10 {
            assert_eq!(
                picker.pick(&ctl.camera, &ctl.viewport(), &scene, at),
                first
            );
        }
    }

    #[test]
    fn nearest_of_overlapping_markers_wins() {
        let (ctl, mut scene) = setup();
        let _ = scene.insert(Marker {
            id: MarkerId(5),
            lat: 0.0,
            lng: -90.0,
            local_position: Vec3::new(0.0, 0.0, 1.5),
        });
        let picked = MarkerPicker::default().pick(
            &ctl.camera,
            &ctl.viewport(),
            &scene,
            Vec2::new(400.0, 300.0),
        );
        assert_eq!(picked, Some(MarkerId(5)));
    }
}
