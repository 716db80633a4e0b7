//! Screen-space placement of the detail popup beside the locked marker.

use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::camera::orbit::clamp_low_wins;
use crate::camera::{CameraController, Viewport};
use crate::options::PopupOptions;

/// Popup rectangle relative to the render surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopupPlacement {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Width used for clamping.
    pub width: f32,
    /// Height used for clamping.
    pub height: f32,
}

impl PopupPlacement {
    /// Whether a client-space point falls inside the popup.
    #[must_use]
    pub fn contains_client(&self, client: Vec2, viewport: &Viewport) -> bool {
        let x = client.x - viewport.left;
        let y = client.y - viewport.top;
        x >= self.left
            && x <= self.left + self.width
            && y >= self.top
            && y <= self.top + self.height
    }
}

/// Computes popup placement from the camera and the anchor marker.
#[derive(Debug, Clone, Default)]
pub struct PopupLayout {
    /// Measured popup size reported by the host, if any.
    measured: Option<Vec2>,
}

impl PopupLayout {
    /// Record the popup's rendered size; `None` reverts to the fallback.
    pub fn set_measured_size(&mut self, size: Option<Vec2>) {
        self.measured = size.filter(|s| s.x > 0.0 && s.y > 0.0);
    }

    /// Size used for clamping.
    #[must_use]
    pub fn size(&self, options: &PopupOptions) -> Vec2 {
        self.measured
            .unwrap_or(Vec2::new(options.fallback_width, options.fallback_height))
    }

    /// Place the popup next to `anchor` (world space).
    ///
    /// Offsets the projected anchor and clamps the popup inside the surface
    /// with `margin` on every side. When the surface is too small to fit,
    /// the popup pins to the top-left margin. Returns `None` for anchors
    /// behind the camera.
    #[must_use]
    pub fn place(
        &self,
        camera: &CameraController,
        anchor: Vec3,
        options: &PopupOptions,
    ) -> Option<PopupPlacement> {
        let px = camera.project_to_surface(anchor)?;
        let viewport = camera.viewport();
        let size = self.size(options);
        let left = clamp_low_wins(
            px.x + options.offset_x,
            options.margin,
            viewport.width - size.x - options.margin,
        );
        let top = clamp_low_wins(
            px.y + options.offset_y,
            options.margin,
            viewport.height - size.y - options.margin,
        );
        Some(PopupPlacement {
            left,
            top,
            width: size.x,
            height: size.y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{CameraOptions, OrbitOptions};

    fn controller(width: f32, height: f32) -> CameraController {
        CameraController::new(
            &OrbitOptions::default(),
            &CameraOptions::default(),
            Viewport::sized(width, height),
        )
    }

    #[test]
    fn offsets_from_projected_anchor() {
        let ctl = controller(1200.0, 900.0);
        let placement = PopupLayout::default()
            .place(&ctl, Vec3::ZERO, &PopupOptions::default())
            .unwrap();
        assert!((placement.left - 780.0).abs() < 1e-3);
        assert!((placement.top - 250.0).abs() < 1e-3);
        assert_eq!(placement.width, 320.0);
        assert_eq!(placement.height, 220.0);
    }

    #[test]
    fn clamps_inside_viewport() {
        let ctl = controller(800.0, 300.0);
        let placement = PopupLayout::default()
            .place(&ctl, Vec3::ZERO, &PopupOptions::default())
            .unwrap();
        // right edge: 800 - 320 - 10
        assert!((placement.left - 470.0).abs() < 1e-3);
        // anchor y 150 - 200 < margin
        assert_eq!(placement.top, 10.0);
    }

    #[test]
    fn tiny_viewport_pins_to_margin() {
        let ctl = controller(200.0, 100.0);
        let placement = PopupLayout::default()
            .place(&ctl, Vec3::ZERO, &PopupOptions::default())
            .unwrap();
        assert_eq!(placement.left, 10.0);
        assert_eq!(placement.top, 10.0);
    }

    #[test]
    fn measured_size_overrides_fallback() {
        let ctl = controller(1200.0, 900.0);
        let mut layout = PopupLayout::default();
        layout.set_measured_size(Some(Vec2::new(500.0, 100.0)));
        let placement = layout
            .place(&ctl, Vec3::ZERO, &PopupOptions::default())
            .unwrap();
        assert_eq!(placement.width, 500.0);
        // 1200 - 500 - 10
        assert!((placement.left - 690.0).abs() < 1e-3);
        layout.set_measured_size(Some(Vec2::ZERO));
        assert_eq!(layout.size(&PopupOptions::default()), Vec2::new(320.0, 220.0));
    }

    #[test]
    fn contains_uses_surface_offset() {
        let placement = PopupPlacement {
            left: 100.0,
            top: 50.0,
            width: 20.0,
            height: 10.0,
        };
        let vp = Viewport {
            left: 10.0,
            top: 10.0,
            width: 400.0,
            height: 300.0,
        };
        assert!(placement.contains_client(Vec2::new(115.0, 65.0), &vp));
        assert!(!placement.contains_client(Vec2::new(105.0, 65.0), &vp));
    }
}
