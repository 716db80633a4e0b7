use glam::Vec3;
use serde::Serialize;

use crate::options::MarkerOptions;

/// Stable marker identifier, the index the host uses for its sticker data.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
)]
#[serde(transparent)]
pub struct MarkerId(pub usize);

/// A location pinned to the globe surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Stable identifier.
    pub id: MarkerId,
    /// Latitude in degrees.
    pub lat: f32,
    /// Longitude in degrees.
    pub lng: f32,
    /// Position in globe-local space (before spin).
    pub local_position: Vec3,
}

impl Marker {
    /// Place a marker at `lat`/`lng`, lifted to `surface_offset` times the
    /// unit radius.
    #[must_use]
    pub fn at_lat_lng(
        id: MarkerId,
        lat: f32,
        lng: f32,
        surface_offset: f32,
    ) -> Self {
        Self {
            id,
            lat,
            lng,
            local_position: lat_lng_to_direction(lat, lng) * surface_offset,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// Per-marker instance data for a billboard pass.
pub struct MarkerInstance {
    /// World-space position (spin applied).
    pub position: [f32; 3],
    /// Uniform billboard scale.
    pub scale: f32,
    /// Linear RGB color.
    pub color: [f32; 3],
    /// Marker index as float, for picking passes.
    pub index: f32,
}

/// Unit direction for a latitude/longitude pair in degrees.
///
/// Longitude 0 faces +X, latitude 90 is +Y.
#[must_use]
pub fn lat_lng_to_direction(lat: f32, lng: f32) -> Vec3 {
    let phi = (90.0 - lat).to_radians();
    let theta = (lng + 180.0).to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vec3::new(-sin_phi * cos_theta, cos_phi, sin_phi * sin_theta)
        .normalize_or_zero()
}

/// Billboard scale for the current camera distance.
///
/// `clamp(base · radius / reference, min, max)`: markers grow with distance
/// so their on-screen size stays roughly constant.
#[must_use]
pub fn marker_scale(radius: f32, options: &MarkerOptions) -> f32 {
    let reference = if options.reference_radius > 0.0 {
        options.reference_radius
    } else {
        1.0
    };
    let unclamped = options.base_scale * (radius / reference);
    unclamped.max(options.min_scale).min(options.max_scale)
}
