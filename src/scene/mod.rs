//! The globe and its markers.
//!
//! Markers live in globe-local space; the globe spins about +Y, so a
//! marker's world position changes every frame. Marker ids resolve through
//! a hash table, letting hosts use sparse or reordered ids.

mod marker;

use glam::{Quat, Vec3};
pub use marker::{
    lat_lng_to_direction, marker_scale, Marker, MarkerId, MarkerInstance,
};
use rustc_hash::FxHashMap;

use crate::options::{GlobeOptions, MarkerOptions};

// ---------------------------------------------------------------------------
// GlobeScene
// ---------------------------------------------------------------------------

/// Marker table plus the globe's ambient spin.
pub struct GlobeScene {
    markers: Vec<Marker>,
    slots: FxHashMap<MarkerId, usize>,
    /// Accumulated spin angle about +Y (radians).
    spin: f32,
    spin_per_frame: f32,
    highlighted: Option<MarkerId>,
    /// Billboard scale shared by every marker, refreshed per frame.
    scale: f32,
}

impl GlobeScene {
    /// Empty globe.
    #[must_use]
    pub fn new(globe: &GlobeOptions, marker: &MarkerOptions) -> Self {
        Self {
            markers: Vec::new(),
            slots: FxHashMap::default(),
            spin: 0.0,
            spin_per_frame: globe.spin_per_frame,
            highlighted: None,
            scale: marker.base_scale,
        }
    }

    // -- Markers --

    /// Insert or replace a marker. Returns the replaced marker, if any.
    pub fn insert(&mut self, marker: Marker) -> Option<Marker> {
        if let Some(&slot) = self.slots.get(&marker.id) {
            return Some(std::mem::replace(&mut self.markers[slot], marker));
        }
        let _ = self.slots.insert(marker.id, self.markers.len());
        self.markers.push(marker);
        None
    }

    /// Remove every marker and any highlight.
    pub fn clear(&mut self) {
        self.markers.clear();
        self.slots.clear();
        self.highlighted = None;
    }

    /// Look up a marker by id.
    #[must_use]
    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.slots.get(&id).map(|&slot| &self.markers[slot])
    }

    /// Whether `id` names a marker on the globe.
    #[must_use]
    pub fn contains(&self, id: MarkerId) -> bool {
        self.slots.contains_key(&id)
    }

    /// All markers in insertion order.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Number of markers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether the globe has no markers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    // -- Spin --

    /// Current globe rotation.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.spin)
    }

    /// Accumulated spin angle (radians).
    #[must_use]
    pub fn spin(&self) -> f32 {
        self.spin
    }

    /// Advance the ambient spin by one frame.
    pub fn advance_spin(&mut self) {
        if self.spin_per_frame != 0.0 {
            self.spin += self.spin_per_frame;
        }
    }

    /// Change the per-frame spin.
    pub fn set_spin_per_frame(&mut self, spin_per_frame: f32) {
        self.spin_per_frame = spin_per_frame;
    }

    /// World position of a marker with the current spin applied.
    #[must_use]
    pub fn world_position(&self, id: MarkerId) -> Option<Vec3> {
        self.marker(id).map(|m| self.rotation() * m.local_position)
    }

    /// World positions of every marker, paired with their ids.
    pub fn world_positions(&self) -> impl Iterator<Item = (MarkerId, Vec3)> + '_ {
        let rotation = self.rotation();
        self.markers
            .iter()
            .map(move |m| (m.id, rotation * m.local_position))
    }

    // -- Visual state --

    /// Highlight exactly `id` (or nothing).
    pub fn set_highlight(&mut self, id: Option<MarkerId>) {
        self.highlighted = id;
    }

    /// The highlighted marker, if any.
    #[must_use]
    pub fn highlighted(&self) -> Option<MarkerId> {
        self.highlighted
    }

    /// Color for a marker under the current highlight.
    #[must_use]
    pub fn color(&self, id: MarkerId, options: &MarkerOptions) -> [f32; 3] {
        if self.highlighted == Some(id) {
            options.highlight_color
        } else {
            options.idle_color
        }
    }

    /// Shared billboard scale.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Recompute the billboard scale for a camera distance.
    pub fn refresh_scale(&mut self, radius: f32, options: &MarkerOptions) {
        self.scale = marker_scale(radius, options);
    }

    /// Instance data for every marker.
    #[must_use]
    pub fn instances(&self, options: &MarkerOptions) -> Vec<MarkerInstance> {
        self.world_positions()
            .map(|(id, position)| MarkerInstance {
                position: position.to_array(),
                scale: self.scale,
                color: self.color(id, options),
                index: id.0 as f32,
            })
            .collect()
    }
}
