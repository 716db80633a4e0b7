//! CPU marker picking: client coordinates to a camera ray, ray against
//! marker pick spheres.

mod picker;
mod ray;

pub use picker::MarkerPicker;
pub use ray::Ray;
