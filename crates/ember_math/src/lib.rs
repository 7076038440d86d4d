//! Ember math - double precision vectors, rays and intervals.
//!
//! Vectors are `glam::DVec3`; the renderer works in f64 throughout so the
//! tight intersection tolerances (1e-12) stay meaningful.

pub use glam::DVec3;

/// 3D vector / point.
pub type Vec3 = DVec3;

/// Linear RGB radiance. Channels are unbounded above.
pub type Color = DVec3;

mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{orthonormal_basis, reflect};
