//! Hittable trait and HitRecord for ray-object intersection.

use ember_math::{Interval, Ray, Vec3};

/// Record of a ray-surface intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal, always facing against the ray
    pub normal: Vec3,
    /// Whether the ray hit the front (outward-facing) side of the surface
    pub front_face: bool,
}

impl HitRecord {
    /// Build a record at `t`, orienting the normal against the ray.
    ///
    /// `front_face` is true when the outward normal already faced the ray;
    /// otherwise the stored normal is the flipped outward normal. Either way
    /// `ray.direction().dot(normal) <= 0`.
    #[inline]
    pub fn new(ray: &Ray, t: f64, outward_normal: Vec3) -> Self {
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            t,
            p: ray.at(t),
            normal,
            front_face,
        }
    }
}

/// Trait for surfaces that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest intersection with parameter strictly inside `ray_t`, if any.
    ///
    /// Geometric degeneracies (parallel rays, zero determinants, negative
    /// discriminants) are reported as `None`, never as errors.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;
}
