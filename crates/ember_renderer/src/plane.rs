//! Infinite plane primitive.

use crate::hittable::{HitRecord, Hittable};
use ember_math::{Interval, Ray, Vec3};

/// Rays closer to parallel than this are treated as misses.
const PARALLEL_EPSILON: f64 = 1e-9;

/// An infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
}

impl Plane {
    /// Create a plane. The normal is normalized here.
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize_or_zero(),
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let denom = ray.direction().dot(self.normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.point - ray.origin()).dot(self.normal) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground() -> Plane {
        Plane::new(Vec3::new(0.0, 0.0, -0.75), Vec3::new(0.0, 0.0, 2.0))
    }

    #[test]
    fn test_plane_hit_from_above() {
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let rec = ground().hit(&ray, Interval::new(1e-4, 1e9)).unwrap();

        assert!((rec.t - 0.75).abs() < 1e-12);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_plane_hit_from_below_flips_normal() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -2.0), Vec3::new(0.3, 0.1, 1.0));
        let rec = ground().hit(&ray, Interval::new(1e-4, 1e9)).unwrap();

        assert!(!rec.front_face);
        assert!(ray.direction().dot(rec.normal) <= 0.0);
        assert!((rec.p.z + 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_parallel_ray_misses() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(ground().hit(&ray, Interval::UNIVERSE).is_none());
    }

    #[test]
    fn test_plane_behind_ray_misses() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(ground().hit(&ray, Interval::new(1e-4, 1e9)).is_none());
    }

    #[test]
    fn test_plane_outside_window_misses() {
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert!(ground().hit(&ray, Interval::new(1e-4, 0.5)).is_none());
    }
}
