//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::hittable::{HitRecord, Hittable};
use ember_math::{Interval, Ray, Vec3};

/// Determinants smaller than this mean the ray is parallel to the triangle
/// or the triangle is degenerate.
const DET_EPSILON: f64 = 1e-12;

/// A triangle primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertices
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Pre-computed face normal (unit length, zero when degenerate)
    normal: Vec3,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The outward normal follows the winding: `(v1 - v0) x (v2 - v0)`.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        Self { v0, v1, v2, normal }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction().cross(edge2);
        let det = edge1.dot(h);
        if det.abs() < DET_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = ray.origin() - self.v0;
        let u = inv_det * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = inv_det * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = inv_det * edge2.dot(q);
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Triangle in the x = 2 plane, wound so its normal faces -X.
    fn facing_camera() -> Triangle {
        Triangle::new(
            Vec3::new(2.0, -1.0, -1.0),
            Vec3::new(2.0, 0.0, 1.0),
            Vec3::new(2.0, 1.0, -1.0),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let rec = facing_camera().hit(&ray, Interval::new(1e-4, 1e9)).unwrap();

        assert!((rec.t - 2.0).abs() < 1e-12);
        assert!(rec.front_face);
        assert_eq!(rec.normal, -Vec3::X);
    }

    #[test]
    fn test_triangle_back_face() {
        let ray = Ray::new(Vec3::new(4.0, 0.0, 0.0), -Vec3::X);
        let rec = facing_camera().hit(&ray, Interval::new(1e-4, 1e9)).unwrap();

        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::X);
    }

    #[test]
    fn test_triangle_miss() {
        let tri = facing_camera();
        let window = Interval::new(1e-4, 1e9);

        // Pointing away, and passing beside the triangle
        assert!(tri.hit(&Ray::new(Vec3::ZERO, -Vec3::X), window).is_none());
        assert!(tri.hit(&Ray::new(Vec3::new(0.0, 0.9, 0.9), Vec3::X), window).is_none());
    }

    #[test]
    fn test_degenerate_triangle_never_hit() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(tri.normal(), Vec3::ZERO);

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let origin = Vec3::new(
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
            );
            let target = Vec3::new(rng.gen_range(0.0..2.0), 0.0, 0.0);
            let ray = Ray::new(origin, target - origin);
            assert!(tri.hit(&ray, Interval::UNIVERSE).is_none());
        }
    }
}
