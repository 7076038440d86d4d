//! Parallelogram primitive (an axis-free rectangle when the edges are
//! perpendicular).

use crate::hittable::{HitRecord, Hittable};
use ember_math::{Interval, Ray, Vec3};

const PARALLEL_EPSILON: f64 = 1e-12;

/// A parallelogram spanned by `edge1` and `edge2` from `corner`.
///
/// The outward normal is `normalize(edge1 x edge2)`. Containment projects the
/// hit offset onto each edge, which is exact when the edges are perpendicular.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallelogram {
    corner: Vec3,
    edge1: Vec3,
    edge2: Vec3,
    normal: Vec3,
}

impl Parallelogram {
    pub fn new(corner: Vec3, edge1: Vec3, edge2: Vec3) -> Self {
        Self {
            corner,
            edge1,
            edge2,
            normal: edge1.cross(edge2).normalize_or_zero(),
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Surface area, `|edge1 x edge2|`.
    pub fn area(&self) -> f64 {
        self.edge1.cross(self.edge2).length()
    }
}

impl Hittable for Parallelogram {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let denom = ray.direction().dot(self.normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.corner - ray.origin()).dot(self.normal) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        // Project the in-plane offset onto both edges
        let r = ray.at(t) - self.corner;
        let a = r.dot(self.edge1) / self.edge1.length_squared();
        let b = r.dot(self.edge2) / self.edge2.length_squared();
        if !(0.0..=1.0).contains(&a) || !(0.0..=1.0).contains(&b) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4x4 square at z = 5 facing down.
    fn ceiling_panel() -> Parallelogram {
        Parallelogram::new(
            Vec3::new(2.0, -2.0, 5.0),
            Vec3::new(0.0, 4.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
        )
    }

    #[test]
    fn test_normal_and_area() {
        let panel = ceiling_panel();
        assert_eq!(panel.normal(), -Vec3::Z);
        assert_eq!(panel.area(), 16.0);
    }

    #[test]
    fn test_hit_inside() {
        let ray = Ray::new(Vec3::new(4.0, 0.0, 0.0), Vec3::Z);
        let rec = ceiling_panel().hit(&ray, Interval::new(1e-4, 1e9)).unwrap();

        assert!((rec.t - 5.0).abs() < 1e-12);
        assert!(rec.front_face);
        assert_eq!(rec.normal, -Vec3::Z);
    }

    #[test]
    fn test_hit_from_behind() {
        let ray = Ray::new(Vec3::new(4.0, 0.0, 10.0), -Vec3::Z);
        let rec = ceiling_panel().hit(&ray, Interval::new(1e-4, 1e9)).unwrap();

        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
        assert!(ray.direction().dot(rec.normal) <= 0.0);
    }

    #[test]
    fn test_miss_outside_edges() {
        let panel = ceiling_panel();
        let window = Interval::new(1e-4, 1e9);

        // Beyond edge2 (x > 6) and before the corner (y < -2)
        assert!(panel.hit(&Ray::new(Vec3::new(6.5, 0.0, 0.0), Vec3::Z), window).is_none());
        assert!(panel.hit(&Ray::new(Vec3::new(4.0, -2.5, 0.0), Vec3::Z), window).is_none());
    }

    #[test]
    fn test_rotated_rectangle() {
        // Rectangle turned 45 degrees about Z; (1, 0) lies in its bounding
        // box but outside the rectangle itself.
        let rotated = Parallelogram::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0), Vec3::new(-0.5, 0.5, 0.0));
        let window = Interval::new(1e-4, 1e9);

        let inside = Ray::new(Vec3::new(0.25, 0.75, 1.0), -Vec3::Z);
        let outside = Ray::new(Vec3::new(1.0, 0.0, 1.0), -Vec3::Z);
        assert!(rotated.hit(&inside, window).is_some());
        assert!(rotated.hit(&outside, window).is_none());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::X);
        assert!(ceiling_panel().hit(&ray, Interval::UNIVERSE).is_none());
    }
}
