//! Sphere primitive for ray tracing.

use crate::hittable::{HitRecord, Hittable};
use ember_math::{Interval, Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        // Solve |o + t d - c|^2 = r^2 with the half-b form
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        let outward_normal = (p - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere_ahead() -> Sphere {
        Sphere::new(Vec3::new(5.0, 0.0, 0.0), 1.0)
    }

    #[test]
    fn test_sphere_nearest_root() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let rec = sphere_ahead().hit(&ray, Interval::new(0.0, 1e9)).unwrap();

        assert_eq!(rec.t, 4.0);
        assert_eq!(rec.p, Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(rec.normal, Vec3::new(-1.0, 0.0, 0.0));
        assert!(rec.front_face);
    }

    #[test]
    fn test_sphere_far_root_when_near_excluded() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let rec = sphere_ahead().hit(&ray, Interval::new(4.5, 1e9)).unwrap();

        // Exit point: outward normal +X is flipped toward the ray
        assert_eq!(rec.t, 6.0);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_sphere_from_inside() {
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 1.0));
        let rec = sphere_ahead().hit(&ray, Interval::new(1e-4, 1e9)).unwrap();

        assert!((rec.t - 1.0).abs() < 1e-12);
        assert!(!rec.front_face);
        assert!(ray.direction().dot(rec.normal) <= 0.0);
    }

    #[test]
    fn test_sphere_miss() {
        let window = Interval::new(1e-4, 1e9);

        // Negative discriminant, and a sphere entirely behind the ray
        assert!(sphere_ahead().hit(&Ray::new(Vec3::ZERO, Vec3::Y), window).is_none());
        assert!(sphere_ahead().hit(&Ray::new(Vec3::ZERO, -Vec3::X), window).is_none());
    }

    #[test]
    fn test_sphere_window_excludes_both_roots() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(sphere_ahead().hit(&ray, Interval::new(1e-4, 3.9)).is_none());
    }
}
