//! Rectangular area lights.

use ember_math::{Color, Vec3};

/// A planar parallelogram emitter.
///
/// The light is described by one corner and two edge vectors; `normal` is
/// the unit direction the light shines toward. Lights are sampled directly by
/// the direct-lighting estimator and are not themselves intersectable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaLight {
    pub corner: Vec3,
    pub edge1: Vec3,
    pub edge2: Vec3,
    pub normal: Vec3,
    pub radiance: Color,
}

impl AreaLight {
    /// Create a light. `normal` is normalized here.
    pub fn new(corner: Vec3, edge1: Vec3, edge2: Vec3, normal: Vec3, radiance: Color) -> Self {
        Self {
            corner,
            edge1,
            edge2,
            normal: normal.normalize_or_zero(),
            radiance,
        }
    }

    /// Surface area, `|edge1 x edge2|`.
    #[inline]
    pub fn area(&self) -> f64 {
        self.edge1.cross(self.edge2).length()
    }

    /// Map a point of the unit parameter square onto the light.
    #[inline]
    pub fn sample(&self, u: f64, v: f64) -> Vec3 {
        self.corner + self.edge1 * u + self.edge2 * v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ceiling_light() -> AreaLight {
        AreaLight::new(
            Vec3::new(2.0, -2.0, 5.0),
            Vec3::new(0.0, 4.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -3.0),
            Color::ONE,
        )
    }

    #[test]
    fn test_area() {
        assert_eq!(ceiling_light().area(), 16.0);
    }

    #[test]
    fn test_normal_is_unit() {
        assert_eq!(ceiling_light().normal, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_sample_corners() {
        let light = ceiling_light();
        assert_eq!(light.sample(0.0, 0.0), Vec3::new(2.0, -2.0, 5.0));
        assert_eq!(light.sample(1.0, 1.0), Vec3::new(6.0, 2.0, 5.0));
        assert_eq!(light.sample(0.5, 0.5), Vec3::new(4.0, 0.0, 5.0));
    }
}
