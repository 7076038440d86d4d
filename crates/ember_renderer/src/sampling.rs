//! Random sampling helpers.

use std::f64::consts::PI;

use ember_math::{orthonormal_basis, Vec3};
use rand::{Rng, RngCore};

/// Uniform sample in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Sample a direction on the hemisphere around `normal` with density
/// proportional to the cosine of the angle to the normal.
pub fn cosine_hemisphere(normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let r1 = 2.0 * PI * gen_f64(rng);
    let r2 = gen_f64(rng);
    let r2s = r2.sqrt();

    let local = Vec3::new(r1.cos() * r2s, r1.sin() * r2s, (1.0 - r2).sqrt());
    let (t, b) = orthonormal_basis(normal);
    (t * local.x + b * local.y + normal * local.z).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gen_f64_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let x = gen_f64(&mut rng);
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_cosine_hemisphere_stays_above_surface() {
        let mut rng = StdRng::seed_from_u64(2);
        let normals = [Vec3::X, -Vec3::Z, Vec3::new(0.3, -0.4, 0.5).normalize()];

        for n in normals {
            for _ in 0..500 {
                let d = cosine_hemisphere(n, &mut rng);
                assert!((d.length() - 1.0).abs() < 1e-9);
                assert!(d.dot(n) >= -1e-12);
            }
        }
    }

    #[test]
    fn test_cosine_hemisphere_mean_cosine() {
        // E[cos theta] under a cosine-weighted density is 2/3
        let mut rng = StdRng::seed_from_u64(3);
        let n = Vec3::Z;
        let trials = 20_000;
        let mean: f64 = (0..trials)
            .map(|_| cosine_hemisphere(n, &mut rng).dot(n))
            .sum::<f64>()
            / trials as f64;

        assert!((mean - 2.0 / 3.0).abs() < 0.01, "mean cosine {mean}");
    }
}
