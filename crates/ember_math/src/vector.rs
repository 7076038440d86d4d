//! Vector helpers shared by the shading code.

use crate::Vec3;

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - n * (2.0 * v.dot(n))
}

/// Build a tangent frame `(t, b)` such that `(t, b, n)` is orthonormal.
///
/// The reference axis switches from X to Y when `n` is close to the X axis,
/// which keeps the cross product away from zero.
pub fn orthonormal_basis(n: Vec3) -> (Vec3, Vec3) {
    let reference = if n.x.abs() > 0.1 { Vec3::Y } else { Vec3::X };
    let t = reference.cross(n).normalize_or_zero();
    let b = n.cross(t);
    (t, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(reflect(-Vec3::Z, Vec3::Z), Vec3::Z);
    }

    #[test]
    fn test_orthonormal_basis() {
        let normals = [
            Vec3::X,
            -Vec3::X,
            Vec3::Y,
            Vec3::Z,
            Vec3::new(1.0, 1.0, 1.0).normalize(),
            Vec3::new(0.05, -0.3, 0.9).normalize(),
        ];

        for n in normals {
            let (t, b) = orthonormal_basis(n);
            assert!((t.length() - 1.0).abs() < 1e-9, "t not unit for {n:?}");
            assert!((b.length() - 1.0).abs() < 1e-9, "b not unit for {n:?}");
            assert!(t.dot(n).abs() < 1e-9);
            assert!(b.dot(n).abs() < 1e-9);
            assert!(t.dot(b).abs() < 1e-9);
        }
    }
}
