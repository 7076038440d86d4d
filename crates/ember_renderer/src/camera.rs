//! Camera for ray generation.

use ember_core::CameraDesc;
use ember_math::{Ray, Vec3};

/// Fixed pinhole camera looking down +X.
///
/// The image plane is the square `x = 0, y,z in [-1, 1]`; rays start at the
/// eye behind it. The mapping ignores the image aspect ratio, so non-square
/// images stretch the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    eye: Vec3,
}

impl Camera {
    /// Create a camera with the eye at `(-1, 0, 0)`.
    pub fn new() -> Self {
        Self {
            eye: Vec3::new(-1.0, 0.0, 0.0),
        }
    }

    /// Camera described by a scene file.
    pub fn from_desc(desc: &CameraDesc) -> Self {
        Self::new().with_eye(desc.eye)
    }

    /// Set the eye position.
    pub fn with_eye(mut self, eye: Vec3) -> Self {
        self.eye = eye;
        self
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Ray through the image-plane point for `u, v` in `[0, 1]`.
    ///
    /// `u` runs along +Y and `v` along +Z.
    pub fn get_ray(&self, u: f64, v: f64) -> Ray {
        let target = Vec3::new(0.0, 2.0 * u - 1.0, 2.0 * v - 1.0);
        Ray::new(self.eye, target - self.eye)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray() {
        let ray = Camera::new().get_ray(0.5, 0.5);
        assert_eq!(ray.origin(), Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(ray.direction(), Vec3::X);
    }

    #[test]
    fn test_corner_rays() {
        let camera = Camera::new();
        let low = camera.get_ray(0.0, 0.0);
        let high = camera.get_ray(1.0, 1.0);

        let expected = Vec3::new(1.0, -1.0, -1.0).normalize();
        assert!((low.direction() - expected).length() < 1e-12);
        assert!((high.direction() - Vec3::new(1.0, 1.0, 1.0).normalize()).length() < 1e-12);
    }

    #[test]
    fn test_from_desc() {
        let desc = CameraDesc {
            eye: Vec3::new(-2.0, 0.0, 0.5),
        };
        let camera = Camera::from_desc(&desc);
        assert_eq!(camera.eye(), desc.eye);
        assert_eq!(Camera::from_desc(&CameraDesc::default()), Camera::new());
    }
}
