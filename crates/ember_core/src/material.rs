//! Surface response descriptors.

use ember_math::Color;
use serde::{Deserialize, Serialize};

/// How a surface responds to light.
///
/// Exactly one behaviour is active per material:
/// - `Lambert`: ideal diffuse reflector with the given albedo
/// - `Mirror`: perfect specular reflector, no colour of its own
/// - `Emissive`: emits `radiance` from its front face and reflects nothing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Material {
    Lambert { albedo: Color },
    Mirror,
    Emissive { radiance: Color },
}

impl Material {
    /// Diffuse material with the given albedo.
    pub fn lambert(albedo: Color) -> Self {
        Material::Lambert { albedo }
    }

    /// Emitter with the given radiance.
    pub fn emissive(radiance: Color) -> Self {
        Material::Emissive { radiance }
    }

    /// Check if this material is emissive.
    pub fn is_emissive(&self) -> bool {
        matches!(self, Material::Emissive { .. })
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::lambert(Color::splat(0.8))
    }
}
