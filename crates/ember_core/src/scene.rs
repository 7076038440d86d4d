//! Scene description types.
//!
//! A `SceneDescription` is the explicit configuration a renderer consumes:
//! a named material table, an ordered surface list, a light list and the
//! camera parameters. It carries no acceleration data and no runtime state.

use std::collections::BTreeMap;

use ember_math::{Color, Vec3};
use serde::{Deserialize, Serialize};

use crate::light::AreaLight;
use crate::loader::{SceneError, SceneResult};
use crate::material::Material;

/// Geometric shape of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// Infinite plane through `point`.
    Plane { point: Vec3, normal: Vec3 },
    /// Parallelogram spanned by two edges from `corner`.
    Parallelogram { corner: Vec3, edge1: Vec3, edge2: Vec3 },
    Triangle { v0: Vec3, v1: Vec3, v2: Vec3 },
    Sphere { center: Vec3, radius: f64 },
}

/// A shape paired with the name of its material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceDesc {
    pub shape: Shape,
    pub material: String,
}

/// A rectangular area light as written in a scene file.
///
/// When `normal` is omitted the light faces along `edge1 x edge2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightDesc {
    pub corner: Vec3,
    pub edge1: Vec3,
    pub edge2: Vec3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<Vec3>,
    pub radiance: Color,
}

impl LightDesc {
    /// Resolve into a runtime light.
    pub fn to_light(&self) -> AreaLight {
        let normal = self.normal.unwrap_or_else(|| self.edge1.cross(self.edge2));
        AreaLight::new(self.corner, self.edge1, self.edge2, normal, self.radiance)
    }
}

/// Pinhole camera parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraDesc {
    /// Eye point, one unit behind the camera plane `x = 0` by default.
    pub eye: Vec3,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            eye: Vec3::new(-1.0, 0.0, 0.0),
        }
    }
}

/// A complete scene: materials, surfaces, lights and camera.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Scene name (preset name or file stem)
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub camera: CameraDesc,

    /// Materials by name
    #[serde(default)]
    pub materials: BTreeMap<String, Material>,

    /// Surfaces in declaration order
    #[serde(default)]
    pub surfaces: Vec<SurfaceDesc>,

    #[serde(default)]
    pub lights: Vec<LightDesc>,
}

impl SceneDescription {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add (or replace) a named material.
    pub fn add_material(&mut self, name: impl Into<String>, material: Material) {
        self.materials.insert(name.into(), material);
    }

    /// Add a surface and return its index in the surface list.
    pub fn add_surface(&mut self, shape: Shape, material: impl Into<String>) -> usize {
        self.surfaces.push(SurfaceDesc {
            shape,
            material: material.into(),
        });
        self.surfaces.len() - 1
    }

    /// Add an area light.
    pub fn add_light(&mut self, light: LightDesc) {
        self.lights.push(light);
    }

    /// Look up the material a surface refers to.
    pub fn material_of(&self, surface: &SurfaceDesc) -> Option<&Material> {
        self.materials.get(&surface.material)
    }

    /// Check references and reject degenerate input.
    ///
    /// Degenerate triangles and parallelograms are accepted: the intersection
    /// code treats them as never hit.
    pub fn validate(&self) -> SceneResult<()> {
        for (index, surface) in self.surfaces.iter().enumerate() {
            if !self.materials.contains_key(&surface.material) {
                return Err(SceneError::UnknownMaterial {
                    index,
                    material: surface.material.clone(),
                });
            }
            if let Shape::Sphere { radius, .. } = surface.shape {
                if radius.is_nan() || radius <= 0.0 {
                    return Err(SceneError::InvalidRadius { index, radius });
                }
            }
        }

        for (index, light) in self.lights.iter().enumerate() {
            let light = light.to_light();
            let area = light.area();
            if area.is_nan() || area <= 0.0 || light.normal == Vec3::ZERO {
                return Err(SceneError::DegenerateLight { index });
            }
        }

        if self.lights.is_empty() && !self.materials.values().any(Material::is_emissive) {
            log::warn!("Scene '{}' has no lights or emitters", self.name);
        }

        Ok(())
    }
}
