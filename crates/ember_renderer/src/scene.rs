//! Render-time scene: per-kind surface collections, lights, and the
//! nearest-hit and occlusion queries.
//!
//! Surfaces are stored in one contiguous `Vec` per primitive kind. Queries
//! return a `SurfaceId` (kind + index) rather than a reference, so the hot
//! loop never goes through a trait object.

use ember_core::{AreaLight, Material, SceneDescription, SceneResult, Shape};
use ember_math::{Interval, Ray, Vec3};

use crate::hittable::{HitRecord, Hittable};
use crate::{Parallelogram, Plane, Sphere, Triangle};

/// Margin kept at both ends of a shadow ray.
pub const OCCLUSION_EPSILON: f64 = 1e-4;

/// A piece of geometry with its material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface<G> {
    pub geometry: G,
    pub material: Material,
}

/// Tagged reference to a surface in one of the scene's collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceId {
    Parallelogram(usize),
    Triangle(usize),
    Sphere(usize),
    Plane(usize),
}

/// Result of a nearest-hit query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneHit {
    pub record: HitRecord,
    pub surface: SurfaceId,
}

/// Immutable render-time scene.
///
/// Built once before rendering and shared by reference between all worker
/// threads; nothing in it changes while a render is running.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    parallelograms: Vec<Surface<Parallelogram>>,
    triangles: Vec<Surface<Triangle>>,
    spheres: Vec<Surface<Sphere>>,
    planes: Vec<Surface<Plane>>,
    lights: Vec<AreaLight>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a description and build the render-time scene from it.
    pub fn from_description(description: &SceneDescription) -> SceneResult<Self> {
        description.validate()?;

        let mut scene = Scene::new();
        for surface in &description.surfaces {
            // validate() guarantees every material name resolves
            let material = description.material_of(surface).copied().unwrap_or_default();
            match surface.shape {
                Shape::Plane { point, normal } => {
                    scene.add_plane(Plane::new(point, normal), material);
                }
                Shape::Parallelogram { corner, edge1, edge2 } => {
                    scene.add_parallelogram(Parallelogram::new(corner, edge1, edge2), material);
                }
                Shape::Triangle { v0, v1, v2 } => {
                    scene.add_triangle(Triangle::new(v0, v1, v2), material);
                }
                Shape::Sphere { center, radius } => {
                    scene.add_sphere(Sphere::new(center, radius), material);
                }
            }
        }
        for light in &description.lights {
            scene.add_light(light.to_light());
        }

        log::info!(
            "Built scene '{}': {} parallelograms, {} triangles, {} spheres, {} planes, {} lights",
            description.name,
            scene.parallelograms.len(),
            scene.triangles.len(),
            scene.spheres.len(),
            scene.planes.len(),
            scene.lights.len()
        );

        Ok(scene)
    }

    pub fn add_parallelogram(&mut self, geometry: Parallelogram, material: Material) -> SurfaceId {
        self.parallelograms.push(Surface { geometry, material });
        SurfaceId::Parallelogram(self.parallelograms.len() - 1)
    }

    pub fn add_triangle(&mut self, geometry: Triangle, material: Material) -> SurfaceId {
        self.triangles.push(Surface { geometry, material });
        SurfaceId::Triangle(self.triangles.len() - 1)
    }

    pub fn add_sphere(&mut self, geometry: Sphere, material: Material) -> SurfaceId {
        self.spheres.push(Surface { geometry, material });
        SurfaceId::Sphere(self.spheres.len() - 1)
    }

    pub fn add_plane(&mut self, geometry: Plane, material: Material) -> SurfaceId {
        self.planes.push(Surface { geometry, material });
        SurfaceId::Plane(self.planes.len() - 1)
    }

    pub fn add_light(&mut self, light: AreaLight) {
        self.lights.push(light);
    }

    pub fn lights(&self) -> &[AreaLight] {
        &self.lights
    }

    /// Total number of surfaces across all kinds.
    pub fn surface_count(&self) -> usize {
        self.parallelograms.len() + self.triangles.len() + self.spheres.len() + self.planes.len()
    }

    /// Material of the referenced surface, or `None` for a foreign id.
    pub fn material(&self, id: SurfaceId) -> Option<&Material> {
        match id {
            SurfaceId::Parallelogram(i) => self.parallelograms.get(i).map(|s| &s.material),
            SurfaceId::Triangle(i) => self.triangles.get(i).map(|s| &s.material),
            SurfaceId::Sphere(i) => self.spheres.get(i).map(|s| &s.material),
            SurfaceId::Plane(i) => self.planes.get(i).map(|s| &s.material),
        }
    }

    /// Intersect a single surface, bypassing the scan.
    pub fn hit_surface(&self, id: SurfaceId, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        match id {
            SurfaceId::Parallelogram(i) => self.parallelograms.get(i)?.geometry.hit(ray, ray_t),
            SurfaceId::Triangle(i) => self.triangles.get(i)?.geometry.hit(ray, ray_t),
            SurfaceId::Sphere(i) => self.spheres.get(i)?.geometry.hit(ray, ray_t),
            SurfaceId::Plane(i) => self.planes.get(i)?.geometry.hit(ray, ray_t),
        }
    }

    /// Every surface id, in scan order.
    pub fn surface_ids(&self) -> impl Iterator<Item = SurfaceId> + '_ {
        (0..self.parallelograms.len())
            .map(SurfaceId::Parallelogram)
            .chain((0..self.triangles.len()).map(SurfaceId::Triangle))
            .chain((0..self.spheres.len()).map(SurfaceId::Sphere))
            .chain((0..self.planes.len()).map(SurfaceId::Plane))
    }

    /// Closest intersection strictly inside `ray_t`.
    ///
    /// Collections are scanned in the order parallelograms, triangles,
    /// spheres, planes. Each accepted hit lowers the window's upper bound,
    /// so a later surface only replaces it when strictly closer.
    pub fn nearest_hit(&self, ray: &Ray, ray_t: Interval) -> Option<SceneHit> {
        let mut window = ray_t;
        let mut closest = None;

        closest_in(&self.parallelograms, SurfaceId::Parallelogram, ray, &mut window, &mut closest);
        closest_in(&self.triangles, SurfaceId::Triangle, ray, &mut window, &mut closest);
        closest_in(&self.spheres, SurfaceId::Sphere, ray, &mut window, &mut closest);
        closest_in(&self.planes, SurfaceId::Plane, ray, &mut window, &mut closest);

        closest
    }

    /// True if anything blocks the segment from `point` along unit `dir`
    /// within `max_distance`, ignoring `OCCLUSION_EPSILON` at both ends.
    pub fn occluded(&self, point: Vec3, dir: Vec3, max_distance: f64) -> bool {
        let ray = Ray::new(point, dir);
        let window = Interval::new(OCCLUSION_EPSILON, max_distance - OCCLUSION_EPSILON);

        blocks(&self.parallelograms, &ray, window)
            || blocks(&self.triangles, &ray, window)
            || blocks(&self.spheres, &ray, window)
            || blocks(&self.planes, &ray, window)
    }
}

fn closest_in<G: Hittable>(
    surfaces: &[Surface<G>],
    tag: fn(usize) -> SurfaceId,
    ray: &Ray,
    window: &mut Interval,
    closest: &mut Option<SceneHit>,
) {
    for (index, surface) in surfaces.iter().enumerate() {
        if let Some(record) = surface.geometry.hit(ray, *window) {
            *window = window.with_max(record.t);
            *closest = Some(SceneHit {
                record,
                surface: tag(index),
            });
        }
    }
}

fn blocks<G: Hittable>(surfaces: &[Surface<G>], ray: &Ray, window: Interval) -> bool {
    surfaces.iter().any(|s| s.geometry.hit(ray, window).is_some())
}
