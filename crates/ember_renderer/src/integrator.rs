//! Radiance estimation.
//!
//! Implements Monte Carlo path tracing with:
//! - Stratified direct lighting from rectangular area lights
//! - Perfect mirror recursion
//! - Cosine-weighted indirect bounces with Russian roulette termination

use std::f64::consts::PI;

use ember_core::{AreaLight, Material};
use ember_math::{reflect, Color, Interval, Ray, Vec3};
use rand::RngCore;

use crate::hittable::HitRecord;
use crate::sampling::{cosine_hemisphere, gen_f64};
use crate::scene::Scene;

/// Near bound of every primary and bounce ray.
const T_MIN: f64 = 1e-4;
/// Far bound of every primary and bounce ray.
const T_MAX: f64 = 1e9;

/// Russian roulette settings for indirect bounces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RussianRoulette {
    /// When false every path survives until the depth limit
    pub enabled: bool,
    /// Paths at or below this remaining depth always survive
    pub floor_depth: u32,
    /// Upper bound of the survival probability
    pub max_survival: f64,
}

impl Default for RussianRoulette {
    fn default() -> Self {
        Self {
            enabled: true,
            floor_depth: 2,
            max_survival: 0.95,
        }
    }
}

impl RussianRoulette {
    /// Roulette switched off; the survival probability is always 1.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Survival probability for a bounce off `albedo` with `depth` remaining.
    pub fn survival(&self, albedo: Color, depth: u32) -> f64 {
        if !self.enabled || depth <= self.floor_depth {
            1.0
        } else {
            albedo.max_element().min(self.max_survival)
        }
    }
}

/// Per-path shading options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathOptions {
    /// Direct-light samples per light at every diffuse hit
    pub light_samples: u32,
    pub roulette: RussianRoulette,
}

impl PathOptions {
    pub fn new(light_samples: u32) -> Self {
        Self {
            light_samples,
            roulette: RussianRoulette::default(),
        }
    }

    pub fn with_roulette(mut self, roulette: RussianRoulette) -> Self {
        self.roulette = roulette;
        self
    }
}

impl Default for PathOptions {
    fn default() -> Self {
        Self::new(16)
    }
}

/// Radiance estimator used for every camera sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Integrator {
    /// Direct lighting plus indirect diffuse bounces
    #[default]
    Path,
    /// Direct lighting only; mirrors still recurse
    Direct,
    /// Surface normal as a colour, for debugging geometry
    Normals,
}

impl Integrator {
    /// Estimate the radiance arriving along `ray`.
    pub fn radiance(
        self,
        scene: &Scene,
        ray: &Ray,
        depth: u32,
        options: &PathOptions,
        rng: &mut dyn RngCore,
    ) -> Color {
        match self {
            Integrator::Path => scene.trace(ray, depth, options, true, rng),
            Integrator::Direct => scene.trace(ray, depth, options, false, rng),
            Integrator::Normals => scene.shade_normals(ray),
        }
    }
}

/// Background seen by rays that leave the scene.
pub fn sky_gradient(ray: &Ray) -> Color {
    let t = 0.5 * (ray.direction().y + 1.0);
    Color::new((1.0 - t) + 0.5 * t, (1.0 - t) + 0.7 * t, 1.0)
}

impl Scene {
    /// Path-trace `ray` with the default Russian roulette settings.
    pub fn shade(&self, ray: &Ray, depth: u32, light_samples: u32, rng: &mut dyn RngCore) -> Color {
        self.shade_path(ray, depth, &PathOptions::new(light_samples), rng)
    }

    /// Path-trace `ray` with `depth` bounces remaining.
    pub fn shade_path(&self, ray: &Ray, depth: u32, options: &PathOptions, rng: &mut dyn RngCore) -> Color {
        self.trace(ray, depth, options, true, rng)
    }

    /// Map the hit normal `n` to `0.5 * (n + 1)`; misses see the sky.
    pub fn shade_normals(&self, ray: &Ray) -> Color {
        match self.nearest_hit(ray, Interval::new(T_MIN, T_MAX)) {
            Some(hit) => 0.5 * (hit.record.normal + Color::ONE),
            None => sky_gradient(ray),
        }
    }

    fn trace(
        &self,
        ray: &Ray,
        depth: u32,
        options: &PathOptions,
        indirect: bool,
        rng: &mut dyn RngCore,
    ) -> Color {
        if depth == 0 {
            return Color::ZERO;
        }

        let Some(hit) = self.nearest_hit(ray, Interval::new(T_MIN, T_MAX)) else {
            return sky_gradient(ray);
        };
        let rec = hit.record;

        match self.material(hit.surface).copied().unwrap_or_default() {
            Material::Emissive { radiance } => {
                // Emitters shine from their front face only
                if rec.front_face {
                    radiance
                } else {
                    Color::ZERO
                }
            }
            Material::Mirror => {
                let reflected = Ray::new(rec.p, reflect(ray.direction(), rec.normal));
                self.trace(&reflected, depth - 1, options, indirect, rng)
            }
            Material::Lambert { albedo } => {
                let direct = self.direct_light(&rec, albedo, options.light_samples, rng);
                if !indirect {
                    return direct;
                }

                let survival = options.roulette.survival(albedo, depth);
                if survival <= 0.0 || gen_f64(rng) > survival {
                    return direct;
                }

                let bounce = Ray::new(rec.p, cosine_hemisphere(rec.normal, rng));
                let incoming = self.trace(&bounce, depth - 1, options, indirect, rng);
                direct + albedo * incoming / survival
            }
        }
    }

    /// Stratified estimate of the light reaching a diffuse hit directly.
    ///
    /// Each light gets `samples` jittered samples taken row by row from a
    /// `ceil(sqrt(samples))` square grid over its parameter square.
    ///
    /// When `samples` is not a perfect square the trailing cells of the grid
    /// are never visited, so the part of the light they cover is ignored and
    /// the estimate is biased. Perfect squares cover the whole light.
    pub fn direct_light(
        &self,
        hit: &HitRecord,
        albedo: Color,
        samples: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        if samples == 0 || self.lights().is_empty() {
            return Color::ZERO;
        }

        let grid = (samples as f64).sqrt().ceil() as u32;
        let cell = 1.0 / grid as f64;
        let weight = 1.0 / samples as f64;

        let mut total = Color::ZERO;
        for light in self.lights() {
            let area = light.area();
            for index in 0..samples {
                let u = ((index % grid) as f64 + gen_f64(rng)) * cell;
                let v = ((index / grid) as f64 + gen_f64(rng)) * cell;
                total += self.light_sample(hit, albedo, light, area, light.sample(u, v)) * weight;
            }
        }
        total
    }

    /// Unweighted contribution of one point `y` on `light`.
    fn light_sample(
        &self,
        hit: &HitRecord,
        albedo: Color,
        light: &AreaLight,
        area: f64,
        y: Vec3,
    ) -> Color {
        let d = y - hit.p;
        let dist = d.length();
        if dist <= 0.0 {
            return Color::ZERO;
        }
        let wi = d / dist;

        let cos_x = hit.normal.dot(wi).max(0.0);
        let cos_y = light.normal.dot(-wi).max(0.0);
        if cos_x <= 0.0 || cos_y <= 0.0 {
            return Color::ZERO;
        }
        if self.occluded(hit.p, wi, dist) {
            return Color::ZERO;
        }

        light.radiance * albedo * (area * cos_x * cos_y / (dist * dist) / PI)
    }
}
