//! Ember Renderer - CPU path tracing.
//!
//! A Monte Carlo path tracer over a small set of analytic primitives,
//! rectangular area lights and three materials. Intersection is a linear
//! scan over per-kind surface collections; the image is rendered by a pool
//! of workers pulling scanlines from a shared atomic cursor.

mod camera;
mod hittable;
mod integrator;
mod output;
mod parallelogram;
mod plane;
mod progress;
mod renderer;
mod sampling;
mod scanline;
mod scene;
mod sphere;
mod triangle;

pub use camera::Camera;
pub use hittable::{HitRecord, Hittable};
pub use integrator::{sky_gradient, Integrator, PathOptions, RussianRoulette};
pub use output::{tonemap, ImageBuffer, OutputError};
pub use parallelogram::Parallelogram;
pub use plane::Plane;
pub use progress::{estimate_remaining, ProgressMonitor};
pub use renderer::{
    render_pixel, RenderConfig, RenderError, RenderOutput, RenderStats, Renderer, SeedMode,
};
pub use sampling::{cosine_hemisphere, gen_f64};
pub use scanline::{RenderedRow, RowCursor};
pub use scene::{Scene, SceneHit, Surface, SurfaceId, OCCLUSION_EPSILON};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export descriptors and math types
pub use ember_core::{AreaLight, Material};
pub use ember_math::{Color, Interval, Ray, Vec3};
