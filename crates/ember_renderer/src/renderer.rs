//! Multithreaded scanline renderer.
//!
//! A rayon pool runs one worker per thread. Workers pull rows from a shared
//! [`RowCursor`], render them with a private random stream and hand the
//! finished rows back to the driver, which assembles the final image.

use std::thread;
use std::time::{Duration, Instant};

use ember_math::Color;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use thiserror::Error;

use crate::camera::Camera;
use crate::integrator::{Integrator, PathOptions, RussianRoulette};
use crate::output::{tonemap, ImageBuffer};
use crate::progress::ProgressMonitor;
use crate::sampling::gen_f64;
use crate::scanline::{RenderedRow, RowCursor};
use crate::scene::Scene;

/// Seed stride between consecutive workers.
const WORKER_SEED_STRIDE: u64 = 1337;

/// Errors that can occur before rendering starts.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// How workers seed their random streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    /// One stream per worker, seeded by worker index. Pixel values depend
    /// on which worker claimed which row, so images differ between runs.
    #[default]
    PerWorker,
    /// One stream per row, seeded by row index. Images are identical for
    /// any thread count.
    PerRow,
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    /// Camera samples averaged per pixel
    pub samples_per_pixel: u32,
    /// Direct-light samples per light at each diffuse hit
    pub light_samples: u32,
    /// Maximum path length
    pub max_depth: u32,
    pub seed: u64,
    /// Samples whose brightest channel exceeds this are scaled down to it
    pub firefly_threshold: Option<f64>,
    /// Linear scale applied before gamma encoding
    pub exposure: f64,
    /// Worker count; `None` uses the available hardware parallelism
    pub threads: Option<usize>,
    pub seed_mode: SeedMode,
    pub integrator: Integrator,
    pub roulette: RussianRoulette,
    /// Delay between progress log lines
    pub progress_interval: Duration,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 450,
            samples_per_pixel: 128,
            light_samples: 16,
            max_depth: 8,
            seed: 1,
            firefly_threshold: Some(10.0),
            exposure: 1.0,
            threads: None,
            seed_mode: SeedMode::PerWorker,
            integrator: Integrator::Path,
            roulette: RussianRoulette::default(),
            progress_interval: Duration::from_millis(300),
        }
    }
}

impl RenderConfig {
    /// Image height for `width` at `aspect` (width / height), at least 1.
    pub fn image_height(width: usize, aspect: f64) -> usize {
        ((width as f64 / aspect).round() as usize).max(1)
    }

    pub fn with_resolution(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_quality(mut self, samples_per_pixel: u32, light_samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.light_samples = light_samples;
        self.max_depth = max_depth;
        self
    }

    pub fn with_seed(mut self, seed: u64, seed_mode: SeedMode) -> Self {
        self.seed = seed;
        self.seed_mode = seed_mode;
        self
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_firefly_threshold(mut self, threshold: Option<f64>) -> Self {
        self.firefly_threshold = threshold;
        self
    }

    pub fn with_exposure(mut self, exposure: f64) -> Self {
        self.exposure = exposure;
        self
    }

    /// Check that the configuration can produce an image.
    pub fn validate(&self) -> Result<(), RenderError> {
        let invalid = |msg: &str| Err(RenderError::InvalidConfig(msg.to_string()));

        if self.width == 0 || self.height == 0 {
            return invalid("image width and height must be positive");
        }
        if self.samples_per_pixel == 0 {
            return invalid("samples per pixel must be positive");
        }
        if self.threads == Some(0) {
            return invalid("thread count must be positive");
        }
        if !self.exposure.is_finite() || self.exposure < 0.0 {
            return invalid("exposure must be a finite non-negative number");
        }
        if let Some(threshold) = self.firefly_threshold {
            if threshold.is_nan() || threshold <= 0.0 {
                return invalid("firefly threshold must be positive");
            }
        }
        Ok(())
    }

    /// Worker count after applying the hardware default.
    pub fn thread_count(&self) -> usize {
        self.threads.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    pub fn path_options(&self) -> PathOptions {
        PathOptions::new(self.light_samples).with_roulette(self.roulette)
    }
}

/// Timing and work distribution of a finished render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStats {
    /// Rows rendered by each worker, in claim order
    pub rows_per_worker: Vec<Vec<usize>>,
    pub elapsed: Duration,
}

impl RenderStats {
    pub fn total_rows(&self) -> usize {
        self.rows_per_worker.iter().map(Vec::len).sum()
    }
}

/// A finished render.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub image: ImageBuffer,
    pub stats: RenderStats,
}

/// Scale a sample down so its brightest channel is at most `threshold`.
#[inline]
fn clamp_firefly(sample: Color, threshold: f64) -> Color {
    let peak = sample.max_element();
    if peak > threshold {
        sample * (threshold / peak)
    } else {
        sample
    }
}

/// Render a single pixel with multi-sampling.
///
/// Pixel `(x, y)` is sampled at `u = (x + U) / (W - 1)`,
/// `v = (y + U) / (H - 1)`, with `y = 0` at the bottom of the image.
pub fn render_pixel(
    scene: &Scene,
    camera: &Camera,
    x: usize,
    y: usize,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let options = config.path_options();
    let u_scale = config.width.saturating_sub(1).max(1) as f64;
    let v_scale = config.height.saturating_sub(1).max(1) as f64;

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let u = (x as f64 + gen_f64(rng)) / u_scale;
        let v = (y as f64 + gen_f64(rng)) / v_scale;
        let ray = camera.get_ray(u, v);

        let mut sample = config
            .integrator
            .radiance(scene, &ray, config.max_depth, &options, rng);
        if let Some(threshold) = config.firefly_threshold {
            sample = clamp_firefly(sample, threshold);
        }
        pixel_color += sample;
    }

    // Average the samples
    pixel_color / config.samples_per_pixel.max(1) as f64
}

/// Render and tonemap one row.
fn render_row(
    scene: &Scene,
    camera: &Camera,
    row: usize,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> RenderedRow {
    let pixels = (0..config.width)
        .map(|x| tonemap(render_pixel(scene, camera, x, row, config, rng), config.exposure))
        .collect();
    RenderedRow::new(row, pixels)
}

fn worker_seed(seed: u64, worker: usize) -> u64 {
    seed.wrapping_add((worker as u64).wrapping_mul(WORKER_SEED_STRIDE))
}

fn row_seed(seed: u64, row: usize) -> u64 {
    // Spread consecutive rows across the seed space
    seed ^ (row as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Closes the cursor when dropped, including during a panic.
struct CloseOnDrop<'a>(&'a RowCursor);

impl Drop for CloseOnDrop<'_> {
    fn drop(&mut self) {
        self.0.close();
    }
}

/// Run `work` on the current thread while a monitor logs `cursor` progress.
///
/// The cursor is closed once `work` returns or unwinds, so the monitor
/// always stops and the scope can be joined.
fn with_progress<R>(cursor: &RowCursor, interval: Duration, work: impl FnOnce() -> R) -> R {
    let monitor = ProgressMonitor::new(interval);
    thread::scope(|s| {
        s.spawn(|| monitor.watch(cursor));
        let _close = CloseOnDrop(cursor);
        work()
    })
}

/// Parallel renderer.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render `scene` through `camera`.
    ///
    /// Blocks until every row is finished. A progress monitor logs from a
    /// separate thread for the duration of the render.
    pub fn render(&self, scene: &Scene, camera: &Camera) -> Result<RenderOutput, RenderError> {
        let config = &self.config;
        config.validate()?;

        let threads = config.thread_count();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("ember-worker-{i}"))
            .build()?;

        log::info!(
            "Rendering {}x{} with {} threads: {} spp, {} light samples, depth {}, {:?} integrator, seed {} ({:?})",
            config.width,
            config.height,
            threads,
            config.samples_per_pixel,
            config.light_samples,
            config.max_depth,
            config.integrator,
            config.seed,
            config.seed_mode
        );

        let cursor = RowCursor::new(config.height);
        let start = Instant::now();

        let batches: Vec<Vec<RenderedRow>> = with_progress(&cursor, config.progress_interval, || {
            pool.broadcast(|ctx| self.run_worker(ctx.index(), scene, camera, &cursor))
        });
        let elapsed = start.elapsed();

        // Rows are stored bottom-up while rendering; flip into top-down order
        let mut image = ImageBuffer::new(config.width, config.height);
        let mut rows_per_worker = Vec::with_capacity(batches.len());
        for batch in batches {
            rows_per_worker.push(batch.iter().map(|r| r.row).collect());
            for rendered in batch {
                image.set_row(config.height - 1 - rendered.row, &rendered.pixels);
            }
        }

        log::info!("Render finished in {:.2}s", elapsed.as_secs_f64());

        Ok(RenderOutput {
            image,
            stats: RenderStats {
                rows_per_worker,
                elapsed,
            },
        })
    }

    /// Claim and render rows until the cursor runs out.
    fn run_worker(&self, index: usize, scene: &Scene, camera: &Camera, cursor: &RowCursor) -> Vec<RenderedRow> {
        let config = &self.config;
        let mut rng = StdRng::seed_from_u64(worker_seed(config.seed, index));
        let mut rows = Vec::new();

        while let Some(row) = cursor.claim() {
            let rendered = match config.seed_mode {
                SeedMode::PerWorker => render_row(scene, camera, row, config, &mut rng),
                SeedMode::PerRow => {
                    let mut row_rng = StdRng::seed_from_u64(row_seed(config.seed, row));
                    render_row(scene, camera, row, config, &mut row_rng)
                }
            };
            rows.push(rendered);
        }

        log::debug!("Worker {} rendered {} rows", index, rows.len());
        rows
    }
}
