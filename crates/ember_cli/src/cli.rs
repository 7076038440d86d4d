use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{ensure, Result};
use clap::{Parser, ValueEnum};
use ember_renderer::{Integrator, RenderConfig, SeedMode};
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Radiance estimator names accepted by `--integrator`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IntegratorArg {
    Path,
    Direct,
    Normals,
}

impl From<IntegratorArg> for Integrator {
    fn from(arg: IntegratorArg) -> Self {
        match arg {
            IntegratorArg::Path => Integrator::Path,
            IntegratorArg::Direct => Integrator::Direct,
            IntegratorArg::Normals => Integrator::Normals,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "ember")]
#[command(about = "A multithreaded CPU path tracer", version)]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: usize,

    /// Width / height ratio; the height is derived from it
    #[arg(long, default_value_t = 16.0 / 9.0)]
    pub aspect: f64,

    /// Camera samples per pixel
    #[arg(long, short = 's', default_value_t = 128)]
    pub spp: u32,

    /// Direct-light samples per light at each diffuse hit
    #[arg(long, default_value_t = 16)]
    pub light_samples: u32,

    /// Maximum path length
    #[arg(long, default_value_t = 8)]
    pub max_depth: u32,

    /// Random seed; 0 derives one from the clock
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Output image (.png writes PNG, anything else binary PPM)
    #[arg(short, long, default_value = "image.ppm")]
    pub output: String,

    /// Built-in scene name or path to a JSON scene file
    #[arg(long, default_value = "open")]
    pub scene: String,

    /// Worker threads (defaults to the available parallelism)
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,

    /// Radiance estimator
    #[arg(long, value_enum, default_value_t = IntegratorArg::Path)]
    pub integrator: IntegratorArg,

    /// Clamp samples brighter than this; 0 disables clamping
    #[arg(long, default_value_t = 10.0)]
    pub firefly: f64,

    /// Linear exposure applied before gamma encoding
    #[arg(long, default_value_t = 1.0)]
    pub exposure: f64,

    /// Seed each row separately so images do not depend on the thread count
    #[arg(long)]
    pub per_row_seeds: bool,

    /// Print the selected scene as JSON and exit
    #[arg(long)]
    pub dump_scene: bool,

    /// Logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Args {
    /// Build the renderer configuration, rejecting values it cannot use.
    pub fn render_config(&self) -> Result<RenderConfig> {
        ensure!(self.width > 0, "--width must be positive");
        ensure!(
            self.aspect.is_finite() && self.aspect > 0.0,
            "--aspect must be a positive number, got {}",
            self.aspect
        );
        ensure!(self.spp > 0, "--spp must be positive");
        ensure!(self.threads != Some(0), "--threads must be positive");
        ensure!(
            self.firefly.is_finite() && self.firefly >= 0.0,
            "--firefly must be zero or a positive number, got {}",
            self.firefly
        );
        ensure!(
            self.exposure.is_finite() && self.exposure >= 0.0,
            "--exposure must be a non-negative number, got {}",
            self.exposure
        );

        let height = RenderConfig::image_height(self.width, self.aspect);
        let seed_mode = if self.per_row_seeds {
            SeedMode::PerRow
        } else {
            SeedMode::PerWorker
        };
        let firefly = (self.firefly > 0.0).then_some(self.firefly);

        Ok(RenderConfig::default()
            .with_resolution(self.width, height)
            .with_quality(self.spp, self.light_samples, self.max_depth)
            .with_seed(resolve_seed(self.seed), seed_mode)
            .with_threads(self.threads)
            .with_integrator(self.integrator.into())
            .with_firefly_threshold(firefly)
            .with_exposure(self.exposure))
    }
}

/// Seed 0 asks for a clock-derived seed.
fn resolve_seed(seed: u64) -> u64 {
    if seed != 0 {
        return seed;
    }
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    // Never hand back 0, which would read as "unset" in logs
    nanos.max(1)
}
