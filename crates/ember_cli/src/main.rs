use anyhow::{Context, Result};
use clap::Parser;
use ember_core::load_scene;
use ember_renderer::{Camera, Renderer, Scene};
use log::LevelFilter;

mod cli;

use cli::Args;

fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let description = load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene '{}'", args.scene))?;

    if args.dump_scene {
        println!("{}", description.to_json()?);
        return Ok(());
    }

    let config = args.render_config()?;
    log::info!("Starting Ember: scene '{}', output {}", description.name, args.output);

    let scene = Scene::from_description(&description)
        .with_context(|| format!("Scene '{}' is invalid", description.name))?;
    let camera = Camera::from_desc(&description.camera);

    let output = Renderer::new(config)
        .render(&scene, &camera)
        .context("Render failed")?;

    output
        .image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output))?;

    log::info!(
        "Done in {:.2}s ({} rows)",
        output.stats.elapsed.as_secs_f64(),
        output.stats.total_rows()
    );
    Ok(())
}
