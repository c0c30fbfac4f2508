//! Renders one frame of a planet's sky to a PNG.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p aether-app -- --width 1920 --height 1080 -o sky.png`.

mod scene;

use aether_config::{CliArgs, Config, default_config_dir};
use aether_render::FrameRenderer;
use clap::Parser;
use tracing::{info, warn};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config_dir = args
        .config
        .clone()
        .or_else(default_config_dir)
        .ok_or("failed to resolve config directory")?;

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::with_sun()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    aether_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    config.validate()?;
    if config.lights.is_empty() {
        warn!("No lights configured, only the background will be visible");
    }

    let view = scene::view_inputs(&config);
    let scene = scene::scene_inputs(&config)?;
    let background = scene::background(&config)?;

    let renderer = match config.output.threads {
        0 => FrameRenderer::with_defaults(),
        n => FrameRenderer::new(n),
    };
    info!(
        altitude_m = config.camera.altitude_m,
        threads = renderer.thread_count(),
        "Rendering {}x{} sky",
        config.output.width,
        config.output.height
    );

    let frame = renderer.render(
        config.output.width,
        config.output.height,
        &background,
        &view,
        &scene,
    )?;
    frame.write_png(&config.output.path)?;
    Ok(())
}
