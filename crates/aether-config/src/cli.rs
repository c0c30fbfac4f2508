//! Command-line argument parsing for the aether renderer.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Aether command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "aether", about = "Render a planet's sky with single-scattering atmospherics")]
pub struct CliArgs {
    /// Image width in pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of render worker threads.
    #[arg(long)]
    pub threads: Option<usize>,

    /// Output PNG path.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Camera altitude above the surface in meters.
    #[arg(long)]
    pub altitude: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.output.width = w;
        }
        if let Some(h) = args.height {
            self.output.height = h;
        }
        if let Some(t) = args.threads {
            self.output.threads = t;
        }
        if let Some(ref path) = args.output {
            self.output.path = path.clone();
        }
        if let Some(altitude) = args.altitude {
            self.camera.altitude_m = altitude;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
