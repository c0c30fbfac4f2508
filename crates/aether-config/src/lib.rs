//! Configuration for the aether renderer.
//!
//! Settings persist to disk as `config.ron`. Every section falls back to
//! defaults for missing fields, and CLI flags override values after loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BackgroundConfig, CameraConfig, Config, DebugConfig, LightConfig, OutputConfig, WorldConfig,
    default_config_dir,
};
pub use error::ConfigError;
