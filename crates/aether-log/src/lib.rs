//! Structured logging for the aether renderer.
//!
//! Console output carries uptime timestamps, module paths and thread names so
//! render workers are identifiable. Debug builds can also write JSON lines to
//! a file for post-mortem analysis.

use std::fs::File;
use std::path::{Path, PathBuf};

use aether_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config sets a level.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file inside the log directory.
pub const LOG_FILE_NAME: &str = "aether.log";

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins over the config's `debug.log_level`, which wins over
/// [`DEFAULT_FILTER`]. When `debug_build` is set, a log directory is given and
/// the config does not disable it, events are also written as JSON to
/// [`LOG_FILE_NAME`] in that directory.
///
/// # Panics
///
/// Panics if a global subscriber has already been installed.
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    let file_logging = debug_build && config.is_none_or(|c| c.debug.log_to_file);
    if file_logging
        && let Some(log_dir) = log_dir
        && let Ok(log_file) = create_log_file(log_dir)
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_names(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Filter directives taken from the config, falling back to [`DEFAULT_FILTER`].
pub fn filter_directives(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => config.debug.log_level.clone(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Path of the JSON log file inside `log_dir`.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

fn create_log_file(log_dir: &Path) -> std::io::Result<File> {
    std::fs::create_dir_all(log_dir)?;
    File::create(log_file_path(log_dir))
}
