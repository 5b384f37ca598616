//! Logging setup for Sharebox.
//!
//! Log output goes to stdout and, when possible, is appended to the
//! configured log file. `RUST_LOG` directives take precedence over the
//! configured level.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::{Result, ShareError};

/// Map a configured level name onto a tracing level.
fn parse_level(level: &str) -> Level {
    match level.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(parse_level(level).into())
        .from_env_lossy()
}

/// Initialize logging to stdout and the configured log file.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let path = Path::new(&config.file);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let log_file = OpenOptions::new().create(true).append(true).open(path)?;
    let writer = std::io::stdout.and(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(build_filter(&config.level))
        .try_init()
        .map_err(|e| ShareError::Config(format!("logging already initialized: {e}")))
}

/// Initialize console-only logging.
///
/// Used when the log file cannot be opened. Does nothing if a subscriber
/// is already installed.
pub fn init_console_only(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_target(true),
        )
        .with(build_filter(level))
        .try_init();
}
