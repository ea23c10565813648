//! Tracing setup for the swipereveal TUI
//!
//! The terminal is in raw mode on the alternate screen, so logs go to a file
//! instead of stderr.
//!
//! Usage:
//!   swipereveal --debug                      # Debug logging
//!   RUST_LOG=swipereveal_core=trace swipereveal   # Fine-grained log control
//!
//! Environment variables:
//!   RUST_LOG                                 # Log filter (default: info)

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets RUST_LOG=debug if not already set)
    pub debug: bool,
    /// Log file; appended to
    pub log_file: PathBuf,
}

/// Initialize tracing, writing to `config.log_file`
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = if config.debug {
        // Debug mode: set debug level unless RUST_LOG is explicitly set
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    if let Some(parent) = config.log_file.parent() {
        fs::create_dir_all(parent)
            .context(format!("Failed to create log directory: {:?}", parent))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .context(format!("Failed to open log file: {:?}", config.log_file))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
