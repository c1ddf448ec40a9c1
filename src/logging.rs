//! Tracing subscriber setup
//!
//! The TUI owns stdout, so diagnostics go to a log file. The filter comes from
//! `RUST_LOG` and defaults to `info`.

use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber, logging to `log_file_path` (truncated)
pub fn init_global(log_file_path: &Path) -> io::Result<()> {
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let log_file = File::create(log_file_path)?;
    if build_subscriber(log_file).try_init().is_err() {
        tracing::warn!("tracing subscriber already installed");
    }
    Ok(())
}

/// The subscriber used by the binary, writing plain text to `log_file`
pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry().with(env_filter).with(fmt_layer)
}
