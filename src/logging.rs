//! Tracing setup for the demo binary.
//!
//! Stdout is the raw terminal, so events only go to a log file. Without a
//! log file no subscriber is installed and every event is discarded.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// Default filter when `RUST_LOG` is unset
const DEFAULT_LEVEL: &str = "info";

/// Install a file-backed subscriber filtered by `RUST_LOG`.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init(log_file: &Path) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let file = File::create(log_file)?;
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!(path = %log_file.display(), "logging initialized");
    Ok(())
}
