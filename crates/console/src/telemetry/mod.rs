//! Telemetry initialisation for the console.
//!
//! Structured JSON logs only. Stdout belongs to the interactive shell, so
//! logs go to stderr or, when configured, are appended to a file.
//!
//! Key material must never appear in any log field.

pub mod audit;

pub use audit::TracingAudit;

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Initialise the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `log_level` when set.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber has
/// already been set.
pub fn init(log_level: &str, log_path: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let builder = tracing_subscriber::fmt().json().with_env_filter(filter);

    let installed = match log_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {path}"))?;
            builder.with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("failed to initialise console tracing subscriber: {e}"))
}
