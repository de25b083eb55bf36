//! `cascade-console`: interactive binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`config::Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Build the [`session::Session`] (configured or freshly generated keys).
//! 4. Run the menu loop on stdin/stdout until quit, end of input, or Ctrl-C.

mod config;
mod session;
mod shell;
mod telemetry;

use std::io::BufReader;

use anyhow::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = config::Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level, cfg.log_path.as_deref())?;
    info!(version = env!("CARGO_PKG_VERSION"), "cascade-console starting");

    // -----------------------------------------------------------------------
    // 3. Session
    // -----------------------------------------------------------------------
    let session = session::Session::from_config(&cfg)?;

    // -----------------------------------------------------------------------
    // 4. Shell
    // -----------------------------------------------------------------------
    // Stdin is read on a plain thread so Ctrl-C never waits on a pending line.
    let input = shell::spawn_line_reader(BufReader::new(std::io::stdin()))?;
    tokio::select! {
        res = shell::run(&session, input, tokio::io::stdout(), &cfg.prompt) => res?,
        _ = tokio::signal::ctrl_c() => info!("interrupted"),
    }

    Ok(())
}
