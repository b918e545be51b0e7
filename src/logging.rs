//! Logger initialization
//!
//! The interactive menu owns the terminal, so it logs to a file; headless
//! commands log to stderr and keep stdout for their output.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file used while the TUI is on screen.
pub const TUI_LOG_FILE: &str = "/tmp/kickstart-tui.log";

/// Where log lines go.
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` when verbose.
pub fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }))
}

/// Initialize the global subscriber. Fails if one is already set.
pub fn init_logging(verbose: bool, target: LogTarget<'_>) -> Result<()> {
    let registry = tracing_subscriber::registry().with(default_filter(verbose));

    match target {
        LogTarget::Stderr => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            registry
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
    }
    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    if verbose {
        tracing::debug!("Verbose logging enabled");
    }
    Ok(())
}
