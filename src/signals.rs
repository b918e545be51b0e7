//! Shutdown signal handling
//!
//! SIGTERM, SIGHUP and SIGINT only raise a flag. The TUI loop polls it every
//! tick and leaves through the normal path, so raw mode and the alternate
//! screen are always restored.

use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set once a termination signal arrives.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    /// Register the flag for SIGTERM, SIGHUP and SIGINT.
    pub fn install() -> io::Result<Self> {
        let flag = Self::default();
        for sig in [SIGTERM, SIGHUP, SIGINT] {
            signal_hook::flag::register(sig, Arc::clone(&flag.0))?;
        }
        tracing::debug!("Shutdown signal handlers registered");
        Ok(flag)
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
