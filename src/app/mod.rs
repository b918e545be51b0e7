//! Application module
//!
//! Contains the main application loop on top of the form state machine.
//!
//! # Module Structure
//! - `state` - Application state types (AppState, AppMode, FormField, etc.)
//! - Main module - App struct and event loop

mod state;

// Re-export state types for external use
pub use state::{AppMode, AppState, FormField, Notice, PasswordDialog};

use crate::components::keybindings::KeybindingContext;
use crate::error::{KickstartError, Result};
use crate::hardware::{DiskInventory, SystemInfo};
use crate::signals::ShutdownFlag;
use crate::ui;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::Stdout;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Input poll interval; also bounds how long a shutdown signal waits.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Main application struct
pub struct App {
    state: AppState,
    /// Keybinding context for dispatch and navigation hints
    keybinding_context: KeybindingContext,
    shutdown: ShutdownFlag,
}

impl App {
    /// Detect the hardware and start on the default profile.
    pub fn new(output_dir: PathBuf, shutdown: ShutdownFlag) -> Self {
        let inventory = DiskInventory::detect();
        let system = SystemInfo::detect();
        info!(
            "Detected {} disk(s), {}Gb total",
            inventory.len(),
            inventory.total_gb()
        );
        Self::with_state(AppState::new(inventory, system, output_dir), shutdown)
    }

    pub fn with_state(state: AppState, shutdown: ShutdownFlag) -> Self {
        Self {
            state,
            keybinding_context: KeybindingContext::new(),
            shutdown,
        }
    }

    /// Files written by the submit, if it got that far.
    pub fn written(&self) -> Option<&[PathBuf]> {
        self.state.written.as_deref()
    }

    /// Run until the operator quits, the files are written and acknowledged,
    /// or a shutdown signal arrives.
    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            if self.shutdown.is_set() {
                info!("Shutdown signal received, leaving the menu");
                break;
            }

            terminal
                .draw(|f| ui::render(f, &self.state, &self.keybinding_context))
                .map_err(|e| KickstartError::terminal(format!("draw failed: {}", e)))?;

            if event::poll(POLL_INTERVAL)? {
                match event::read()? {
                    Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                        if self.state.handle_key(key_event, &self.keybinding_context) {
                            debug!("Exit requested in {:?} mode", self.state.mode());
                            break;
                        }
                    }
                    // Next draw picks up the new size
                    Event::Resize(width, height) => debug!("Resized to {}x{}", width, height),
                    _ => {}
                }
            }
        }

        Ok(())
    }
}
