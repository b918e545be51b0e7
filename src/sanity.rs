//! Pre-flight sanity checks for the interactive front-end
//!
//! This module verifies the environment before the TUI starts:
//! - stdin and stdout are an interactive terminal
//! - the installer's `list-harddrives` helper is on PATH (warning only)
//!
//! A missing terminal is the one fatal condition: the program prints a clear
//! error and exits with status 1 before touching the screen.

use std::env;
use std::io::IsTerminal;

/// Result of environment verification
#[derive(Debug)]
pub struct SanityCheckResult {
    pub is_terminal: bool,
}

impl SanityCheckResult {
    /// Returns true if the TUI can start
    pub fn is_ok(&self) -> bool {
        self.is_terminal
    }
}

/// Helpers used when present (disk detection falls back to an empty list)
const OPTIONAL_BINARIES: &[&str] = &["list-harddrives"];

/// True when `name` is a file in one of the PATH directories.
fn binary_exists(name: &str) -> bool {
    env::var_os("PATH")
        .map(|path| env::split_paths(&path).any(|dir| dir.join(name).is_file()))
        .unwrap_or(false)
}

/// Perform all sanity checks and return the result
pub fn verify_environment() -> SanityCheckResult {
    let is_terminal = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();

    for binary in OPTIONAL_BINARIES {
        if !binary_exists(binary) {
            tracing::warn!("Optional helper not found: {} (no disks will be listed)", binary);
        }
    }

    SanityCheckResult { is_terminal }
}

/// Explain the failure on stderr and exit 1. Only called before raw mode.
pub fn print_error_and_exit(result: &SanityCheckResult) -> ! {
    eprintln!();
    eprintln!("╔══════════════════════════════════════════════════════════════════╗");
    eprintln!("║              kickstart-tui - Pre-flight Check Failed             ║");
    eprintln!("╚══════════════════════════════════════════════════════════════════╝");
    eprintln!();

    if !result.is_terminal {
        eprintln!("❌ ERROR: No interactive terminal");
        eprintln!("   The profile menu needs a terminal on stdin and stdout.");
        eprintln!();
        eprintln!("   Solution: run it from a console, or generate headless:");
        eprintln!("     kickstart-tui generate --config answers.json --password-file pw");
        eprintln!();
    }

    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_ok_needs_terminal() {
        let result = SanityCheckResult { is_terminal: true };
        assert!(result.is_ok());

        let result = SanityCheckResult { is_terminal: false };
        assert!(!result.is_ok());
    }

    #[test]
    fn test_binary_exists() {
        assert!(!binary_exists("definitely-not-a-real-binary-xyz"));
        assert!(binary_exists("sh"));
    }
}
