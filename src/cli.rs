use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::kickstart::DEFAULT_OUTPUT_DIR;

/// kickstart-tui - hardened system profile menu for kickstart installs
#[derive(Parser, Debug)]
#[command(name = "kickstart-tui")]
#[command(about = "Pick a hardened system profile and generate kickstart include files")]
#[command(version)]
pub struct Cli {
    /// Verbose logging (debug level unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory the include files are written to
    #[arg(short, long, global = true, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive profile menu (default)
    Menu,
    /// Generate include files from an answer file without the menu
    Generate {
        /// Answer file (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// File whose first line is the root/bootloader password
        #[arg(short, long)]
        password_file: PathBuf,

        /// Print the artifacts instead of writing them
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate an answer file
    Validate {
        /// Answer file (JSON)
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List the system profile catalog
    Profiles {
        /// Machine-readable output
        #[arg(long)]
        json: bool,
    },
    /// Show how a profile resolves for a given disk size
    Resolve {
        /// Profile identifier, e.g. `rhev-kvm`
        #[arg(short, long)]
        profile: String,

        /// Total disk capacity in GB (detected when omitted)
        #[arg(short, long)]
        disk_gb: Option<u64>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
