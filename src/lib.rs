//! Kickstart profile front-end
//!
//! Turns a system profile, disk selection, partition percentages and a
//! password into the kickstart include files an unattended installer reads.

pub mod app;
pub mod cli;
pub mod components;
pub mod config_file;
pub mod credentials;
pub mod engine;
pub mod error;
pub mod hardware;
pub mod kickstart;
pub mod logging;
pub mod logic;
pub mod profiles;
pub mod request;
pub mod sanity;
pub mod signals;
pub mod theme;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use config_file::AnswerFile;
pub use engine::partition::{BudgetStatus, PartitionPlan, Volume};
pub use error::{KickstartError, Result};
pub use hardware::{DiskInventory, SystemInfo};
pub use kickstart::{Artifact, ArtifactSet, emit};
pub use logic::resolver::{Resolution, ResolveWarning, resolve, resolve_named};
pub use profiles::Profile;
pub use request::{InstallerRequest, RequestBuilder};
pub use types::{ClassificationLevel, SiteConfig, StaticNetwork};
