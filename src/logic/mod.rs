//! Logic modules: translate high-level operator choices into concrete results.
//!
//! - `resolver` - profile catalog entry + disk size into plan, packages and hooks
//! - `validation` - pre-submit checks for hostname, disks, passwords and addresses

pub mod resolver;
pub mod validation;
