//! Profile Resolver
//!
//! Turns a catalog profile plus the measured disk capacity into everything the
//! form and the emitter need: the partition plan, the package list and the two
//! install hooks.
//!
//! # Design
//!
//! - **Catalog only**: every value comes from `profiles/mod.rs`
//! - **Order preserving**: package tokens keep catalog order (kickstart applies
//!   them in sequence)
//! - **Pure logic**: no I/O, no side effects; the same input always resolves
//!   to the same output
//!
//! # Resolution Rules
//!
//! | Input                     | Resolved To |
//! |---------------------------|-------------|
//! | `profile`                 | Partition plan, packages, hooks |
//! | `hardening` flag          | `/sbin/stig-fix` as first post-install line |
//! | `disk_total_gb < min`     | `LowDiskSpace` warning |
//! | hardening deferred        | `HardeningDeferred` warning |

use crate::engine::partition::PartitionPlan;
use crate::error::Result;
use crate::profiles::{HARDENING_COMMAND, HARDENING_DEFERRED_NOTICE, Profile};
use serde::Serialize;
use std::fmt;

// ============================================================================
// Package List
// ============================================================================

/// One `%packages` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum PackageToken {
    /// Plain package name or glob.
    Include(&'static str),
    /// `-name`: removed even if a group pulls it in.
    Exclude(&'static str),
    /// `@name`: a comps group.
    Group(&'static str),
}

impl PackageToken {
    pub fn parse(token: &'static str) -> Self {
        if let Some(name) = token.strip_prefix('-') {
            Self::Exclude(name)
        } else if let Some(name) = token.strip_prefix('@') {
            Self::Group(name)
        } else {
            Self::Include(token)
        }
    }
}

impl fmt::Display for PackageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Include(name) => write!(f, "{}", name),
            Self::Exclude(name) => write!(f, "-{}", name),
            Self::Group(name) => write!(f, "@{}", name),
        }
    }
}

/// Ordered package tokens for one profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct PackageList(Vec<PackageToken>);

impl PackageList {
    pub fn from_tokens(tokens: &[&'static str]) -> Self {
        Self(tokens.iter().copied().map(PackageToken::parse).collect())
    }

    pub fn tokens(&self) -> &[PackageToken] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Body of the packages artifact: one token per line.
    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(|t| format!("{}\n", t))
            .collect()
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Non-fatal findings shown to the operator after a profile change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum ResolveWarning {
    /// Selected disks are smaller than the profile recommends.
    LowDiskSpace {
        min_gb: u64,
        total_gb: u64,
        role: &'static str,
    },
    /// The profile leaves hardening to the operator.
    HardeningDeferred,
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LowDiskSpace {
                min_gb,
                total_gb,
                role,
            } => write!(
                f,
                "Recommended minimum of {}Gb disk space for {}!\n\nYou have {}Gb available.",
                min_gb, role, total_gb
            ),
            Self::HardeningDeferred => f.write_str(HARDENING_DEFERRED_NOTICE),
        }
    }
}

/// Everything a profile contributes to an install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub profile: Profile,
    pub plan: PartitionPlan,
    pub packages: PackageList,
    pub pre_install: Vec<&'static str>,
    pub post_install: Vec<&'static str>,
    pub warnings: Vec<ResolveWarning>,
}

/// Resolve a profile against the total capacity of the detected disks.
pub fn resolve(profile: Profile, disk_total_gb: u64) -> Resolution {
    let spec = profile.spec();
    let mut warnings = Vec::new();

    if disk_total_gb < spec.min_disk_gb {
        warnings.push(ResolveWarning::LowDiskSpace {
            min_gb: spec.min_disk_gb,
            total_gb: disk_total_gb,
            role: spec.role,
        });
    }

    if !spec.hardening {
        warnings.push(ResolveWarning::HardeningDeferred);
    }

    tracing::debug!(
        "Resolved {} for {}Gb: {} package tokens, {} warning(s)",
        profile,
        disk_total_gb,
        spec.packages.len(),
        warnings.len()
    );

    Resolution {
        profile,
        plan: spec.plan,
        packages: PackageList::from_tokens(spec.packages),
        pre_install: spec.pre_install.to_vec(),
        post_install: post_install_lines(profile),
        warnings,
    }
}

/// Post-install hook: hardening first (unless deferred), then profile extras.
pub fn post_install_lines(profile: Profile) -> Vec<&'static str> {
    let spec = profile.spec();
    let mut lines = Vec::with_capacity(spec.post_install.len() + 1);
    if spec.hardening {
        lines.push(HARDENING_COMMAND);
    }
    lines.extend_from_slice(spec.post_install);
    lines
}

/// Resolve a textual profile identifier such as `rhev-kvm`.
pub fn resolve_named(id: &str, disk_total_gb: u64) -> Result<Resolution> {
    Profile::from_id(id).map(|profile| resolve(profile, disk_total_gb))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KickstartError;
    use strum::IntoEnumIterator;

    #[test]
    fn test_resolve_minimal_low_disk() {
        let res = resolve(Profile::Minimal, 4);
        assert_eq!(res.plan, Profile::Minimal.spec().plan);
        assert_eq!(
            res.warnings,
            vec![ResolveWarning::LowDiskSpace {
                min_gb: 8,
                total_gb: 4,
                role: "a Minimal Install",
            }]
        );
        assert_eq!(
            res.warnings[0].to_string(),
            "Recommended minimum of 8Gb disk space for a Minimal Install!\n\nYou have 4Gb available."
        );
    }

    #[test]
    fn test_resolve_enough_disk_has_no_warning() {
        let res = resolve(Profile::Minimal, 8);
        assert!(res.warnings.is_empty());
        assert_eq!(res.post_install, vec![HARDENING_COMMAND]);
    }

    #[test]
    fn test_resolve_rhev_defers_hardening() {
        let res = resolve(Profile::RhevKvm, 500);
        assert_eq!(res.warnings, vec![ResolveWarning::HardeningDeferred]);
        assert!(!res.post_install.contains(&HARDENING_COMMAND));
        assert!(res.post_install[0].contains("PermitRootLogin yes"));
    }

    #[test]
    fn test_resolve_satellite_hardens_then_sets_umask() {
        let res = resolve(Profile::RhnSatellite, 500);
        assert_eq!(res.post_install.len(), 2);
        assert_eq!(res.post_install[0], HARDENING_COMMAND);
        assert!(res.post_install[1].contains("umask 022"));
    }

    #[test]
    fn test_resolve_is_deterministic() {
        for profile in Profile::iter() {
            assert_eq!(resolve(profile, 20), resolve(profile, 20));
        }
    }

    #[test]
    fn test_resolve_named() {
        let res = resolve_named("apache-web", 100).unwrap();
        assert_eq!(res.profile, Profile::ApacheWeb);
        assert_eq!(res.packages.render(), "httpd\n");

        assert!(matches!(
            resolve_named("kiosk", 100),
            Err(KickstartError::UnknownProfile(_))
        ));
    }

    #[test]
    fn test_package_token_parse() {
        assert_eq!(PackageToken::parse("@x11"), PackageToken::Group("x11"));
        assert_eq!(
            PackageToken::parse("-telnet-server"),
            PackageToken::Exclude("telnet-server")
        );
        assert_eq!(PackageToken::parse("pcsc*"), PackageToken::Include("pcsc*"));
    }

    #[test]
    fn test_package_list_keeps_catalog_order() {
        let res = resolve(Profile::UserWorkstation, 100);
        let rendered: Vec<String> = res.packages.tokens().iter().map(|t| t.to_string()).collect();
        assert_eq!(rendered, Profile::UserWorkstation.spec().packages);
    }

    #[test]
    fn test_empty_package_list_renders_empty() {
        let res = resolve(Profile::RhevKvm, 100);
        assert!(res.packages.is_empty());
        assert_eq!(res.packages.render(), "");
    }
}
