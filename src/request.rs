//! In-progress and finished install requests
//!
//! [`RequestBuilder`] is what the form (or an answer file) edits. At submit
//! time it runs every validation check and, when all pass, hashes the
//! password and freezes into an [`InstallerRequest`] for the emitter.

use crate::credentials;
use crate::engine::partition::{self, PartitionPlan};
use crate::error::{KickstartError, Result};
use crate::hardware::DiskInventory;
use crate::logic::validation;
use crate::profiles::Profile;
use crate::types::{ClassificationLevel, NetworkMode, SiteConfig, StaticNetwork};

/// A detected disk and whether it is an install target.
#[derive(Debug, Clone, PartialEq)]
pub struct DiskChoice {
    pub device: String,
    pub size_mb: f64,
    pub selected: bool,
}

/// Physical volume encryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encryption {
    None,
    /// LUKS on `pv.01`; the installer syntax needs the passphrase in clear.
    Luks { passphrase: String },
}

/// How eth0 is configured in the generated kickstart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Network {
    Dhcp,
    Static(StaticNetwork),
}

/// A validated, immutable request. Only ever holds the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerRequest {
    pub profile: Profile,
    pub plan: PartitionPlan,
    pub install_disks: Vec<String>,
    pub ignore_disks: Vec<String>,
    pub encryption: Encryption,
    pub hostname: String,
    pub password_hash: String,
    pub classification: ClassificationLevel,
    pub site: SiteConfig,
    pub network: Network,
}

/// Mutable form state behind an [`InstallerRequest`].
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBuilder {
    pub profile: Profile,
    pub plan: PartitionPlan,
    pub disks: Vec<DiskChoice>,
    pub encrypt: bool,
    pub hostname: String,
    pub classification: ClassificationLevel,
    pub site: SiteConfig,
    pub static_network: StaticNetwork,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new(Profile::default())
    }
}

impl RequestBuilder {
    /// Start from a profile's catalog plan with encryption on.
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            plan: profile.spec().plan,
            disks: Vec::new(),
            encrypt: true,
            hostname: "localhost.localdomain".to_string(),
            classification: ClassificationLevel::default(),
            site: SiteConfig::default(),
            static_network: StaticNetwork::default(),
        }
    }

    /// Offer every detected disk, all selected.
    pub fn with_inventory(mut self, inventory: &DiskInventory) -> Self {
        self.disks = inventory
            .disks
            .iter()
            .map(|d| DiskChoice {
                device: d.name.clone(),
                size_mb: d.size_mb,
                selected: true,
            })
            .collect();
        self
    }

    /// Switch profile and reload its partition plan.
    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = profile;
        self.plan = profile.spec().plan;
    }

    /// Capacity the resolver measures against: every listed disk, selected or not.
    pub fn disk_total_gb(&self) -> u64 {
        // sizes are never negative; `as` saturates anyway
        self.disks.iter().map(|d| (d.size_mb / 1024.0) as u64).sum()
    }

    pub fn network(&self) -> Network {
        match self.profile.spec().network {
            NetworkMode::Dhcp => Network::Dhcp,
            NetworkMode::Static => Network::Static(self.static_network.clone()),
        }
    }

    /// Run every pre-submit check and return all failures.
    pub fn validate(&self) -> Vec<KickstartError> {
        let mut errors = Vec::new();

        if let Err(e) = validation::check_hostname(&self.hostname) {
            errors.push(e);
        }
        if let Err(e) = validation::check_disks(self.disks.iter().map(|d| d.selected)) {
            errors.push(e);
        }
        if let Err(e) = partition::validate(&self.plan).into_result() {
            errors.push(e);
        }
        errors.extend(self.plan.range_errors());
        if let Network::Static(net) = self.network() {
            for address in [&net.ip, &net.netmask] {
                if let Err(e) = validation::check_ip(address) {
                    errors.push(e);
                }
            }
        }

        errors
    }

    /// Validate, hash the password and freeze the request.
    pub fn build(&self, password: &str) -> Result<InstallerRequest> {
        self.build_with(password, credentials::hash_password)
    }

    /// [`build`](Self::build) with an explicit hash function.
    pub fn build_with<F>(&self, password: &str, hash: F) -> Result<InstallerRequest>
    where
        F: FnOnce(&str) -> Result<String>,
    {
        if let Some(first) = self.validate().into_iter().next() {
            return Err(first);
        }
        if password.chars().count() < validation::MIN_PASSWORD_LEN {
            return Err(KickstartError::PasswordTooShort {
                required: validation::MIN_PASSWORD_LEN,
            });
        }

        let (install, ignore): (Vec<&DiskChoice>, Vec<&DiskChoice>) =
            self.disks.iter().partition(|d| d.selected);

        // Emit the parsed form so stray whitespace never reaches the directive
        let network = match self.network() {
            Network::Static(net) => Network::Static(StaticNetwork {
                ip: validation::check_ip(&net.ip)?.to_string(),
                netmask: validation::check_ip(&net.netmask)?.to_string(),
            }),
            Network::Dhcp => Network::Dhcp,
        };

        let encryption = if self.encrypt {
            Encryption::Luks {
                passphrase: password.to_string(),
            }
        } else {
            Encryption::None
        };

        let request = InstallerRequest {
            profile: self.profile,
            plan: self.plan,
            install_disks: install.into_iter().map(|d| d.device.clone()).collect(),
            ignore_disks: ignore.into_iter().map(|d| d.device.clone()).collect(),
            encryption,
            hostname: self.hostname.clone(),
            password_hash: hash(password)?,
            classification: self.classification,
            site: self.site,
            network,
        };
        tracing::info!(
            "Built request: profile={} disks={:?} encrypted={}",
            request.profile,
            request.install_disks,
            self.encrypt
        );
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::partition::Volume;

    fn builder() -> RequestBuilder {
        let inventory = DiskInventory::parse("sda 40960\nsdb 20480\n");
        RequestBuilder::new(Profile::ApacheWeb).with_inventory(&inventory)
    }

    fn fake_hash(_: &str) -> Result<String> {
        Ok("$6$salt$hash".to_string())
    }

    #[test]
    fn test_valid_builder_has_no_errors() {
        assert!(builder().validate().is_empty());
    }

    #[test]
    fn test_validate_collects_all_failures() {
        let mut b = builder();
        b.hostname = "bad host".into();
        for disk in &mut b.disks {
            disk.selected = false;
        }
        b.plan.set(Volume::Opt, 10);
        let errors = b.validate();
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], KickstartError::InvalidHostname(_)));
        assert!(matches!(errors[1], KickstartError::NoDiskSelected));
        assert!(matches!(errors[2], KickstartError::Overbudget(105)));
    }

    #[test]
    fn test_build_splits_disks() {
        let mut b = builder();
        b.disks[0].selected = false;
        let req = b.build_with(&"x".repeat(15), fake_hash).unwrap();
        assert_eq!(req.install_disks, vec!["sdb"]);
        assert_eq!(req.ignore_disks, vec!["sda"]);
        assert_eq!(req.password_hash, "$6$salt$hash");
        assert_eq!(req.network, Network::Dhcp);
    }

    #[test]
    fn test_build_refuses_invalid() {
        let mut b = builder();
        b.plan.set(Volume::Www, 50);
        assert!(matches!(
            b.build_with(&"x".repeat(15), fake_hash),
            Err(KickstartError::Overbudget(_))
        ));
    }

    #[test]
    fn test_build_refuses_short_password() {
        assert!(matches!(
            builder().build_with("short", fake_hash),
            Err(KickstartError::PasswordTooShort { required: 15 })
        ));
    }

    #[test]
    fn test_encryption_uses_password() {
        let password = "p".repeat(20);
        let req = builder().build_with(&password, fake_hash).unwrap();
        assert_eq!(req.encryption, Encryption::Luks { passphrase: password });

        let mut b = builder();
        b.encrypt = false;
        let req = b.build_with(&"p".repeat(20), fake_hash).unwrap();
        assert_eq!(req.encryption, Encryption::None);
    }

    #[test]
    fn test_disk_total_counts_unselected() {
        let mut b = builder();
        b.disks[1].selected = false;
        assert_eq!(b.disk_total_gb(), 60);
    }

    #[test]
    fn test_minimal_uses_static_network() {
        let mut b = builder();
        b.set_profile(Profile::Minimal);
        assert_eq!(b.plan, Profile::Minimal.spec().plan);
        assert_eq!(b.network(), Network::Static(StaticNetwork::default()));

        b.static_network.ip = "0.0.0.0".into();
        assert!(matches!(
            b.validate().as_slice(),
            [KickstartError::InvalidAddress(_)]
        ));
    }

    #[test]
    fn test_static_address_is_normalized() {
        let mut b = builder();
        b.set_profile(Profile::Minimal);
        b.static_network.ip = " 10.0.0.5".into();
        b.static_network.netmask = "255.255.0.0 ".into();
        assert!(b.validate().is_empty());

        let req = b.build_with(&"x".repeat(15), fake_hash).unwrap();
        assert_eq!(
            req.network,
            Network::Static(StaticNetwork {
                ip: "10.0.0.5".into(),
                netmask: "255.255.0.0".into(),
            })
        );
    }

    #[test]
    fn test_validate_reports_each_volume_out_of_range() {
        let mut b = builder();
        b.plan.set(Volume::Root, 0);
        b.plan.set(Volume::Home, 0);
        let ranges = b
            .validate()
            .into_iter()
            .filter(|e| matches!(e, KickstartError::VolumeOutOfRange { .. }))
            .count();
        assert_eq!(ranges, 2);
    }
}
