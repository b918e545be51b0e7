//! Answer file handling for headless generation and saved form state.
//!
//! The answer file is the JSON form of a [`RequestBuilder`]: everything the
//! operator chooses except the password, which is read from a separate file
//! so it never lands in a config that gets copied around.
//!
//! ```json
//! {
//!   "profile": "apache-web",
//!   "hostname": "web-01.example",
//!   "classification": "UNCLASSIFIED",
//!   "disks": [{ "name": "sda", "size_mb": 40960, "install": true }],
//!   "encrypt": true,
//!   "site": "none",
//!   "partitions": { "www": 5 },
//!   "network": { "ip": "10.0.0.5", "netmask": "255.255.255.0" }
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use strum::IntoEnumIterator;

use crate::engine::partition::Volume;
use crate::error::KickstartError;
use crate::profiles::Profile;
use crate::request::{DiskChoice, RequestBuilder};
use crate::types::{ClassificationLevel, SiteConfig, StaticNetwork};

/// File name used when the TUI saves its answers next to the artifacts.
pub const ANSWER_FILE_NAME: &str = "kickstart-answers.json";

fn default_true() -> bool {
    true
}

fn default_hostname() -> String {
    "localhost.localdomain".to_string()
}

/// One disk entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskEntry {
    pub name: String,
    #[serde(default)]
    pub size_mb: f64,
    #[serde(default = "default_true")]
    pub install: bool,
}

/// Saved operator choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerFile {
    /// Catalog identifier, e.g. `rhev-kvm`.
    pub profile: String,
    #[serde(default = "default_hostname")]
    pub hostname: String,
    #[serde(default)]
    pub classification: ClassificationLevel,
    pub disks: Vec<DiskEntry>,
    #[serde(default = "default_true")]
    pub encrypt: bool,
    #[serde(default)]
    pub site: SiteConfig,
    /// Percentages replacing the profile's own, per volume.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub partitions: BTreeMap<Volume, u8>,
    /// Static address for profiles that use one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<StaticNetwork>,
}

impl AnswerFile {
    /// Load an answer file from JSON
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read answer file {:?}", path.as_ref()))?;

        let answers: Self =
            serde_json::from_str(&content).context("Failed to parse answer file JSON")?;

        Ok(answers)
    }

    /// Save the answer file as pretty JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize answer file")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write answer file to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Capture the form state. Partitions are stored only where they differ
    /// from the profile.
    pub fn from_builder(builder: &RequestBuilder) -> Self {
        let base = builder.profile.spec().plan;
        let partitions = Volume::iter()
            .filter(|v| builder.plan.get(*v) != base.get(*v))
            .map(|v| (v, builder.plan.get(v)))
            .collect();

        Self {
            profile: builder.profile.to_string(),
            hostname: builder.hostname.clone(),
            classification: builder.classification,
            disks: builder
                .disks
                .iter()
                .map(|d| DiskEntry {
                    name: d.device.clone(),
                    size_mb: d.size_mb,
                    install: d.selected,
                })
                .collect(),
            encrypt: builder.encrypt,
            site: builder.site,
            partitions,
            network: Some(builder.static_network.clone()),
        }
    }

    /// Turn the answers into a form state, overrides applied.
    pub fn to_builder(&self) -> crate::error::Result<RequestBuilder> {
        let profile = Profile::from_id(&self.profile)?;
        let mut builder = RequestBuilder::new(profile);

        for (volume, percent) in &self.partitions {
            builder.plan.set(*volume, *percent);
        }
        builder.disks = self
            .disks
            .iter()
            .map(|d| DiskChoice {
                device: d.name.clone(),
                size_mb: d.size_mb,
                selected: d.install,
            })
            .collect();
        builder.encrypt = self.encrypt;
        builder.hostname = self.hostname.clone();
        builder.classification = self.classification;
        builder.site = self.site;
        if let Some(network) = &self.network {
            builder.static_network = network.clone();
        }

        Ok(builder)
    }

    /// Every problem that would block generation.
    pub fn problems(&self) -> Vec<KickstartError> {
        match self.to_builder() {
            Ok(builder) => builder.validate(),
            Err(e) => vec![e],
        }
    }

    /// Fail with every problem listed when the answers would not generate.
    pub fn validate(&self) -> Result<()> {
        let problems = self.problems();
        if !problems.is_empty() {
            let messages: Vec<String> = problems.iter().map(|e| e.to_string()).collect();
            anyhow::bail!("{}", messages.join("\n"));
        }
        Ok(())
    }
}

/// Read a password from the first line of `path`.
pub fn read_password_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read password file {:?}", path.as_ref()))?;
    Ok(content.lines().next().unwrap_or_default().to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_answers() -> AnswerFile {
        serde_json::from_str(
            r#"{
                "profile": "apache-web",
                "hostname": "web-01.example",
                "disks": [
                    { "name": "sda", "size_mb": 40960 },
                    { "name": "sdb", "size_mb": 20480, "install": false }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let answers = create_test_answers();
        assert!(answers.encrypt);
        assert_eq!(answers.site, SiteConfig::None);
        assert_eq!(answers.classification, ClassificationLevel::Unclassified);
        assert!(answers.disks[0].install);
        assert!(!answers.disks[1].install);
        assert!(answers.partitions.is_empty());
    }

    #[test]
    fn test_to_builder() {
        let builder = create_test_answers().to_builder().unwrap();
        assert_eq!(builder.profile, Profile::ApacheWeb);
        assert_eq!(builder.plan, Profile::ApacheWeb.spec().plan);
        assert_eq!(builder.disks.len(), 2);
        assert!(builder.validate().is_empty());
    }

    #[test]
    fn test_partition_override() {
        let mut answers = create_test_answers();
        answers.partitions.insert(Volume::Www, 5);
        let builder = answers.to_builder().unwrap();
        assert_eq!(builder.plan.www, 5);
        assert_eq!(builder.plan.total(), 100);
        assert!(answers.validate().is_ok());

        answers.partitions.insert(Volume::Opt, 10);
        let err = answers.validate().unwrap_err();
        assert!(err.to_string().contains("not over 100%"));
    }

    #[test]
    fn test_unknown_profile() {
        let mut answers = create_test_answers();
        answers.profile = "kiosk".into();
        assert!(matches!(
            answers.problems().as_slice(),
            [KickstartError::UnknownProfile(_)]
        ));
    }

    #[test]
    fn test_save_and_load_roundtrip_through_builder() {
        let mut builder = create_test_answers().to_builder().unwrap();
        builder.plan.set(Volume::Opt, 5);
        builder.site = SiteConfig::Core;

        let temp_file = NamedTempFile::new().unwrap();
        AnswerFile::from_builder(&builder)
            .save_to_file(temp_file.path())
            .unwrap();
        let loaded = AnswerFile::load_from_file(temp_file.path()).unwrap();

        assert_eq!(loaded.partitions.get(&Volume::Opt), Some(&5));
        assert_eq!(loaded.partitions.len(), 1);
        assert_eq!(loaded.to_builder().unwrap(), builder);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = AnswerFile::load_from_file(Path::new("/nonexistent/path"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"{ invalid json }").unwrap();
        temp_file.flush().unwrap();

        let result = AnswerFile::load_from_file(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_read_password_file_strips_newline() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"correct horse battery\n").unwrap();
        temp_file.flush().unwrap();
        assert_eq!(
            read_password_file(temp_file.path()).unwrap(),
            "correct horse battery"
        );
    }
}
