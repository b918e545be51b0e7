//! Type-safe option types shared by the form, the answer file and the emitter
//!
//! Stringly-typed choices from the original installer screen become enums
//! with exhaustive matching and stable textual identifiers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Classification marking shown by the desktop banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum ClassificationLevel {
    #[default]
    #[strum(serialize = "UNCLASSIFIED")]
    #[serde(rename = "UNCLASSIFIED")]
    Unclassified,
    #[strum(serialize = "UNCLASSIFIED//FOUO")]
    #[serde(rename = "UNCLASSIFIED//FOUO")]
    UnclassifiedFouo,
    #[strum(serialize = "CONFIDENTIAL")]
    #[serde(rename = "CONFIDENTIAL")]
    Confidential,
    #[strum(serialize = "SECRET")]
    #[serde(rename = "SECRET")]
    Secret,
    #[strum(serialize = "TOP SECRET")]
    #[serde(rename = "TOP SECRET")]
    TopSecret,
    #[strum(serialize = "TOP SECRET//SCI")]
    #[serde(rename = "TOP SECRET//SCI")]
    TopSecretSci,
    #[strum(serialize = "TOP SECRET//SCI//NOFORN")]
    #[serde(rename = "TOP SECRET//SCI//NOFORN")]
    TopSecretSciNoforn,
}

impl ClassificationLevel {
    /// Banner `(foreground, background)` colors.
    pub fn colors(self) -> (&'static str, &'static str) {
        match self {
            Self::Unclassified | Self::UnclassifiedFouo => ("#000000", "#00CC00"),
            Self::Confidential => ("#000000", "#33FFFF"),
            Self::Secret => ("#FFFFFF", "#FF0000"),
            Self::TopSecret => ("#FFFFFF", "#FF9900"),
            Self::TopSecretSci | Self::TopSecretSciNoforn => ("#000000", "#FFFF00"),
        }
    }
}

/// Site-specific configuration bundle installed after the base system.
///
/// TIM and CORE are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SiteConfig {
    #[default]
    None,
    Tim,
    Core,
}

impl SiteConfig {
    /// Installer hook lines for the `system-choice` artifact.
    pub fn hook_lines(self) -> &'static [&'static str] {
        match self {
            Self::None => &[],
            Self::Tim => &["echo Installing tim config", "/opt/tim_config/install"],
            Self::Core => &["echo Installing core config", "/opt/core_config/install"],
        }
    }

    /// Combine the two form toggles.
    ///
    /// Returns `None` when both are set, which the form reports as a conflict.
    pub fn from_toggles(tim: bool, core: bool) -> Option<Self> {
        match (tim, core) {
            (true, true) => None,
            (true, false) => Some(Self::Tim),
            (false, true) => Some(Self::Core),
            (false, false) => Some(Self::None),
        }
    }
}

/// How the `network` kickstart line configures eth0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NetworkMode {
    #[strum(serialize = "dhcp")]
    Dhcp,
    #[strum(serialize = "static")]
    Static,
}

/// Address used by profiles with a static network line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticNetwork {
    pub ip: String,
    pub netmask: String,
}

impl Default for StaticNetwork {
    fn default() -> Self {
        Self {
            ip: "192.168.1.101".to_string(),
            netmask: "255.255.255.0".to_string(),
        }
    }
}
