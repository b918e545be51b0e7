//! LVM Partition Budget Engine
//!
//! Every install carves one volume group (`vg1`) out of the selected disks and
//! splits it between nine logical volumes by percentage. This module owns the
//! volume table and the budget rule: percentages may never add up to more than
//! the whole volume group.
//!
//! # Volumes
//!
//! | Volume | Mount           | LV       | Min MB | Range  | Emitted      |
//! |--------|-----------------|----------|-------:|--------|--------------|
//! | root   | /               | lv_root  | 2048   | 1–95   | always       |
//! | home   | /home           | lv_home  | 1024   | 1–95   | always       |
//! | tmp    | /tmp            | lv_tmp   | 512    | 1–60   | always       |
//! | var    | /var            | lv_var   | 512    | 1–95   | always       |
//! | log    | /var/log        | lv_log   | 512    | 1–75   | always       |
//! | audit  | /var/log/audit  | lv_audit | 512    | 1–75   | always       |
//! | swap   | swap            | lv_swap  | 256    | 0–25   | when ≥ 1     |
//! | opt    | /opt            | lv_opt   | 512    | 0–90   | when ≥ 1     |
//! | www    | /var/www        | lv_www   | 512    | 0–90   | when ≥ 1     |
//!
//! Pure logic: no I/O.

use crate::error::{KickstartError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator};

/// Upper bound for the sum of all volume percentages.
pub const VOLUME_GROUP_PERCENT: u32 = 100;

/// One LVM logical volume, in kickstart emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Display, EnumString, EnumIter, EnumCount, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Volume {
    Root,
    Home,
    Tmp,
    Var,
    Log,
    Audit,
    Swap,
    Opt,
    Www,
}

impl Volume {
    /// Mount point passed to `logvol`.
    pub fn mount_point(self) -> &'static str {
        match self {
            Self::Root => "/",
            Self::Home => "/home",
            Self::Tmp => "/tmp",
            Self::Var => "/var",
            Self::Log => "/var/log",
            Self::Audit => "/var/log/audit",
            Self::Swap => "swap",
            Self::Opt => "/opt",
            Self::Www => "/var/www",
        }
    }

    /// Logical volume name inside `vg1`.
    pub fn lv_name(self) -> &'static str {
        match self {
            Self::Root => "lv_root",
            Self::Home => "lv_home",
            Self::Tmp => "lv_tmp",
            Self::Var => "lv_var",
            Self::Log => "lv_log",
            Self::Audit => "lv_audit",
            Self::Swap => "lv_swap",
            Self::Opt => "lv_opt",
            Self::Www => "lv_www",
        }
    }

    pub fn fstype(self) -> &'static str {
        match self {
            Self::Swap => "swap",
            _ => "ext4",
        }
    }

    /// Starting size in MB before `--grow`/`--percent` apply.
    pub fn base_size_mb(self) -> u32 {
        match self {
            Self::Root => 2048,
            Self::Home => 1024,
            Self::Swap => 256,
            _ => 512,
        }
    }

    /// Swap is capped instead of grown.
    pub fn max_size_mb(self) -> Option<u32> {
        match self {
            Self::Swap => Some(4096),
            _ => None,
        }
    }

    /// Inclusive percentage range the form allows.
    pub fn range(self) -> (u8, u8) {
        match self {
            Self::Root | Self::Home | Self::Var => (1, 95),
            Self::Tmp => (1, 60),
            Self::Log | Self::Audit => (1, 75),
            Self::Swap => (0, 25),
            Self::Opt | Self::Www => (0, 90),
        }
    }

    /// Optional volumes are only created when given at least 1%.
    pub fn is_optional(self) -> bool {
        matches!(self, Self::Swap | Self::Opt | Self::Www)
    }

    /// Form label, e.g. `ROOT (/)`.
    pub fn label(self) -> String {
        match self {
            Self::Swap => "SWAP".to_string(),
            _ => format!("{} ({})", self.to_string().to_uppercase(), self.mount_point()),
        }
    }
}

/// Percentage of the volume group given to each logical volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PartitionPlan {
    pub root: u8,
    pub home: u8,
    pub tmp: u8,
    pub var: u8,
    pub log: u8,
    pub audit: u8,
    pub swap: u8,
    pub opt: u8,
    pub www: u8,
}

impl PartitionPlan {
    pub fn get(&self, volume: Volume) -> u8 {
        match volume {
            Volume::Root => self.root,
            Volume::Home => self.home,
            Volume::Tmp => self.tmp,
            Volume::Var => self.var,
            Volume::Log => self.log,
            Volume::Audit => self.audit,
            Volume::Swap => self.swap,
            Volume::Opt => self.opt,
            Volume::Www => self.www,
        }
    }

    fn slot(&mut self, volume: Volume) -> &mut u8 {
        match volume {
            Volume::Root => &mut self.root,
            Volume::Home => &mut self.home,
            Volume::Tmp => &mut self.tmp,
            Volume::Var => &mut self.var,
            Volume::Log => &mut self.log,
            Volume::Audit => &mut self.audit,
            Volume::Swap => &mut self.swap,
            Volume::Opt => &mut self.opt,
            Volume::Www => &mut self.www,
        }
    }

    /// Set a volume without range checks (answer files are checked later).
    pub fn set(&mut self, volume: Volume, percent: u8) {
        *self.slot(volume) = percent;
    }

    /// Step a volume up or down, clamped to its form range.
    pub fn adjust(&mut self, volume: Volume, delta: i16) -> u8 {
        let (min, max) = volume.range();
        let slot = self.slot(volume);
        let next = (i16::from(*slot) + delta).clamp(i16::from(min), i16::from(max));
        // clamp keeps next inside 0..=95
        *slot = next as u8;
        *slot
    }

    /// Sum of all nine percentages.
    pub const fn total(&self) -> u32 {
        self.root as u32
            + self.home as u32
            + self.tmp as u32
            + self.var as u32
            + self.log as u32
            + self.audit as u32
            + self.swap as u32
            + self.opt as u32
            + self.www as u32
    }

    pub fn budget(&self) -> BudgetStatus {
        validate(self)
    }

    /// Volumes that end up as `logvol` lines, in emission order.
    pub fn active_volumes(&self) -> impl Iterator<Item = (Volume, u8)> + '_ {
        Volume::iter()
            .map(|v| (v, self.get(v)))
            .filter(|(v, pct)| !v.is_optional() || *pct >= 1)
    }

    /// One error per volume outside its form range, in emission order.
    pub fn range_errors(&self) -> Vec<KickstartError> {
        Volume::iter()
            .filter_map(|volume| {
                let value = self.get(volume);
                let (min, max) = volume.range();
                (value < min || value > max).then(|| KickstartError::VolumeOutOfRange {
                    volume: volume.label(),
                    value,
                    min,
                    max,
                })
            })
            .collect()
    }
}

impl fmt::Display for PartitionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = Volume::iter()
            .map(|v| format!("{}={}%", v, self.get(v)))
            .collect();
        write!(f, "{} (total {}%)", parts.join(" "), self.total())
    }
}

/// Outcome of checking a plan against the volume group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    /// Sum fits; carries the percentage used for display.
    Within { used: u32 },
    /// Sum exceeds 100%.
    Overbudget { used: u32 },
}

impl BudgetStatus {
    pub fn used(self) -> u32 {
        match self {
            Self::Within { used } | Self::Overbudget { used } => used,
        }
    }

    pub fn is_over(self) -> bool {
        matches!(self, Self::Overbudget { .. })
    }

    /// Convert to the submit-gate error.
    pub fn into_result(self) -> Result<u32> {
        match self {
            Self::Within { used } => Ok(used),
            Self::Overbudget { used } => Err(KickstartError::Overbudget(used)),
        }
    }
}

/// Check a partition plan against the volume group budget.
pub fn validate(plan: &PartitionPlan) -> BudgetStatus {
    let used = plan.total();
    if used > VOLUME_GROUP_PERCENT {
        tracing::debug!("Partition plan over budget: {}%", used);
        BudgetStatus::Overbudget { used }
    } else {
        BudgetStatus::Within { used }
    }
}
