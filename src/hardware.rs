//! Hardware environment detection
//!
//! Reads the disk inventory from the installer's `list-harddrives` helper and
//! a CPU/memory summary from `/proc`. Parsing is split from I/O so both can
//! be tested without the install media.
//!
//! # Design
//!
//! - **Never fatal**: a failed detection logs a warning and yields an empty result
//! - **Removable media skipped**: `fd0` and `sr0` never appear as install targets
//! - **No `unwrap()`**: fallible paths use `anyhow::Result` with context

use anyhow::{Context, Result, bail};
use std::fmt;
use std::fs;
use std::process::Command;

/// Above this many disks, labels drop the size to keep the row short.
const SIZED_LABEL_LIMIT: usize = 5;

/// Devices never offered for installation.
const SKIPPED_DEVICES: &[&str] = &["fd0", "sr0"];

// ============================================================================
// Disks
// ============================================================================

/// One detected disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Disk {
    /// Kernel device name, e.g. `sda`.
    pub name: String,
    pub size_mb: f64,
}

impl Disk {
    /// Whole gigabytes, truncated.
    pub fn size_gb(&self) -> u64 {
        // sizes are never negative; `as` saturates anyway
        (self.size_mb / 1024.0) as u64
    }
}

/// Disks available for installation, in `list-harddrives` order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiskInventory {
    pub disks: Vec<Disk>,
}

impl DiskInventory {
    /// Parse `list-harddrives` output: `name size-in-MB` per line.
    ///
    /// Lines mentioning floppy or optical devices and lines without a
    /// numeric size are skipped.
    pub fn parse(output: &str) -> Self {
        let disks = output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| !SKIPPED_DEVICES.iter().any(|d| line.contains(d)))
            .filter_map(|line| {
                let mut fields = line.split_whitespace();
                let name = fields.next()?;
                let size_mb = match fields.next().map(str::parse::<f64>) {
                    Some(Ok(size)) => size,
                    _ => {
                        tracing::warn!("Skipping unparseable disk line: {:?}", line);
                        return None;
                    }
                };
                Some(Disk {
                    name: name.to_string(),
                    size_mb,
                })
            })
            .collect();
        Self { disks }
    }

    /// Run `list-harddrives` and parse it; empty on failure.
    pub fn detect() -> Self {
        match list_harddrives() {
            Ok(output) => {
                let inventory = Self::parse(&output);
                tracing::info!(
                    "Detected {} disk(s), {}Gb total",
                    inventory.len(),
                    inventory.total_gb()
                );
                inventory
            }
            Err(e) => {
                tracing::warn!("Disk detection failed: {:#}", e);
                Self::default()
            }
        }
    }

    /// Sum of each disk's truncated size in GB.
    pub fn total_gb(&self) -> u64 {
        self.disks.iter().map(Disk::size_gb).sum()
    }

    pub fn len(&self) -> usize {
        self.disks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    /// Checkbox label for disk `index`.
    pub fn label(&self, index: usize) -> Option<String> {
        let disk = self.disks.get(index)?;
        if self.disks.len() > SIZED_LABEL_LIMIT {
            Some(disk.name.clone())
        } else {
            Some(format!("{} ({}Gb)", disk.name, disk.size_gb()))
        }
    }
}

fn list_harddrives() -> Result<String> {
    let output = Command::new("list-harddrives")
        .output()
        .context("Failed to run list-harddrives")?;
    if !output.status.success() {
        bail!(
            "list-harddrives exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

// ============================================================================
// CPU / Memory
// ============================================================================

/// CPU word size from the `lm` (long mode) flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CpuArch {
    #[default]
    Unknown,
    Bits32,
    Bits64,
}

impl fmt::Display for CpuArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Bits32 => write!(f, "32-bit"),
            Self::Bits64 => write!(f, "64-bit"),
        }
    }
}

/// Informational system summary shown above the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemInfo {
    pub cpu_model: String,
    /// Number of `model name` entries, i.e. hardware threads.
    pub cpu_threads: usize,
    pub arch: CpuArch,
    /// `MemTotal` as printed by the kernel, e.g. `16314200 kB`.
    pub mem_total: String,
    pub mem_free: String,
}

impl SystemInfo {
    /// Read `/proc/cpuinfo` and `/proc/meminfo`; missing files leave fields empty.
    pub fn detect() -> Self {
        let mut info = Self::default();
        match fs::read_to_string("/proc/cpuinfo") {
            Ok(text) => info.parse_cpuinfo(&text),
            Err(e) => tracing::warn!("Cannot read /proc/cpuinfo: {}", e),
        }
        match fs::read_to_string("/proc/meminfo") {
            Ok(text) => info.parse_meminfo(&text),
            Err(e) => tracing::warn!("Cannot read /proc/meminfo: {}", e),
        }
        tracing::debug!("System info: {}", info);
        info
    }

    pub fn parse_cpuinfo(&mut self, text: &str) {
        for line in text.lines() {
            if line.starts_with("model name") {
                if let Some((_, model)) = line.split_once(':') {
                    self.cpu_model = model.trim().to_string();
                }
                self.cpu_threads += 1;
            } else if line.starts_with("flags") || line.starts_with("Features") {
                self.arch = if line.split_whitespace().any(|flag| flag == "lm") {
                    CpuArch::Bits64
                } else {
                    CpuArch::Bits32
                };
            }
        }
    }

    pub fn parse_meminfo(&mut self, text: &str) {
        for line in text.lines() {
            match line.split_once(':') {
                Some(("MemTotal", value)) => self.mem_total = value.trim().to_string(),
                Some(("MemFree", value)) => self.mem_free = value.trim().to_string(),
                _ => {}
            }
        }
    }
}

impl fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CPU: {} x{} ({}), Memory: {} total, {} free",
            self.cpu_model, self.cpu_threads, self.arch, self.mem_total, self.mem_free
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const HARDDRIVES: &str = "sda 40960.0 ATA VBOX HARDDISK\n\
                              sr0 4096.0 CDROM\n\
                              sdb 10752.5 ATA VBOX HARDDISK\n\
                              fd0 1.44 Floppy\n";

    #[test]
    fn test_parse_skips_removable_media() {
        let inv = DiskInventory::parse(HARDDRIVES);
        let names: Vec<&str> = inv.disks.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["sda", "sdb"]);
    }

    #[test]
    fn test_total_truncates_each_disk() {
        let inv = DiskInventory::parse(HARDDRIVES);
        // 40960/1024 = 40, 10752.5/1024 = 10.5 -> 10
        assert_eq!(inv.total_gb(), 50);
    }

    #[test]
    fn test_parse_ignores_garbage() {
        let inv = DiskInventory::parse("\n  \nsda\nsdb notanumber\nsdc 2048\n");
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.disks[0].size_gb(), 2);
    }

    #[test]
    fn test_labels_include_size_for_few_disks() {
        let inv = DiskInventory::parse(HARDDRIVES);
        assert_eq!(inv.label(0).as_deref(), Some("sda (40Gb)"));
        assert_eq!(inv.label(1).as_deref(), Some("sdb (10Gb)"));
        assert_eq!(inv.label(2), None);
    }

    #[test]
    fn test_labels_bare_for_many_disks() {
        let output: String = (0..6).map(|i| format!("sd{} 1024\n", i)).collect();
        let inv = DiskInventory::parse(&output);
        assert_eq!(inv.len(), 6);
        assert_eq!(inv.label(5).as_deref(), Some("sd5"));
    }

    #[test]
    fn test_parse_cpuinfo() {
        let mut info = SystemInfo::default();
        info.parse_cpuinfo(
            "processor\t: 0\nmodel name\t: Intel(R) Xeon(R)\nflags\t\t: fpu vme lm sse\n\n\
             processor\t: 1\nmodel name\t: Intel(R) Xeon(R)\nflags\t\t: fpu vme lm sse\n",
        );
        assert_eq!(info.cpu_model, "Intel(R) Xeon(R)");
        assert_eq!(info.cpu_threads, 2);
        assert_eq!(info.arch, CpuArch::Bits64);
    }

    #[test]
    fn test_parse_cpuinfo_32bit() {
        let mut info = SystemInfo::default();
        info.parse_cpuinfo("model name\t: ARMv7\nFeatures\t: half thumb fastmult\n");
        assert_eq!(info.arch, CpuArch::Bits32);
        assert_eq!(info.arch.to_string(), "32-bit");
    }

    #[test]
    fn test_parse_meminfo() {
        let mut info = SystemInfo::default();
        info.parse_meminfo("MemTotal:       16314200 kB\nMemFree:         1204408 kB\nBuffers: 1 kB\n");
        assert_eq!(info.mem_total, "16314200 kB");
        assert_eq!(info.mem_free, "1204408 kB");
    }
}
