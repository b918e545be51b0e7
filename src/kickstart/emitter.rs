//! Kickstart emitter
//!
//! Serializes an [`InstallerRequest`] into the artifact set. Emission trusts
//! the request: every check already ran in [`RequestBuilder`], so nothing here
//! fails.
//!
//! [`RequestBuilder`]: crate::request::RequestBuilder

use super::{Artifact, ArtifactSet};
use crate::engine::partition::PartitionPlan;
use crate::logic::resolver::{PackageList, post_install_lines};
use crate::request::{Encryption, InstallerRequest, Network};
use crate::types::ClassificationLevel;
use std::fmt::Write;

const BOOTLOADER_APPEND: &str = "crashkernel=auto rhgb quiet audit=1";
const LUKS_CIPHER: &str = "aes-xts-plain64";
const VOLUME_GROUP: &str = "vg1";

/// Render every artifact for `request`.
pub fn emit(request: &InstallerRequest) -> ArtifactSet {
    let spec = request.profile.spec();
    let mut set = ArtifactSet::default();

    set.push(Artifact::Kickstart, main_directives(request));
    set.push(Artifact::PreInstall, lines(spec.pre_install));
    set.push(
        Artifact::PostInstall,
        lines(&post_install_lines(request.profile)),
    );
    set.push(
        Artifact::Packages,
        PackageList::from_tokens(spec.packages).render(),
    );
    if spec.banner {
        set.push(
            Artifact::ClassificationBanner,
            banner(request.classification),
        );
    }
    set.push(Artifact::SiteChoice, lines(request.site.hook_lines()));

    tracing::debug!("Emitted {} artifacts for {}", set.len(), request.profile);
    set
}

/// The `stig-fix` include: network, credentials, disks and LVM layout.
fn main_directives(request: &InstallerRequest) -> String {
    let mut out = String::new();
    let drives = request.install_disks.join(",");

    // writeln! into a String cannot fail
    match &request.network {
        Network::Dhcp => {
            let _ = writeln!(
                out,
                "network --device eth0 --bootproto dhcp --noipv6 --hostname {}",
                request.hostname
            );
        }
        Network::Static(net) => {
            let _ = writeln!(
                out,
                "network --device eth0 --bootproto static --ip={} --netmask={} --onboot=on --noipv6 --hostname {}",
                net.ip, net.netmask, request.hostname
            );
        }
    }
    let _ = writeln!(out, "rootpw --iscrypted {}", request.password_hash);
    let _ = writeln!(
        out,
        "bootloader --location=mbr --driveorder={} --append=\"{}\" --password={}",
        drives, BOOTLOADER_APPEND, request.password_hash
    );
    if !request.ignore_disks.is_empty() {
        let _ = writeln!(out, "ignoredisk --drives={}", request.ignore_disks.join(","));
    }
    out.push_str("zerombr\n");
    let _ = writeln!(out, "clearpart --all --drives={}", drives);
    match &request.encryption {
        Encryption::None => out.push_str("part pv.01 --grow --size=200\n"),
        Encryption::Luks { passphrase } => {
            let _ = writeln!(
                out,
                "part pv.01 --grow --size=200 --encrypted --cipher='{}' --passphrase={}",
                LUKS_CIPHER,
                quote(passphrase)
            );
        }
    }
    out.push_str("part /boot --fstype=ext4 --size=300\n");
    let _ = writeln!(out, "volgroup {} --pesize=4096 pv.01", VOLUME_GROUP);
    logvols(&mut out, &request.plan);
    out
}

fn logvols(out: &mut String, plan: &PartitionPlan) {
    for (volume, percent) in plan.active_volumes() {
        let _ = write!(
            out,
            "logvol {} --fstype={} --name={} --vgname={} --size={}",
            volume.mount_point(),
            volume.fstype(),
            volume.lv_name(),
            VOLUME_GROUP,
            volume.base_size_mb()
        );
        match volume.max_size_mb() {
            Some(max) => {
                let _ = write!(out, " --maxsize={}", max);
            }
            None => out.push_str(" --grow"),
        }
        let _ = writeln!(out, " --percent={}", percent);
    }
}

fn banner(level: ClassificationLevel) -> String {
    let (fg, bg) = level.colors();
    format!(
        "message = \"{}\"\nfgcolor = \"{}\"\nbgcolor = \"{}\"\n",
        level, fg, bg
    )
}

/// Double-quote a value for the installer's shell-style option parser.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

fn lines(items: &[&str]) -> String {
    items.iter().map(|line| format!("{}\n", line)).collect()
}
