//! System profile catalog.
//!
//! Each profile is a fixed bundle of LVM percentages, package tokens and
//! install hooks for one system role. The catalog is a static table keyed by
//! [`Profile`]; nothing here is computed at runtime.
//!
//! | Profile                | Min disk | Hardening | Banner |
//! |------------------------|---------:|-----------|--------|
//! | Minimal                | 8 Gb     | yes       | no     |
//! | User Workstation       | 12 Gb    | yes       | yes    |
//! | Developer Workstation  | 16 Gb    | yes       | yes    |
//! | RHN Satellite          | 120 Gb   | yes       | no     |
//! | Proprietary Database   | 60 Gb    | yes       | no     |
//! | RHEV-Attached KVM      | 60 Gb    | deferred  | no     |
//! | Standalone KVM         | 60 Gb    | yes       | no     |
//! | Apache / Tomcat        | 10 Gb    | yes       | no     |
//! | PostgreSQL / MySQL     | 16 Gb    | yes       | no     |
//!
//! Package tokens follow kickstart `%packages` syntax: a leading `@` names a
//! group, a leading `-` excludes a package. Order is kept exactly as listed.

use crate::engine::partition::{PartitionPlan, VOLUME_GROUP_PERCENT};
use crate::error::{KickstartError, Result};
use crate::types::NetworkMode;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator};

/// System role selected on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(EnumIter, EnumString, EnumCount, Display, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    #[default]
    Minimal,
    UserWorkstation,
    DeveloperWorkstation,
    RhnSatellite,
    ProprietaryDatabase,
    RhevKvm,
    StandaloneKvm,
    ApacheWeb,
    TomcatWeb,
    PostgresqlDatabase,
    MysqlDatabase,
}

impl Profile {
    /// Look up a profile by its identifier (`minimal`, `rhev-kvm`, ...).
    pub fn from_id(id: &str) -> Result<Self> {
        id.trim()
            .parse()
            .map_err(|_| KickstartError::UnknownProfile(id.to_string()))
    }

    /// Catalog entry for this profile.
    pub fn spec(self) -> &'static ProfileSpec {
        &CATALOG[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Position in the form's profile selector.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }
}

/// Catalog listing entry for `profiles --json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSummary {
    pub id: Profile,
    pub name: &'static str,
    pub min_disk_gb: u64,
    pub plan: PartitionPlan,
    pub hardening: bool,
    pub banner: bool,
    pub network: String,
}

impl From<&ProfileSpec> for ProfileSummary {
    fn from(spec: &ProfileSpec) -> Self {
        Self {
            id: spec.profile,
            name: spec.name,
            min_disk_gb: spec.min_disk_gb,
            plan: spec.plan,
            hardening: spec.hardening,
            banner: spec.banner,
            network: spec.network.to_string(),
        }
    }
}

/// One catalog record.
#[derive(Debug)]
pub struct ProfileSpec {
    pub profile: Profile,
    /// Display name for the selector.
    pub name: &'static str,
    /// Noun phrase used in the low-disk warning.
    pub role: &'static str,
    /// Recommended minimum total disk size.
    pub min_disk_gb: u64,
    pub plan: PartitionPlan,
    pub packages: &'static [&'static str],
    /// Commands run outside the chroot once the target is laid down.
    pub pre_install: &'static [&'static str],
    /// Profile-specific post-install commands, after hardening.
    pub post_install: &'static [&'static str],
    /// False when hardening must run later by hand.
    pub hardening: bool,
    /// Whether the desktop classification banner is configured.
    pub banner: bool,
    pub network: NetworkMode,
}

/// Hardening invocation added to the post-install hook.
pub const HARDENING_COMMAND: &str = "/sbin/stig-fix -q &> /dev/null";

/// Installs the classification banner script into the target.
const BANNER_INSTALL: &[&str] = &[
    "cp /mnt/source/stig-fix/classification-banner.py /mnt/sysimage/usr/local/bin/",
    "chmod a+rx /mnt/sysimage/usr/local/bin/classification-banner.py",
];

/// Shown whenever a deferred-hardening profile is selected.
pub const HARDENING_DEFERRED_NOTICE: &str = "THIS PROFILE WILL NOT RUN THE HARDENING SCRIPT!\n\n\
Please run the system hardening script after system has been attached to the \
RHEV-M server using the following command:\n\n   # stig-fix";

const SERVER_PLAN: PartitionPlan = PartitionPlan {
    root: 30,
    home: 25,
    tmp: 10,
    var: 10,
    log: 10,
    audit: 10,
    swap: 0,
    opt: 0,
    www: 0,
};

// ============================================================================
// Package lists
// ============================================================================

const MINIMAL_PACKAGES: &[&str] = &[
    "-telnet-server",
    "-java-1.7.0-openjdk-devel",
    "-java-1.6.0-openjdk-devel",
    "gcc-c++",
    "dos2unix",
    "kernel-devel",
    "gcc",
    "dialog",
    "dmidecode",
    "aide",
];

const USER_WORKSTATION_PACKAGES: &[&str] = &[
    "@additional-devel",
    "@basic-desktop",
    "@desktop-platform",
    "@directory-client",
    "@general-desktop",
    "@graphical-admin-tools",
    "@input-methods",
    "@internet-browser",
    "@legacy-x",
    "@x11",
    "pcsc*",
    "aide",
    "coolkey",
    "liberation-*",
    "dejavu-*",
    "krb5-auth-dialog",
    "seahorse-plugins",
    "vim-X11",
    "gcc-c++",
    "dos2unix",
    "kernel-devel",
    "gcc",
    "dialog",
    "dmidecode",
    "policycoreutils-gui",
    "system-config-lvm",
    "audit-viewer",
    "openmotif",
    "libXmu",
    "libXp",
    "openmotif22",
    "-samba-winbind",
    "-certmonger",
    "-gnome-applets",
    "-vino",
    "-ypbind",
    "-cheese",
    "-gnome-backgrounds",
    "-compiz-gnome",
    "-gnome-bluetooth",
    "-gnome-user-share",
    "-sound-juicer",
    "-rhythmbox",
    "-brasero",
    "-brasero-nautilus",
    "-brasero-libs",
    "-NetworkManager",
    "-NetworkManager-gnome",
    "-evolution-data-server",
    "-NetworkManager-glib",
    "-m17n-contrib-bengali",
    "-m17n-contrib-punjabi",
    "-ibus-sayura",
    "-m17n-contrib-assamese",
    "-m17n-contrib-oriya",
    "-m17n-contrib-kannada",
    "-m17n-contrib-telugu",
    "-m17n-contrib-hindi",
    "-m17n-contrib-maithili",
    "-m17n-db-sinhala",
    "-m17n-contrib-marathi",
    "-m17n-db-thai",
    "-ibus-pinyin",
    "-m17n-contrib-urdu",
    "-m17n-contrib-tamil",
    "-ibus-chewing",
    "-ibus-hangul",
    "-ibus-anthy",
    "-m17n-contrib-malayalam",
    "-m17n-contrib-gujarati",
    "-telnet-server",
    "-java-1.7.0-openjdk-devel",
    "-java-1.6.0-openjdk-devel",
];

const DEVELOPER_WORKSTATION_PACKAGES: &[&str] = &[
    "@additional-devel",
    "@basic-desktop",
    "@desktop-platform",
    "@desktop-platform-devel",
    "@development",
    "@directory-client",
    "@eclipse",
    "@general-desktop",
    "@graphical-admin-tools",
    "@input-methods",
    "@internet-browser",
    "@legacy-x",
    "@server-platform-devel",
    "@x11",
    "pcsc*",
    "coolkey",
    "liberation-*",
    "dejavu-*",
    "libXinerama-devel",
    "openmotif-devel",
    "libXmu-devel",
    "xorg-x11-proto-devel",
    "startup-notification-devel",
    "libgnomeui-devel",
    "libbonobo-devel",
    "junit",
    "libXau-devel",
    "libgcrypt-devel",
    "popt-devel",
    "gnome-python2-desktop",
    "libdrm-devel",
    "libXrandr-devel",
    "libxslt-devel",
    "libglade2-devel",
    "gnutls-devel",
    "desktop-file-utils",
    "ant",
    "rpmdevtools",
    "jpackage-utils",
    "rpmlint",
    "krb5-auth-dialog",
    "seahorse-plugins",
    "vim-X11",
    "system-config-lvm",
    "audit-viewer",
    "openmotif",
    "libXmu",
    "libXp",
    "openmotif22",
    "-samba-winbind",
    "-certmonger",
    "-gnome-applets",
    "-vino",
    "-ypbind",
    "-cheese",
    "-gnome-backgrounds",
    "-compiz-gnome",
    "-gnome-bluetooth",
    "-gnome-user-share",
    "-sound-juicer",
    "-rhythmbox",
    "-brasero",
    "-brasero-nautilus",
    "-brasero-libs",
    "-NetworkManager",
    "-NetworkManager-gnome",
    "-evolution-data-server",
    "-evolution-data-server-devel",
    "-NetworkManager-glib",
    "-m17n-contrib-bengali",
    "-m17n-contrib-punjabi",
    "-ibus-sayura",
    "-m17n-contrib-assamese",
    "-m17n-contrib-oriya",
    "-m17n-contrib-kannada",
    "-m17n-contrib-telugu",
    "-m17n-contrib-hindi",
    "-m17n-contrib-maithili",
    "-m17n-db-sinhala",
    "-m17n-contrib-marathi",
    "-m17n-db-thai",
    "-ibus-pinyin",
    "-m17n-contrib-urdu",
    "-m17n-contrib-tamil",
    "-ibus-chewing",
    "-ibus-hangul",
    "-ibus-anthy",
    "-m17n-contrib-malayalam",
    "-m17n-contrib-gujarati",
];

const PROPRIETARY_DATABASE_PACKAGES: &[&str] = &[
    "xorg-x11-server-Xorg",
    "xorg-x11-xinit",
    "xterm",
    "twm",
    "liberation-*",
    "dejavu-*",
    "openmotif",
    "libXmu",
    "libXp",
    "openmotif22",
    "kernel-devel",
    "kernel-headers",
    "gcc",
    "gcc-c++",
    "libgcc",
    "autoconf",
    "make",
    "libstdc++",
    "compat-libstdc++",
    "libaio",
    "libaio-devel",
    "unixODBC",
    "unixODBC-devel",
    "sysstat",
    "ksh",
];

const STANDALONE_KVM_PACKAGES: &[&str] = &[
    "@storage-client-iscsi",
    "@virtualization",
    "@virtualization-client",
    "@virtualization-platform",
    "@virtualization-tools",
    "perl-Sys-Virt",
    "qemu-kvm-tools",
    "fence-virtd-libvirt",
    "virt-v2v",
    "libguestfs-tools",
];

// ============================================================================
// Catalog
// ============================================================================

const TABLE: [ProfileSpec; Profile::COUNT] = [
    ProfileSpec {
        profile: Profile::Minimal,
        name: "Minimal Installation",
        role: "a Minimal Install",
        min_disk_gb: 8,
        plan: PartitionPlan {
            root: 45,
            home: 15,
            tmp: 10,
            var: 10,
            log: 10,
            audit: 10,
            swap: 0,
            opt: 0,
            www: 0,
        },
        packages: MINIMAL_PACKAGES,
        pre_install: &[],
        post_install: &[],
        hardening: true,
        banner: false,
        network: NetworkMode::Static,
    },
    ProfileSpec {
        profile: Profile::UserWorkstation,
        name: "User Workstation",
        role: "a User Workstation",
        min_disk_gb: 12,
        plan: PartitionPlan {
            root: 45,
            home: 10,
            tmp: 10,
            var: 10,
            log: 10,
            audit: 10,
            swap: 5,
            opt: 0,
            www: 0,
        },
        packages: USER_WORKSTATION_PACKAGES,
        pre_install: BANNER_INSTALL,
        post_install: &[],
        hardening: true,
        banner: true,
        network: NetworkMode::Dhcp,
    },
    ProfileSpec {
        profile: Profile::DeveloperWorkstation,
        name: "Developer Workstation",
        role: "a Developer Workstation",
        min_disk_gb: 16,
        plan: SERVER_PLAN,
        packages: DEVELOPER_WORKSTATION_PACKAGES,
        pre_install: BANNER_INSTALL,
        post_install: &[],
        hardening: true,
        banner: true,
        network: NetworkMode::Dhcp,
    },
    ProfileSpec {
        profile: Profile::RhnSatellite,
        name: "RHN Satellite Server",
        role: "a RHN Satellite Server",
        min_disk_gb: 120,
        plan: PartitionPlan {
            root: 5,
            home: 3,
            tmp: 2,
            var: 80,
            log: 3,
            audit: 3,
            swap: 0,
            opt: 0,
            www: 3,
        },
        packages: &[],
        pre_install: &[],
        // Satellite's installer requires a 022 umask
        post_install: &[r#"sed -i "/umask/ c\umask 022" /etc/profile"#],
        hardening: true,
        banner: false,
        network: NetworkMode::Dhcp,
    },
    ProfileSpec {
        profile: Profile::ProprietaryDatabase,
        name: "Proprietary Database Server",
        role: "a Proprietary Database Server",
        min_disk_gb: 60,
        plan: PartitionPlan {
            root: 18,
            home: 5,
            tmp: 15,
            var: 7,
            log: 10,
            audit: 10,
            swap: 0,
            opt: 30,
            www: 0,
        },
        packages: PROPRIETARY_DATABASE_PACKAGES,
        pre_install: BANNER_INSTALL,
        post_install: &[],
        hardening: true,
        banner: false,
        network: NetworkMode::Dhcp,
    },
    ProfileSpec {
        profile: Profile::RhevKvm,
        name: "RHEV-Attached KVM Server",
        role: "a RHEV-Attached KVM Server Install",
        min_disk_gb: 60,
        plan: SERVER_PLAN,
        packages: &[],
        pre_install: &[],
        // RHEV-M logs in as root over SSH to register the host
        post_install: &[
            r#"sed -i "/^PermitRootLogin/ c\PermitRootLogin yes" /etc/ssh/sshd_config"#,
        ],
        hardening: false,
        banner: false,
        network: NetworkMode::Dhcp,
    },
    ProfileSpec {
        profile: Profile::StandaloneKvm,
        name: "Standalone KVM Server",
        role: "a RHEL/KVM Server",
        min_disk_gb: 60,
        plan: PartitionPlan {
            root: 15,
            home: 5,
            tmp: 3,
            var: 65,
            log: 5,
            audit: 5,
            swap: 0,
            opt: 0,
            www: 0,
        },
        packages: STANDALONE_KVM_PACKAGES,
        pre_install: &[],
        post_install: &[],
        hardening: true,
        banner: false,
        network: NetworkMode::Dhcp,
    },
    ProfileSpec {
        profile: Profile::ApacheWeb,
        name: "Apache Web Server",
        role: "a Web Server",
        min_disk_gb: 10,
        plan: SERVER_PLAN,
        packages: &["httpd"],
        pre_install: &[],
        post_install: &[],
        hardening: true,
        banner: false,
        network: NetworkMode::Dhcp,
    },
    ProfileSpec {
        profile: Profile::TomcatWeb,
        name: "Tomcat Web Server",
        role: "an Apache Tomcat Web Server",
        min_disk_gb: 10,
        plan: SERVER_PLAN,
        packages: &["tomcat6"],
        pre_install: &[],
        post_install: &[],
        hardening: true,
        banner: false,
        network: NetworkMode::Dhcp,
    },
    ProfileSpec {
        profile: Profile::PostgresqlDatabase,
        name: "PostgreSQL Database Server",
        role: "a PostgreSQL Database Server",
        min_disk_gb: 16,
        plan: SERVER_PLAN,
        packages: &["postgresql"],
        pre_install: &[],
        post_install: &[],
        hardening: true,
        banner: false,
        network: NetworkMode::Dhcp,
    },
    ProfileSpec {
        profile: Profile::MysqlDatabase,
        name: "MySQL Database Server",
        role: "a MariaDB Database Server",
        min_disk_gb: 16,
        plan: SERVER_PLAN,
        packages: &["mysql-server"],
        pre_install: &[],
        post_install: &[],
        hardening: true,
        banner: false,
        network: NetworkMode::Dhcp,
    },
];

/// The catalog, indexed by `Profile as usize`.
pub static CATALOG: [ProfileSpec; Profile::COUNT] = TABLE;

/// True when every catalog plan fits the volume group.
pub const fn catalog_within_budget(catalog: &[ProfileSpec]) -> bool {
    let mut i = 0;
    while i < catalog.len() {
        if catalog[i].plan.total() > VOLUME_GROUP_PERCENT {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(
    catalog_within_budget(&TABLE),
    "a catalog partition plan exceeds 100%"
);

/// True when `CATALOG[i].profile` is the `i`th variant.
const fn catalog_is_indexed() -> bool {
    let mut i = 0;
    while i < TABLE.len() {
        if TABLE[i].profile as usize != i {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(catalog_is_indexed(), "catalog order does not match Profile");

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::partition::Volume;

    #[test]
    fn test_catalog_sums_within_budget() {
        for profile in Profile::iter() {
            let total = profile.spec().plan.total();
            assert!(total <= 100, "{:?} sums to {}%", profile, total);
        }
    }

    #[test]
    fn test_catalog_plans_fit_form_ranges() {
        for profile in Profile::iter() {
            assert!(
                profile.spec().plan.range_errors().is_empty(),
                "{:?} has a volume outside its form range",
                profile
            );
        }
    }

    #[test]
    fn test_catalog_is_indexed_by_profile() {
        for profile in Profile::iter() {
            assert_eq!(profile.spec().profile, profile);
            assert_eq!(Profile::from_index(profile.index()), Some(profile));
        }
    }

    #[test]
    fn test_summary_json() {
        let summary = ProfileSummary::from(Profile::RhevKvm.spec());
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["id"], "rhev-kvm");
        assert_eq!(json["hardening"], false);
        assert_eq!(json["network"], "dhcp");
        assert_eq!(json["plan"]["root"], 30);
    }

    #[test]
    fn test_minimal_table() {
        let plan = Profile::Minimal.spec().plan;
        assert_eq!(plan.get(Volume::Root), 45);
        assert_eq!(plan.get(Volume::Home), 15);
        assert_eq!(plan.get(Volume::Audit), 10);
        assert_eq!(plan.get(Volume::Swap), 0);
        assert_eq!(plan.total(), 100);
    }

    #[test]
    fn test_from_id() {
        assert_eq!(Profile::from_id("minimal").unwrap(), Profile::Minimal);
        assert_eq!(Profile::from_id("rhev-kvm").unwrap(), Profile::RhevKvm);
        assert_eq!(
            Profile::from_id("developer-workstation").unwrap(),
            Profile::DeveloperWorkstation
        );
        assert!(matches!(
            Profile::from_id("kiosk"),
            Err(KickstartError::UnknownProfile(id)) if id == "kiosk"
        ));
    }

    #[test]
    fn test_only_rhev_defers_hardening() {
        let deferred: Vec<Profile> = Profile::iter().filter(|p| !p.spec().hardening).collect();
        assert_eq!(deferred, vec![Profile::RhevKvm]);
    }

    #[test]
    fn test_workstation_package_order() {
        let packages = Profile::UserWorkstation.spec().packages;
        assert_eq!(packages.first(), Some(&"@additional-devel"));
        assert_eq!(packages.last(), Some(&"-java-1.6.0-openjdk-devel"));
        assert!(packages.contains(&"-NetworkManager-glib"));

        let dev = Profile::DeveloperWorkstation.spec().packages;
        assert_eq!(dev.last(), Some(&"-m17n-contrib-gujarati"));
        assert!(dev.contains(&"-evolution-data-server-devel"));
    }

    #[test]
    fn test_banner_profiles() {
        let banner: Vec<Profile> = Profile::iter().filter(|p| p.spec().banner).collect();
        assert_eq!(
            banner,
            vec![Profile::UserWorkstation, Profile::DeveloperWorkstation]
        );
    }
}
