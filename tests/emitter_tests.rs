//! End-to-end tests for kickstart generation
//!
//! Answer file -> request builder -> emitter -> files on disk.

use kickstart_tui::config_file::AnswerFile;
use kickstart_tui::credentials;
use kickstart_tui::kickstart::{self, Artifact};
use kickstart_tui::profiles::{HARDENING_COMMAND, Profile};
use kickstart_tui::request::{InstallerRequest, RequestBuilder};
use kickstart_tui::types::{ClassificationLevel, SiteConfig};
use std::fs;

const PASSWORD: &str = "fifteen-chars-ok";

fn answers(json: &str) -> AnswerFile {
    serde_json::from_str(json).unwrap()
}

fn build(builder: &RequestBuilder) -> InstallerRequest {
    builder
        .build_with(PASSWORD, |pw| {
            credentials::hash_password_with_salt(pw, "testsalt")
        })
        .unwrap()
}

#[test]
fn test_workstation_generation() {
    let builder = answers(
        r#"{
            "profile": "user-workstation",
            "hostname": "ws-07.lab",
            "classification": "SECRET",
            "disks": [{ "name": "sda", "size_mb": 81920 }],
            "encrypt": false,
            "site": "tim"
        }"#,
    )
    .to_builder()
    .unwrap();
    let request = build(&builder);
    let set = kickstart::emit(&request);

    assert_eq!(set.len(), 6);
    let main = set.get(Artifact::Kickstart).unwrap();
    let lines: Vec<&str> = main.lines().collect();
    assert_eq!(
        lines[0],
        "network --device eth0 --bootproto dhcp --noipv6 --hostname ws-07.lab"
    );
    assert!(lines[1].starts_with("rootpw --iscrypted $6$testsalt$"));
    assert!(lines[2].ends_with(&format!("--password={}", request.password_hash)));
    assert_eq!(lines[3], "zerombr");
    assert_eq!(lines[5], "part pv.01 --grow --size=200");
    assert!(!main.contains(PASSWORD));
    assert!(main.contains(
        "logvol swap --fstype=swap --name=lv_swap --vgname=vg1 --size=256 --maxsize=4096 --percent=5\n"
    ));

    assert_eq!(
        set.get(Artifact::ClassificationBanner).unwrap(),
        "message = \"SECRET\"\nfgcolor = \"#FFFFFF\"\nbgcolor = \"#FF0000\"\n"
    );
    assert_eq!(
        set.get(Artifact::SiteChoice).unwrap(),
        "echo Installing tim config\n/opt/tim_config/install\n"
    );
    assert!(
        set.get(Artifact::PreInstall)
            .unwrap()
            .contains("classification-banner.py")
    );
}

#[test]
fn test_rhev_skips_hardening() {
    let mut builder = RequestBuilder::new(Profile::RhevKvm);
    builder.disks = answers(r#"{ "profile": "rhev-kvm", "disks": [{ "name": "vda" }] }"#)
        .to_builder()
        .unwrap()
        .disks;
    let set = kickstart::emit(&build(&builder));

    let post = set.get(Artifact::PostInstall).unwrap();
    assert!(!post.contains(HARDENING_COMMAND));
    assert!(post.contains("PermitRootLogin yes"));
    assert!(set.get(Artifact::ClassificationBanner).is_none());
}

#[test]
fn test_minimal_static_network_with_override() {
    let builder = answers(
        r#"{
            "profile": "minimal",
            "hostname": "min.example",
            "disks": [{ "name": "sda", "size_mb": 8192 }, { "name": "sdb", "size_mb": 8192, "install": false }],
            "network": { "ip": "10.1.2.3", "netmask": "255.255.0.0" }
        }"#,
    )
    .to_builder()
    .unwrap();
    let set = kickstart::emit(&build(&builder));
    let main = set.get(Artifact::Kickstart).unwrap();

    assert!(main.starts_with(
        "network --device eth0 --bootproto static --ip=10.1.2.3 --netmask=255.255.0.0 --onboot=on --noipv6 --hostname min.example\n"
    ));
    assert_eq!(main.matches("ignoredisk").count(), 1);
    assert!(main.contains("ignoredisk --drives=sdb\n"));
    assert!(main.contains(&format!(
        "--encrypted --cipher='aes-xts-plain64' --passphrase=\"{}\"",
        PASSWORD
    )));
    assert_eq!(set.get(Artifact::SiteChoice), Some(""));
    assert!(
        set.get(Artifact::PostInstall)
            .unwrap()
            .starts_with(HARDENING_COMMAND)
    );
}

#[test]
fn test_write_all_creates_private_files() {
    let mut builder = RequestBuilder::new(Profile::DeveloperWorkstation);
    builder.disks = answers(r#"{ "profile": "minimal", "disks": [{ "name": "sda" }] }"#)
        .to_builder()
        .unwrap()
        .disks;
    builder.classification = ClassificationLevel::TopSecretSci;
    builder.site = SiteConfig::Core;
    let set = kickstart::emit(&build(&builder));

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("ks");
    let written = set.write_all(&out).unwrap();
    assert_eq!(written.len(), set.len());

    for (artifact, content) in set.iter() {
        let path = out.join(artifact.file_name());
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    // Regenerating overwrites in place
    set.write_all(&out).unwrap();
    assert_eq!(fs::read_dir(&out).unwrap().count(), set.len());
}

#[test]
fn test_spaced_passphrase_stays_one_argument() {
    let builder = answers(r#"{ "profile": "apache-web", "disks": [{ "name": "sda" }] }"#)
        .to_builder()
        .unwrap();
    let request = builder
        .build_with("correct horse battery staple", |pw| {
            credentials::hash_password_with_salt(pw, "testsalt")
        })
        .unwrap();
    let set = kickstart::emit(&request);
    let part = set
        .get(Artifact::Kickstart)
        .unwrap()
        .lines()
        .find(|l| l.starts_with("part pv.01"))
        .unwrap()
        .to_string();
    assert!(part.ends_with(r#"--passphrase="correct horse battery staple""#));
}

#[cfg(unix)]
#[test]
fn test_write_all_restricts_existing_files() {
    use std::os::unix::fs::PermissionsExt;

    let builder = answers(r#"{ "profile": "minimal", "disks": [{ "name": "sda" }] }"#)
        .to_builder()
        .unwrap();
    let set = kickstart::emit(&build(&builder));

    let dir = tempfile::tempdir().unwrap();
    let stale = dir.path().join(Artifact::Kickstart.file_name());
    fs::write(&stale, "old contents that are much longer than nothing").unwrap();
    fs::set_permissions(&stale, fs::Permissions::from_mode(0o644)).unwrap();

    set.write_all(dir.path()).unwrap();
    let mode = fs::metadata(&stale).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    assert_eq!(
        fs::read_to_string(&stale).unwrap(),
        set.get(Artifact::Kickstart).unwrap()
    );
}
