//! Catalog invariants checked through the public API

use strum::IntoEnumIterator;

use kickstart_tui::engine::partition;
use kickstart_tui::logic::resolver::{self, ResolveWarning};
use kickstart_tui::profiles::{HARDENING_COMMAND, Profile, ProfileSummary};
use kickstart_tui::{AnswerFile, KickstartError, kickstart};

#[test]
fn test_every_profile_fits_the_volume_group() {
    for profile in Profile::iter() {
        let status = partition::validate(&profile.spec().plan);
        assert!(!status.is_over(), "{} is {}%", profile, status.used());
    }
}

#[test]
fn test_identifiers_round_trip() {
    for profile in Profile::iter() {
        let id = profile.to_string();
        assert_eq!(Profile::from_id(&id).unwrap(), profile);
        assert_eq!(resolver::resolve_named(&id, 500).unwrap().profile, profile);
    }
    assert!(matches!(
        resolver::resolve_named("desktop", 500),
        Err(KickstartError::UnknownProfile(_))
    ));
}

#[test]
fn test_hardening_in_post_install() {
    for profile in Profile::iter() {
        let resolution = resolver::resolve(profile, 500);
        let hardened = resolution.post_install.first() == Some(&HARDENING_COMMAND);
        assert_eq!(hardened, profile != Profile::RhevKvm, "{}", profile);
        assert_eq!(
            resolution.warnings.contains(&ResolveWarning::HardeningDeferred),
            !hardened
        );
    }
}

#[test]
fn test_minimal_small_disk_warning() {
    let resolution = resolver::resolve(Profile::Minimal, 4);
    assert_eq!(resolution.plan, Profile::Minimal.spec().plan);
    assert_eq!(resolution.warnings.len(), 1);
    assert!(resolution.warnings[0]
        .to_string()
        .starts_with("Recommended minimum of 8Gb disk space for a Minimal Install!"));
}

#[test]
fn test_resolution_and_emission_are_deterministic() {
    for profile in Profile::iter() {
        assert_eq!(resolver::resolve(profile, 20), resolver::resolve(profile, 20));
    }

    let answers: AnswerFile = serde_json::from_str(
        r#"{ "profile": "standalone-kvm", "hostname": "kvm-01", "disks": [{ "name": "sda", "size_mb": 122880 }] }"#,
    )
    .unwrap();
    let builder = answers.to_builder().unwrap();
    let request = builder
        .build_with("fifteen-chars-ok", |_| Ok("$6$fixed$hash".to_string()))
        .unwrap();
    assert_eq!(kickstart::emit(&request), kickstart::emit(&request));
}

#[test]
fn test_summaries_serialize() {
    let summaries: Vec<ProfileSummary> = Profile::iter()
        .map(|p| ProfileSummary::from(p.spec()))
        .collect();
    let json = serde_json::to_value(&summaries).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 11);
    assert_eq!(json[5]["id"], "rhev-kvm");
    assert_eq!(json[5]["hardening"], false);
    assert_eq!(json[3]["min_disk_gb"], 120);
}
