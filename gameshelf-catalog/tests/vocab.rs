use gameshelf_catalog::{Format, PLATFORMS, Platform, STATUSES, Status};

#[test]
fn all_has_35_platforms() {
    assert_eq!(Platform::all().len(), 35);
}

#[test]
fn platform_labels_round_trip() {
    for &platform in PLATFORMS {
        let parsed: Platform = platform.label().parse().unwrap();
        assert_eq!(parsed, platform, "round-trip failed for {:?}", platform);
    }
}

#[test]
fn platform_aliases_resolve() {
    let cases = [
        ("playstation 5", Platform::Ps5),
        ("genesis", Platform::MegaDrive),
        ("vita", Platform::PsVita),
        ("x360", Platform::Xbox360),
        ("gb", Platform::GameBoy),
        ("nds", Platform::Ds),
        ("  steam deck ", Platform::SteamDeck),
    ];
    for (input, expected) in cases {
        let parsed: Platform = input.parse().unwrap();
        assert_eq!(parsed, expected, "alias '{}' should parse to {:?}", input, expected);
    }
}

#[test]
fn platform_aliases_are_unambiguous() {
    let mut seen = std::collections::HashMap::new();
    for &platform in PLATFORMS {
        let names = std::iter::once(platform.label().to_lowercase())
            .chain(platform.aliases().iter().map(|a| a.to_string()));
        for name in names {
            if let Some(prev) = seen.insert(name.clone(), platform) {
                panic!("'{}' maps to both {:?} and {:?}", name, prev, platform);
            }
        }
    }
}

#[test]
fn unknown_platform_is_an_error() {
    let result: Result<Platform, _> = "commodore 64".parse();
    assert!(result.is_err());
}

#[test]
fn status_labels_round_trip() {
    for &status in STATUSES {
        let parsed: Status = status.label().parse().unwrap();
        assert_eq!(parsed, status);
    }
    assert_eq!("pendiente".parse::<Status>().unwrap(), Status::Pending);
    assert_eq!("Completed".parse::<Status>().unwrap(), Status::Completed);
}

#[test]
fn finished_statuses() {
    assert!(Status::Completed.is_finished());
    assert!(Status::Hundred.is_finished());
    assert!(!Status::Playing.is_finished());
    assert!(!Status::Pending.is_finished());
}

#[test]
fn format_accepts_legacy_label() {
    assert_eq!("Físico".parse::<Format>().unwrap(), Format::Physical);
    assert_eq!("physical".parse::<Format>().unwrap(), Format::Physical);
    assert_eq!("DIGITAL".parse::<Format>().unwrap(), Format::Digital);
    assert!("cloud".parse::<Format>().is_err());
}

#[test]
fn vocabularies_serialize_as_labels() {
    assert_eq!(serde_json::to_string(&Status::Hundred).unwrap(), "\"100%\"");
    assert_eq!(serde_json::to_string(&Platform::PsVita).unwrap(), "\"PS Vita\"");
    let parsed: Platform = serde_json::from_str("\"Switch 2\"").unwrap();
    assert_eq!(parsed, Platform::Switch2);
}
