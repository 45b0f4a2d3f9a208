//! Integration tests for the maptime-core document codec.
//!
//! These tests go through the public API only and check that a store written
//! by `encode_document` reads back to the same settings and overrides, and
//! that hand-written documents in the older layouts still load.

use maptime_core::{decode_document, encode_document, Config, LimitCommand, Notice};

/// Encodes a config and decodes it again.
fn roundtrip(cfg: &Config) -> Config {
    let xml = encode_document(cfg).expect("encode must succeed");
    let (decoded, report) = decode_document(&xml).expect("decode must succeed");
    assert!(report.is_clean(), "round trip must not need repairs: {:?}", report.repairs);
    decoded
}

#[test]
fn test_roundtrip_default_config() {
    let cfg = Config::default();
    assert_eq!(roundtrip(&cfg), cfg);
}

#[test]
fn test_roundtrip_preserves_flags_and_default() {
    let cfg = Config::new(12.25, false, true);
    let restored = roundtrip(&cfg);
    assert_eq!(restored.default_limit_minutes, 12.25);
    assert!(!restored.allow_admins);
    assert!(restored.allow_operators);
}

#[test]
fn test_roundtrip_identifiers_with_reserved_characters() {
    // Arrange: identifiers that would break naive XML embedding.
    let ids = [
        "Campaign/Spring 2024/01.Map.Gbx",
        "My Maps\\<Weird> & \"Quoted\".Map.Gbx",
        "Ünïcödé/マップ.Map.Gbx",
        "100%.Map.Gbx",
    ];
    let mut cfg = Config::default();
    for (i, id) in ids.iter().enumerate() {
        cfg.upsert_override(id, i as f64 + 0.5);
    }

    // Act
    let restored = roundtrip(&cfg);

    // Assert
    for (i, id) in ids.iter().enumerate() {
        let found = restored
            .find_override(id)
            .unwrap_or_else(|| panic!("{id} must survive the round trip"));
        assert_eq!(found.limit_minutes, i as f64 + 0.5);
    }
    assert_eq!(restored, cfg);
}

#[test]
fn test_roundtrip_keeps_insertion_order() {
    let mut cfg = Config::default();
    for id in ["c", "a", "b"] {
        cfg.upsert_override(id, 1.0);
    }
    let restored = roundtrip(&cfg);
    let order: Vec<&str> = restored
        .overrides()
        .iter()
        .map(|o| o.map_identifier.as_str())
        .collect();
    assert_eq!(order, ["c", "a", "b"]);
}

#[test]
fn test_hand_written_document_with_whitespace_and_comments_loads() {
    let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<maptime>
    <!-- edited by hand -->
    <default> 8 </default>
    <allow_admins>true</allow_admins>
    <allow_ops>true</allow_ops>
    <maplist>
        <map>
            <filename>Campaign%2FA01.Map.Gbx</filename>
            <limit>3</limit>
        </map>
    </maplist>
</maptime>
"#;

    let (cfg, report) = decode_document(xml).expect("hand-written document must load");

    assert!(report.is_clean(), "unexpected repairs: {:?}", report.repairs);
    assert_eq!(cfg.default_limit_minutes, 8.0);
    assert!(cfg.allow_operators);
    assert_eq!(cfg.find_override("Campaign/A01.Map.Gbx").unwrap().limit_minutes, 3.0);
}

#[test]
fn test_command_then_encode_scenario() {
    // Parse "/limit 3.5", apply it to an empty store, and check the document.
    let mut cfg = Config::default();
    let LimitCommand::Set { minutes } = LimitCommand::parse("3.5") else {
        panic!("3.5 must parse as a set command");
    };
    cfg.upsert_override("A", minutes);

    let xml = encode_document(&cfg).unwrap();

    assert!(xml.contains("<filename>A</filename>"));
    assert!(xml.contains("<limit>3.5</limit>"));
    let notice = Notice::LimitSet { minutes, map_name: "A".to_string() };
    assert_eq!(notice.to_string(), "Custom time limit of 3.5min set for A");
}
