//! Integration tests for the maptime plugin.
//!
//! These tests wire a real `MaptimePlugin` to a `SimulatedServer` and an
//! `XmlFileStore` in a scratch directory, then drive it the way a server
//! controller would: chat commands, map ends and a shutdown.

use std::path::PathBuf;
use std::sync::Arc;

use maptime_core::{decode_document, Config, GameMode, LimitUnit, MapInfo, Role};
use maptime_plugin::application::config_store::{ConfigStore, StoreError};
use maptime_plugin::application::host::HostServices;
use maptime_plugin::application::lifecycle::LimitSource;
use maptime_plugin::application::process_command::CommandOutcome;
use maptime_plugin::infrastructure::host::simulated::{ChatLine, SimulatedServer};
use maptime_plugin::infrastructure::storage::xml_store::XmlFileStore;
use maptime_plugin::MaptimePlugin;
use uuid::Uuid;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A scratch directory removed when dropped.
struct Scratch(PathBuf);

impl Scratch {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("maptime-it-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        Self(dir)
    }

    fn store_path(&self) -> PathBuf {
        self.0.join("maptime.xml")
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

struct Harness {
    server: Arc<SimulatedServer>,
    store: Arc<XmlFileStore>,
    plugin: MaptimePlugin,
}

fn harness(scratch: &Scratch, mode: GameMode, unit: LimitUnit) -> Harness {
    let server = Arc::new(
        SimulatedServer::new(
            vec![
                MapInfo::new("A", "$fffA"),
                MapInfo::new("B", "$o$iB"),
                MapInfo::new("C", "C"),
            ],
            mode,
            unit,
        )
        .with_role("owner", Role::MasterAdmin)
        .with_role("alice", Role::Admin)
        .with_role("bob", Role::Operator),
    );
    let store = Arc::new(XmlFileStore::new(scratch.store_path()));
    let plugin = MaptimePlugin::new(
        Arc::clone(&store) as Arc<dyn ConfigStore>,
        HostServices::from_single(Arc::clone(&server)),
    )
    .expect("plugin starts");
    Harness {
        server,
        store,
        plugin,
    }
}

fn read_store(scratch: &Scratch) -> Config {
    let xml = std::fs::read_to_string(scratch.store_path()).expect("store exists");
    decode_document(&xml).expect("store decodes").0
}

// ── Start-up ──────────────────────────────────────────────────────────────────

#[test]
fn test_startup_creates_default_store_file() {
    let scratch = Scratch::new();

    let _h = harness(&scratch, GameMode::TimeAttack, LimitUnit::Seconds);

    assert!(scratch.store_path().exists());
    assert_eq!(read_store(&scratch), Config::default());
}

#[test]
fn test_startup_fails_when_store_cannot_be_created() {
    // Arrange: the store's parent is a regular file, so no directory can be made.
    let scratch = Scratch::new();
    let blocker = scratch.0.join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let store = Arc::new(XmlFileStore::new(blocker.join("maptime.xml")));
    let server = Arc::new(SimulatedServer::new(
        Vec::new(),
        GameMode::TimeAttack,
        LimitUnit::Seconds,
    ));

    // Act
    let result = MaptimePlugin::new(store, HostServices::from_single(server));

    // Assert
    assert!(matches!(
        result,
        Err(StoreError::Io { .. }) | Err(StoreError::Initialize { .. })
    ));
}

// ── Commands ──────────────────────────────────────────────────────────────────

#[test]
fn test_set_limit_on_empty_store_writes_file_and_confirms() {
    // Arrange
    let scratch = Scratch::new();
    let h = harness(&scratch, GameMode::TimeAttack, LimitUnit::Seconds);

    // Act
    h.plugin.on_chat_command("owner", "3.5").unwrap();

    // Assert
    let xml = std::fs::read_to_string(scratch.store_path()).unwrap();
    assert!(xml.contains("<limit>3.5</limit>"));
    assert!(xml.contains("<filename>A</filename>"));
    assert_eq!(read_store(&scratch).find_override("A").unwrap().limit_minutes, 3.5);
    assert_eq!(
        h.server.take_chat(),
        vec![ChatLine::All("Custom time limit of 3.5min set for A".to_string())]
    );
}

#[test]
fn test_set_default_leaves_overrides_intact() {
    let scratch = Scratch::new();
    let h = harness(&scratch, GameMode::TimeAttack, LimitUnit::Seconds);
    h.plugin.on_chat_command("owner", "3.5").unwrap();

    h.plugin.on_chat_command("owner", "default 10").unwrap();

    let cfg = read_store(&scratch);
    assert_eq!(cfg.default_limit_minutes, 10.0);
    assert_eq!(cfg.find_override("A").unwrap().limit_minutes, 3.5);
}

#[test]
fn test_removeall_clears_file() {
    let scratch = Scratch::new();
    let h = harness(&scratch, GameMode::TimeAttack, LimitUnit::Seconds);
    h.plugin.on_chat_command("owner", "2").unwrap();
    h.server.advance_map();
    h.plugin.on_chat_command("owner", "4").unwrap();

    let outcome = h.plugin.on_chat_command("owner", "removeall").unwrap();

    assert_eq!(outcome, CommandOutcome::AllRemoved { count: 2 });
    let cfg = read_store(&scratch);
    assert!(cfg.find_override("A").is_none());
    assert!(cfg.find_override("B").is_none());
}

#[test]
fn test_operator_needs_allow_operators() {
    // Arrange
    let scratch = Scratch::new();
    let h = harness(&scratch, GameMode::TimeAttack, LimitUnit::Seconds);

    // Act: denied under the default flags.
    let denied = h.plugin.on_chat_command("bob", "3").unwrap();

    // Hand edit enables operators; the next command must see it.
    h.store.save(&Config::new(5.0, true, true)).unwrap();
    let allowed = h.plugin.on_chat_command("bob", "3").unwrap();

    // Assert
    assert_eq!(denied, CommandOutcome::Denied { role: Role::Operator });
    assert!(matches!(allowed, CommandOutcome::LimitSet { .. }));
}

#[test]
fn test_hand_edited_file_is_picked_up() {
    let scratch = Scratch::new();
    let h = harness(&scratch, GameMode::TimeAttack, LimitUnit::Seconds);

    std::fs::write(
        scratch.store_path(),
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <maptime>\n\
           <default>7</default>\n\
           <allow_admins>false</allow_admins>\n\
           <allow_ops>false</allow_ops>\n\
         </maptime>\n",
    )
    .unwrap();
    let outcome = h.plugin.on_chat_command("alice", "3").unwrap();

    assert_eq!(outcome, CommandOutcome::Denied { role: Role::Admin });
    assert_eq!(read_store(&scratch).default_limit_minutes, 7.0);
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[test]
fn test_end_map_applies_default_for_next_map_without_override() {
    // Arrange: {A, 3.5} and default 10; current A, next B.
    let scratch = Scratch::new();
    let h = harness(&scratch, GameMode::TimeAttack, LimitUnit::Seconds);
    h.plugin.on_chat_command("owner", "3.5").unwrap();
    h.plugin.on_chat_command("owner", "default 10").unwrap();

    // Act
    let change = h.plugin.on_end_map().unwrap();

    // Assert
    assert_eq!(change.source, LimitSource::Default);
    assert_eq!(change.map.unwrap().file_name, "B");
    assert_eq!(h.server.published_limit(GameMode::TimeAttack), Some(600));
}

#[test]
fn test_end_map_in_milliseconds() {
    let scratch = Scratch::new();
    let h = harness(&scratch, GameMode::TimeAttack, LimitUnit::Milliseconds);
    h.plugin.on_chat_command("owner", "default 10").unwrap();

    h.plugin.on_end_map().unwrap();

    assert_eq!(h.server.published_limit(GameMode::TimeAttack), Some(600_000));
}

#[test]
fn test_full_rotation_applies_override_when_map_comes_up() {
    let scratch = Scratch::new();
    let h = harness(&scratch, GameMode::Laps, LimitUnit::Seconds);
    // Give B an override while B is current.
    h.server.advance_map();
    h.plugin.on_chat_command("alice", "2.5").unwrap();

    // C next: default.  A next: default.  B next: override.
    h.plugin.on_end_map().unwrap();
    h.server.advance_map();
    assert_eq!(h.server.published_limit(GameMode::Laps), Some(300));
    h.plugin.on_end_map().unwrap();
    h.server.advance_map();
    assert_eq!(h.server.published_limit(GameMode::Laps), Some(300));
    let change = h.plugin.on_end_map().unwrap();

    assert_eq!(change.source, LimitSource::Override);
    assert_eq!(h.server.published_limit(GameMode::Laps), Some(150));
}

#[test]
fn test_shutdown_restores_default_despite_overrides() {
    let scratch = Scratch::new();
    let h = harness(&scratch, GameMode::TeamAttack, LimitUnit::Seconds);
    h.plugin.on_chat_command("owner", "1").unwrap();
    h.plugin.on_end_map().unwrap();
    h.server.advance_map();
    h.plugin.on_chat_command("owner", "1").unwrap();

    let change = h.plugin.on_shutdown().unwrap();

    assert_eq!(change.minutes, 5.0);
    assert_eq!(h.server.published_limit(GameMode::TeamAttack), Some(300));
}

#[test]
fn test_corrupt_store_heals_on_next_event() {
    let scratch = Scratch::new();
    let h = harness(&scratch, GameMode::TimeAttack, LimitUnit::Seconds);
    h.plugin.on_chat_command("owner", "3").unwrap();

    std::fs::write(scratch.store_path(), "<maptime><default>").unwrap();
    let change = h.plugin.on_end_map().unwrap();

    assert_eq!(change.minutes, 5.0);
    assert_eq!(read_store(&scratch), Config::default());
}

#[test]
fn test_deleted_store_is_recreated() {
    let scratch = Scratch::new();
    let h = harness(&scratch, GameMode::TimeAttack, LimitUnit::Seconds);

    std::fs::remove_file(scratch.store_path()).unwrap();
    h.plugin.on_shutdown().unwrap();

    assert!(scratch.store_path().exists());
}
