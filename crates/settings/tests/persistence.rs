mod common;

use common::{headless, RecordingHost, SharedStore};
use fouru_settings::{EntrySpec, FileStore, FrameworkConfig, KeyValueStore, SettingsManager, Value};
use tempfile::TempDir;

fn limit() -> EntrySpec {
    EntrySpec::new()
        .title("Limit")
        .key("limit")
        .entry_type("number")
        .default_value(10)
}

// -------------------------------------------------------------------------
// Headless
// -------------------------------------------------------------------------

#[test]
fn headless_manager_reads_and_writes_store() {
    let store = SharedStore::default();
    let manager = headless(&store);
    assert!(manager.is_headless());

    let ns = manager.register_namespace("My Script", "myscript", None).unwrap();
    assert!(ns.register_entry(limit()));
    assert_eq!(ns.get_entry("limit").unwrap(), Some(Value::Number(10.0)));

    ns.set_entry("limit", 42).unwrap();
    ns.set_entry("note", "free-form").unwrap();
    assert_eq!(ns.get_entry("limit").unwrap(), Some(Value::Number(42.0)));
    assert_eq!(ns.get_entry("note").unwrap(), Some(Value::from("free-form")));

    assert_eq!(ns.delete_entry("note").unwrap(), Some(Value::from("free-form")));
    assert_eq!(ns.delete_entry("note").unwrap(), None);
    assert_eq!(ns.get_entry("note").unwrap(), None);
}

#[test]
fn headless_manager_has_no_controls() {
    let store = SharedStore::default();
    let manager = headless(&store);
    let ns = manager.register_namespace("My Script", "myscript", None).unwrap();
    ns.register_entry(limit());

    assert_eq!(manager.with_tab(|tab| tab.control_count()), None);
    assert_eq!(manager.control_value("myscript", "limit"), None);
    assert_eq!(manager.save().unwrap(), 0);
    assert!(!manager.is_dirty());
    assert!(manager.control_changed("myscript", "limit", &Value::Number(1.0)).is_err());
}

#[test]
fn headless_still_validates_schema() {
    let store = SharedStore::default();
    let manager = headless(&store);
    let ns = manager.register_namespace("My Script", "myscript", None).unwrap();

    assert!(!ns.register_entry(limit().key("bad key")));
    assert!(!ns.register_entry(
        EntrySpec::new()
            .title("Mode")
            .key("mode")
            .entry_type("dropdown")
            .selection("a", "A")
            .default_value("z"),
    ));
    assert!(store.blob()["myscript"].is_empty());
}

#[test]
fn page_without_settings_table_runs_headless() {
    let store = SharedStore::default();
    let (mut host, log) = RecordingHost::new();
    host.settings_table = false;

    let manager =
        SettingsManager::new(FrameworkConfig::default(), Box::new(store.clone()), Some(Box::new(host))).unwrap();
    assert!(manager.is_headless());
    assert!(log.borrow().headers.is_empty());
    assert!(!log.borrow().commit_bound);
}

#[test]
fn initialize_writes_empty_blob_only_when_missing() {
    let store = SharedStore::default();
    let _manager = headless(&store);
    assert_eq!(store.raw().as_deref(), Some("{}"));

    let store = SharedStore::with_blob(r#"{"a":{}}"#);
    let _manager = headless(&store);
    assert_eq!(store.raw().as_deref(), Some(r#"{"a":{}}"#));
}

#[test]
fn custom_storage_key_is_honored() {
    let store = SharedStore::default();
    let config = FrameworkConfig {
        storage_key: "my_suite".to_string(),
        ..FrameworkConfig::default()
    };
    let manager = SettingsManager::headless(config, Box::new(store.clone())).unwrap();
    manager.register_namespace("My Script", "myscript", None).unwrap();

    assert_eq!(store.raw(), None);
    let raw = store.0.borrow().get_item("my_suite").unwrap();
    assert_eq!(raw.as_deref(), Some(r#"{"myscript":{}}"#));
}

// -------------------------------------------------------------------------
// File-backed sessions
// -------------------------------------------------------------------------

#[test]
fn saved_values_survive_a_new_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("local_storage.json");

    {
        let (host, _log) = RecordingHost::new();
        let manager = SettingsManager::new(
            FrameworkConfig::default(),
            Box::new(FileStore::new(&path)),
            Some(Box::new(host)),
        )
        .unwrap();
        let ns = manager.register_namespace("My Script", "myscript", None).unwrap();
        ns.register_entry(limit());
        manager.control_changed("myscript", "limit", &Value::Number(7.0)).unwrap();
        manager.save().unwrap();
    }

    let (host, _log) = RecordingHost::new();
    let manager = SettingsManager::new(
        FrameworkConfig::default(),
        Box::new(FileStore::new(&path)),
        Some(Box::new(host)),
    )
    .unwrap();
    let ns = manager.register_namespace("My Script", "myscript", None).unwrap();
    ns.register_entry(limit());

    assert_eq!(manager.control_value("myscript", "limit"), Some(Value::Number(7.0)));
    assert!(!manager.is_dirty());
}

#[test]
fn unsaved_edits_are_lost_with_the_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("local_storage.json");

    {
        let (host, _log) = RecordingHost::new();
        let manager =
            SettingsManager::new(FrameworkConfig::default(), Box::new(FileStore::new(&path)), Some(Box::new(host)))
                .unwrap();
        let ns = manager.register_namespace("My Script", "myscript", None).unwrap();
        ns.register_entry(limit());
        manager.control_changed("myscript", "limit", &Value::Number(7.0)).unwrap();
    }

    let manager = SettingsManager::headless(FrameworkConfig::default(), Box::new(FileStore::new(&path))).unwrap();
    let ns = manager.register_namespace("My Script", "myscript", None).unwrap();
    assert_eq!(ns.get_entry("limit").unwrap(), Some(Value::Number(10.0)));
}
