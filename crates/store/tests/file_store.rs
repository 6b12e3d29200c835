//! FileStore behind the settings blob adapter, against a real directory.

use std::fs;

use fouru_core::Value;
use fouru_store::{FileStore, KeyValueStore, SettingsStorage, StoreError};
use tempfile::TempDir;

const KEY: &str = "derpi_four_u";

fn storage_at(dir: &TempDir) -> SettingsStorage {
    SettingsStorage::new(Box::new(FileStore::new(dir.path().join("store.json"))), KEY)
}

#[test]
fn test_blob_round_trips_through_disk() {
    let dir = TempDir::new().unwrap();

    let mut storage = storage_at(&dir);
    storage.initialize().unwrap();
    storage.ensure_namespace("myscript").unwrap();
    storage.set_value("myscript", "enableX", Value::Bool(true)).unwrap();
    storage.set_value("myscript", "label", Value::from("hi")).unwrap();

    // A second adapter over the same file sees the writes
    let reopened = storage_at(&dir);
    assert_eq!(reopened.get_value("myscript", "enableX").unwrap(), Some(Value::Bool(true)));
    assert_eq!(reopened.get_value("myscript", "label").unwrap(), Some(Value::from("hi")));
}

#[test]
fn test_file_holds_blob_as_string_item() {
    let dir = TempDir::new().unwrap();
    let mut storage = storage_at(&dir);
    storage.initialize().unwrap();
    storage.ensure_namespace("a").unwrap();

    let contents = fs::read_to_string(dir.path().join("store.json")).unwrap();
    let items: std::collections::HashMap<String, String> = serde_json::from_str(&contents).unwrap();
    assert_eq!(items[KEY], r#"{"a":{}}"#);
}

#[test]
fn test_parent_directories_are_created() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("store.json");
    let mut store = FileStore::new(&path);

    store.set_item("k", "v").unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn test_unreadable_file_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    fs::write(&path, "not json at all").unwrap();

    let store = FileStore::new(&path);
    assert!(matches!(store.get_item(KEY), Err(StoreError::CorruptStore(_))));

    let storage = SettingsStorage::new(Box::new(store), KEY);
    assert!(matches!(storage.read_all(), Err(StoreError::CorruptStore(_))));
}

#[test]
fn test_nan_survives_as_null() {
    let dir = TempDir::new().unwrap();
    let mut storage = storage_at(&dir);
    storage.initialize().unwrap();
    storage.ensure_namespace("ns").unwrap();
    storage.set_value("ns", "n", Value::Number(f64::NAN)).unwrap();

    let value = storage.get_value("ns", "n").unwrap().unwrap();
    assert!(value.as_f64().unwrap().is_nan());
}
