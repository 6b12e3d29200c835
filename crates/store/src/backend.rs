//! Opaque string key-value backends
//!
//! The settings blob is one string under one key; backends know nothing
//! about its contents. `MemoryStore` stands in for the host store in tests
//! and headless embeddings, `FileStore` persists items to a JSON file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// A string-keyed, string-valued persistent store.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StoreError>;
}

// ============================================================================
// In-memory backend
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate an item, as if written by an earlier session.
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }
}

// ============================================================================
// File backend
// ============================================================================

/// Items persisted as one JSON object at `path`.
///
/// Every read goes to disk, so writes made by another process are picked up
/// on the next read. Concurrent writers are not coordinated: last write wins.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<data dir>/fouru/local_storage.json`
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fouru")
            .join("local_storage.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&contents).map_err(|e| {
            StoreError::CorruptStore(format!("{}: {e}", self.path.display()))
        })
    }

    /// Write to a temp file, then rename over the original.
    fn persist(&self, items: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(items)?;
        fs::write(&temp, json)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.persist(&items)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.persist(&items)?;
        }
        Ok(())
    }
}
