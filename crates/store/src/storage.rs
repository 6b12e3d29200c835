//! Settings blob adapter
//!
//! All settings live in a single serialized mapping
//! `namespace → key → scalar` stored under one fixed key of the backend.
//! Every accessor is a whole-blob read-modify-write; there is no partial-key
//! granularity at the storage boundary.

use std::collections::BTreeMap;

use fouru_core::Value;

use crate::backend::KeyValueStore;
use crate::error::StoreError;

/// Stored values of one namespace.
pub type Bucket = BTreeMap<String, Value>;

/// The whole settings blob.
pub type Blob = BTreeMap<String, Bucket>;

/// Reads and writes the settings blob through an opaque backend.
pub struct SettingsStorage {
    backend: Box<dyn KeyValueStore>,
    storage_key: String,
}

impl SettingsStorage {
    pub fn new(backend: Box<dyn KeyValueStore>, storage_key: impl Into<String>) -> Self {
        Self {
            backend,
            storage_key: storage_key.into(),
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Write an empty blob if none exists. Idempotent.
    pub fn initialize(&mut self) -> Result<(), StoreError> {
        let existing = self.backend.get_item(&self.storage_key)?;
        if existing.as_deref().map_or(true, str::is_empty) {
            log::debug!("Initializing settings blob under '{}'", self.storage_key);
            self.write_all(&Blob::new())?;
        }
        Ok(())
    }

    /// Parse the whole blob. A missing blob reads as empty.
    pub fn read_all(&self) -> Result<Blob, StoreError> {
        match self.backend.get_item(&self.storage_key)? {
            None => Ok(Blob::new()),
            Some(raw) if raw.is_empty() => Ok(Blob::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                StoreError::CorruptStore(format!("blob under '{}': {e}", self.storage_key))
            }),
        }
    }

    /// Serialize and overwrite the whole blob.
    pub fn write_all(&mut self, blob: &Blob) -> Result<(), StoreError> {
        let raw = serde_json::to_string(blob)?;
        self.backend.set_item(&self.storage_key, &raw)
    }

    /// Make sure `namespace` has a bucket. Returns true if one was created.
    pub fn ensure_namespace(&mut self, namespace: &str) -> Result<bool, StoreError> {
        let mut blob = self.read_all()?;
        if blob.contains_key(namespace) {
            return Ok(false);
        }
        blob.insert(namespace.to_string(), Bucket::new());
        self.write_all(&blob)?;
        Ok(true)
    }

    pub fn get_value(&self, namespace: &str, key: &str) -> Result<Option<Value>, StoreError> {
        let mut blob = self.read_all()?;
        let bucket = take_bucket(&mut blob, namespace)?;
        Ok(bucket.get(key).cloned())
    }

    pub fn set_value(&mut self, namespace: &str, key: &str, value: Value) -> Result<(), StoreError> {
        let mut blob = self.read_all()?;
        bucket_mut(&mut blob, namespace)?.insert(key.to_string(), value);
        self.write_all(&blob)
    }

    /// Remove a stored value. Returns the value that was removed, if any.
    pub fn delete_value(&mut self, namespace: &str, key: &str) -> Result<Option<Value>, StoreError> {
        let mut blob = self.read_all()?;
        let removed = bucket_mut(&mut blob, namespace)?.remove(key);
        if removed.is_some() {
            self.write_all(&blob)?;
        }
        Ok(removed)
    }
}

/// Look up a registered namespace's bucket; its absence means tampering.
pub fn bucket_mut<'a>(blob: &'a mut Blob, namespace: &str) -> Result<&'a mut Bucket, StoreError> {
    blob.get_mut(namespace)
        .ok_or_else(|| StoreError::CorruptStore(format!("missing bucket for namespace '{namespace}'")))
}

fn take_bucket(blob: &mut Blob, namespace: &str) -> Result<Bucket, StoreError> {
    blob.remove(namespace)
        .ok_or_else(|| StoreError::CorruptStore(format!("missing bucket for namespace '{namespace}'")))
}
