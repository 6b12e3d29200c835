//! `fouru-store`: persistence for registered settings.
//!
//! Backends are opaque string stores; [`SettingsStorage`] owns the one
//! serialized blob that holds every namespace's values.

pub mod backend;
pub mod error;
pub mod storage;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::StoreError;
pub use storage::{Blob, Bucket, SettingsStorage};
