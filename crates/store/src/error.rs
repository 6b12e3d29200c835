use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The blob exists but is not a namespace → key → scalar mapping, or a
    /// registered namespace has lost its bucket.
    #[error("settings store is corrupt: {0}")]
    CorruptStore(String),

    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}
