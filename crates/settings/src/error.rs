use fouru_core::SchemaError;
use fouru_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("unknown namespace '{0}'")]
    UnknownNamespace(String),

    #[error("unknown group '{group}' in namespace '{namespace}'")]
    UnknownGroup { namespace: String, group: String },

    #[error("no rendered control for '{key}' in namespace '{namespace}'")]
    UnknownControl { namespace: String, key: String },
}
