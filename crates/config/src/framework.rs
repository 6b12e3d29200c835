// Framework configuration
// Loaded from ~/.config/fouru/config.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkConfig {
    /// Key of the settings blob in the host store
    pub storage_key: String,

    // Settings tab
    pub tab_id: String,
    pub tab_title: String,
    pub tab_notice: String,

    // Labels
    pub unsaved_warning: String,
    pub reset_all_label: String,
    pub reset_label: String,
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            storage_key: "derpi_four_u".to_string(),
            tab_id: "userscript".to_string(),
            tab_title: "Userscript".to_string(),
            tab_notice: "Settings on this tab are managed by installed userscripts and stored locally."
                .to_string(),
            unsaved_warning: "You have unsaved changes.".to_string(),
            reset_all_label: "Reset all settings".to_string(),
            reset_label: "Default".to_string(),
        }
    }
}

impl FrameworkConfig {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fouru")
            .join("config.toml")
    }

    /// Parse a TOML document. Absent fields keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Read and parse a config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`, falling back to defaults when it is absent or invalid
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match Self::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using default configuration");
                Self::default()
            }
        }
    }
}
