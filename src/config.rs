//! Configuration for the task tracker.
//!
//! Settings live in a `todos-config.yaml` file in the application's base
//! directory. A missing file just means defaults.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name relative to the base directory.
pub const CONFIG_FILE_NAME: &str = "todos-config.yaml";

/// Default data directory when none is configured.
const DEFAULT_DATA_DIR: &str = "data";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding `tasks.csv` and `history.csv`, relative to the
    /// base directory unless absolute.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir() }
    }
}

impl AppConfig {
    /// Load config from a base directory, returning `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(base_dir: &Path) -> Result<Option<Self>> {
        let config_path = base_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(Some(config))
    }

    /// Save config to a base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, base_dir: &Path) -> Result<()> {
        let config_path = base_dir.join(CONFIG_FILE_NAME);
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Resolve the data directory against a base directory.
    #[must_use]
    pub fn resolved_data_dir(&self, base_dir: &Path) -> PathBuf {
        if self.data_dir.is_absolute() {
            self.data_dir.clone()
        } else {
            base_dir.join(&self.data_dir)
        }
    }
}
