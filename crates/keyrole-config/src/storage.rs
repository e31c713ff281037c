use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_data_dir() -> String {
    ".keyrole".to_string()
}

fn default_key() -> String {
    "keyrole-vocab-stats".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one `<key>.json` file per slot
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Slot name for learned/favorite progress
    #[serde(default = "default_key")]
    pub key: String,
    /// Keep progress in memory only
    #[serde(default)]
    pub ephemeral: bool,
}

impl StorageConfig {
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            key: default_key(),
            ephemeral: false,
        }
    }
}
