use serde::{Deserialize, Serialize};

use super::defaults;

/// Encryption key configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacyConfig {
    /// Explicit key file path. When unset, the key lives next to the store.
    pub key_path: Option<String>,
    /// File name used when `key_path` is unset.
    pub key_filename: String,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            key_path: None,
            key_filename: defaults::DEFAULT_KEY_FILENAME.to_string(),
        }
    }
}
