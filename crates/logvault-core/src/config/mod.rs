//! Configuration for every subsystem, loadable from TOML.
//! Missing sections and fields fall back to `defaults`.

pub mod defaults;
mod export_config;
mod lifecycle_config;
mod observability_config;
mod privacy_config;
mod storage_config;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use export_config::ExportConfig;
pub use lifecycle_config::LifecycleConfig;
pub use observability_config::ObservabilityConfig;
pub use privacy_config::PrivacyConfig;
pub use storage_config::StorageConfig;

use crate::errors::{LogVaultError, LogVaultResult};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogVaultConfig {
    pub storage: StorageConfig,
    pub lifecycle: LifecycleConfig,
    pub privacy: PrivacyConfig,
    pub export: ExportConfig,
    pub observability: ObservabilityConfig,
}

impl LogVaultConfig {
    /// Parse a TOML document. Empty input yields all defaults.
    pub fn from_toml(input: &str) -> LogVaultResult<Self> {
        toml::from_str(input).map_err(|e| LogVaultError::ConfigError {
            reason: e.to_string(),
        })
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> LogVaultResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| LogVaultError::ConfigError {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml(&raw)
    }

    /// Defaults with the store and archive directory placed explicitly.
    pub fn with_paths(db_path: impl AsRef<Path>, archive_dir: impl AsRef<Path>) -> Self {
        let mut config = Self::default();
        config.storage.db_path = db_path.as_ref().to_string_lossy().into_owned();
        config.lifecycle.archive_dir = archive_dir.as_ref().to_string_lossy().into_owned();
        config
    }

    /// Where the encryption key lives: the explicit path, or the configured
    /// file name in the store's directory.
    pub fn key_path(&self) -> PathBuf {
        if let Some(path) = &self.privacy.key_path {
            return PathBuf::from(path);
        }
        let db_path = Path::new(&self.storage.db_path);
        let dir = match db_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        dir.join(&self.privacy.key_filename)
    }
}
