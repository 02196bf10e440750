//! Encryption key side file: loaded if present, created otherwise.
//!
//! Losing this file makes every encrypted message unrecoverable.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use logvault_core::errors::{CryptoError, LogVaultResult};

use crate::cipher::{MessageCipher, KEY_LEN};

/// Location of the persisted key.
#[derive(Debug, Clone)]
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the key, generating and persisting one on first use.
    /// A present but malformed file is an error, never overwritten.
    pub fn load_or_create(&self) -> LogVaultResult<[u8; KEY_LEN]> {
        if self.path.exists() {
            return self.load();
        }
        let key = MessageCipher::generate_key();
        self.write_new(&key)?;
        tracing::info!(path = %self.path.display(), "generated new encryption key");
        Ok(key)
    }

    fn load(&self) -> LogVaultResult<[u8; KEY_LEN]> {
        let raw = fs::read_to_string(&self.path).map_err(|e| self.key_file_err(e.to_string()))?;
        let decoded = BASE64
            .decode(raw.trim().as_bytes())
            .map_err(|e| CryptoError::InvalidKey {
                reason: e.to_string(),
            })?;
        let key: [u8; KEY_LEN] = decoded.try_into().map_err(|bytes: Vec<u8>| {
            CryptoError::InvalidKey {
                reason: format!("expected {KEY_LEN} bytes, found {}", bytes.len()),
            }
        })?;
        Ok(key)
    }

    fn write_new(&self, key: &[u8; KEY_LEN]) -> LogVaultResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.key_file_err(e.to_string()))?;
            }
        }

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options
            .open(&self.path)
            .map_err(|e| self.key_file_err(e.to_string()))?;
        file.write_all(BASE64.encode(key).as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| self.key_file_err(e.to_string()))?;
        Ok(())
    }

    fn key_file_err(&self, reason: String) -> CryptoError {
        CryptoError::KeyFile {
            path: self.path.display().to_string(),
            reason,
        }
    }
}
