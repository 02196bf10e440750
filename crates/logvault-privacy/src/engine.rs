//! PrivacyEngine: the hasher and the message cipher, owned by one engine
//! instance.

use std::path::Path;

use logvault_core::constants::DECRYPTION_FAILED_PLACEHOLDER;
use logvault_core::errors::LogVaultResult;

use crate::cipher::MessageCipher;
use crate::hashing;
use crate::key_store::KeyStore;

#[derive(Debug, Clone)]
pub struct PrivacyEngine {
    cipher: MessageCipher,
}

impl PrivacyEngine {
    pub fn new(cipher: MessageCipher) -> Self {
        Self { cipher }
    }

    /// Engine keyed from the side file at `key_path`.
    pub fn from_key_file(key_path: &Path) -> LogVaultResult<Self> {
        let key = KeyStore::new(key_path).load_or_create()?;
        Ok(Self::new(MessageCipher::new(&key)))
    }

    /// Engine with a throwaway key.
    pub fn ephemeral() -> Self {
        Self::new(MessageCipher::ephemeral())
    }

    pub fn hash_identifier(&self, raw: &str) -> String {
        hashing::hash_identifier(raw)
    }

    pub fn hash_optional(&self, raw: Option<&str>) -> Option<String> {
        hashing::hash_optional(raw)
    }

    pub fn encrypt(&self, plaintext: &str) -> LogVaultResult<String> {
        self.cipher.encrypt(plaintext)
    }

    pub fn decrypt(&self, ciphertext: &str) -> LogVaultResult<String> {
        self.cipher.decrypt(ciphertext)
    }

    /// Decrypt, or the fixed placeholder when the key does not fit.
    pub fn decrypt_or_placeholder(&self, ciphertext: &str) -> (String, bool) {
        match self.cipher.decrypt(ciphertext) {
            Ok(plaintext) => (plaintext, true),
            Err(e) => {
                tracing::debug!(error = %e, "message decryption failed");
                (DECRYPTION_FAILED_PLACEHOLDER.to_string(), false)
            }
        }
    }
}
