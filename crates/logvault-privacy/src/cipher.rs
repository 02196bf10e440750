//! Reversible message encryption.
//!
//! Text form: `lv1:` + base64(nonce ‖ ciphertext‖tag), fresh 96-bit nonce
//! per message.

use std::fmt;

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

use logvault_core::constants::CIPHERTEXT_PREFIX;
use logvault_core::errors::{CryptoError, LogVaultResult};

pub const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

/// AES-256-GCM cipher bound to one key.
#[derive(Clone)]
pub struct MessageCipher {
    cipher: Aes256Gcm,
}

impl MessageCipher {
    pub fn new(key: &[u8; KEY_LEN]) -> Self {
        let key = Key::<Aes256Gcm>::from_slice(key);
        Self {
            cipher: Aes256Gcm::new(key),
        }
    }

    /// Fresh random key from the OS RNG.
    pub fn generate_key() -> [u8; KEY_LEN] {
        let mut key = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        key
    }

    /// Cipher with a throwaway key (in-memory stores, tests).
    pub fn ephemeral() -> Self {
        Self::new(&Self::generate_key())
    }

    pub fn encrypt(&self, plaintext: &str) -> LogVaultResult<String> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);
        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| CryptoError::EncryptFailed)?;

        let mut payload = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        payload.extend_from_slice(&nonce_bytes);
        payload.extend_from_slice(&ciphertext);
        Ok(format!("{CIPHERTEXT_PREFIX}{}", BASE64.encode(payload)))
    }

    pub fn decrypt(&self, text: &str) -> LogVaultResult<String> {
        let encoded = text
            .strip_prefix(CIPHERTEXT_PREFIX)
            .ok_or_else(|| decrypt_err("missing ciphertext marker"))?;
        let payload = BASE64
            .decode(encoded.as_bytes())
            .map_err(|e| decrypt_err(&e.to_string()))?;
        if payload.len() <= NONCE_LEN {
            return Err(decrypt_err("ciphertext too short"));
        }
        let (nonce_bytes, ciphertext) = payload.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| decrypt_err("authentication failed"))?;
        String::from_utf8(plaintext).map_err(|_| decrypt_err("plaintext is not UTF-8"))
    }

    /// Whether `text` carries the ciphertext marker.
    pub fn looks_encrypted(text: &str) -> bool {
        text.starts_with(CIPHERTEXT_PREFIX)
    }
}

impl fmt::Debug for MessageCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageCipher").finish_non_exhaustive()
    }
}

fn decrypt_err(reason: &str) -> logvault_core::LogVaultError {
    CryptoError::DecryptFailed {
        reason: reason.to_string(),
    }
    .into()
}
