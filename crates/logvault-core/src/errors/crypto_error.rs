/// Errors from the anonymization and encryption path.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("key file {path}: {reason}")]
    KeyFile { path: String, reason: String },

    #[error("invalid key: {reason}")]
    InvalidKey { reason: String },

    #[error("encryption failed")]
    EncryptFailed,

    #[error("decryption failed: {reason}")]
    DecryptFailed { reason: String },
}
