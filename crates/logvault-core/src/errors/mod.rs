mod crypto_error;
mod lifecycle_error;
mod storage_error;

pub use crypto_error::CryptoError;
pub use lifecycle_error::LifecycleError;
pub use storage_error::StorageError;

/// Top-level error for every logvault subsystem.
#[derive(Debug, thiserror::Error)]
pub enum LogVaultError {
    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("crypto error: {0}")]
    CryptoError(#[from] CryptoError),

    #[error("lifecycle error: {0}")]
    LifecycleError(#[from] LifecycleError),

    #[error("unsupported export format: {format}")]
    UnsupportedFormat { format: String },

    #[error("invalid log level: {level}")]
    InvalidLevel { level: String },

    #[error("invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LogVaultError {
    /// True when the failure came from store lock contention.
    pub fn is_busy(&self) -> bool {
        matches!(self, LogVaultError::StorageError(StorageError::Busy { .. }))
    }
}

/// Result alias used across the workspace.
pub type LogVaultResult<T> = Result<T, LogVaultError>;
