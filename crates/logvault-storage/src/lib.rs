//! # logvault-storage
//!
//! SQLite persistence layer: one write connection, a read pool, versioned
//! migrations, the append-only access audit trail, and the archive-store
//! file operations used by the lifecycle.

pub mod archive;
pub mod audit;
pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use logvault_core::errors::{LogVaultError, StorageError};
use rusqlite::ErrorCode;

/// Wrap a message as a storage error.
pub fn to_storage_err(message: String) -> LogVaultError {
    LogVaultError::StorageError(StorageError::SqliteError { message })
}

/// Convert a rusqlite error, keeping lock contention distinguishable.
pub fn from_sqlite(e: rusqlite::Error) -> LogVaultError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &e {
        if matches!(failure.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) {
            return LogVaultError::StorageError(StorageError::Busy {
                message: e.to_string(),
            });
        }
    }
    to_storage_err(e.to_string())
}
