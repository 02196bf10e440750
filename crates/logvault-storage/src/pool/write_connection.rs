//! Single write connection behind a mutex.
//! Every write to a store path goes through it, so writes never interleave
//! on one handle.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use logvault_core::config::defaults::DEFAULT_BUSY_TIMEOUT_MS;
use logvault_core::errors::LogVaultResult;

use super::pragmas::apply_pragmas;
use crate::{from_sqlite, to_storage_err};

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open a new write connection to the given database path.
    pub fn open(path: &Path, busy_timeout_ms: u32) -> LogVaultResult<Self> {
        let conn = Connection::open(path).map_err(from_sqlite)?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> LogVaultResult<Self> {
        let conn = Connection::open_in_memory().map_err(from_sqlite)?;
        apply_pragmas(&conn, DEFAULT_BUSY_TIMEOUT_MS)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the write lock and execute a closure with the connection.
    pub fn with_conn<F, T>(&self, f: F) -> LogVaultResult<T>
    where
        F: FnOnce(&Connection) -> LogVaultResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("write lock poisoned: {e}")))?;
        f(&guard)
    }
}
