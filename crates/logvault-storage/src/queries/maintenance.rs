//! Checkpoint and integrity check.

use rusqlite::Connection;

use logvault_core::errors::LogVaultResult;

use crate::from_sqlite;

/// Fold the WAL back into the main file and truncate it.
pub fn wal_checkpoint(conn: &Connection) -> LogVaultResult<()> {
    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE)")
        .map_err(from_sqlite)?;
    Ok(())
}

/// Run integrity check. Returns true if the database is OK.
pub fn integrity_check(conn: &Connection) -> LogVaultResult<bool> {
    let result: String = conn
        .query_row("PRAGMA integrity_check", [], |row| row.get(0))
        .map_err(from_sqlite)?;
    Ok(result == "ok")
}
