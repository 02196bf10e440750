//! File operations on archive stores. None of these touch the active store's
//! rows; the caller deletes archived rows once the archive file is final.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, DatabaseName};

use logvault_core::errors::LogVaultResult;
use logvault_core::models::timestamp::format_timestamp;
use logvault_core::models::LogRecord;

use crate::queries::log_crud;
use crate::{from_sqlite, to_storage_err};

/// What survived pruning a staging copy down to the cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrunedArchive {
    pub kept: usize,
    /// Highest active-store row id copied. `None` when nothing was kept.
    pub max_id: Option<i64>,
}

/// Online backup of `conn`'s main database into `dest`, replacing any
/// leftover file from an interrupted run.
pub fn snapshot(conn: &Connection, dest: &Path) -> LogVaultResult<()> {
    if dest.exists() {
        fs::remove_file(dest)?;
    }
    conn.backup(DatabaseName::Main, dest, None)
        .map_err(from_sqlite)?;
    Ok(())
}

/// Reduce a staging copy to rows with `timestamp <= cutoff`, drop the
/// copied audit and marker rows, and leave it as a single rollback-journal
/// file.
pub fn prune_to_cutoff(path: &Path, cutoff: DateTime<Utc>) -> LogVaultResult<PrunedArchive> {
    let conn = Connection::open(path).map_err(from_sqlite)?;
    conn.execute(
        "DELETE FROM logs WHERE timestamp > ?1",
        params![format_timestamp(&cutoff)],
    )
    .map_err(from_sqlite)?;
    conn.execute_batch(
        "
        DELETE FROM access_audit;
        DELETE FROM archive_runs;
        PRAGMA journal_mode = DELETE;
        ",
    )
    .map_err(from_sqlite)?;

    let kept = log_crud::count_logs(&conn)?;
    let max_id = log_crud::max_log_id(&conn)?;
    conn.close()
        .map_err(|(_, e)| to_storage_err(format!("close staging archive: {e}")))?;
    Ok(PrunedArchive { kept, max_id })
}

/// Copy every log row of `staging` into the existing archive at `target`
/// (rows already present by id are skipped), then remove `staging`.
/// Returns the number of rows newly added.
pub fn merge_into(staging: &Path, target: &Path) -> LogVaultResult<usize> {
    let conn = Connection::open(target).map_err(from_sqlite)?;
    let staging_str = staging
        .to_str()
        .ok_or_else(|| to_storage_err(format!("non UTF-8 path: {}", staging.display())))?;
    conn.execute("ATTACH DATABASE ?1 AS staging", params![staging_str])
        .map_err(from_sqlite)?;
    let added = conn
        .execute(
            &format!(
                "INSERT OR IGNORE INTO main.logs ({cols}) SELECT {cols} FROM staging.logs",
                cols = log_crud::LOG_COLUMNS
            ),
            [],
        )
        .map_err(from_sqlite)?;
    conn.execute_batch("DETACH DATABASE staging")
        .map_err(from_sqlite)?;
    conn.close()
        .map_err(|(_, e)| to_storage_err(format!("close archive: {e}")))?;
    fs::remove_file(staging)?;
    Ok(added)
}

/// Every record held by an archive file, oldest first.
pub fn archived_logs(path: &Path) -> LogVaultResult<Vec<LogRecord>> {
    let conn = Connection::open(path).map_err(from_sqlite)?;
    log_crud::all_logs(&conn)
}
