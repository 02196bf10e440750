//! Insert, get, count, and lifecycle delete for log rows.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use logvault_core::errors::LogVaultResult;
use logvault_core::models::timestamp::{format_timestamp, parse_timestamp};
use logvault_core::models::{LogLevel, LogRecord, Metadata};

use crate::from_sqlite;

/// The base SELECT columns for log queries (9 columns, indices 0-8).
pub const LOG_COLUMNS: &str =
    "id, log_id, timestamp, level, component, user_id_hash, message, encrypted, metadata";

/// Insert one record in its own transaction. Returns the row id.
pub fn insert_log(conn: &Connection, record: &LogRecord) -> LogVaultResult<i64> {
    let metadata_json = if record.metadata.is_empty() {
        None
    } else {
        Some(serde_json::to_string(&record.metadata)?)
    };

    let tx = conn
        .unchecked_transaction()
        .map_err(from_sqlite)?;
    tx.execute(
        "INSERT INTO logs (
            log_id, timestamp, level, component, user_id_hash, message, encrypted, metadata
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            record.log_id,
            format_timestamp(&record.timestamp),
            record.level.as_str(),
            record.component,
            record.user_id_hash,
            record.message,
            record.encrypted,
            metadata_json,
        ],
    )
    .map_err(from_sqlite)?;
    let row_id = tx.last_insert_rowid();
    tx.commit().map_err(from_sqlite)?;
    Ok(row_id)
}

/// Fetch one record by its `log_id`.
pub fn get_log(conn: &Connection, log_id: &str) -> LogVaultResult<Option<LogRecord>> {
    conn.query_row(
        &format!("SELECT {LOG_COLUMNS} FROM logs WHERE log_id = ?1"),
        params![log_id],
        log_from_row,
    )
    .optional()
    .map_err(from_sqlite)
}

/// Every record in the table, oldest first.
pub fn all_logs(conn: &Connection) -> LogVaultResult<Vec<LogRecord>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {LOG_COLUMNS} FROM logs ORDER BY timestamp ASC, id ASC"))
        .map_err(from_sqlite)?;
    let rows = stmt.query_map([], log_from_row).map_err(from_sqlite)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(from_sqlite)
}

pub fn count_logs(conn: &Connection) -> LogVaultResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM logs", [], |row| row.get(0))
        .map_err(from_sqlite)?;
    Ok(count as usize)
}

/// Count records with `timestamp <= cutoff`.
pub fn count_logs_through(conn: &Connection, cutoff: DateTime<Utc>) -> LogVaultResult<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM logs WHERE timestamp <= ?1",
            params![format_timestamp(&cutoff)],
            |row| row.get(0),
        )
        .map_err(from_sqlite)?;
    Ok(count as usize)
}

/// Remove archived rows: `timestamp <= cutoff` and `id <= max_id`.
/// Rows written after the archive snapshot keep their higher ids and stay.
pub fn delete_logs_through(
    conn: &Connection,
    cutoff: DateTime<Utc>,
    max_id: i64,
) -> LogVaultResult<usize> {
    let deleted = conn
        .execute(
            "DELETE FROM logs WHERE timestamp <= ?1 AND id <= ?2",
            params![format_timestamp(&cutoff), max_id],
        )
        .map_err(from_sqlite)?;
    Ok(deleted)
}

/// Parse one row selected with `LOG_COLUMNS`.
pub fn log_from_row(row: &Row<'_>) -> rusqlite::Result<LogRecord> {
    let timestamp_str: String = row.get(2)?;
    let timestamp = parse_timestamp(&timestamp_str).map_err(|e| conversion_err(2, e))?;

    let level_str: String = row.get(3)?;
    let level: LogLevel = level_str.parse().map_err(|e| conversion_err(3, e))?;

    let metadata: Metadata = match row.get::<_, Option<String>>(8)? {
        Some(raw) if !raw.is_empty() => {
            serde_json::from_str(&raw).map_err(|e| conversion_err(8, e))?
        }
        _ => Metadata::new(),
    };

    Ok(LogRecord {
        id: Some(row.get(0)?),
        log_id: row.get(1)?,
        timestamp,
        level,
        component: row.get(4)?,
        user_id_hash: row.get(5)?,
        message: row.get(6)?,
        encrypted: row.get(7)?,
        metadata,
    })
}

fn conversion_err<E>(column: usize, e: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e))
}

/// Largest row id present, if any.
pub fn max_log_id(conn: &Connection) -> LogVaultResult<Option<i64>> {
    conn.query_row("SELECT MAX(id) FROM logs", [], |row| row.get(0))
        .map_err(from_sqlite)
}
