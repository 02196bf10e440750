//! Idempotency markers for the two-phase archive move.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};

use logvault_core::errors::LogVaultResult;
use logvault_core::models::timestamp::{format_timestamp, parse_timestamp};
use logvault_core::models::{ArchiveRun, ArchiveRunStatus};

use crate::from_sqlite;

/// Write a `started` marker. Returns its id.
pub fn begin_run(
    conn: &Connection,
    archive_file: &str,
    cutoff: DateTime<Utc>,
    record_count: usize,
) -> LogVaultResult<i64> {
    let now = format_timestamp(&Utc::now());
    conn.execute(
        "INSERT INTO archive_runs (archive_file, cutoff, record_count, status, started_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
        params![
            archive_file,
            format_timestamp(&cutoff),
            record_count as i64,
            ArchiveRunStatus::Started.as_str(),
            now,
        ],
    )
    .map_err(from_sqlite)?;
    Ok(conn.last_insert_rowid())
}

/// Move a marker forward and record how many rows it covers.
pub fn update_run(
    conn: &Connection,
    run_id: i64,
    status: ArchiveRunStatus,
    record_count: usize,
) -> LogVaultResult<()> {
    conn.execute(
        "UPDATE archive_runs SET status = ?1, record_count = ?2, updated_at = ?3 WHERE id = ?4",
        params![
            status.as_str(),
            record_count as i64,
            format_timestamp(&Utc::now()),
            run_id,
        ],
    )
    .map_err(from_sqlite)?;
    Ok(())
}

/// Markers left behind by an interrupted move.
pub fn unfinished_runs(conn: &Connection) -> LogVaultResult<Vec<ArchiveRun>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, archive_file, cutoff, record_count, status, started_at, updated_at
             FROM archive_runs WHERE status != ?1 ORDER BY id ASC",
        )
        .map_err(from_sqlite)?;
    let rows = stmt
        .query_map(params![ArchiveRunStatus::Completed.as_str()], run_from_row)
        .map_err(from_sqlite)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(from_sqlite)
}

fn run_from_row(row: &Row<'_>) -> rusqlite::Result<ArchiveRun> {
    let time_at = |idx: usize| -> rusqlite::Result<DateTime<Utc>> {
        let raw: String = row.get(idx)?;
        parse_timestamp(&raw)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    };
    let status_str: String = row.get(4)?;
    let status: ArchiveRunStatus = status_str
        .parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, e.into()))?;
    let record_count: i64 = row.get(3)?;

    Ok(ArchiveRun {
        id: row.get(0)?,
        archive_file: row.get(1)?,
        cutoff: time_at(2)?,
        record_count: record_count.max(0) as usize,
        status,
        started_at: time_at(5)?,
        updated_at: time_at(6)?,
    })
}
