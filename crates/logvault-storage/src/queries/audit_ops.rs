//! Append and read the access audit trail.

use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};

use logvault_core::errors::LogVaultResult;
use logvault_core::models::timestamp::{format_timestamp, parse_timestamp};
use logvault_core::models::{AccessAuditRecord, AuditAction, AuditActor};

use crate::from_sqlite;

const AUDIT_COLUMNS: &str = "id, timestamp, actor, action, details";

pub fn insert_audit(conn: &Connection, record: &AccessAuditRecord) -> LogVaultResult<i64> {
    conn.execute(
        "INSERT INTO access_audit (timestamp, actor, action, details) VALUES (?1, ?2, ?3, ?4)",
        params![
            format_timestamp(&record.timestamp),
            record.actor.as_str(),
            record.action.as_str(),
            record.details,
        ],
    )
    .map_err(from_sqlite)?;
    Ok(conn.last_insert_rowid())
}

/// Audit rows in insertion order, optionally narrowed to one action.
pub fn list_audit(
    conn: &Connection,
    action: Option<AuditAction>,
) -> LogVaultResult<Vec<AccessAuditRecord>> {
    let (sql, filter) = match action {
        Some(a) => (
            format!("SELECT {AUDIT_COLUMNS} FROM access_audit WHERE action = ?1 ORDER BY id ASC"),
            Some(a.as_str()),
        ),
        None => (
            format!("SELECT {AUDIT_COLUMNS} FROM access_audit ORDER BY id ASC"),
            None,
        ),
    };

    let mut stmt = conn.prepare(&sql).map_err(from_sqlite)?;
    let rows = match filter {
        Some(a) => stmt.query_map(params![a], audit_from_row),
        None => stmt.query_map([], audit_from_row),
    }
    .map_err(from_sqlite)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(from_sqlite)
}

pub fn count_audit(conn: &Connection, action: Option<AuditAction>) -> LogVaultResult<usize> {
    let count: i64 = match action {
        Some(a) => conn.query_row(
            "SELECT COUNT(*) FROM access_audit WHERE action = ?1",
            params![a.as_str()],
            |row| row.get(0),
        ),
        None => conn.query_row("SELECT COUNT(*) FROM access_audit", [], |row| row.get(0)),
    }
    .map_err(from_sqlite)?;
    Ok(count as usize)
}

fn audit_from_row(row: &Row<'_>) -> rusqlite::Result<AccessAuditRecord> {
    let ts: String = row.get(1)?;
    let timestamp = parse_timestamp(&ts).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e))
    })?;
    let actor_str: String = row.get(2)?;
    let actor: AuditActor = actor_str.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(2, Type::Text, e.into())
    })?;
    let action_str: String = row.get(3)?;
    let action: AuditAction = action_str.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(3, Type::Text, e.into())
    })?;

    Ok(AccessAuditRecord {
        id: Some(row.get(0)?),
        timestamp,
        actor,
        action,
        details: row.get(4)?,
    })
}
