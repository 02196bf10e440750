//! Filtered, newest-first log retrieval.

use rusqlite::types::ToSql;
use rusqlite::Connection;

use logvault_core::errors::LogVaultResult;
use logvault_core::models::timestamp::format_timestamp;
use logvault_core::models::{LogFilter, LogRecord};

use super::log_crud::{log_from_row, LOG_COLUMNS};
use crate::from_sqlite;

/// Run a filtered query. Each present filter becomes one AND-ed predicate;
/// results are ordered newest first and capped at `filter.limit`.
pub fn query_logs(conn: &Connection, filter: &LogFilter) -> LogVaultResult<Vec<LogRecord>> {
    let mut clauses: Vec<&'static str> = Vec::new();
    let mut dyn_params: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(start) = filter.start {
        clauses.push("timestamp >= ?");
        dyn_params.push(Box::new(format_timestamp(&start)));
    }
    if let Some(end) = filter.end_exclusive {
        clauses.push("timestamp < ?");
        dyn_params.push(Box::new(format_timestamp(&end)));
    }
    if let Some(level) = filter.level {
        clauses.push("level = ?");
        dyn_params.push(Box::new(level.as_str()));
    }
    if let Some(component) = &filter.component {
        clauses.push("component = ?");
        dyn_params.push(Box::new(component.clone()));
    }
    if let Some(hash) = &filter.user_id_hash {
        clauses.push("user_id_hash = ?");
        dyn_params.push(Box::new(hash.clone()));
    }

    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };
    dyn_params.push(Box::new(filter.limit as i64));

    let sql = format!(
        "SELECT {LOG_COLUMNS} FROM logs{where_clause} ORDER BY timestamp DESC, id DESC LIMIT ?"
    );

    let mut stmt = conn.prepare(&sql).map_err(from_sqlite)?;
    let params_refs: Vec<&dyn ToSql> = dyn_params.iter().map(|p| p.as_ref()).collect();
    let rows = stmt
        .query_map(params_refs.as_slice(), log_from_row)
        .map_err(from_sqlite)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(from_sqlite)
}
