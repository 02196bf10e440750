//! AuditLogger: SYSTEM rows for archive moves and archive purges.

use rusqlite::Connection;

use logvault_core::errors::LogVaultResult;
use logvault_core::models::{AccessAuditRecord, AuditAction, AuditActor};

use crate::queries::audit_ops;

pub struct AuditLogger;

impl AuditLogger {
    /// Append one audit row stamped now.
    pub fn log(
        conn: &Connection,
        actor: AuditActor,
        action: AuditAction,
        details: impl Into<String>,
    ) -> LogVaultResult<i64> {
        let record = AccessAuditRecord::new(actor, action, details);
        audit_ops::insert_audit(conn, &record)
    }

    pub fn log_archive(conn: &Connection, count: usize, archive_path: &str) -> LogVaultResult<i64> {
        Self::log(
            conn,
            AuditActor::System,
            AuditAction::Archive,
            format!("Archived {count} logs to {archive_path}"),
        )
    }

    pub fn log_delete(conn: &Connection, archive_file: &str) -> LogVaultResult<i64> {
        Self::log(
            conn,
            AuditActor::System,
            AuditAction::Delete,
            format!("Deleted archive file {archive_file}"),
        )
    }
}
