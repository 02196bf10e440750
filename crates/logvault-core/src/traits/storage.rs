use chrono::{DateTime, Utc};

use crate::errors::LogVaultResult;
use crate::models::{AccessAuditRecord, AuditAction, LogFilter, LogRecord};

/// Log records + append-only audit trail.
///
/// There is intentionally no update or delete here: records and audit rows
/// only leave the active store through the archival lifecycle.
pub trait ILogStorage: Send + Sync {
    // --- Logs ---
    fn insert_log(&self, record: &LogRecord) -> LogVaultResult<i64>;
    fn get_log(&self, log_id: &str) -> LogVaultResult<Option<LogRecord>>;
    fn query_logs(&self, filter: &LogFilter) -> LogVaultResult<Vec<LogRecord>>;
    fn count_logs(&self) -> LogVaultResult<usize>;
    fn count_logs_through(&self, cutoff: DateTime<Utc>) -> LogVaultResult<usize>;

    // --- Audit ---
    fn append_audit(&self, record: &AccessAuditRecord) -> LogVaultResult<i64>;
    fn audit_trail(&self, action: Option<AuditAction>) -> LogVaultResult<Vec<AccessAuditRecord>>;
    fn count_audit(&self, action: Option<AuditAction>) -> LogVaultResult<usize>;
}
