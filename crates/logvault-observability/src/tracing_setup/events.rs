//! Structured log events for key engine operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// A record was written to the active store.
pub fn log_ingested(log_id: &str, level: &str, component: &str, encrypted: bool) {
    tracing::debug!(
        event = "log_ingested",
        log_id = %log_id,
        level = %level,
        component = %component,
        encrypted = encrypted,
        "log ingested"
    );
}

/// A query ran against the active store.
pub fn query_executed(filters: &str, returned: usize) {
    tracing::debug!(
        event = "query_executed",
        filters = %filters,
        returned = returned,
        "query executed"
    );
}

/// Aged records moved into an archive store.
pub fn archive_completed(count: usize, archive_path: &str) {
    tracing::info!(
        event = "archive_completed",
        count = count,
        archive_path = %archive_path,
        "archived aged logs"
    );
}

/// An archive store passed retention and was deleted.
pub fn archive_purged(file_name: &str) {
    tracing::info!(
        event = "archive_purged",
        file_name = %file_name,
        "purged archive past retention"
    );
}

/// A scheduler tick finished.
pub fn tick_completed(archived: usize, purged: usize) {
    tracing::info!(
        event = "tick_completed",
        archived = archived,
        purged = purged,
        "lifecycle tick completed"
    );
}

/// A scheduler tick was abandoned.
pub fn tick_failed(consecutive_failures: u64, error: &str) {
    tracing::warn!(
        event = "tick_failed",
        consecutive_failures = consecutive_failures,
        error = %error,
        "lifecycle tick failed"
    );
}

/// An export file was written.
pub fn export_written(format: &str, rows: usize, path: &str) {
    tracing::info!(
        event = "export_written",
        format = %format,
        rows = rows,
        path = %path,
        "export written"
    );
}
