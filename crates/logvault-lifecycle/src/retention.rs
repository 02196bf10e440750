//! Transition 2: delete archive files whose date is past retention.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;

use logvault_core::config::LifecycleConfig;
use logvault_core::errors::{LifecycleError, LogVaultResult};
use logvault_core::traits::{Diagnostic, DiagnosticSink};
use logvault_observability::tracing_setup::events;
use logvault_storage::archive;
use logvault_storage::StorageEngine;

/// File names seen by one cleanup pass, each list sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub purged: Vec<String>,
    pub retained: Vec<String>,
    /// Archive-looking names whose date did not parse.
    pub skipped: Vec<String>,
}

/// Archives dated strictly before this day are purged. `None` when the
/// retention window reaches past the representable calendar: keep everything.
pub fn retention_threshold(now: DateTime<Utc>, retention_days: u32) -> Option<NaiveDate> {
    now.date_naive().checked_sub_days(Days::new(u64::from(retention_days)))
}

pub fn cleanup_archived_logs(
    storage: &StorageEngine,
    config: &LifecycleConfig,
    diagnostics: &dyn DiagnosticSink,
    now: DateTime<Utc>,
) -> LogVaultResult<CleanupReport> {
    let mut report = CleanupReport::default();
    let archive_dir = Path::new(&config.archive_dir);
    if !archive_dir.is_dir() {
        return Ok(report);
    }
    let threshold = retention_threshold(now, config.retention_days);

    let mut names: Vec<String> = fs::read_dir(archive_dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| archive::is_archive_file_name(name))
        .collect();
    names.sort();

    for name in names {
        match archive::parse_archive_date(&name) {
            None => {
                diagnostics.report(Diagnostic::warning(
                    "lifecycle",
                    "cleanup_archived_logs",
                    format!("skipping archive with unparseable date: {name}"),
                ));
                report.skipped.push(name);
            }
            Some(date) if threshold.is_some_and(|t| date < t) => {
                purge_file(&archive_dir.join(&name))?;
                storage.record_archive_purge(&name)?;
                events::archive_purged(&name);
                report.purged.push(name);
            }
            Some(_) => report.retained.push(name),
        }
    }

    Ok(report)
}

/// Remove an archive file and any sidecars next to it.
fn purge_file(path: &Path) -> LogVaultResult<()> {
    let retention_failed = |e: std::io::Error| LifecycleError::RetentionFailed {
        file: path.display().to_string(),
        reason: e.to_string(),
    };
    fs::remove_file(path).map_err(retention_failed)?;
    for sidecar in archive::sidecar_paths(path) {
        match fs::remove_file(&sidecar) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(retention_failed(e).into()),
        }
    }
    Ok(())
}
