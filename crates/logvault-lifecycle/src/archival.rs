//! Transition 1: move records older than the archive window into
//! `logs_archive_<YYYYMMDD>.db`.
//!
//! The move has two phases tracked by an `archive_runs` marker:
//! the archive file is made final first (staging copy, prune, rename or
//! merge), and only then are the archived rows deleted from the active store.
//! A crash between phases leaves the rows in both places, never in neither.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Days, Utc};

use logvault_core::config::LifecycleConfig;
use logvault_core::errors::{LifecycleError, LogVaultError, LogVaultResult};
use logvault_core::models::ArchiveRunStatus;
use logvault_core::traits::{Diagnostic, DiagnosticSink, ILogStorage};
use logvault_observability::tracing_setup::events;
use logvault_storage::archive;
use logvault_storage::StorageEngine;

const COMPONENT: &str = "lifecycle";
const OPERATION: &str = "archive_old_logs";

/// What one archive pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// No active record was old enough. Nothing was written.
    NothingToArchive,
    Archived { count: usize, path: PathBuf },
}

impl ArchiveOutcome {
    pub fn archived_count(&self) -> usize {
        match self {
            ArchiveOutcome::NothingToArchive => 0,
            ArchiveOutcome::Archived { count, .. } => *count,
        }
    }
}

/// Newest timestamp that is old enough to archive at `now`. `None` when the
/// window reaches past the representable calendar, so nothing qualifies.
pub fn archive_cutoff(now: DateTime<Utc>, archive_after_days: u32) -> Option<DateTime<Utc>> {
    now.checked_sub_days(Days::new(u64::from(archive_after_days)))
}

pub fn archive_old_logs(
    storage: &StorageEngine,
    config: &LifecycleConfig,
    diagnostics: &dyn DiagnosticSink,
    now: DateTime<Utc>,
) -> LogVaultResult<ArchiveOutcome> {
    let Some(cutoff) = archive_cutoff(now, config.archive_after_days) else {
        return Ok(ArchiveOutcome::NothingToArchive);
    };
    let pending = storage.count_logs_through(cutoff)?;
    if pending == 0 {
        return Ok(ArchiveOutcome::NothingToArchive);
    }

    for run in storage.unfinished_archive_runs()? {
        diagnostics.report(Diagnostic::warning(
            COMPONENT,
            OPERATION,
            format!(
                "archive run {} into {} stopped at '{}' ({} records, cutoff {})",
                run.id,
                run.archive_file,
                run.status.as_str(),
                run.record_count,
                run.cutoff
            ),
        ));
    }

    let archive_dir = Path::new(&config.archive_dir);
    fs::create_dir_all(archive_dir).map_err(|e| step_failed("create_dir", e))?;
    let target = archive::archive_path(archive_dir, now.date_naive());
    let target_str = target.display().to_string();
    let staging = archive::staging_path(&target);

    let run_id = storage.begin_archive_run(&target_str, cutoff, pending)?;

    // Phase 1: make the archive file final.
    storage
        .snapshot_to(&staging)
        .map_err(|e| step_failed("snapshot", e))?;
    let pruned =
        archive::prune_to_cutoff(&staging, cutoff).map_err(|e| step_failed("prune", e))?;

    let Some(max_id) = pruned.max_id else {
        fs::remove_file(&staging).map_err(|e| step_failed("discard_staging", e))?;
        storage.update_archive_run(run_id, ArchiveRunStatus::Completed, 0)?;
        return Ok(ArchiveOutcome::NothingToArchive);
    };

    if target.exists() {
        archive::merge_into(&staging, &target).map_err(|e| step_failed("merge", e))?;
    } else {
        fs::rename(&staging, &target).map_err(|e| step_failed("rename", e))?;
    }
    storage.update_archive_run(run_id, ArchiveRunStatus::Copied, pruned.kept)?;

    // Phase 2: drop the archived rows from the active store.
    let deleted = storage
        .complete_archive_run(run_id, cutoff, max_id, pruned.kept, &target_str)
        .map_err(|e| step_failed("delete_active", e))?;
    if deleted != pruned.kept {
        diagnostics.report(Diagnostic::warning(
            COMPONENT,
            OPERATION,
            format!("archived {} records but removed {deleted} from the active store", pruned.kept),
        ));
    }

    events::archive_completed(pruned.kept, &target_str);
    Ok(ArchiveOutcome::Archived {
        count: pruned.kept,
        path: target,
    })
}

fn step_failed(step: &str, err: impl Into<LogVaultError>) -> LogVaultError {
    let err: LogVaultError = err.into();
    LifecycleError::ArchiveFailed {
        step: step.to_string(),
        reason: err.to_string(),
    }
    .into()
}
