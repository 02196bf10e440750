//! LifecycleEngine: the archive and cleanup transitions bound to one store,
//! plus the tick that runs them together.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use logvault_core::config::LifecycleConfig;
use logvault_core::errors::LogVaultResult;
use logvault_core::traits::{Diagnostic, DiagnosticSink};
use logvault_observability::tracing_setup::events;
use logvault_storage::StorageEngine;

use crate::archival::{self, ArchiveOutcome};
use crate::retention::{self, CleanupReport};
use crate::status::{LifecycleStatus, StatusSnapshot};

/// Result of one successful tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub archived: usize,
    pub cleanup: CleanupReport,
}

pub struct LifecycleEngine {
    storage: Arc<StorageEngine>,
    config: LifecycleConfig,
    diagnostics: Arc<dyn DiagnosticSink>,
    status: LifecycleStatus,
}

impl LifecycleEngine {
    pub fn new(
        storage: Arc<StorageEngine>,
        config: LifecycleConfig,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            storage,
            config,
            diagnostics,
            status: LifecycleStatus::new(),
        }
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    pub fn archive_old_logs(&self, now: DateTime<Utc>) -> LogVaultResult<ArchiveOutcome> {
        archival::archive_old_logs(&self.storage, &self.config, self.diagnostics.as_ref(), now)
    }

    pub fn cleanup_archived_logs(&self, now: DateTime<Utc>) -> LogVaultResult<CleanupReport> {
        retention::cleanup_archived_logs(&self.storage, &self.config, self.diagnostics.as_ref(), now)
    }

    /// Archive, then clean up. A failure abandons the tick, is reported to
    /// the diagnostic sink, and yields `None`. Either way the status counters
    /// are updated.
    pub fn run_tick(&self, now: DateTime<Utc>) -> Option<TickReport> {
        let result = self.archive_old_logs(now).and_then(|outcome| {
            let cleanup = self.cleanup_archived_logs(now)?;
            Ok(TickReport {
                archived: outcome.archived_count(),
                cleanup,
            })
        });

        match result {
            Ok(report) => {
                self.status.record_success(now);
                events::tick_completed(report.archived, report.cleanup.purged.len());
                Some(report)
            }
            Err(e) => {
                let message = e.to_string();
                let streak = self.status.record_failure(now, message.clone());
                events::tick_failed(streak, &message);
                self.diagnostics
                    .report(Diagnostic::error("lifecycle", "tick", message));
                None
            }
        }
    }

    pub fn status(&self) -> StatusSnapshot {
        self.status.snapshot()
    }
}
