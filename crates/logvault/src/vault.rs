//! LogVault: one engine instance wiring privacy, storage, retrieval,
//! export, and the archival lifecycle together.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};

use logvault_core::config::LogVaultConfig;
use logvault_core::constants::VERSION;
use logvault_core::errors::LogVaultResult;
use logvault_core::models::{AccessAuditRecord, AuditAction, LogRecord, QueryParams};
use logvault_core::traits::{Diagnostic, DiagnosticSink, ILogStorage};
use logvault_export::Exporter;
use logvault_lifecycle::{
    ArchivalScheduler, ArchiveOutcome, CleanupReport, LifecycleEngine, StatusSnapshot,
};
use logvault_privacy::PrivacyEngine;
use logvault_retrieval::QueryEngine;
use logvault_storage::StorageEngine;

use crate::entry::LogEntry;
use crate::ingestion::Ingestor;

const COMPONENT: &str = "vault";

pub struct LogVault {
    config: LogVaultConfig,
    storage: Arc<StorageEngine>,
    diagnostics: Arc<dyn DiagnosticSink>,
    ingestor: Ingestor,
    query: Arc<QueryEngine>,
    exporter: Exporter,
    lifecycle: Arc<LifecycleEngine>,
    scheduler: Mutex<Option<ArchivalScheduler>>,
    stopped: AtomicBool,
}

impl LogVault {
    /// Open the file-backed store at `config.storage.db_path`, loading or
    /// creating the encryption key, and start the scheduler if enabled.
    pub fn open(config: LogVaultConfig, diagnostics: Arc<dyn DiagnosticSink>) -> LogVaultResult<Self> {
        let storage = Arc::new(StorageEngine::open(&config.storage)?);
        let privacy = Arc::new(PrivacyEngine::from_key_file(&config.key_path())?);
        Self::assemble(config, storage, privacy, diagnostics)
    }

    /// In-memory store with an ephemeral key. Archives still go to
    /// `config.lifecycle.archive_dir`.
    pub fn open_in_memory(
        config: LogVaultConfig,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> LogVaultResult<Self> {
        let storage = Arc::new(StorageEngine::open_in_memory()?);
        let privacy = Arc::new(PrivacyEngine::ephemeral());
        Self::assemble(config, storage, privacy, diagnostics)
    }

    fn assemble(
        config: LogVaultConfig,
        storage: Arc<StorageEngine>,
        privacy: Arc<PrivacyEngine>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> LogVaultResult<Self> {
        let store: Arc<dyn ILogStorage> = storage.clone();

        let ingestor = Ingestor::new(
            Arc::clone(&store),
            Arc::clone(&privacy),
            Arc::clone(&diagnostics),
            config.storage.busy_retries,
        );
        let query = Arc::new(QueryEngine::new(
            Arc::clone(&store),
            privacy,
            Arc::clone(&diagnostics),
        ));
        let exporter = Exporter::new(
            Arc::clone(&query),
            store,
            config.export.clone(),
            Arc::clone(&diagnostics),
        );
        let lifecycle = Arc::new(LifecycleEngine::new(
            Arc::clone(&storage),
            config.lifecycle.clone(),
            Arc::clone(&diagnostics),
        ));

        let scheduler = if config.lifecycle.scheduler_enabled {
            Some(ArchivalScheduler::start(
                Arc::clone(&lifecycle),
                Duration::from_secs(config.lifecycle.tick_interval_secs),
                config.lifecycle.run_on_start,
            )?)
        } else {
            None
        };

        tracing::info!(
            version = VERSION,
            db_path = ?storage.db_path(),
            archive_dir = %config.lifecycle.archive_dir,
            scheduler = scheduler.is_some(),
            "logvault opened"
        );

        Ok(Self {
            config,
            storage,
            diagnostics,
            ingestor,
            query,
            exporter,
            lifecycle,
            scheduler: Mutex::new(scheduler),
            stopped: AtomicBool::new(false),
        })
    }

    pub fn config(&self) -> &LogVaultConfig {
        &self.config
    }

    /// Write one entry; `log_id` on success, `None` if it could not be stored.
    pub fn log(&self, entry: LogEntry) -> Option<String> {
        self.ingestor.log(entry)
    }

    /// Fresh parameters carrying the configured default limit.
    pub fn query_params(&self) -> QueryParams {
        QueryParams::new().limit(self.config.export.default_limit)
    }

    /// Audited, newest-first query. Empty on failure.
    pub fn query(&self, params: &QueryParams) -> Vec<LogRecord> {
        self.query.query(params)
    }

    /// Run transition 1 now. `None` if it failed (reported to diagnostics).
    pub fn archive_old_logs(&self) -> Option<ArchiveOutcome> {
        self.archive_old_logs_at(Utc::now())
    }

    /// Transition 1 as if the current time were `now`.
    pub fn archive_old_logs_at(&self, now: DateTime<Utc>) -> Option<ArchiveOutcome> {
        self.lifecycle
            .archive_old_logs(now)
            .map_err(|e| self.report("archive_old_logs", e.to_string()))
            .ok()
    }

    /// Run transition 2 now. `None` if it failed (reported to diagnostics).
    pub fn cleanup_archived_logs(&self) -> Option<CleanupReport> {
        self.cleanup_archived_logs_at(Utc::now())
    }

    pub fn cleanup_archived_logs_at(&self, now: DateTime<Utc>) -> Option<CleanupReport> {
        self.lifecycle
            .cleanup_archived_logs(now)
            .map_err(|e| self.report("cleanup_archived_logs", e.to_string()))
            .ok()
    }

    /// Export matching records as `csv` or `json`. See [`Exporter::export`].
    pub fn export_logs_for_analysis(
        &self,
        format: &str,
        output_path: Option<&Path>,
        params: &QueryParams,
    ) -> LogVaultResult<Option<PathBuf>> {
        self.exporter.export(format, output_path, params)
    }

    /// Read-only view of the access audit trail.
    pub fn audit_trail(&self, action: Option<AuditAction>) -> LogVaultResult<Vec<AccessAuditRecord>> {
        self.storage.audit_trail(action)
    }

    pub fn lifecycle_status(&self) -> StatusSnapshot {
        self.lifecycle.status()
    }

    /// Stop and join the scheduler, then checkpoint the WAL. Idempotent.
    pub fn stop(&self) {
        if self.stopped.swap(true, Ordering::SeqCst) {
            return;
        }
        let scheduler = match self.scheduler.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(mut scheduler) = scheduler {
            scheduler.stop();
        }
        if let Err(e) = self.storage.wal_checkpoint() {
            self.report("stop", format!("WAL checkpoint failed: {e}"));
        }
        tracing::info!("logvault stopped");
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    fn report(&self, operation: &'static str, message: String) {
        self.diagnostics
            .report(Diagnostic::error(COMPONENT, operation, message));
    }
}

impl Drop for LogVault {
    fn drop(&mut self) {
        self.stop();
    }
}
