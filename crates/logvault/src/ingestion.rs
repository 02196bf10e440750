//! Ingestion: LogEntry → anonymized, optionally encrypted LogRecord → store.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use logvault_core::constants::SENSITIVE_DATA_HASH_KEY;
use logvault_core::errors::LogVaultResult;
use logvault_core::models::{LogLevel, LogRecord};
use logvault_core::traits::{Diagnostic, DiagnosticSink, ILogStorage};
use logvault_observability::tracing_setup::events;
use logvault_privacy::PrivacyEngine;

use crate::entry::LogEntry;

const COMPONENT: &str = "ingestion";

/// Per-level hook run on every accepted record before it is stored.
type LevelHandler = fn(&LogRecord);

/// Level → handler. Each handler mirrors the record's identity (never its
/// message) into `tracing` at a matching verbosity.
const LEVEL_HANDLERS: [(LogLevel, LevelHandler); 5] = [
    (LogLevel::Debug, on_debug),
    (LogLevel::Info, on_info),
    (LogLevel::Warning, on_warning),
    (LogLevel::Error, on_error),
    (LogLevel::Critical, on_critical),
];

fn on_debug(record: &LogRecord) {
    tracing::trace!(log_id = %record.log_id, component = %record.component, "debug record");
}

fn on_info(record: &LogRecord) {
    tracing::trace!(log_id = %record.log_id, component = %record.component, "info record");
}

fn on_warning(record: &LogRecord) {
    tracing::debug!(log_id = %record.log_id, component = %record.component, "warning record");
}

fn on_error(record: &LogRecord) {
    tracing::debug!(log_id = %record.log_id, component = %record.component, "error record");
}

fn on_critical(record: &LogRecord) {
    tracing::info!(log_id = %record.log_id, component = %record.component, "critical record");
}

fn handler_for(level: LogLevel) -> Option<LevelHandler> {
    LEVEL_HANDLERS
        .iter()
        .find(|(l, _)| *l == level)
        .map(|(_, handler)| *handler)
}

/// Base delay between busy retries; attempt `n` waits `n` times this.
const BUSY_BACKOFF: Duration = Duration::from_millis(25);

pub struct Ingestor {
    storage: Arc<dyn ILogStorage>,
    privacy: Arc<PrivacyEngine>,
    diagnostics: Arc<dyn DiagnosticSink>,
    busy_retries: u32,
}

impl Ingestor {
    pub fn new(
        storage: Arc<dyn ILogStorage>,
        privacy: Arc<PrivacyEngine>,
        diagnostics: Arc<dyn DiagnosticSink>,
        busy_retries: u32,
    ) -> Self {
        Self {
            storage,
            privacy,
            diagnostics,
            busy_retries,
        }
    }

    /// Write one entry. Returns the new record's `log_id`, or `None` if the
    /// write failed (the failure goes to the diagnostic sink).
    ///
    /// An unknown level name does not drop the event: an ERROR record saying
    /// `invalid log level: <name>` is written in its place.
    pub fn log(&self, entry: LogEntry) -> Option<String> {
        let result = match entry.level.parse::<LogLevel>() {
            Ok(level) => self.accept(level, &entry),
            Err(_) => {
                self.diagnostics.report(Diagnostic::warning(
                    COMPONENT,
                    "log",
                    format!("invalid log level: {}", entry.level),
                ));
                self.accept_invalid(&entry)
            }
        };

        match result {
            Ok(log_id) => Some(log_id),
            Err(e) => {
                self.diagnostics
                    .report(Diagnostic::error(COMPONENT, "log", e.to_string()));
                None
            }
        }
    }

    fn accept(&self, level: LogLevel, entry: &LogEntry) -> LogVaultResult<String> {
        let mut record = self.anonymized(level, entry, entry.message.clone());
        if entry.encrypt {
            record.message = self.privacy.encrypt(&entry.message)?;
            record.encrypted = true;
        }
        self.store(record)
    }

    /// The original message is not persisted and `encrypt` does not apply.
    fn accept_invalid(&self, entry: &LogEntry) -> LogVaultResult<String> {
        let message = format!("invalid log level: {}", entry.level);
        let record = self.anonymized(LogLevel::Error, entry, message);
        self.store(record)
    }

    fn anonymized(&self, level: LogLevel, entry: &LogEntry, message: String) -> LogRecord {
        let mut record = LogRecord::new(level, entry.component.clone(), message);
        record.user_id_hash = self.privacy.hash_optional(entry.user_id.as_deref());

        if let Some(data) = &entry.additional_data {
            record.metadata = data.clone();
        }
        if let Some(digest) = self.privacy.hash_optional(entry.sensitive_data.as_deref()) {
            record
                .metadata
                .insert(SENSITIVE_DATA_HASH_KEY.to_string(), serde_json::Value::String(digest));
        }
        record
    }

    fn store(&self, record: LogRecord) -> LogVaultResult<String> {
        if let Some(handler) = handler_for(record.level) {
            handler(&record);
        }

        let mut attempt = 0;
        loop {
            match self.storage.insert_log(&record) {
                Ok(_) => break,
                Err(e) if e.is_busy() && attempt < self.busy_retries => {
                    attempt += 1;
                    tracing::debug!(attempt, log_id = %record.log_id, "store busy, retrying insert");
                    thread::sleep(BUSY_BACKOFF * attempt);
                }
                Err(e) => return Err(e),
            }
        }

        events::log_ingested(
            &record.log_id,
            record.level.as_str(),
            &record.component,
            record.encrypted,
        );
        Ok(record.log_id)
    }
}
