//! # logvault
//!
//! Compliant structured logging. Records are written to a SQLite store with
//! user ids and sensitive values replaced by SHA-256 digests and, on
//! request, message bodies encrypted. Every read and export is audited.
//! A background scheduler moves aged records into dated archive stores and
//! deletes archives past retention.
//!
//! ```no_run
//! use std::sync::Arc;
//! use logvault::{LogEntry, LogVault, LogVaultConfig, QueryParams, TracingDiagnostics};
//!
//! let vault = LogVault::open(LogVaultConfig::default(), Arc::new(TracingDiagnostics))?;
//! vault.log(LogEntry::new("INFO", "user signed in").user_id("u-42").component("auth"));
//! let recent = vault.query(&QueryParams::new().component("auth"));
//! vault.stop();
//! # Ok::<(), logvault::LogVaultError>(())
//! ```

pub mod entry;
pub mod ingestion;
pub mod vault;

pub use entry::LogEntry;
pub use vault::LogVault;

pub use logvault_core::models::{
    AccessAuditRecord, AuditAction, AuditActor, LogLevel, LogRecord, QueryParams,
};
pub use logvault_core::traits::{Diagnostic, DiagnosticSink, Severity};
pub use logvault_core::{LogVaultConfig, LogVaultError, LogVaultResult};
pub use logvault_lifecycle::{ArchiveOutcome, CleanupReport, StatusSnapshot};
pub use logvault_observability::{MemoryDiagnostics, TracingDiagnostics};

/// Install the global `tracing` subscriber described by `config`.
/// Returns false if one is already installed.
pub fn init_tracing(config: &LogVaultConfig) -> bool {
    logvault_observability::tracing_setup::init_from_config(&config.observability)
}
