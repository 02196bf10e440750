//! # logvault-core
//!
//! Foundation crate for the logvault logging engine.
//! Defines the record types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::LogVaultConfig;
pub use errors::{LogVaultError, LogVaultResult};
pub use models::{AccessAuditRecord, AuditAction, AuditActor, LogLevel, LogRecord, QueryParams};
