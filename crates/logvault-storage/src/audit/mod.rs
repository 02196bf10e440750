//! Access audit trail writer.

pub mod logger;

pub use logger::AuditLogger;
