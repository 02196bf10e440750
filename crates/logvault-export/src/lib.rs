//! # logvault-export
//!
//! Writes query results to CSV (metadata flattened into `metadata_<key>`
//! columns) or pretty JSON, and audits each export.

pub mod csv;
pub mod exporter;
pub mod format;

pub use exporter::Exporter;
pub use format::ExportFormat;
