//! # logvault-observability
//!
//! Where the engine's swallowed failures go: the `TracingDiagnostics` sink
//! forwards them to `tracing`, `MemoryDiagnostics` keeps them for inspection.
//! Also hosts subscriber setup and the structured event helpers.

pub mod diagnostics;
pub mod tracing_setup;

pub use diagnostics::{MemoryDiagnostics, TracingDiagnostics};
