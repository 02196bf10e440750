//! # logvault-lifecycle
//!
//! Moves aged records active → dated archive store → purged.
//!
//! - [`archival`]: transition 1, the two-phase copy-then-delete move.
//! - [`retention`]: transition 2, purging archive files past retention.
//! - [`engine::LifecycleEngine`]: runs both as one tick and records the outcome.
//! - [`scheduler::ArchivalScheduler`]: a worker thread that ticks on an interval.

pub mod archival;
pub mod engine;
pub mod retention;
pub mod scheduler;
pub mod status;

pub use archival::ArchiveOutcome;
pub use engine::{LifecycleEngine, TickReport};
pub use retention::CleanupReport;
pub use scheduler::ArchivalScheduler;
pub use status::{LifecycleStatus, StatusSnapshot};
