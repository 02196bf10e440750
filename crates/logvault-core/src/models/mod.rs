pub mod archive_run;
pub mod audit_record;
pub mod log_level;
pub mod log_record;
pub mod query;
pub mod timestamp;

pub use archive_run::{ArchiveRun, ArchiveRunStatus};
pub use audit_record::{AccessAuditRecord, AuditAction, AuditActor};
pub use log_level::LogLevel;
pub use log_record::{LogRecord, Metadata};
pub use query::{LogFilter, QueryParams};
