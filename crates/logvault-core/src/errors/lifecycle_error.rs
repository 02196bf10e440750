/// Errors raised while archiving or purging.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("archive step '{step}' failed: {reason}")]
    ArchiveFailed { step: String, reason: String },

    #[error("retention cleanup of {file} failed: {reason}")]
    RetentionFailed { file: String, reason: String },

    #[error("scheduler failed to start: {reason}")]
    SchedulerStartFailed { reason: String },
}
