use serde::{Deserialize, Serialize};

use super::defaults;

/// Archival and retention configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Directory holding the dated archive stores.
    pub archive_dir: String,
    /// Records older than this many days move out of the active store.
    pub archive_after_days: u32,
    /// Archive files older than this many days are deleted.
    pub retention_days: u32,
    /// Seconds between scheduler ticks.
    pub tick_interval_secs: u64,
    /// Run one tick as soon as the scheduler starts.
    pub run_on_start: bool,
    /// Start the background scheduler when the engine opens.
    pub scheduler_enabled: bool,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            archive_dir: defaults::DEFAULT_ARCHIVE_DIR.to_string(),
            archive_after_days: defaults::DEFAULT_ARCHIVE_AFTER_DAYS,
            retention_days: defaults::DEFAULT_RETENTION_DAYS,
            tick_interval_secs: defaults::DEFAULT_TICK_INTERVAL_SECS,
            run_on_start: defaults::DEFAULT_RUN_ON_START,
            scheduler_enabled: defaults::DEFAULT_SCHEDULER_ENABLED,
        }
    }
}
