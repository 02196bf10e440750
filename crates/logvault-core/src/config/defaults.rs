// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "logs.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_BUSY_RETRIES: u32 = 2;

// --- Lifecycle ---
pub const DEFAULT_ARCHIVE_DIR: &str = "log_archives";
pub const DEFAULT_ARCHIVE_AFTER_DAYS: u32 = 30;
pub const DEFAULT_RETENTION_DAYS: u32 = 90;
pub const DEFAULT_TICK_INTERVAL_SECS: u64 = 86_400; // 1 day
pub const DEFAULT_RUN_ON_START: bool = true;
pub const DEFAULT_SCHEDULER_ENABLED: bool = true;

// --- Privacy ---
pub const DEFAULT_KEY_FILENAME: &str = ".db_key";

// --- Export / query ---
pub const DEFAULT_QUERY_LIMIT: usize = 100;
pub const DEFAULT_EXPORT_DIR: &str = ".";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
