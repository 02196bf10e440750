//! v001: logs table with timestamp, level, component, and log_id indices.

pub const MIGRATION_SQL: &str = "
    CREATE TABLE IF NOT EXISTS logs (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        log_id        TEXT NOT NULL,
        timestamp     TEXT NOT NULL,
        level         TEXT NOT NULL,
        component     TEXT NOT NULL,
        user_id_hash  TEXT,
        message       TEXT NOT NULL,
        encrypted     INTEGER NOT NULL DEFAULT 0,
        metadata      TEXT
    );

    CREATE INDEX IF NOT EXISTS idx_logs_timestamp ON logs(timestamp);
    CREATE INDEX IF NOT EXISTS idx_logs_level ON logs(level);
    CREATE INDEX IF NOT EXISTS idx_logs_component ON logs(component);
    CREATE INDEX IF NOT EXISTS idx_logs_log_id ON logs(log_id);
";
