//! v003: archive_runs: one marker per copy-then-delete archive move.

pub const MIGRATION_SQL: &str = "
    CREATE TABLE IF NOT EXISTS archive_runs (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        archive_file  TEXT NOT NULL,
        cutoff        TEXT NOT NULL,
        record_count  INTEGER NOT NULL DEFAULT 0,
        status        TEXT NOT NULL,
        started_at    TEXT NOT NULL,
        updated_at    TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_archive_runs_status ON archive_runs(status);
";
