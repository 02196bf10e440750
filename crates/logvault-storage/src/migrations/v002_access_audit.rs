//! v002: access_audit: append-only trail of queries, exports, archive
//! moves, and archive deletions.

pub const MIGRATION_SQL: &str = "
    CREATE TABLE IF NOT EXISTS access_audit (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp   TEXT NOT NULL,
        actor       TEXT NOT NULL,
        action      TEXT NOT NULL,
        details     TEXT NOT NULL DEFAULT ''
    );

    CREATE INDEX IF NOT EXISTS idx_access_audit_action ON access_audit(action);
";
