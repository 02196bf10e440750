//! Schema migrations using PRAGMA user_version.

pub mod v001_logs;
pub mod v002_access_audit;
pub mod v003_archive_runs;

use rusqlite::Connection;

use logvault_core::errors::{LogVaultResult, StorageError};

use crate::from_sqlite;

/// Latest schema version this build knows about.
pub const LATEST_VERSION: u32 = 3;

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> LogVaultResult<()> {
    let current_version = current_version(conn)?;

    let migrations: &[(&str, u32)] = &[
        (v001_logs::MIGRATION_SQL, 1),
        (v002_access_audit::MIGRATION_SQL, 2),
        (v003_archive_runs::MIGRATION_SQL, 3),
    ];

    for (sql, version) in migrations {
        if current_version < *version {
            conn.execute_batch(sql)
                .map_err(|e| StorageError::MigrationFailed {
                    version: *version,
                    reason: e.to_string(),
                })?;
            conn.pragma_update(None, "user_version", version)
                .map_err(|e| StorageError::MigrationFailed {
                    version: *version,
                    reason: e.to_string(),
                })?;
            tracing::info!(version = version, "applied migration");
        }
    }

    Ok(())
}

/// Get the current schema version.
pub fn current_version(conn: &Connection) -> LogVaultResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(from_sqlite)
}
