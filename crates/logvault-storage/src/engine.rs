//! StorageEngine: owns the ConnectionPool, implements ILogStorage, and
//! exposes the archive-side operations the lifecycle needs.

use std::path::Path;

use chrono::{DateTime, Utc};

use logvault_core::config::StorageConfig;
use logvault_core::errors::LogVaultResult;
use logvault_core::models::{
    AccessAuditRecord, ArchiveRun, ArchiveRunStatus, AuditAction, LogFilter, LogRecord,
};
use logvault_core::traits::ILogStorage;

use crate::archive;
use crate::audit::AuditLogger;
use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{archive_run_ops, audit_ops, log_crud, log_query, maintenance};
use crate::from_sqlite;

pub struct StorageEngine {
    pool: ConnectionPool,
    /// File-backed stores read through the pool. In-memory stores read
    /// through the writer because pool connections are separate databases.
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open (creating if needed) the store at `config.db_path`.
    pub fn open(config: &StorageConfig) -> LogVaultResult<Self> {
        Self::open_at(
            Path::new(&config.db_path),
            config.read_pool_size,
            config.busy_timeout_ms,
        )
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: &Path, read_pool_size: usize, busy_timeout_ms: u32) -> LogVaultResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let pool = ConnectionPool::open(path, read_pool_size, busy_timeout_ms)?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        Ok(engine)
    }

    pub fn open_in_memory() -> LogVaultResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        let engine = Self {
            pool,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> LogVaultResult<()> {
        self.pool.writer.with_conn(migrations::run_migrations)
    }

    /// `None` for in-memory stores.
    pub fn db_path(&self) -> Option<&Path> {
        self.pool.db_path.as_deref()
    }

    fn with_reader<F, T>(&self, f: F) -> LogVaultResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> LogVaultResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn(f)
        }
    }

    // --- Archive side ---

    /// Full online backup of the active store into `dest`.
    pub fn snapshot_to(&self, dest: &Path) -> LogVaultResult<()> {
        self.pool
            .writer
            .with_conn(|conn| archive::snapshot(conn, dest))
    }

    pub fn delete_logs_through(&self, cutoff: DateTime<Utc>, max_id: i64) -> LogVaultResult<usize> {
        self.pool
            .writer
            .with_conn(|conn| log_crud::delete_logs_through(conn, cutoff, max_id))
    }

    /// Second phase of an archive move: delete the archived active rows,
    /// mark the run completed, and append the ARCHIVE audit row, all in one
    /// transaction. Returns the number of active rows deleted.
    pub fn complete_archive_run(
        &self,
        run_id: i64,
        cutoff: DateTime<Utc>,
        max_id: i64,
        archived: usize,
        archive_path: &str,
    ) -> LogVaultResult<usize> {
        self.pool.writer.with_conn(|conn| {
            let tx = conn.unchecked_transaction().map_err(from_sqlite)?;
            let deleted = log_crud::delete_logs_through(&tx, cutoff, max_id)?;
            archive_run_ops::update_run(&tx, run_id, ArchiveRunStatus::Completed, archived)?;
            AuditLogger::log_archive(&tx, archived, archive_path)?;
            tx.commit().map_err(from_sqlite)?;
            Ok(deleted)
        })
    }

    /// Append the DELETE audit row for a purged archive file.
    pub fn record_archive_purge(&self, archive_file: &str) -> LogVaultResult<i64> {
        self.pool
            .writer
            .with_conn(|conn| AuditLogger::log_delete(conn, archive_file))
    }

    pub fn begin_archive_run(
        &self,
        archive_file: &str,
        cutoff: DateTime<Utc>,
        record_count: usize,
    ) -> LogVaultResult<i64> {
        self.pool
            .writer
            .with_conn(|conn| archive_run_ops::begin_run(conn, archive_file, cutoff, record_count))
    }

    pub fn update_archive_run(
        &self,
        run_id: i64,
        status: ArchiveRunStatus,
        record_count: usize,
    ) -> LogVaultResult<()> {
        self.pool
            .writer
            .with_conn(|conn| archive_run_ops::update_run(conn, run_id, status, record_count))
    }

    pub fn unfinished_archive_runs(&self) -> LogVaultResult<Vec<ArchiveRun>> {
        self.with_reader(archive_run_ops::unfinished_runs)
    }

    // --- Maintenance ---

    pub fn wal_checkpoint(&self) -> LogVaultResult<()> {
        if self.db_path().is_none() {
            return Ok(());
        }
        self.pool.writer.with_conn(maintenance::wal_checkpoint)
    }

    pub fn integrity_check(&self) -> LogVaultResult<bool> {
        self.pool.writer.with_conn(maintenance::integrity_check)
    }
}

impl ILogStorage for StorageEngine {
    fn insert_log(&self, record: &LogRecord) -> LogVaultResult<i64> {
        self.pool
            .writer
            .with_conn(|conn| log_crud::insert_log(conn, record))
    }

    fn get_log(&self, log_id: &str) -> LogVaultResult<Option<LogRecord>> {
        self.with_reader(|conn| log_crud::get_log(conn, log_id))
    }

    fn query_logs(&self, filter: &LogFilter) -> LogVaultResult<Vec<LogRecord>> {
        self.with_reader(|conn| log_query::query_logs(conn, filter))
    }

    fn count_logs(&self) -> LogVaultResult<usize> {
        self.with_reader(log_crud::count_logs)
    }

    fn count_logs_through(&self, cutoff: DateTime<Utc>) -> LogVaultResult<usize> {
        self.with_reader(|conn| log_crud::count_logs_through(conn, cutoff))
    }

    fn append_audit(&self, record: &AccessAuditRecord) -> LogVaultResult<i64> {
        self.pool
            .writer
            .with_conn(|conn| audit_ops::insert_audit(conn, record))
    }

    fn audit_trail(&self, action: Option<AuditAction>) -> LogVaultResult<Vec<AccessAuditRecord>> {
        self.with_reader(|conn| audit_ops::list_audit(conn, action))
    }

    fn count_audit(&self, action: Option<AuditAction>) -> LogVaultResult<usize> {
        self.with_reader(|conn| audit_ops::count_audit(conn, action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_reads_through_the_pool() {
        let dir = tempfile::tempdir().unwrap();
        let engine = StorageEngine::open_at(&dir.path().join("logs.db"), 3, 5000).unwrap();
        assert!(engine.use_read_pool);
        assert_eq!(engine.pool.readers.size(), 3);
    }

    #[test]
    fn memory_store_reads_through_the_writer() {
        let engine = StorageEngine::open_in_memory().unwrap();
        assert!(!engine.use_read_pool);
        assert!(engine.db_path().is_none());
    }
}
