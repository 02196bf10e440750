//! Storage engine tests: CRUD, filtered queries, audit trail, archive-run
//! markers, and file-backed read/write separation.

use chrono::{Duration, TimeZone, Utc};
use logvault_core::models::{
    AccessAuditRecord, ArchiveRunStatus, AuditAction, AuditActor, LogFilter, LogLevel, LogRecord,
};
use logvault_core::traits::ILogStorage;
use logvault_storage::migrations::{current_version, LATEST_VERSION};
use logvault_storage::pool::pragmas::verify_wal_mode;
use logvault_storage::StorageEngine;
use serde_json::json;

fn at(day: u32, hour: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
}

fn filter(limit: usize) -> LogFilter {
    LogFilter {
        limit,
        ..LogFilter::default()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CRUD
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn insert_then_get_preserves_every_field() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let record = LogRecord::new(LogLevel::Warning, "payments", "card declined")
        .with_timestamp(at(5, 10))
        .with_user_hash("abc123")
        .with_metadata("ip", json!("10.0.0.1"))
        .with_metadata("attempt", json!(3));

    let row_id = engine.insert_log(&record).unwrap();
    assert!(row_id > 0);

    let loaded = engine.get_log(&record.log_id).unwrap().unwrap();
    assert_eq!(loaded.id, Some(row_id));
    assert_eq!(loaded.log_id, record.log_id);
    assert_eq!(loaded.timestamp, record.timestamp);
    assert_eq!(loaded.level, LogLevel::Warning);
    assert_eq!(loaded.component, "payments");
    assert_eq!(loaded.user_id_hash.as_deref(), Some("abc123"));
    assert_eq!(loaded.message, "card declined");
    assert!(!loaded.encrypted);
    assert_eq!(loaded.metadata, record.metadata);
}

#[test]
fn empty_metadata_round_trips_as_empty_map() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let record = LogRecord::general(LogLevel::Info, "");
    engine.insert_log(&record).unwrap();

    let loaded = engine.get_log(&record.log_id).unwrap().unwrap();
    assert!(loaded.metadata.is_empty());
    assert_eq!(loaded.message, "");
    assert_eq!(loaded.component, "general");
}

#[test]
fn missing_log_id_is_none() {
    let engine = StorageEngine::open_in_memory().unwrap();
    assert!(engine.get_log("nope").unwrap().is_none());
}

#[test]
fn count_through_is_inclusive_of_cutoff() {
    let engine = StorageEngine::open_in_memory().unwrap();
    for day in [1, 2, 3] {
        engine
            .insert_log(&LogRecord::general(LogLevel::Info, "m").with_timestamp(at(day, 0)))
            .unwrap();
    }
    assert_eq!(engine.count_logs().unwrap(), 3);
    assert_eq!(engine.count_logs_through(at(2, 0)).unwrap(), 2);
    assert_eq!(engine.count_logs_through(at(2, 0) - Duration::microseconds(1)).unwrap(), 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// QUERY
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn query_orders_newest_first_and_applies_limit() {
    let engine = StorageEngine::open_in_memory().unwrap();
    for hour in 0..5 {
        engine
            .insert_log(
                &LogRecord::general(LogLevel::Info, format!("h{hour}")).with_timestamp(at(1, hour)),
            )
            .unwrap();
    }

    let rows = engine.query_logs(&filter(3)).unwrap();
    let messages: Vec<_> = rows.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(messages, vec!["h4", "h3", "h2"]);
}

#[test]
fn query_ties_on_timestamp_break_by_row_id() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let first = LogRecord::general(LogLevel::Info, "first").with_timestamp(at(1, 0));
    let second = LogRecord::general(LogLevel::Info, "second").with_timestamp(at(1, 0));
    engine.insert_log(&first).unwrap();
    engine.insert_log(&second).unwrap();

    let rows = engine.query_logs(&filter(10)).unwrap();
    assert_eq!(rows[0].message, "second");
    assert_eq!(rows[1].message, "first");
}

#[test]
fn query_ands_every_filter() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let target = LogRecord::new(LogLevel::Error, "auth", "target")
        .with_timestamp(at(10, 12))
        .with_user_hash("u-hash");
    engine.insert_log(&target).unwrap();
    // Each decoy misses exactly one predicate.
    engine
        .insert_log(&LogRecord::new(LogLevel::Info, "auth", "wrong level").with_timestamp(at(10, 12)).with_user_hash("u-hash"))
        .unwrap();
    engine
        .insert_log(&LogRecord::new(LogLevel::Error, "db", "wrong component").with_timestamp(at(10, 12)).with_user_hash("u-hash"))
        .unwrap();
    engine
        .insert_log(&LogRecord::new(LogLevel::Error, "auth", "wrong user").with_timestamp(at(10, 12)).with_user_hash("other"))
        .unwrap();
    engine
        .insert_log(&LogRecord::new(LogLevel::Error, "auth", "too late").with_timestamp(at(11, 0)).with_user_hash("u-hash"))
        .unwrap();
    engine
        .insert_log(&LogRecord::new(LogLevel::Error, "auth", "too early").with_timestamp(at(9, 23)).with_user_hash("u-hash"))
        .unwrap();

    let rows = engine
        .query_logs(&LogFilter {
            start: Some(at(10, 0)),
            end_exclusive: Some(at(11, 0)),
            level: Some(LogLevel::Error),
            component: Some("auth".into()),
            user_id_hash: Some("u-hash".into()),
            limit: 100,
        })
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].message, "target");
}

// ═══════════════════════════════════════════════════════════════════════════
// AUDIT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn audit_trail_is_append_only_and_filterable() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine
        .append_audit(&AccessAuditRecord::new(AuditActor::Api, AuditAction::Query, "{}"))
        .unwrap();
    engine
        .append_audit(&AccessAuditRecord::new(AuditActor::Api, AuditAction::Export, "x"))
        .unwrap();
    engine.record_archive_purge("logs_archive_20240101.db").unwrap();

    let all = engine.audit_trail(None).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].action, AuditAction::Query);
    assert_eq!(all[2].actor, AuditActor::System);
    assert!(all[2].details.contains("logs_archive_20240101.db"));

    assert_eq!(engine.count_audit(Some(AuditAction::Export)).unwrap(), 1);
    assert_eq!(engine.audit_trail(Some(AuditAction::Delete)).unwrap().len(), 1);
    assert_eq!(engine.count_audit(Some(AuditAction::Archive)).unwrap(), 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// ARCHIVE RUN MARKERS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn archive_run_markers_track_progress() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine
        .insert_log(&LogRecord::general(LogLevel::Info, "old").with_timestamp(at(1, 0)))
        .unwrap();
    let fresh = LogRecord::general(LogLevel::Info, "fresh").with_timestamp(at(20, 0));
    engine.insert_log(&fresh).unwrap();

    let run = engine.begin_archive_run("a.db", at(2, 0), 1).unwrap();
    let pending = engine.unfinished_archive_runs().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].status, ArchiveRunStatus::Started);
    assert_eq!(pending[0].cutoff, at(2, 0));

    engine
        .update_archive_run(run, ArchiveRunStatus::Copied, 1)
        .unwrap();
    assert_eq!(
        engine.unfinished_archive_runs().unwrap()[0].status,
        ArchiveRunStatus::Copied
    );

    let deleted = engine
        .complete_archive_run(run, at(2, 0), i64::MAX, 1, "a.db")
        .unwrap();
    assert_eq!(deleted, 1);
    assert!(engine.unfinished_archive_runs().unwrap().is_empty());
    assert_eq!(engine.count_logs().unwrap(), 1);
    assert!(engine.get_log(&fresh.log_id).unwrap().is_some());
    assert_eq!(engine.count_audit(Some(AuditAction::Archive)).unwrap(), 1);
}

#[test]
fn delete_through_spares_rows_above_max_id() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let first = engine
        .insert_log(&LogRecord::general(LogLevel::Info, "a").with_timestamp(at(1, 0)))
        .unwrap();
    engine
        .insert_log(&LogRecord::general(LogLevel::Info, "b").with_timestamp(at(1, 0)))
        .unwrap();

    assert_eq!(engine.delete_logs_through(at(1, 0), first).unwrap(), 1);
    assert_eq!(engine.count_logs().unwrap(), 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// FILE-BACKED
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn file_backed_store_migrates_and_uses_wal() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("logs.db");
    let engine = StorageEngine::open_at(&db_path, 2, 5000).unwrap();

    assert!(engine.integrity_check().unwrap());
    assert_eq!(engine.db_path(), Some(db_path.as_path()));

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    assert_eq!(current_version(&conn).unwrap(), LATEST_VERSION);
    assert!(verify_wal_mode(&conn).unwrap());
}

#[test]
fn records_survive_reopen_and_reads_see_writes() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("logs.db");
    let record = LogRecord::general(LogLevel::Critical, "persist me");
    {
        let engine = StorageEngine::open_at(&db_path, 2, 5000).unwrap();
        engine.insert_log(&record).unwrap();
        // Reader pool sees the writer's commit.
        assert_eq!(engine.count_logs().unwrap(), 1);
        engine.wal_checkpoint().unwrap();
    }
    let engine = StorageEngine::open_at(&db_path, 2, 5000).unwrap();
    let loaded = engine.get_log(&record.log_id).unwrap().unwrap();
    assert_eq!(loaded.level, LogLevel::Critical);
}

#[test]
fn concurrent_writers_lose_nothing() {
    use std::sync::Arc;

    let dir = tempfile::tempdir().unwrap();
    let engine = Arc::new(StorageEngine::open_at(&dir.path().join("logs.db"), 4, 5000).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                for i in 0..25 {
                    engine
                        .insert_log(&LogRecord::general(LogLevel::Info, format!("{t}-{i}")))
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(engine.count_logs().unwrap(), 100);
}
