//! Archive, retention, and tick behaviour against file-backed stores.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use logvault_core::config::LifecycleConfig;
use logvault_core::models::{AuditAction, AuditActor, LogLevel, LogRecord};
use logvault_core::traits::ILogStorage;
use logvault_lifecycle::{ArchiveOutcome, LifecycleEngine};
use logvault_observability::MemoryDiagnostics;
use logvault_storage::archive::{archive_file_name, archived_logs};
use logvault_storage::StorageEngine;

struct Fixture {
    _dir: tempfile::TempDir,
    archive_dir: std::path::PathBuf,
    storage: Arc<StorageEngine>,
    diagnostics: Arc<MemoryDiagnostics>,
    engine: LifecycleEngine,
}

fn fixture() -> Fixture {
    fixture_with(|_| {})
}

fn fixture_with(configure: impl FnOnce(&mut LifecycleConfig)) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let archive_dir = dir.path().join("log_archives");
    let storage = Arc::new(StorageEngine::open_at(&dir.path().join("logs.db"), 2, 5000).unwrap());
    let diagnostics = Arc::new(MemoryDiagnostics::new());
    let mut config = LifecycleConfig {
        archive_dir: archive_dir.display().to_string(),
        ..LifecycleConfig::default()
    };
    configure(&mut config);
    let engine = LifecycleEngine::new(Arc::clone(&storage), config, diagnostics.clone());
    Fixture {
        _dir: dir,
        archive_dir,
        storage,
        diagnostics,
        engine,
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

fn insert_at(storage: &StorageEngine, ts: DateTime<Utc>, message: &str) -> LogRecord {
    let record = LogRecord::general(LogLevel::Info, message).with_timestamp(ts);
    storage.insert_log(&record).unwrap();
    record
}

fn touch(dir: &Path, name: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(name), b"").unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════
// ARCHIVE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn archive_conserves_every_record() {
    let fx = fixture();
    let old: Vec<_> = (0..5)
        .map(|i| insert_at(&fx.storage, now() - Duration::days(40 + i), &format!("old {i}")))
        .collect();
    let boundary = insert_at(&fx.storage, now() - Duration::days(30), "boundary");
    let fresh = insert_at(&fx.storage, now() - Duration::days(29), "fresh");
    let before = fx.storage.count_logs().unwrap();

    let outcome = fx.engine.archive_old_logs(now()).unwrap();
    let ArchiveOutcome::Archived { count, path } = outcome else {
        panic!("expected an archive");
    };
    assert_eq!(count, 6);
    assert_eq!(path, fx.archive_dir.join("logs_archive_20240615.db"));

    let archived = archived_logs(&path).unwrap();
    assert_eq!(archived.len() + fx.storage.count_logs().unwrap(), before);
    for record in old.iter().chain(std::iter::once(&boundary)) {
        assert!(archived.iter().any(|r| r.log_id == record.log_id));
        assert!(fx.storage.get_log(&record.log_id).unwrap().is_none());
    }
    assert!(fx.storage.get_log(&fresh.log_id).unwrap().is_some());

    let audit = fx.storage.audit_trail(Some(AuditAction::Archive)).unwrap();
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].actor, AuditActor::System);
    assert!(audit[0].details.contains("Archived 6 logs"));
    assert!(fx.storage.unfinished_archive_runs().unwrap().is_empty());
    assert!(!path.with_extension("db.partial").exists());
}

#[test]
fn archive_with_nothing_old_is_a_no_op() {
    let fx = fixture();
    insert_at(&fx.storage, now() - Duration::days(1), "recent");

    let outcome = fx.engine.archive_old_logs(now()).unwrap();
    assert_eq!(outcome, ArchiveOutcome::NothingToArchive);
    assert!(!fx.archive_dir.exists());
    assert_eq!(fx.storage.count_audit(None).unwrap(), 0);
    assert_eq!(fx.storage.count_logs().unwrap(), 1);
}

#[test]
fn second_archive_on_the_same_day_merges() {
    let fx = fixture();
    let first = insert_at(&fx.storage, now() - Duration::days(50), "first");
    fx.engine.archive_old_logs(now()).unwrap();

    let second = insert_at(&fx.storage, now() - Duration::days(45), "second");
    let outcome = fx.engine.archive_old_logs(now()).unwrap();
    assert_eq!(outcome.archived_count(), 1);

    let archived = archived_logs(&fx.archive_dir.join("logs_archive_20240615.db")).unwrap();
    let ids: Vec<_> = archived.iter().map(|r| r.log_id.clone()).collect();
    assert_eq!(ids, vec![first.log_id, second.log_id]);
    assert_eq!(fx.storage.count_logs().unwrap(), 0);
    assert_eq!(fx.storage.count_audit(Some(AuditAction::Archive)).unwrap(), 2);
}

#[test]
fn unfinished_runs_are_reported_before_archiving() {
    let fx = fixture();
    insert_at(&fx.storage, now() - Duration::days(60), "old");
    fx.storage
        .begin_archive_run("interrupted.db", now() - Duration::days(31), 3)
        .unwrap();

    fx.engine.archive_old_logs(now()).unwrap();

    let warnings = fx.diagnostics.for_operation("archive_old_logs");
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("interrupted.db"));
}

// ═══════════════════════════════════════════════════════════════════════════
// RETENTION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn cleanup_keeps_the_boundary_day() {
    let fx = fixture();
    let today = now().date_naive();
    let boundary = archive_file_name(today - Duration::days(90));
    let expired = archive_file_name(today - Duration::days(91));
    let recent = archive_file_name(today - Duration::days(10));
    for name in [&boundary, &expired, &recent] {
        touch(&fx.archive_dir, name);
    }
    touch(&fx.archive_dir, &format!("{expired}-wal"));
    touch(&fx.archive_dir, "unrelated.txt");

    let report = fx.engine.cleanup_archived_logs(now()).unwrap();
    assert_eq!(report.purged, vec![expired.clone()]);
    assert_eq!(report.retained.len(), 2);
    assert!(report.retained.contains(&boundary));
    assert!(!fx.archive_dir.join(&expired).exists());
    assert!(!fx.archive_dir.join(format!("{expired}-wal")).exists());
    assert!(fx.archive_dir.join(&boundary).exists());
    assert!(fx.archive_dir.join("unrelated.txt").exists());

    let deletes = fx.storage.audit_trail(Some(AuditAction::Delete)).unwrap();
    assert_eq!(deletes.len(), 1);
    assert!(deletes[0].details.contains(&expired));
}

#[test]
fn cleanup_skips_unparseable_dates() {
    let fx = fixture();
    touch(&fx.archive_dir, "logs_archive_2024XX01.db");

    let report = fx.engine.cleanup_archived_logs(now()).unwrap();
    assert_eq!(report.skipped, vec!["logs_archive_2024XX01.db".to_string()]);
    assert!(report.purged.is_empty());
    assert_eq!(fx.diagnostics.for_operation("cleanup_archived_logs").len(), 1);
}

#[test]
fn cleanup_without_archive_dir_is_empty() {
    let fx = fixture();
    let report = fx.engine.cleanup_archived_logs(now()).unwrap();
    assert!(report.purged.is_empty() && report.retained.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// TICK
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn tick_archives_then_purges_and_records_success() {
    let fx = fixture();
    insert_at(&fx.storage, now() - Duration::days(35), "old");
    let ancient = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    touch(&fx.archive_dir, &archive_file_name(ancient));

    let report = fx.engine.run_tick(now()).unwrap();
    assert_eq!(report.archived, 1);
    assert_eq!(report.cleanup.purged, vec!["logs_archive_20230101.db".to_string()]);

    let status = fx.engine.status();
    assert_eq!(status.ticks_succeeded, 1);
    assert_eq!(status.last_tick_at, Some(now()));
    assert!(status.is_healthy());
}

#[test]
fn failed_tick_is_reported_and_counted() {
    let fx = fixture();
    insert_at(&fx.storage, now() - Duration::days(35), "old");
    // A regular file where the archive directory should be.
    std::fs::write(&fx.archive_dir, b"not a directory").unwrap();

    assert!(fx.engine.run_tick(now()).is_none());
    assert!(fx.engine.run_tick(now()).is_none());

    let status = fx.engine.status();
    assert_eq!(status.ticks_failed, 2);
    assert_eq!(status.consecutive_failures, 2);
    assert!(status.last_error.is_some());
    assert_eq!(fx.diagnostics.for_operation("tick").len(), 2);
    // Nothing left the active store.
    assert_eq!(fx.storage.count_logs().unwrap(), 1);
}

#[test]
fn windows_past_the_calendar_keep_everything() {
    let fx = fixture_with(|config| {
        config.archive_after_days = u32::MAX;
        config.retention_days = u32::MAX;
    });
    insert_at(&fx.storage, now() - Duration::days(3650), "decade old");
    let ancient = archive_file_name(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
    touch(&fx.archive_dir, &ancient);

    let report = fx.engine.run_tick(now()).unwrap();
    assert_eq!(report.archived, 0);
    assert!(report.cleanup.purged.is_empty());
    assert_eq!(report.cleanup.retained, vec![ancient.clone()]);
    assert!(fx.archive_dir.join(&ancient).exists());
    assert_eq!(fx.storage.count_logs().unwrap(), 1);

    let status = fx.engine.status();
    assert_eq!(status.ticks_succeeded, 1);
    assert_eq!(status.ticks_failed, 0);
}

#[test]
fn unbounded_archive_window_alone_still_purges_expired_files() {
    let fx = fixture_with(|config| config.archive_after_days = u32::MAX);
    insert_at(&fx.storage, now() - Duration::days(365), "old");
    touch(&fx.archive_dir, "logs_archive_20230101.db");

    let report = fx.engine.run_tick(now()).unwrap();
    assert_eq!(report.archived, 0);
    assert_eq!(report.cleanup.purged, vec!["logs_archive_20230101.db".to_string()]);
}
