//! Export shape, audit, and failure handling.

use std::sync::Arc;

use logvault_core::config::ExportConfig;
use logvault_core::errors::LogVaultError;
use logvault_core::models::{AuditAction, LogLevel, LogRecord, QueryParams};
use logvault_core::traits::ILogStorage;
use logvault_export::Exporter;
use logvault_observability::MemoryDiagnostics;
use logvault_privacy::PrivacyEngine;
use logvault_retrieval::QueryEngine;
use logvault_storage::StorageEngine;
use serde_json::json;

struct Fixture {
    dir: tempfile::TempDir,
    storage: Arc<StorageEngine>,
    diagnostics: Arc<MemoryDiagnostics>,
    exporter: Exporter,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(StorageEngine::open_in_memory().unwrap());
    let diagnostics = Arc::new(MemoryDiagnostics::new());
    let query = Arc::new(QueryEngine::new(
        storage.clone(),
        Arc::new(PrivacyEngine::ephemeral()),
        diagnostics.clone(),
    ));
    let config = ExportConfig {
        output_dir: dir.path().display().to_string(),
        ..ExportConfig::default()
    };
    let exporter = Exporter::new(query, storage.clone(), config, diagnostics.clone());
    Fixture {
        dir,
        storage,
        diagnostics,
        exporter,
    }
}

fn seed(storage: &StorageEngine) {
    storage
        .insert_log(&LogRecord::new(LogLevel::Info, "web", "first").with_metadata("ip", json!("10.1.1.1")))
        .unwrap();
    storage
        .insert_log(&LogRecord::new(LogLevel::Error, "web", "second, with comma"))
        .unwrap();
}

#[test]
fn csv_export_flattens_metadata_into_columns() {
    let fx = fixture();
    seed(&fx.storage);
    let out = fx.dir.path().join("out.csv");

    let path = fx
        .exporter
        .export("csv", Some(&out), &QueryParams::new())
        .unwrap()
        .unwrap();
    assert_eq!(path, out);

    let text = std::fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    let header: Vec<&str> = lines.next().unwrap().split(',').collect();
    let ip_col = header.iter().position(|h| *h == "metadata_ip").unwrap();
    assert_eq!(header.iter().filter(|h| h.starts_with("metadata_")).count(), 1);

    // Newest first: "second" then "first".
    let second = lines.next().unwrap();
    let first = lines.next().unwrap();
    assert!(second.contains("\"second, with comma\""));
    assert!(!second.contains("10.1.1.1"));
    assert_eq!(first.split(',').nth(ip_col), Some("10.1.1.1"));
    assert!(lines.next().is_none());
}

#[test]
fn json_export_nests_metadata() {
    let fx = fixture();
    seed(&fx.storage);
    let out = fx.dir.path().join("out.json");

    fx.exporter
        .export("JSON", Some(&out), &QueryParams::new())
        .unwrap()
        .unwrap();
    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let rows = parsed.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["metadata"]["ip"], "10.1.1.1");
    assert_eq!(rows[0]["level"], "ERROR");
}

#[test]
fn export_is_audited_alongside_its_query() {
    let fx = fixture();
    seed(&fx.storage);
    fx.exporter
        .export("csv", Some(&fx.dir.path().join("a.csv")), &QueryParams::new())
        .unwrap();

    assert_eq!(fx.storage.count_audit(Some(AuditAction::Query)).unwrap(), 1);
    let exports = fx.storage.audit_trail(Some(AuditAction::Export)).unwrap();
    assert_eq!(exports.len(), 1);
    assert!(exports[0].details.contains("Exported 2 logs"));
    assert!(exports[0].details.contains("a.csv"));
}

#[test]
fn default_path_lands_in_output_dir() {
    let fx = fixture();
    seed(&fx.storage);
    let path = fx
        .exporter
        .export("json", None, &QueryParams::new())
        .unwrap()
        .unwrap();
    assert_eq!(path.parent(), Some(fx.dir.path()));
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("logs_export_") && name.ends_with(".json"));
    assert!(path.exists());
}

#[test]
fn unsupported_format_fails_before_querying() {
    let fx = fixture();
    seed(&fx.storage);
    let err = fx
        .exporter
        .export("parquet", None, &QueryParams::new())
        .unwrap_err();
    assert!(matches!(err, LogVaultError::UnsupportedFormat { .. }));
    assert_eq!(fx.storage.count_audit(None).unwrap(), 0);
}

#[test]
fn empty_result_writes_nothing() {
    let fx = fixture();
    let out = fx.dir.path().join("empty.csv");
    let result = fx
        .exporter
        .export("csv", Some(&out), &QueryParams::new())
        .unwrap();
    assert!(result.is_none());
    assert!(!out.exists());
    assert_eq!(fx.storage.count_audit(Some(AuditAction::Export)).unwrap(), 0);
}

#[test]
fn write_failure_is_reported_not_raised() {
    let fx = fixture();
    seed(&fx.storage);
    // The destination is an existing directory.
    let result = fx
        .exporter
        .export("csv", Some(fx.dir.path()), &QueryParams::new())
        .unwrap();
    assert!(result.is_none());
    assert_eq!(fx.diagnostics.for_operation("export_logs_for_analysis").len(), 1);
    assert_eq!(fx.storage.count_audit(Some(AuditAction::Export)).unwrap(), 0);
}
