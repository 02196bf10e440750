//! Exporter: query, render, write, audit.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;

use logvault_core::config::ExportConfig;
use logvault_core::errors::LogVaultResult;
use logvault_core::models::{AccessAuditRecord, AuditAction, AuditActor, LogRecord, QueryParams};
use logvault_core::traits::{Diagnostic, DiagnosticSink, ILogStorage};
use logvault_observability::tracing_setup::events;
use logvault_retrieval::QueryEngine;

use crate::csv::render_csv;
use crate::format::ExportFormat;

const COMPONENT: &str = "export";
const OPERATION: &str = "export_logs_for_analysis";

pub struct Exporter {
    query: Arc<QueryEngine>,
    storage: Arc<dyn ILogStorage>,
    config: ExportConfig,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl Exporter {
    pub fn new(
        query: Arc<QueryEngine>,
        storage: Arc<dyn ILogStorage>,
        config: ExportConfig,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            query,
            storage,
            config,
            diagnostics,
        }
    }

    /// `<output_dir>/logs_export_<YYYY-MM-DD>.<ext>` for today.
    pub fn default_output_path(&self, format: ExportFormat) -> PathBuf {
        Path::new(&self.config.output_dir).join(format!(
            "logs_export_{}.{}",
            Utc::now().format("%Y-%m-%d"),
            format.extension()
        ))
    }

    /// Export the records matching `params`.
    ///
    /// An unknown `format` is an error returned before anything runs.
    /// No matching records gives `Ok(None)` with nothing written. A failure
    /// while rendering or writing is reported and also gives `Ok(None)`.
    pub fn export(
        &self,
        format: &str,
        output_path: Option<&Path>,
        params: &QueryParams,
    ) -> LogVaultResult<Option<PathBuf>> {
        let format: ExportFormat = format.parse()?;

        let records = self.query.query(params);
        if records.is_empty() {
            return Ok(None);
        }

        let path = output_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.default_output_path(format));

        if let Err(e) = write_records(format, &records, &path) {
            self.diagnostics.report(Diagnostic::error(
                COMPONENT,
                OPERATION,
                format!("writing {}: {e}", path.display()),
            ));
            return Ok(None);
        }

        let destination = path.display().to_string();
        let audit = AccessAuditRecord::new(
            AuditActor::Api,
            AuditAction::Export,
            format!("Exported {} logs to {destination}", records.len()),
        );
        if let Err(e) = self.storage.append_audit(&audit) {
            self.diagnostics.report(Diagnostic::error(
                COMPONENT,
                OPERATION,
                format!("could not audit export to {destination}: {e}"),
            ));
        }

        events::export_written(format.extension(), records.len(), &destination);
        Ok(Some(path))
    }
}

fn write_records(format: ExportFormat, records: &[LogRecord], path: &Path) -> LogVaultResult<()> {
    let body = match format {
        ExportFormat::Csv => render_csv(records)?,
        ExportFormat::Json => serde_json::to_string_pretty(records)?,
    };
    fs::write(path, body)?;
    Ok(())
}
