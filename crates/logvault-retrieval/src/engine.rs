//! QueryEngine: audited reads over any [`ILogStorage`].

use std::sync::Arc;

use logvault_core::models::{AccessAuditRecord, AuditAction, AuditActor, LogRecord, QueryParams};
use logvault_core::traits::{Diagnostic, DiagnosticSink, ILogStorage};
use logvault_observability::tracing_setup::events;
use logvault_privacy::PrivacyEngine;

use crate::filter::{audit_details, build_filter};

const COMPONENT: &str = "retrieval";

pub struct QueryEngine {
    storage: Arc<dyn ILogStorage>,
    privacy: Arc<PrivacyEngine>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl QueryEngine {
    pub fn new(
        storage: Arc<dyn ILogStorage>,
        privacy: Arc<PrivacyEngine>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            storage,
            privacy,
            diagnostics,
        }
    }

    /// Matching records, newest first, at most `params.limit`.
    ///
    /// The QUERY audit row is written before the read. If it cannot be
    /// written, or the read fails, the failure is reported and the result
    /// is empty.
    pub fn query(&self, params: &QueryParams) -> Vec<LogRecord> {
        let details = audit_details(params).to_string();
        let audit = AccessAuditRecord::new(AuditActor::Api, AuditAction::Query, details.clone());
        if let Err(e) = self.storage.append_audit(&audit) {
            self.diagnostics.report(Diagnostic::error(
                COMPONENT,
                "query",
                format!("could not audit query: {e}"),
            ));
            return Vec::new();
        }

        let filter = build_filter(params, &self.privacy);
        let mut records = match self.storage.query_logs(&filter) {
            Ok(records) => records,
            Err(e) => {
                self.diagnostics
                    .report(Diagnostic::error(COMPONENT, "query", e.to_string()));
                return Vec::new();
            }
        };

        if params.decrypt {
            for record in records.iter_mut().filter(|r| r.encrypted) {
                let (message, ok) = self.privacy.decrypt_or_placeholder(&record.message);
                record.message = message;
                if ok {
                    record.encrypted = false;
                }
            }
        }

        events::query_executed(&details, records.len());
        records
    }
}
