//! `DiagnosticSink` implementations.

use std::sync::Mutex;

use logvault_core::traits::{Diagnostic, DiagnosticSink, Severity};

/// Forwards diagnostics to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => tracing::error!(
                event = "engine_failure",
                component = diagnostic.component,
                operation = diagnostic.operation,
                "{}",
                diagnostic.message
            ),
            Severity::Warning => tracing::warn!(
                event = "engine_warning",
                component = diagnostic.component,
                operation = diagnostic.operation,
                "{}",
                diagnostic.message
            ),
        }
    }
}

/// Collects diagnostics in memory. Also forwards them to `tracing`.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far.
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries reported for one operation.
    pub fn for_operation(&self, operation: &str) -> Vec<Diagnostic> {
        self.entries()
            .into_iter()
            .filter(|d| d.operation == operation)
            .collect()
    }
}

impl DiagnosticSink for MemoryDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        TracingDiagnostics.report(diagnostic.clone());
        if let Ok(mut guard) = self.entries.lock() {
            guard.push(diagnostic);
        }
    }
}
