use std::fmt;

/// How bad an engine-internal failure is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// An engine failure that was handled instead of propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Subsystem that caught the failure, e.g. `"ingestion"`.
    pub component: &'static str,
    /// Operation that failed, e.g. `"archive_old_logs"`.
    pub operation: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn error(component: &'static str, operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            component,
            operation,
            message: message.into(),
        }
    }

    pub fn warning(
        component: &'static str,
        operation: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            component,
            operation,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}::{}] {}", self.component, self.operation, self.message)
    }
}

/// Destination for failures the engine swallows to keep callers running.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}
