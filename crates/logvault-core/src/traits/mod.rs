mod diagnostics;
mod storage;

pub use diagnostics::{Diagnostic, DiagnosticSink, Severity};
pub use storage::ILogStorage;
