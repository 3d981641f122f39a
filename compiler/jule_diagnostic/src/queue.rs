//! Diagnostic queue for collecting, deduplicating, and sorting diagnostics.
//!
//! Recoverable errors from one analysis pass are gathered here and reported
//! together, ordered by source position.

use jule_ir::Span;

use crate::{Diagnostic, ErrorCode, ErrorGuaranteed};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors before further errors are dropped (0 = unlimited).
    pub error_limit: usize,
    /// Drop an error identical (code, position, message) to one already queued.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 64,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
struct QueuedDiagnostic {
    diagnostic: Diagnostic,
    line: u32,
    column: u32,
}

/// Queue for collecting, deduplicating, and sorting diagnostics.
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// queue.add(diagnostic, line, column);
/// let sorted = queue.flush();
/// ```
#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<QueuedDiagnostic>,
    error_count: usize,
    limit_hit: bool,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            error_count: 0,
            limit_hit: false,
            config,
        }
    }

    /// Add a diagnostic at a 1-based line/column.
    ///
    /// Returns `true` if the diagnostic was added, `false` if it was filtered.
    pub fn add(&mut self, diag: Diagnostic, line: u32, column: u32) -> bool {
        if diag.is_error() && self.limit_reached() {
            self.limit_hit = true;
            return false;
        }

        if self.config.deduplicate && self.is_duplicate(&diag, line, column) {
            return false;
        }

        if diag.is_error() {
            self.error_count += 1;
        }
        self.diagnostics.push(QueuedDiagnostic {
            diagnostic: diag,
            line,
            column,
        });
        true
    }

    /// Emit an error diagnostic and get proof it was emitted.
    pub fn emit_error(&mut self, diag: Diagnostic, line: u32, column: u32) -> ErrorGuaranteed {
        self.add(diag, line, column);
        ErrorGuaranteed::new()
    }

    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Check if any errors were emitted and get proof if so.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    /// Sort diagnostics by position and return them, clearing the queue.
    ///
    /// When errors were dropped by the limit, a trailing E9002 diagnostic says so.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by_key(|d| (d.line, d.column));
        let mut result: Vec<Diagnostic> =
            self.diagnostics.drain(..).map(|d| d.diagnostic).collect();

        if self.limit_hit {
            result.push(too_many_errors(self.config.error_limit));
        }
        self.error_count = 0;
        self.limit_hit = false;
        result
    }

    /// Get diagnostics without clearing the queue.
    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().map(|d| &d.diagnostic)
    }

    fn is_duplicate(&self, diag: &Diagnostic, line: u32, column: u32) -> bool {
        self.diagnostics.iter().any(|queued| {
            queued.line == line
                && queued.column == column
                && queued.diagnostic.code == diag.code
                && queued.diagnostic.message == diag.message
        })
    }
}

/// Create a "too many errors" diagnostic.
#[cold]
fn too_many_errors(limit: usize) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9002)
        .with_message(format!("aborting after {limit} errors"))
        .with_label(Span::DUMMY, "error limit reached")
}
