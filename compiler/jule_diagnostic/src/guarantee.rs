//! Proof that an error was emitted.

use std::fmt;

/// Type-level proof that at least one error has been reported.
///
/// Only obtainable from a [`DiagnosticQueue`](crate::DiagnosticQueue) that
/// actually received an error, or from a non-zero error count.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    pub(crate) fn new() -> Self {
        ErrorGuaranteed(())
    }

    /// Returns proof if `count` is non-zero.
    pub fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then(Self::new)
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error(s) emitted")
    }
}

impl std::error::Error for ErrorGuaranteed {}
