//! Diagnostic system for the compiler core.
//!
//! The core only signals error *kinds*; formatting and display belong to the
//! driver. This crate provides the shared vocabulary:
//! - Error codes for searchability
//! - A message (what went wrong)
//! - A primary span (where it went wrong)
//! - Notes (context)
//!
//! # Error Guarantees
//!
//! `ErrorGuaranteed` is type-level proof that at least one error was emitted
//! into a `DiagnosticQueue`.
//!
//! ```text
//! let guarantee = queue.emit_error(diagnostic, line, column);
//! fn analyze() -> Result<Analysis, ErrorGuaranteed> { ... }
//! ```

mod diagnostic;
mod error_code;
mod guarantee;
pub mod queue;

pub use diagnostic::{Diagnostic, Label, LabelStyle, Severity};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
