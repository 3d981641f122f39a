//! Render failures.
//!
//! By the time a model reaches the renderer the analysis has proven it well
//! typed, so every failure here is a bug in the core, never in user code.

use std::fmt;

use jule_diagnostic::{Diagnostic, ErrorCode};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RenderError {
    /// An unresolved or unrenderable model reached the renderer.
    InternalInvariantViolation {
        /// The render unit that was aborted, once known.
        unit: Option<String>,
        detail: String,
    },
}

impl RenderError {
    pub fn invariant(detail: impl Into<String>) -> Self {
        RenderError::InternalInvariantViolation {
            unit: None,
            detail: detail.into(),
        }
    }

    /// Attach the aborted unit, keeping an innermost one already set.
    #[must_use]
    pub fn in_unit(self, name: &str) -> Self {
        match self {
            RenderError::InternalInvariantViolation { unit: None, detail } => {
                RenderError::InternalInvariantViolation {
                    unit: Some(name.to_string()),
                    detail,
                }
            }
            other @ RenderError::InternalInvariantViolation { .. } => other,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            RenderError::InternalInvariantViolation { .. } => ErrorCode::E9001,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_note("this is a bug in the compiler, not in the program")
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::InternalInvariantViolation {
                unit: Some(unit),
                detail,
            } => write!(f, "internal invariant violated while rendering `{unit}`: {detail}"),
            RenderError::InternalInvariantViolation { unit: None, detail } => {
                write!(f, "internal invariant violated: {detail}")
            }
        }
    }
}

impl std::error::Error for RenderError {}
