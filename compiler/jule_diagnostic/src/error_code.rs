//! Error codes for all core diagnostics.

use std::fmt;
use std::str::FromStr;

/// Error codes for all core diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E2xxx: Semantic analysis (instantiation, expression modeling)
/// - E9xxx: Internal compiler errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum ErrorCode {
    /// Generic type arguments could not be inferred at a call site
    E2001,
    /// Reference taken on a value that is not reference-typed
    E2002,
    /// Struct literal initializes an unknown field
    E2003,
    /// No conversion between the cast's source and destination kinds
    E2004,
    /// Wrong number of explicit type arguments
    E2005,
    /// Struct literal initializes the same field twice
    E2006,
    /// Call argument count does not match the parameter list
    E2007,
    /// Too many distinct instantiations of one declaration
    E2008,

    /// Internal compiler error (invariant violation)
    E9001,
    /// Too many errors
    E9002,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        ErrorCode::E9001,
        ErrorCode::E9002,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
        }
    }

    /// Short human-readable title.
    pub fn title(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "cannot infer generic type arguments",
            ErrorCode::E2002 => "invalid reference target",
            ErrorCode::E2003 => "unresolved field initializer",
            ErrorCode::E2004 => "unsupported cast",
            ErrorCode::E2005 => "generic argument count mismatch",
            ErrorCode::E2006 => "duplicate field initializer",
            ErrorCode::E2007 => "argument count mismatch",
            ErrorCode::E2008 => "instantiation limit reached",
            ErrorCode::E9001 => "internal compiler error",
            ErrorCode::E9002 => "too many errors",
        }
    }

    /// Semantic errors are recoverable at call-site granularity.
    pub fn is_semantic_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E2001
                | ErrorCode::E2002
                | ErrorCode::E2003
                | ErrorCode::E2004
                | ErrorCode::E2005
                | ErrorCode::E2006
                | ErrorCode::E2007
                | ErrorCode::E2008
        )
    }

    /// Internal errors are core bugs, never caused by user code.
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001 | ErrorCode::E9002)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse an error code string like `"E2001"`.
impl FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == s)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
