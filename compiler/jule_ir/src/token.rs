//! Source-location token attached to declarations, expressions and errors.

use std::fmt;

use crate::Span;

/// Where a declaration or expression came from.
///
/// The core never reads source text; it only carries the position forward so
/// diagnostics can point back at the offending code.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Token {
    pub span: Span,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
}

impl Token {
    /// Token for synthesized code.
    pub const DUMMY: Token = Token {
        span: Span::DUMMY,
        line: 0,
        column: 0,
    };

    pub const fn new(span: Span, line: u32, column: u32) -> Self {
        Token { span, line, column }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} ({:?})", self.line, self.column, self.span)
    }
}
