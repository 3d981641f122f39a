//! Attributes and directives attached to declarations.

use crate::{Name, Token};

/// A target-language attribute, kept verbatim from the parser.
///
/// Attributes are emitted in front of a function's result type in declaration
/// order (for example `inline` or `__attribute__((cold))`).
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct Attribute {
    pub token: Token,
    pub text: Name,
}

impl Attribute {
    pub fn new(token: Token, text: Name) -> Self {
        Attribute { token, text }
    }
}

/// A compiler directive such as `#cdef` or `#typedef`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Directive {
    pub token: Token,
    pub tag: Name,
    pub args: Vec<Name>,
}

impl Directive {
    pub fn new(token: Token, tag: Name) -> Self {
        Directive {
            token,
            tag,
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_args(mut self, args: Vec<Name>) -> Self {
        self.args = args;
        self
    }
}
