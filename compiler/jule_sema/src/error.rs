//! Recoverable semantic errors.
//!
//! Each error is recorded against the offending expression's token and, when
//! raised while modeling a body, the function instance it belongs to.
//! Analysis keeps going; all errors of one pass are returned together.

use std::fmt;

use jule_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode};
use jule_ir::{Name, StringInterner, Token};
use jule_types::TypeKind;

use crate::FnInsId;

/// What went wrong.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum SemaErrorKind {
    /// Type-argument inference left a generic unbound or bound it twice.
    UninferableGenerics { decl: Name, generic: Name },
    /// `&x` where `x` is neither reference-typed nor a struct literal.
    InvalidReferenceTarget { kind: TypeKind },
    /// Struct literal names a field the struct does not have.
    UnresolvedFieldInitializer { strct: Name, field: Name },
    /// No conversion exists, or it needs an unsafe context.
    UnsupportedCast {
        from: TypeKind,
        to: TypeKind,
        needs_unsafe: bool,
    },
    GenericArityMismatch {
        decl: Name,
        expected: usize,
        found: usize,
    },
    DuplicateFieldInitializer { strct: Name, field: Name },
    ArgumentCountMismatch {
        decl: Name,
        expected: usize,
        found: usize,
    },
    /// A declaration gathered more combinations than allowed.
    InstantiationLimit { decl: Name, limit: usize },
}

impl SemaErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            SemaErrorKind::UninferableGenerics { .. } => ErrorCode::E2001,
            SemaErrorKind::InvalidReferenceTarget { .. } => ErrorCode::E2002,
            SemaErrorKind::UnresolvedFieldInitializer { .. } => ErrorCode::E2003,
            SemaErrorKind::UnsupportedCast { .. } => ErrorCode::E2004,
            SemaErrorKind::GenericArityMismatch { .. } => ErrorCode::E2005,
            SemaErrorKind::DuplicateFieldInitializer { .. } => ErrorCode::E2006,
            SemaErrorKind::ArgumentCountMismatch { .. } => ErrorCode::E2007,
            SemaErrorKind::InstantiationLimit { .. } => ErrorCode::E2008,
        }
    }
}

/// A recoverable error with its origin.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct SemaError {
    pub kind: SemaErrorKind,
    pub token: Token,
    /// The function instance whose body was being modeled.
    pub instance: Option<FnInsId>,
}

impl SemaError {
    #[cold]
    pub fn new(kind: SemaErrorKind, token: Token) -> Self {
        SemaError {
            kind,
            token,
            instance: None,
        }
    }

    #[must_use]
    pub fn with_instance(mut self, instance: FnInsId) -> Self {
        self.instance = Some(instance);
        self
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// Human-readable message with identifiers resolved.
    pub fn message(&self, interner: &StringInterner) -> String {
        let name = |n: &Name| interner.lookup(*n);
        match &self.kind {
            SemaErrorKind::UninferableGenerics { decl, generic } => format!(
                "cannot infer generic `{}` of `{}` from the call arguments",
                name(generic),
                name(decl)
            ),
            SemaErrorKind::InvalidReferenceTarget { kind } => format!(
                "cannot take a reference to a value of kind `{}`",
                kind.display(interner)
            ),
            SemaErrorKind::UnresolvedFieldInitializer { strct, field } => {
                format!("struct `{}` has no field `{}`", name(strct), name(field))
            }
            SemaErrorKind::UnsupportedCast {
                from,
                to,
                needs_unsafe,
            } => {
                let suffix = if *needs_unsafe {
                    " outside an unsafe function"
                } else {
                    ""
                };
                format!(
                    "cannot cast `{}` to `{}`{suffix}",
                    from.display(interner),
                    to.display(interner)
                )
            }
            SemaErrorKind::GenericArityMismatch {
                decl,
                expected,
                found,
            } => format!(
                "`{}` takes {expected} generic argument(s) but {found} were given",
                name(decl)
            ),
            SemaErrorKind::DuplicateFieldInitializer { strct, field } => format!(
                "field `{}` of `{}` is initialized more than once",
                name(field),
                name(strct)
            ),
            SemaErrorKind::ArgumentCountMismatch {
                decl,
                expected,
                found,
            } => format!(
                "`{}` takes {expected} argument(s) but {found} were given",
                name(decl)
            ),
            SemaErrorKind::InstantiationLimit { decl, limit } => format!(
                "`{}` is instantiated with more than {limit} distinct generic combinations",
                name(decl)
            ),
        }
    }

    pub fn to_diagnostic(&self, interner: &StringInterner) -> Diagnostic {
        let diag = Diagnostic::error(self.code())
            .with_message(self.message(interner))
            .with_label(self.token.span, self.code().title());
        match &self.kind {
            SemaErrorKind::UnsupportedCast {
                needs_unsafe: true, ..
            } => diag.with_note("pointer reinterpretation is only allowed in unsafe functions"),
            SemaErrorKind::InstantiationLimit { .. } => {
                diag.with_note("this usually means the declaration recurses polymorphically")
            }
            _ => diag,
        }
    }

    /// Push into a queue at this error's source position.
    pub fn report(&self, queue: &mut DiagnosticQueue, interner: &StringInterner) -> bool {
        queue.add(
            self.to_diagnostic(interner),
            self.token.line,
            self.token.column,
        )
    }
}

impl fmt::Display for SemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}:{}: {}",
            self.code(),
            self.token.line,
            self.token.column,
            self.code().title()
        )
    }
}

impl std::error::Error for SemaError {}
