//! Cast classification.
//!
//! A cast always records both its source and destination kind; this module
//! decides whether the conversion exists and which target-language form
//! renders it.

use std::fmt;

use crate::{Prim, TypeKind};

/// Target-language cast form.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CastIdiom {
    /// `static_cast<T>(x)`: numeric conversions, identity, `any` unwrapping.
    Static,
    /// `reinterpret_cast<T>(x)`: pointer reinterpretation.
    Reinterpret,
    /// `T(x)`: conversion through a runtime constructor or operator.
    Construct,
}

impl CastIdiom {
    /// Whether the cast is only legal inside an unsafe function.
    #[inline]
    pub fn requires_unsafe(self) -> bool {
        matches!(self, CastIdiom::Reinterpret)
    }
}

/// Why a cast could not be classified.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CastError {
    /// One side still contains a generic placeholder.
    Unresolved,
    /// No conversion exists between the two kinds.
    NoConversion,
}

impl fmt::Display for CastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastError::Unresolved => write!(f, "cast between unresolved kinds"),
            CastError::NoConversion => write!(f, "no conversion between kinds"),
        }
    }
}

impl std::error::Error for CastError {}

/// Classify the conversion `source -> target`.
pub fn classify_cast(source: &TypeKind, target: &TypeKind) -> Result<CastIdiom, CastError> {
    if source.has_generic() || target.has_generic() {
        return Err(CastError::Unresolved);
    }
    if source == target {
        return Ok(CastIdiom::Static);
    }

    match (source, target) {
        (_, TypeKind::Prim(Prim::Any)) => Ok(CastIdiom::Construct),
        (TypeKind::Prim(Prim::Any), _) => Ok(CastIdiom::Static),
        (TypeKind::Prim(from), TypeKind::Prim(to)) if from.is_numeric() && to.is_numeric() => {
            Ok(CastIdiom::Static)
        }
        (from, TypeKind::Prim(Prim::Str)) if is_str_source(from) => Ok(CastIdiom::Construct),
        (TypeKind::Prim(Prim::Str), TypeKind::Slice(elem)) if is_byte_or_rune(elem) => {
            Ok(CastIdiom::Construct)
        }
        (TypeKind::Ptr(_), TypeKind::Ptr(_))
        | (TypeKind::Ptr(_), TypeKind::Prim(Prim::Uintptr))
        | (TypeKind::Prim(Prim::Uintptr), TypeKind::Ptr(_)) => Ok(CastIdiom::Reinterpret),
        _ => Err(CastError::NoConversion),
    }
}

fn is_byte_or_rune(kind: &TypeKind) -> bool {
    matches!(kind, TypeKind::Prim(Prim::U8 | Prim::I32))
}

/// Kinds the runtime string can be built from: a byte, a rune, or slices of either.
fn is_str_source(kind: &TypeKind) -> bool {
    match kind {
        TypeKind::Slice(elem) => is_byte_or_rune(elem),
        other => is_byte_or_rune(other),
    }
}

#[cfg(test)]
mod tests;
