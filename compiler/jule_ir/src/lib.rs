//! Jule IR - source-level building blocks shared by every core crate.
//!
//! This crate contains the leaf data structures of the compiler core:
//! - Spans and tokens for source locations
//! - Names for interned identifiers
//! - Handles for declarations (`FnId`, `StructId`)
//! - Attributes and directives attached verbatim by the parser
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers become `Name(u32)` for O(1) equality
//! - **Handles, not pointers**: declarations are addressed by dense `u32` ids
//! - **Thread-safe sharing**: the interner is `Sync` so analysis can fan out

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod attr;
mod ids;
mod interner;
mod name;
mod span;
mod token;

pub use attr::{Attribute, Directive};
pub use ids::{FnId, StructId};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use span::Span;
pub use token::Token;
