//! Jule Types - the canonical description of every type the core handles.
//!
//! This crate is the leaf of the semantic pipeline:
//! - `TypeKind`: structural enum over primitives, structs, pointers,
//!   references, slices, function signatures and generic placeholders
//! - `KindFolder` / `KindVisitor`: structural traversal
//! - `KindFlags`: cached-on-demand properties (placeholders, `any`, ...)
//! - `Substitution`: replaces generic placeholders with concrete kinds
//! - `CastIdiom`: which target cast form a conversion needs
//! - `mangle`: instance identifiers for monomorphized declarations

mod cast;
mod flags;
mod kind;
mod mangle;
mod subst;
mod traverse;

pub use cast::{classify_cast, CastError, CastIdiom};
pub use flags::KindFlags;
pub use kind::{Combination, FnSig, GenericParam, KindDisplay, Prim, StructRef, TypeKind};
pub use mangle::{instance_ident, mangle_kind, qualified_instance_ident};
pub use subst::Substitution;
pub use traverse::{KindFolder, KindVisitor};
