//! Jule Sema - the semantic half of the compiler core.
//!
//! Consumes a scope-resolved declaration set whose bodies were already type
//! checked, and produces everything the renderer needs:
//!
//! - **Declarations** (`Fn`, `Struct`) with their observed generic
//!   combinations (`Combines`)
//! - **Instances** (`FnIns`, `StructIns`, `FieldIns`) in a dense arena,
//!   created lazily by the `Instantiator` and cached per combination
//! - **Expression models** (`ExprModel`, `StmtModel`) built per instance by
//!   the `ExprModelBuilder`
//! - **Analysis** driving the whole thing to a fixed point, sequentially or
//!   in `rayon` waves
//!
//! Generic declarations that are never invoked never get an instance, so
//! they never reach the renderer.

mod analysis;
mod builder;
mod checked;
mod decl;
mod error;
mod instance;
mod model;

#[cfg(test)]
mod testing;

pub use analysis::{Analysis, AnalysisConfig, Analyzer};
pub use builder::ExprModelBuilder;
pub use checked::{CheckedBlock, CheckedExpr, CheckedNode, CheckedStmt, FieldInit, Literal};
pub use decl::{Combines, DeclTable, Field, Fn, FnFlags, Param, Struct};
pub use error::{SemaError, SemaErrorKind};
pub use instance::{
    FieldIns, FieldRef, FnIns, FnInsId, InstanceArena, Instantiator, ParamIns, StructIns,
    StructInsId,
};
pub use model::{
    BinaryOp, CastExpr, ExprModel, FieldAccess, FnCall, HeapStructLiteral, LocalRef,
    SliceLiteral, StmtModel, StructArg, StructLiteral, UnaryOp,
};
