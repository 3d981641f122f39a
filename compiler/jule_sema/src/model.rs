//! Expression and statement models.
//!
//! A closed sum type: every consumer matches exhaustively, so adding a variant
//! fails to compile until every renderer rule covers it. Children are always
//! fully resolved models; instances are referenced by handle.

use jule_ir::Name;
use jule_types::{CastIdiom, TypeKind};

use crate::{FieldRef, FnInsId, Literal, StructInsId};

/// A local variable or parameter.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct LocalRef {
    pub ident: Name,
}

/// `left op right`. `op` is the source operator text, verbatim.
#[derive(Clone, PartialEq, Debug)]
pub struct BinaryOp {
    pub left: Box<ExprModel>,
    pub right: Box<ExprModel>,
    pub op: String,
}

/// `op operand`.
#[derive(Clone, PartialEq, Debug)]
pub struct UnaryOp {
    pub operand: Box<ExprModel>,
    pub op: String,
}

/// One constructor argument bound to a resolved field.
#[derive(Clone, PartialEq, Debug)]
pub struct StructArg {
    pub field: FieldRef,
    pub value: ExprModel,
}

/// A struct literal. `args` follow field declaration order; omitted fields
/// have no argument.
#[derive(Clone, PartialEq, Debug)]
pub struct StructLiteral {
    pub strct: StructInsId,
    pub args: Vec<StructArg>,
}

/// A struct literal allocated on the heap.
#[derive(Clone, PartialEq, Debug)]
pub struct HeapStructLiteral {
    pub lit: StructLiteral,
}

/// A cast with both ends recorded.
#[derive(Clone, PartialEq, Debug)]
pub struct CastExpr {
    pub operand: Box<ExprModel>,
    /// Destination kind.
    pub kind: TypeKind,
    pub source_kind: TypeKind,
    pub idiom: CastIdiom,
}

/// A call bound to the exact instance; one argument per parameter.
#[derive(Clone, PartialEq, Debug)]
pub struct FnCall {
    pub func: FnInsId,
    pub args: Vec<ExprModel>,
}

/// Slice literal; the element kind is kept even when `elems` is empty.
#[derive(Clone, PartialEq, Debug)]
pub struct SliceLiteral {
    pub elem_kind: TypeKind,
    pub elems: Vec<ExprModel>,
}

/// `base.field`, or `base->field` when `base` is a pointer or reference.
#[derive(Clone, PartialEq, Debug)]
pub struct FieldAccess {
    pub base: Box<ExprModel>,
    pub field: FieldRef,
    pub through_pointer: bool,
}

#[derive(Clone, PartialEq, Debug)]
pub enum ExprModel {
    Lit(Literal),
    Ident(LocalRef),
    Binary(BinaryOp),
    Unary(UnaryOp),
    /// `&x` on a reference-typed `x`.
    TakeRef(Box<ExprModel>),
    StructLit(StructLiteral),
    HeapStructLit(HeapStructLiteral),
    Cast(CastExpr),
    Call(FnCall),
    Slice(SliceLiteral),
    Field(FieldAccess),
}

impl ExprModel {
    /// Visit this node and every nested model, parents first.
    pub fn walk(&self, f: &mut impl FnMut(&ExprModel)) {
        f(self);
        match self {
            ExprModel::Lit(_) | ExprModel::Ident(_) => {}
            ExprModel::Binary(b) => {
                b.left.walk(f);
                b.right.walk(f);
            }
            ExprModel::Unary(u) => u.operand.walk(f),
            ExprModel::TakeRef(inner) => inner.walk(f),
            ExprModel::StructLit(lit) | ExprModel::HeapStructLit(HeapStructLiteral { lit }) => {
                for arg in &lit.args {
                    arg.value.walk(f);
                }
            }
            ExprModel::Cast(c) => c.operand.walk(f),
            ExprModel::Call(call) => {
                for arg in &call.args {
                    arg.walk(f);
                }
            }
            ExprModel::Slice(s) => {
                for elem in &s.elems {
                    elem.walk(f);
                }
            }
            ExprModel::Field(access) => access.base.walk(f),
        }
    }

    /// Every function instance this expression calls.
    pub fn called_instances(&self) -> Vec<FnInsId> {
        let mut calls = Vec::new();
        self.walk(&mut |node| {
            if let ExprModel::Call(call) = node {
                calls.push(call.func);
            }
        });
        calls
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum StmtModel {
    Expr(ExprModel),
    Var {
        ident: Name,
        kind: TypeKind,
        init: Option<ExprModel>,
    },
    Assign {
        target: ExprModel,
        op: String,
        value: ExprModel,
    },
    Return(Option<ExprModel>),
    Block(Vec<StmtModel>),
    If {
        cond: ExprModel,
        then: Vec<StmtModel>,
        otherwise: Option<Vec<StmtModel>>,
    },
}
