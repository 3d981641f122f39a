//! Input interface: bodies after type checking.
//!
//! The checker (outside this crate) annotates every expression node with its
//! token and its resolved `TypeKind`. Inside a generic declaration those
//! kinds may still contain placeholders; they are substituted per instance.

use jule_ir::{FnId, Name, Token};
use jule_types::TypeKind;

/// A literal value, already validated by the checker.
#[derive(Clone, PartialEq, Debug)]
pub enum Literal {
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Str(Name),
    Nil,
}

/// One `field: value` initializer of a struct literal.
#[derive(Clone, PartialEq, Debug)]
pub struct FieldInit {
    pub token: Token,
    pub ident: Name,
    pub value: CheckedExpr,
}

/// Expression shapes the checker hands over.
#[derive(Clone, PartialEq, Debug)]
pub enum CheckedNode {
    Lit(Literal),
    /// A local variable or parameter.
    Ident(Name),
    Binary {
        op: String,
        left: Box<CheckedExpr>,
        right: Box<CheckedExpr>,
    },
    Unary {
        op: String,
        operand: Box<CheckedExpr>,
    },
    /// `&operand`.
    Ref(Box<CheckedExpr>),
    /// The struct (and its type arguments) is the node's kind.
    StructLit(Vec<FieldInit>),
    /// The destination is the node's kind.
    Cast(Box<CheckedExpr>),
    Call {
        callee: FnId,
        /// Explicit type arguments; empty requests inference.
        type_args: Vec<TypeKind>,
        args: Vec<CheckedExpr>,
    },
    /// The node's kind is the slice kind.
    Slice(Vec<CheckedExpr>),
    Field {
        base: Box<CheckedExpr>,
        ident: Name,
    },
}

/// A checked expression: source token, resolved kind and shape.
#[derive(Clone, PartialEq, Debug)]
pub struct CheckedExpr {
    pub token: Token,
    pub kind: TypeKind,
    pub node: CheckedNode,
}

impl CheckedExpr {
    pub fn new(token: Token, kind: TypeKind, node: CheckedNode) -> Self {
        CheckedExpr { token, kind, node }
    }

    pub fn lit(token: Token, kind: TypeKind, lit: Literal) -> Self {
        Self::new(token, kind, CheckedNode::Lit(lit))
    }

    pub fn ident(token: Token, kind: TypeKind, ident: Name) -> Self {
        Self::new(token, kind, CheckedNode::Ident(ident))
    }

    pub fn binary(
        token: Token,
        kind: TypeKind,
        op: &str,
        left: CheckedExpr,
        right: CheckedExpr,
    ) -> Self {
        Self::new(
            token,
            kind,
            CheckedNode::Binary {
                op: op.to_string(),
                left: Box::new(left),
                right: Box::new(right),
            },
        )
    }

    pub fn unary(token: Token, kind: TypeKind, op: &str, operand: CheckedExpr) -> Self {
        Self::new(
            token,
            kind,
            CheckedNode::Unary {
                op: op.to_string(),
                operand: Box::new(operand),
            },
        )
    }

    pub fn reference(token: Token, kind: TypeKind, operand: CheckedExpr) -> Self {
        Self::new(token, kind, CheckedNode::Ref(Box::new(operand)))
    }

    pub fn struct_lit(token: Token, kind: TypeKind, inits: Vec<FieldInit>) -> Self {
        Self::new(token, kind, CheckedNode::StructLit(inits))
    }

    pub fn cast(token: Token, target: TypeKind, operand: CheckedExpr) -> Self {
        Self::new(token, target, CheckedNode::Cast(Box::new(operand)))
    }

    pub fn call(
        token: Token,
        kind: TypeKind,
        callee: FnId,
        type_args: Vec<TypeKind>,
        args: Vec<CheckedExpr>,
    ) -> Self {
        Self::new(
            token,
            kind,
            CheckedNode::Call {
                callee,
                type_args,
                args,
            },
        )
    }

    pub fn slice(token: Token, kind: TypeKind, elems: Vec<CheckedExpr>) -> Self {
        Self::new(token, kind, CheckedNode::Slice(elems))
    }

    pub fn field(token: Token, kind: TypeKind, base: CheckedExpr, ident: Name) -> Self {
        Self::new(
            token,
            kind,
            CheckedNode::Field {
                base: Box::new(base),
                ident,
            },
        )
    }
}

/// Statements of a checked body.
#[derive(Clone, PartialEq, Debug)]
pub enum CheckedStmt {
    Expr(CheckedExpr),
    Var {
        token: Token,
        ident: Name,
        kind: TypeKind,
        init: Option<CheckedExpr>,
    },
    Assign {
        token: Token,
        op: String,
        target: CheckedExpr,
        value: CheckedExpr,
    },
    Return {
        token: Token,
        value: Option<CheckedExpr>,
    },
    Block(CheckedBlock),
    If {
        cond: CheckedExpr,
        then: CheckedBlock,
        otherwise: Option<CheckedBlock>,
    },
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct CheckedBlock {
    pub stmts: Vec<CheckedStmt>,
}

impl CheckedBlock {
    pub fn new(stmts: Vec<CheckedStmt>) -> Self {
        CheckedBlock { stmts }
    }
}
