//! Declaration fixtures shared by the unit tests.

use jule_ir::{FnId, Name, Span, StringInterner, StructId, Token};
use jule_types::{Prim, TypeKind};

use crate::{
    CheckedBlock, CheckedExpr, CheckedStmt, DeclTable, Field, FieldInit, Fn, Literal, Param,
    Struct,
};

pub(crate) fn tok(line: u32) -> Token {
    Token::new(Span::new(line * 100, line * 100 + 1), line, 1)
}

pub(crate) fn int() -> TypeKind {
    Prim::Int.into()
}

pub(crate) fn f64() -> TypeKind {
    Prim::F64.into()
}

pub(crate) fn int_lit(line: u32, value: i64) -> CheckedExpr {
    CheckedExpr::lit(tok(line), int(), Literal::Int(value))
}

pub(crate) fn float_lit(line: u32, value: f64) -> CheckedExpr {
    CheckedExpr::lit(tok(line), f64(), Literal::Float(value))
}

pub(crate) struct Fixture {
    pub interner: StringInterner,
    pub decls: DeclTable,
}

impl Fixture {
    pub fn new() -> Self {
        Fixture {
            interner: StringInterner::new(),
            decls: DeclTable::new(),
        }
    }

    pub fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    /// The `index`-th generic placeholder called `ident`.
    pub fn generic(&self, ident: &str, index: u32) -> TypeKind {
        TypeKind::generic(self.name(ident), index)
    }

    /// `fn max[T](a: T, b: T): T { if a > b { ret a }; ret b }`
    pub fn add_max(&mut self) -> FnId {
        let t = self.generic("T", 0);
        let a = CheckedExpr::ident(tok(2), t.clone(), self.name("a"));
        let b = CheckedExpr::ident(tok(2), t.clone(), self.name("b"));
        let body = CheckedBlock::new(vec![
            CheckedStmt::If {
                cond: CheckedExpr::binary(tok(2), Prim::Bool.into(), ">", a.clone(), b.clone()),
                then: CheckedBlock::new(vec![CheckedStmt::Return {
                    token: tok(2),
                    value: Some(a),
                }]),
                otherwise: None,
            },
            CheckedStmt::Return {
                token: tok(3),
                value: Some(b),
            },
        ]);
        let decl = Fn::new(tok(1), self.name("max"))
            .with_generics(vec![self.name("T")])
            .with_params(vec![
                Param::new(tok(1), self.name("a"), t.clone()),
                Param::new(tok(1), self.name("b"), t.clone()),
            ])
            .with_result(t)
            .with_body(body);
        self.decls.add_fn(decl)
    }

    /// `struct Point { x: int, y: int }`
    pub fn add_point(&mut self) -> StructId {
        let decl = Struct::new(tok(1), self.name("Point"))
            .with_field(Field::new(tok(1), self.name("x"), int()))
            .with_field(Field::new(tok(1), self.name("y"), int()));
        self.decls.add_struct(decl)
    }

    /// `struct Pair[T] { first: T, second: T }`
    pub fn add_pair(&mut self) -> StructId {
        let t = self.generic("T", 0);
        let decl = Struct::new(tok(1), self.name("Pair"))
            .with_generics(vec![self.name("T")])
            .with_field(Field::new(tok(1), self.name("first"), t.clone()))
            .with_field(Field::new(tok(1), self.name("second"), t));
        self.decls.add_struct(decl)
    }

    pub fn point_kind(&self, id: StructId) -> TypeKind {
        TypeKind::strct(id, self.name("Point"), vec![])
    }

    pub fn init(&self, line: u32, field: &str, value: CheckedExpr) -> FieldInit {
        FieldInit {
            token: tok(line),
            ident: self.name(field),
            value,
        }
    }

    /// A call of `callee` with inferred generics.
    pub fn call(
        &self,
        line: u32,
        result: TypeKind,
        callee: FnId,
        args: Vec<CheckedExpr>,
    ) -> CheckedExpr {
        CheckedExpr::call(tok(line), result, callee, vec![], args)
    }

    /// `fn <ident>() { <stmts> }`
    pub fn add_main_like(&mut self, ident: &str, stmts: Vec<CheckedStmt>) -> FnId {
        let decl = Fn::new(tok(10), self.name(ident)).with_body(CheckedBlock::new(stmts));
        self.decls.add_fn(decl)
    }
}
