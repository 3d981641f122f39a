//! Expression model builder.
//!
//! Walks one checked body under one instance's substitution and produces the
//! models the renderer consumes. Calls and struct kinds met on the way are
//! instantiated, which is how the analysis discovers new work.

use jule_ir::{FnId, Name, Token};
use jule_types::{classify_cast, CastError, Combination, Substitution, TypeKind};

use crate::{
    BinaryOp, CastExpr, CheckedBlock, CheckedExpr, CheckedNode, CheckedStmt, ExprModel,
    FieldAccess, FieldInit, FieldRef, FnCall, FnInsId, HeapStructLiteral, Instantiator, LocalRef,
    SemaError, SemaErrorKind, SliceLiteral, StmtModel, StructArg, StructLiteral, UnaryOp,
};

pub struct ExprModelBuilder<'i, 'a> {
    instantiator: &'i Instantiator<'a>,
    /// Substitution of the instance being modeled.
    generics: Combination,
    /// Result kind of the instance, expected by `return`.
    result: Option<TypeKind>,
    unsafe_ctx: bool,
    instance: Option<FnInsId>,
    errors: Vec<SemaError>,
}

impl<'i, 'a> ExprModelBuilder<'i, 'a> {
    /// Builder for code outside any generic instance, in a safe context.
    pub fn new(instantiator: &'i Instantiator<'a>) -> Self {
        ExprModelBuilder {
            instantiator,
            generics: Vec::new(),
            result: None,
            unsafe_ctx: false,
            instance: None,
            errors: Vec::new(),
        }
    }

    /// Builder for the body of one function instance.
    pub fn for_instance(instantiator: &'i Instantiator<'a>, id: FnInsId) -> Self {
        let (decl, generics, result) = {
            let arena = instantiator.arena();
            let ins = arena.fn_ins(id);
            (ins.decl, ins.generics.clone(), ins.result.clone())
        };
        ExprModelBuilder {
            instantiator,
            generics,
            result,
            unsafe_ctx: instantiator.decls().fn_decl(decl).is_unsafe(),
            instance: Some(id),
            errors: Vec::new(),
        }
    }

    /// Errors recorded by `build_block`.
    pub fn finish(self) -> Vec<SemaError> {
        self.errors
    }

    fn resolve(&self, kind: &TypeKind) -> TypeKind {
        Substitution::new(&self.generics).apply(kind)
    }

    #[cold]
    fn error(&self, kind: SemaErrorKind, token: Token) -> SemaError {
        let err = SemaError::new(kind, token);
        match self.instance {
            Some(id) => err.with_instance(id),
            None => err,
        }
    }

    fn attach(&self, err: SemaError) -> SemaError {
        match (err.instance, self.instance) {
            (None, Some(id)) => err.with_instance(id),
            _ => err,
        }
    }

    /// Make sure every struct named by `kind` has an instance.
    fn require_structs(&self, kind: &TypeKind, token: Token) -> Result<(), SemaError> {
        self.instantiator
            .instantiate_reachable_structs(std::slice::from_ref(kind), token)
            .map_err(|e| self.attach(e))
    }

    /// Model one expression. `expected` is the resolved kind the context
    /// wants (parameter, variable, field or result kind).
    pub fn build_expr(
        &mut self,
        expr: &CheckedExpr,
        expected: Option<&TypeKind>,
    ) -> Result<ExprModel, SemaError> {
        match &expr.node {
            CheckedNode::Lit(lit) => Ok(ExprModel::Lit(lit.clone())),
            CheckedNode::Ident(ident) => Ok(ExprModel::Ident(LocalRef { ident: *ident })),
            CheckedNode::Binary { op, left, right } => Ok(ExprModel::Binary(BinaryOp {
                left: Box::new(self.build_expr(left, None)?),
                right: Box::new(self.build_expr(right, None)?),
                op: op.clone(),
            })),
            CheckedNode::Unary { op, operand } => Ok(ExprModel::Unary(UnaryOp {
                operand: Box::new(self.build_expr(operand, None)?),
                op: op.clone(),
            })),
            CheckedNode::Ref(operand) => self.build_ref(expr.token, operand),
            CheckedNode::StructLit(inits) => {
                let kind = self.resolve(&expr.kind);
                let lit = self.build_struct_lit(expr.token, &kind, inits)?;
                let wants_heap = expected
                    .and_then(TypeKind::pointee)
                    .is_some_and(|pointee| *pointee == kind);
                Ok(if wants_heap {
                    ExprModel::HeapStructLit(HeapStructLiteral { lit })
                } else {
                    ExprModel::StructLit(lit)
                })
            }
            CheckedNode::Cast(operand) => self.build_cast(expr, operand),
            CheckedNode::Call {
                callee,
                type_args,
                args,
            } => self.build_call(expr.token, *callee, type_args, args),
            CheckedNode::Slice(elems) => {
                let elem_kind = match self.resolve(&expr.kind) {
                    TypeKind::Slice(elem) => *elem,
                    // The checker only produces slice literals of slice kind.
                    other => other,
                };
                self.require_structs(&elem_kind, expr.token)?;
                let elems = elems
                    .iter()
                    .map(|e| self.build_expr(e, Some(&elem_kind)))
                    .collect::<Result<_, _>>()?;
                Ok(ExprModel::Slice(SliceLiteral { elem_kind, elems }))
            }
            CheckedNode::Field { base, ident } => self.build_field(expr.token, base, *ident),
        }
    }

    fn build_ref(&mut self, token: Token, operand: &CheckedExpr) -> Result<ExprModel, SemaError> {
        if let CheckedNode::StructLit(inits) = &operand.node {
            let kind = self.resolve(&operand.kind);
            let lit = self.build_struct_lit(operand.token, &kind, inits)?;
            return Ok(ExprModel::HeapStructLit(HeapStructLiteral { lit }));
        }

        let kind = self.resolve(&operand.kind);
        if !kind.is_ref() {
            return Err(self.error(SemaErrorKind::InvalidReferenceTarget { kind }, token));
        }
        Ok(ExprModel::TakeRef(Box::new(self.build_expr(operand, None)?)))
    }

    fn build_struct_lit(
        &mut self,
        token: Token,
        kind: &TypeKind,
        inits: &[FieldInit],
    ) -> Result<StructLiteral, SemaError> {
        let Some(strct) = kind.as_struct() else {
            let field = inits.first().map_or(Name::EMPTY, |i| i.ident);
            return Err(self.error(
                SemaErrorKind::UnresolvedFieldInitializer {
                    strct: Name::EMPTY,
                    field,
                },
                token,
            ));
        };
        let sid = self
            .instantiator
            .instantiate_struct_ref(strct, token)
            .map_err(|e| self.attach(e))?;
        let fields: Vec<(Name, TypeKind)> = {
            let arena = self.instantiator.arena();
            arena
                .struct_ins(sid)
                .fields
                .iter()
                .map(|f| (f.ident, f.kind.clone()))
                .collect()
        };

        let mut values: Vec<Option<ExprModel>> = vec![None; fields.len()];
        for init in inits {
            let Some(index) = fields.iter().position(|(ident, _)| *ident == init.ident) else {
                return Err(self.error(
                    SemaErrorKind::UnresolvedFieldInitializer {
                        strct: strct.ident,
                        field: init.ident,
                    },
                    init.token,
                ));
            };
            if values[index].is_some() {
                return Err(self.error(
                    SemaErrorKind::DuplicateFieldInitializer {
                        strct: strct.ident,
                        field: init.ident,
                    },
                    init.token,
                ));
            }
            values[index] = Some(self.build_expr(&init.value, Some(&fields[index].1))?);
        }

        let args = values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| {
                value.map(|value| StructArg {
                    field: FieldRef {
                        strct: sid,
                        index: u32::try_from(index).unwrap_or(u32::MAX),
                    },
                    value,
                })
            })
            .collect();
        Ok(StructLiteral { strct: sid, args })
    }

    fn build_cast(
        &mut self,
        expr: &CheckedExpr,
        operand: &CheckedExpr,
    ) -> Result<ExprModel, SemaError> {
        let kind = self.resolve(&expr.kind);
        let source_kind = self.resolve(&operand.kind);
        let unsupported = |needs_unsafe: bool| SemaErrorKind::UnsupportedCast {
            from: source_kind.clone(),
            to: kind.clone(),
            needs_unsafe,
        };

        let idiom = match classify_cast(&source_kind, &kind) {
            Ok(idiom) => idiom,
            Err(CastError::Unresolved | CastError::NoConversion) => {
                return Err(self.error(unsupported(false), expr.token));
            }
        };
        if idiom.requires_unsafe() && !self.unsafe_ctx {
            return Err(self.error(unsupported(true), expr.token));
        }
        self.require_structs(&kind, expr.token)?;

        Ok(ExprModel::Cast(CastExpr {
            operand: Box::new(self.build_expr(operand, None)?),
            kind,
            source_kind,
            idiom,
        }))
    }

    fn build_call(
        &mut self,
        token: Token,
        callee: FnId,
        type_args: &[TypeKind],
        args: &[CheckedExpr],
    ) -> Result<ExprModel, SemaError> {
        let decl = self.instantiator.decls().fn_decl(callee);
        if args.len() != decl.params.len() {
            return Err(self.error(
                SemaErrorKind::ArgumentCountMismatch {
                    decl: decl.ident,
                    expected: decl.params.len(),
                    found: args.len(),
                },
                token,
            ));
        }

        let type_args: Vec<TypeKind> = type_args.iter().map(|k| self.resolve(k)).collect();
        let arg_kinds: Vec<TypeKind> = args.iter().map(|a| self.resolve(&a.kind)).collect();
        let func = self
            .instantiator
            .instantiate_fn(callee, &type_args, &arg_kinds, token)
            .map_err(|e| self.attach(e))?;
        let param_kinds: Vec<TypeKind> = {
            let arena = self.instantiator.arena();
            arena
                .fn_ins(func)
                .params
                .iter()
                .map(|p| p.kind.clone())
                .collect()
        };

        let args = args
            .iter()
            .zip(&param_kinds)
            .map(|(arg, param)| self.build_expr(arg, Some(param)))
            .collect::<Result<_, _>>()?;
        Ok(ExprModel::Call(FnCall { func, args }))
    }

    fn build_field(
        &mut self,
        token: Token,
        base: &CheckedExpr,
        ident: Name,
    ) -> Result<ExprModel, SemaError> {
        let base_kind = self.resolve(&base.kind);
        let Some(strct) = base_kind.struct_behind_indirection() else {
            return Err(self.error(
                SemaErrorKind::UnresolvedFieldInitializer {
                    strct: Name::EMPTY,
                    field: ident,
                },
                token,
            ));
        };
        let sid = self
            .instantiator
            .instantiate_struct_ref(strct, token)
            .map_err(|e| self.attach(e))?;
        let index = self.instantiator.arena().struct_ins(sid).field_index(ident);
        let Some(index) = index else {
            return Err(self.error(
                SemaErrorKind::UnresolvedFieldInitializer {
                    strct: strct.ident,
                    field: ident,
                },
                token,
            ));
        };

        Ok(ExprModel::Field(FieldAccess {
            base: Box::new(self.build_expr(base, None)?),
            field: FieldRef {
                strct: sid,
                index: u32::try_from(index).unwrap_or(u32::MAX),
            },
            through_pointer: base_kind.pointee().is_some(),
        }))
    }

    /// Model a block. A statement that fails is recorded and dropped; the
    /// rest of the block is still modeled.
    pub fn build_block(&mut self, block: &CheckedBlock) -> Vec<StmtModel> {
        let mut stmts = Vec::with_capacity(block.stmts.len());
        for stmt in &block.stmts {
            match self.build_stmt(stmt) {
                Ok(model) => stmts.push(model),
                Err(err) => self.errors.push(err),
            }
        }
        stmts
    }

    pub fn build_stmt(&mut self, stmt: &CheckedStmt) -> Result<StmtModel, SemaError> {
        match stmt {
            CheckedStmt::Expr(expr) => Ok(StmtModel::Expr(self.build_expr(expr, None)?)),
            CheckedStmt::Var {
                token,
                ident,
                kind,
                init,
            } => {
                let kind = self.resolve(kind);
                self.require_structs(&kind, *token)?;
                let init = init
                    .as_ref()
                    .map(|e| self.build_expr(e, Some(&kind)))
                    .transpose()?;
                Ok(StmtModel::Var {
                    ident: *ident,
                    kind,
                    init,
                })
            }
            CheckedStmt::Assign {
                op, target, value, ..
            } => {
                let target_kind = self.resolve(&target.kind);
                Ok(StmtModel::Assign {
                    target: self.build_expr(target, None)?,
                    op: op.clone(),
                    value: self.build_expr(value, Some(&target_kind))?,
                })
            }
            CheckedStmt::Return { value, .. } => {
                let result = self.result.clone();
                let value = value
                    .as_ref()
                    .map(|e| self.build_expr(e, result.as_ref()))
                    .transpose()?;
                Ok(StmtModel::Return(value))
            }
            CheckedStmt::Block(block) => Ok(StmtModel::Block(self.build_block(block))),
            CheckedStmt::If {
                cond,
                then,
                otherwise,
            } => Ok(StmtModel::If {
                cond: self.build_expr(cond, None)?,
                then: self.build_block(then),
                otherwise: otherwise.as_ref().map(|b| self.build_block(b)),
            }),
        }
    }
}
