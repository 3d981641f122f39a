//! Generic instantiation.
//!
//! The `Instantiator` turns `(declaration, combination)` pairs into instances.
//! It is shared by reference across analysis workers:
//! - each declaration's `Combines` is guarded by its own mutex
//! - the arena (and its per-combination cache) sits behind one `RwLock`;
//!   lookups take the read lock, creation re-checks under the write lock
//!
//! Every struct kind reachable from a new instance is instantiated as well,
//! so every struct the renderer names has a definition.

mod arena;
mod infer;

use parking_lot::{Mutex, RwLock, RwLockReadGuard};
use rustc_hash::FxHashSet;

use jule_ir::{FnId, Name, StringInterner, StructId, Token};
use jule_types::{
    instance_ident, qualified_instance_ident, Combination, KindFlags, KindVisitor, StructRef,
    Substitution, TypeKind,
};

use crate::{DeclTable, SemaError, SemaErrorKind};

pub use arena::{
    FieldIns, FieldRef, FnIns, FnInsId, InstanceArena, ParamIns, StructIns, StructInsId,
};

use infer::{infer_combination, InferError};

/// Creates and caches instances for one compilation.
pub struct Instantiator<'a> {
    decls: &'a DeclTable,
    interner: &'a StringInterner,
    /// Per-declaration bound on distinct combinations (0 = unlimited).
    max_combinations: usize,
    /// Identifiers of every declaration, which instance names must avoid.
    declared: FxHashSet<&'static str>,
    arena: RwLock<InstanceArena>,
    /// New function instances whose bodies still need modeling.
    pending: Mutex<Vec<FnInsId>>,
}

impl<'a> Instantiator<'a> {
    pub fn new(
        decls: &'a DeclTable,
        interner: &'a StringInterner,
        max_combinations: usize,
    ) -> Self {
        let declared = decls
            .fns()
            .map(|(_, f)| f.ident)
            .chain(decls.structs().map(|(_, s)| s.ident))
            .map(|ident| interner.lookup(ident))
            .collect();
        Instantiator {
            decls,
            interner,
            max_combinations,
            declared,
            arena: RwLock::new(InstanceArena::new()),
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn decls(&self) -> &'a DeclTable {
        self.decls
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    /// Read access to the instances created so far.
    pub fn arena(&self) -> RwLockReadGuard<'_, InstanceArena> {
        self.arena.read()
    }

    /// Drain the instances created since the last call.
    pub fn take_pending(&self) -> Vec<FnInsId> {
        std::mem::take(&mut *self.pending.lock())
    }

    pub fn into_arena(self) -> InstanceArena {
        self.arena.into_inner()
    }

    /// Instantiate a function for one call site.
    ///
    /// Empty `type_args` on a generic declaration requests inference from
    /// `arg_kinds` (the substituted kinds of the call's arguments).
    /// Structurally equal combinations always yield the same handle.
    pub fn instantiate_fn(
        &self,
        fn_id: FnId,
        type_args: &[TypeKind],
        arg_kinds: &[TypeKind],
        token: Token,
    ) -> Result<FnInsId, SemaError> {
        let decl = self.decls.fn_decl(fn_id);
        let combination = self.combination_for(
            decl.ident,
            &decl.generics,
            type_args,
            || {
                let params = decl.params.iter().map(|p| &p.kind);
                infer_combination(decl.generics.len(), params, arg_kinds)
            },
            token,
        )?;

        if let Some(id) = self.arena.read().lookup_fn(fn_id, &combination) {
            return Ok(id);
        }

        let (combine_index, _) = decl
            .record_combination(combination.clone(), self.max_combinations)
            .map_err(|limit| {
                SemaError::new(
                    SemaErrorKind::InstantiationLimit {
                        decl: decl.ident,
                        limit,
                    },
                    token,
                )
            })?;

        let subst = Substitution::new(&combination);
        let params = decl
            .params
            .iter()
            .map(|p| ParamIns {
                token: p.token,
                ident: p.ident,
                kind: subst.apply(&p.kind),
                mutable: p.mutable,
            })
            .collect();
        let result = subst.apply_opt(decl.result.as_ref());
        let link_ident = self.link_ident(decl.ident, 'd', fn_id.raw(), &combination);
        let ins = FnIns {
            decl: fn_id,
            combine_index,
            generics: combination,
            params,
            result,
            link_ident,
        };
        let signature: Vec<TypeKind> = ins
            .params
            .iter()
            .map(|p| p.kind.clone())
            .chain(ins.result.clone())
            .collect();

        let (id, is_new) = self.arena.write().insert_fn(ins);
        if is_new {
            tracing::trace!(?fn_id, combine_index, "new function instance");
            if decl.scope.is_some() && !decl.is_cpp_linked() {
                self.pending.lock().push(id);
            }
            self.instantiate_reachable_structs(&signature, token)?;
        }
        Ok(id)
    }

    /// Instantiate a struct with explicit type arguments.
    pub fn instantiate_struct(
        &self,
        struct_id: StructId,
        type_args: &[TypeKind],
        token: Token,
    ) -> Result<StructInsId, SemaError> {
        let decl = self.decls.struct_decl(struct_id);
        let combination = self.combination_for(
            decl.ident,
            &decl.generics,
            type_args,
            || Err(InferError::Unbound(0)),
            token,
        )?;

        if let Some(id) = self.arena.read().lookup_struct(struct_id, &combination) {
            return Ok(id);
        }

        let (combine_index, _) = decl
            .record_combination(combination.clone(), self.max_combinations)
            .map_err(|limit| {
                SemaError::new(
                    SemaErrorKind::InstantiationLimit {
                        decl: decl.ident,
                        limit,
                    },
                    token,
                )
            })?;

        let subst = Substitution::new(&combination);
        let fields: Vec<FieldIns> = decl
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| FieldIns {
                owner: StructInsId::new(0),
                index: u32::try_from(i).unwrap_or(u32::MAX),
                ident: f.ident,
                kind: subst.apply(&f.kind),
            })
            .collect();
        let field_kinds: Vec<TypeKind> = fields.iter().map(|f| f.kind.clone()).collect();
        let link_ident = self.link_ident(decl.ident, 't', struct_id.raw(), &combination);
        let ins = StructIns {
            decl: struct_id,
            combine_index,
            generics: combination,
            fields,
            link_ident,
        };

        let (id, is_new) = self.arena.write().insert_struct(ins);
        if is_new {
            tracing::trace!(?struct_id, combine_index, "new struct instance");
            self.instantiate_reachable_structs(&field_kinds, token)?;
        }
        Ok(id)
    }

    /// Instantiate the struct a kind names.
    pub fn instantiate_struct_ref(
        &self,
        strct: &StructRef,
        token: Token,
    ) -> Result<StructInsId, SemaError> {
        self.instantiate_struct(strct.id, &strct.args, token)
    }

    /// Name of the instance of a declaration under `combination`.
    ///
    /// The readable form is used unless its base already contains `__` or
    /// it spells another declaration's identifier; then the qualified form
    /// is used, which nothing else can spell.
    fn link_ident(&self, ident: Name, tag: char, index: u32, combination: &[TypeKind]) -> String {
        let base = self.interner.lookup(ident);
        if combination.is_empty() {
            return base.to_string();
        }
        let plain = instance_ident(self.interner, base, combination);
        if base.contains("__") || self.declared.contains(plain.as_str()) {
            qualified_instance_ident(self.interner, base, tag, index, combination)
        } else {
            plain
        }
    }

    /// Validate explicit type arguments or run inference.
    fn combination_for(
        &self,
        decl: Name,
        generics: &[Name],
        type_args: &[TypeKind],
        infer: impl FnOnce() -> Result<Combination, InferError>,
        token: Token,
    ) -> Result<Combination, SemaError> {
        let uninferable = |index: usize| {
            SemaError::new(
                SemaErrorKind::UninferableGenerics {
                    decl,
                    generic: generics.get(index).copied().unwrap_or(Name::EMPTY),
                },
                token,
            )
        };

        let combination = if type_args.is_empty() && !generics.is_empty() {
            infer().map_err(|e| uninferable(e.generic_index()))?
        } else if type_args.len() == generics.len() {
            type_args.to_vec()
        } else {
            return Err(SemaError::new(
                SemaErrorKind::GenericArityMismatch {
                    decl,
                    expected: generics.len(),
                    found: type_args.len(),
                },
                token,
            ));
        };

        if let Some(index) = combination.iter().position(TypeKind::has_generic) {
            return Err(uninferable(index));
        }
        Ok(combination)
    }

    /// Instantiate every struct nested in `kinds`.
    pub(crate) fn instantiate_reachable_structs(
        &self,
        kinds: &[TypeKind],
        token: Token,
    ) -> Result<(), SemaError> {
        let mut collector = StructCollector::default();
        for kind in kinds.iter().filter(|k| k.flags().contains(KindFlags::HAS_STRUCT)) {
            collector.visit(kind);
        }
        for strct in collector.found {
            self.instantiate_struct_ref(&strct, token)?;
        }
        Ok(())
    }
}

/// Collects every struct kind nested in a kind, outermost first.
#[derive(Default)]
struct StructCollector {
    found: Vec<StructRef>,
}

impl KindVisitor for StructCollector {
    fn visit_struct(&mut self, strct: &StructRef) {
        if !self.found.contains(strct) {
            self.found.push(strct.clone());
        }
        for arg in &strct.args {
            self.visit(arg);
        }
    }
}
