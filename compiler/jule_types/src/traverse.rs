//! Kind traversal traits.
//!
//! - `KindFolder`: rebuilds a kind, overriding selected variants
//! - `KindVisitor`: walks a kind to collect information

use crate::{FnSig, GenericParam, Prim, StructRef, TypeKind};

/// Generate fold/visit methods for single-inner-kind wrappers.
macro_rules! impl_single_inner_kind_methods {
    (fold: $( ($method:ident, $variant:ident, $doc:literal) ),+ $(,)?) => {
        $(
            #[doc = $doc]
            fn $method(&mut self, inner: &TypeKind) -> TypeKind {
                TypeKind::$variant(Box::new(self.fold(inner)))
            }
        )+
    };
    (visit: $( ($method:ident, $doc:literal) ),+ $(,)?) => {
        $(
            #[doc = $doc]
            fn $method(&mut self, inner: &TypeKind) {
                self.visit(inner);
            }
        )+
    };
}

/// Trait for transforming kinds via structural recursion.
///
/// Override specific `fold_*` methods to customize behavior for particular
/// variants; `fold` dispatches to them.
///
/// # Example
///
/// ```text
/// struct Erase;
///
/// impl KindFolder for Erase {
///     fn fold_generic(&mut self, _param: &GenericParam) -> TypeKind {
///         TypeKind::Prim(Prim::Any)
///     }
/// }
/// ```
pub trait KindFolder {
    /// Fold a kind by dispatching to variant-specific methods.
    fn fold(&mut self, kind: &TypeKind) -> TypeKind {
        match kind {
            TypeKind::Prim(p) => self.fold_prim(*p),
            TypeKind::Struct(s) => self.fold_struct(s),
            TypeKind::Ptr(inner) => self.fold_ptr(inner),
            TypeKind::Ref(inner) => self.fold_ref(inner),
            TypeKind::Slice(elem) => self.fold_slice(elem),
            TypeKind::Fn(sig) => self.fold_fn(sig),
            TypeKind::Generic(g) => self.fold_generic(g),
        }
    }

    fn fold_prim(&mut self, prim: Prim) -> TypeKind {
        TypeKind::Prim(prim)
    }

    /// Fold a struct reference. Default folds its type arguments.
    fn fold_struct(&mut self, strct: &StructRef) -> TypeKind {
        TypeKind::Struct(StructRef {
            id: strct.id,
            ident: strct.ident,
            args: strct.args.iter().map(|a| self.fold(a)).collect(),
        })
    }

    impl_single_inner_kind_methods!(fold:
        (fold_ptr, Ptr, "Fold a pointer kind. Default folds the pointee."),
        (fold_ref, Ref, "Fold a reference kind. Default folds the referent."),
        (fold_slice, Slice, "Fold a slice kind. Default folds the element."),
    );

    /// Fold a function signature. Default folds params and result.
    fn fold_fn(&mut self, sig: &FnSig) -> TypeKind {
        TypeKind::Fn(FnSig {
            params: sig.params.iter().map(|p| self.fold(p)).collect(),
            result: sig.result.as_ref().map(|r| Box::new(self.fold(r))),
        })
    }

    /// Fold a generic placeholder. Default leaves it in place.
    fn fold_generic(&mut self, param: &GenericParam) -> TypeKind {
        TypeKind::Generic(*param)
    }
}

/// Trait for visiting kinds without modification.
pub trait KindVisitor {
    /// Visit a kind by dispatching to variant-specific methods.
    fn visit(&mut self, kind: &TypeKind) {
        match kind {
            TypeKind::Prim(p) => self.visit_prim(*p),
            TypeKind::Struct(s) => self.visit_struct(s),
            TypeKind::Ptr(inner) => self.visit_ptr(inner),
            TypeKind::Ref(inner) => self.visit_ref(inner),
            TypeKind::Slice(elem) => self.visit_slice(elem),
            TypeKind::Fn(sig) => self.visit_fn(sig),
            TypeKind::Generic(g) => self.visit_generic(g),
        }
    }

    fn visit_prim(&mut self, _prim: Prim) {}

    /// Visit a struct reference. Default visits its type arguments.
    fn visit_struct(&mut self, strct: &StructRef) {
        for arg in &strct.args {
            self.visit(arg);
        }
    }

    impl_single_inner_kind_methods!(visit:
        (visit_ptr, "Visit a pointer kind. Default visits the pointee."),
        (visit_ref, "Visit a reference kind. Default visits the referent."),
        (visit_slice, "Visit a slice kind. Default visits the element."),
    );

    /// Visit a function signature. Default visits params and result.
    fn visit_fn(&mut self, sig: &FnSig) {
        for p in &sig.params {
            self.visit(p);
        }
        if let Some(result) = &sig.result {
            self.visit(result);
        }
    }

    fn visit_generic(&mut self, _param: &GenericParam) {}
}
