//! Generic placeholder substitution.

use crate::{Combination, GenericParam, KindFolder, TypeKind};

/// Maps generic placeholder indices to concrete kinds.
///
/// Placeholders whose index is out of range are left in place so the caller
/// can detect them through `KindFlags::HAS_GENERIC`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Substitution<'a> {
    args: &'a [TypeKind],
}

impl<'a> Substitution<'a> {
    pub fn new(args: &'a Combination) -> Self {
        Substitution { args }
    }

    /// Apply to one kind. Kinds without placeholders are cloned untouched.
    pub fn apply(&self, kind: &TypeKind) -> TypeKind {
        if self.args.is_empty() || !kind.flags().needs_subst() {
            return kind.clone();
        }
        let mut folder = SubstFolder { args: self.args };
        folder.fold(kind)
    }

    /// Apply to an optional kind (function results).
    pub fn apply_opt(&self, kind: Option<&TypeKind>) -> Option<TypeKind> {
        kind.map(|k| self.apply(k))
    }
}

struct SubstFolder<'a> {
    args: &'a [TypeKind],
}

impl KindFolder for SubstFolder<'_> {
    fn fold_generic(&mut self, param: &GenericParam) -> TypeKind {
        match self.args.get(param.index as usize) {
            Some(concrete) => concrete.clone(),
            None => TypeKind::Generic(*param),
        }
    }
}
