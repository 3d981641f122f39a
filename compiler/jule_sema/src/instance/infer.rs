//! Type-argument inference by parameter-position matching.
//!
//! Each parameter kind is matched structurally against the kind of the
//! argument in the same position; every placeholder met on the parameter side
//! binds to the corresponding part of the argument kind.

use jule_types::{Combination, TypeKind};

/// Why inference failed; carries the generic index.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum InferError {
    /// Nothing bound this generic.
    Unbound(u32),
    /// Two positions bound this generic to different kinds.
    Conflict(u32),
}

impl InferError {
    pub(crate) fn generic_index(self) -> usize {
        match self {
            InferError::Unbound(i) | InferError::Conflict(i) => i as usize,
        }
    }
}

pub(crate) fn infer_combination<'k>(
    generic_count: usize,
    params: impl IntoIterator<Item = &'k TypeKind>,
    arg_kinds: &[TypeKind],
) -> Result<Combination, InferError> {
    let mut bindings = Bindings {
        slots: vec![None; generic_count],
    };
    for (param, arg) in params.into_iter().zip(arg_kinds) {
        bindings.bind(param, arg)?;
    }
    bindings.finish()
}

struct Bindings {
    slots: Vec<Option<TypeKind>>,
}

impl Bindings {
    fn bind(&mut self, pattern: &TypeKind, actual: &TypeKind) -> Result<(), InferError> {
        match (pattern, actual) {
            (TypeKind::Generic(g), _) => {
                // An unresolved argument kind cannot bind anything.
                if actual.has_generic() {
                    return Ok(());
                }
                let Some(slot) = self.slots.get_mut(g.index as usize) else {
                    return Ok(());
                };
                match slot.as_ref() {
                    None => {}
                    Some(bound) if bound == actual => return Ok(()),
                    Some(_) => return Err(InferError::Conflict(g.index)),
                }
                *slot = Some(actual.clone());
                Ok(())
            }
            (TypeKind::Struct(p), TypeKind::Struct(a))
                if p.id == a.id && p.args.len() == a.args.len() =>
            {
                for (p, a) in p.args.iter().zip(&a.args) {
                    self.bind(p, a)?;
                }
                Ok(())
            }
            (TypeKind::Ptr(p), TypeKind::Ptr(a))
            | (TypeKind::Ref(p), TypeKind::Ref(a))
            | (TypeKind::Slice(p), TypeKind::Slice(a)) => self.bind(p, a),
            (TypeKind::Fn(p), TypeKind::Fn(a)) if p.params.len() == a.params.len() => {
                for (p, a) in p.params.iter().zip(&a.params) {
                    self.bind(p, a)?;
                }
                match (&p.result, &a.result) {
                    (Some(p), Some(a)) => self.bind(p, a),
                    _ => Ok(()),
                }
            }
            // Shape mismatches were already rejected by the checker.
            _ => Ok(()),
        }
    }

    fn finish(self) -> Result<Combination, InferError> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| slot.ok_or(InferError::Unbound(index_u32(i))))
            .collect()
    }
}

fn index_u32(i: usize) -> u32 {
    u32::try_from(i).unwrap_or(u32::MAX)
}
