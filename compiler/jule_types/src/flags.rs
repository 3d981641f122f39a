//! Kind metadata flags.
//!
//! Computed by one traversal and used to gate substitution and to let the
//! renderer reject unresolved kinds without walking them again.

use bitflags::bitflags;

use crate::{GenericParam, KindVisitor, Prim, StructRef, TypeKind};

bitflags! {
    /// Properties of a kind and everything nested inside it.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct KindFlags: u8 {
        /// Contains a generic placeholder.
        const HAS_GENERIC = 1 << 0;
        /// Contains the dynamic `any` placeholder.
        const HAS_ANY = 1 << 1;
        /// Contains a struct.
        const HAS_STRUCT = 1 << 2;
    }
}

impl KindFlags {
    /// Compute flags for a kind.
    pub fn of(kind: &TypeKind) -> Self {
        let mut collector = FlagCollector::default();
        collector.visit(kind);
        collector.flags
    }

    /// Whether substitution can change this kind.
    #[inline]
    pub fn needs_subst(self) -> bool {
        self.contains(Self::HAS_GENERIC)
    }

    /// Whether this kind can reach the renderer.
    #[inline]
    pub fn is_resolved(self) -> bool {
        !self.contains(Self::HAS_GENERIC)
    }
}

#[derive(Default)]
struct FlagCollector {
    flags: KindFlags,
}

impl KindVisitor for FlagCollector {
    fn visit_prim(&mut self, prim: Prim) {
        if prim == Prim::Any {
            self.flags |= KindFlags::HAS_ANY;
        }
    }

    fn visit_struct(&mut self, strct: &StructRef) {
        self.flags |= KindFlags::HAS_STRUCT;
        for arg in &strct.args {
            self.visit(arg);
        }
    }

    fn visit_generic(&mut self, _param: &GenericParam) {
        self.flags |= KindFlags::HAS_GENERIC;
    }
}
