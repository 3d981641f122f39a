//! Dense storage for instances, addressed by handles.

use std::fmt;

use rustc_hash::FxHashMap;

use jule_ir::{FnId, Name, StructId, Token};
use jule_types::{Combination, StructRef, TypeKind};

macro_rules! define_instance_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

define_instance_id!(
    /// Handle of a function instance.
    FnInsId
);

define_instance_id!(
    /// Handle of a struct instance.
    StructInsId
);

/// One field of one struct instance.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FieldRef {
    pub strct: StructInsId,
    pub index: u32,
}

/// A parameter with its kind substituted.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParamIns {
    pub token: Token,
    pub ident: Name,
    pub kind: TypeKind,
    pub mutable: bool,
}

/// A function declaration paired with one resolved combination.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FnIns {
    pub decl: FnId,
    /// Position of `generics` in the declaration's `Combines`.
    pub combine_index: usize,
    pub generics: Combination,
    pub params: Vec<ParamIns>,
    pub result: Option<TypeKind>,
    /// Identifier chosen for this instance, without the output prefix.
    pub link_ident: String,
}

impl FnIns {
    /// Whether some parameter kind mentions the type-erased `any`.
    pub fn has_any_param(&self) -> bool {
        self.params.iter().any(|p| p.kind.has_any())
    }
}

/// One field of a struct instance with its kind substituted.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FieldIns {
    pub owner: StructInsId,
    pub index: u32,
    pub ident: Name,
    pub kind: TypeKind,
}

/// A struct declaration paired with one resolved combination.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct StructIns {
    pub decl: StructId,
    pub combine_index: usize,
    pub generics: Combination,
    /// Declaration order.
    pub fields: Vec<FieldIns>,
    pub link_ident: String,
}

impl StructIns {
    pub fn field_index(&self, ident: Name) -> Option<usize> {
        self.fields.iter().position(|f| f.ident == ident)
    }
}

/// All instances of one compilation.
#[derive(Clone, Debug, Default)]
pub struct InstanceArena {
    fns: Vec<FnIns>,
    structs: Vec<StructIns>,
    fn_index: FxHashMap<FnId, FxHashMap<Combination, FnInsId>>,
    struct_index: FxHashMap<StructId, FxHashMap<Combination, StructInsId>>,
}

impl InstanceArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn fn_ins(&self, id: FnInsId) -> &FnIns {
        &self.fns[id.index()]
    }

    #[inline]
    pub fn struct_ins(&self, id: StructInsId) -> &StructIns {
        &self.structs[id.index()]
    }

    pub fn field(&self, field: FieldRef) -> &FieldIns {
        &self.struct_ins(field.strct).fields[field.index as usize]
    }

    pub fn lookup_fn(&self, decl: FnId, generics: &[TypeKind]) -> Option<FnInsId> {
        self.fn_index.get(&decl)?.get(generics).copied()
    }

    pub fn lookup_struct(&self, decl: StructId, generics: &[TypeKind]) -> Option<StructInsId> {
        self.struct_index.get(&decl)?.get(generics).copied()
    }

    /// The instance a struct kind names.
    pub fn resolve_struct(&self, strct: &StructRef) -> Option<StructInsId> {
        self.lookup_struct(strct.id, &strct.args)
    }

    pub fn fns(&self) -> impl Iterator<Item = (FnInsId, &FnIns)> {
        self.fns
            .iter()
            .enumerate()
            .map(|(i, f)| (FnInsId::new(to_u32(i)), f))
    }

    pub fn structs(&self) -> impl Iterator<Item = (StructInsId, &StructIns)> {
        self.structs
            .iter()
            .enumerate()
            .map(|(i, s)| (StructInsId::new(to_u32(i)), s))
    }

    /// Every instance of one function declaration, in creation order.
    pub fn instances_of(&self, decl: FnId) -> Vec<FnInsId> {
        self.fns()
            .filter(|(_, f)| f.decl == decl)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn fn_count(&self) -> usize {
        self.fns.len()
    }

    pub fn struct_count(&self) -> usize {
        self.structs.len()
    }

    /// Insert unless an instance for the same combination exists.
    pub(crate) fn insert_fn(&mut self, ins: FnIns) -> (FnInsId, bool) {
        if let Some(id) = self.lookup_fn(ins.decl, &ins.generics) {
            return (id, false);
        }
        let id = FnInsId::new(to_u32(self.fns.len()));
        self.fn_index
            .entry(ins.decl)
            .or_default()
            .insert(ins.generics.clone(), id);
        self.fns.push(ins);
        (id, true)
    }

    /// Insert unless an instance for the same combination exists. Field
    /// owners are rewritten to the returned handle.
    pub(crate) fn insert_struct(&mut self, mut ins: StructIns) -> (StructInsId, bool) {
        if let Some(id) = self.lookup_struct(ins.decl, &ins.generics) {
            return (id, false);
        }
        let id = StructInsId::new(to_u32(self.structs.len()));
        for field in &mut ins.fields {
            field.owner = id;
        }
        self.struct_index
            .entry(ins.decl)
            .or_default()
            .insert(ins.generics.clone(), id);
        self.structs.push(ins);
        (id, true)
    }
}

fn to_u32(index: usize) -> u32 {
    u32::try_from(index).unwrap_or_else(|_| panic!("instance arena overflow: {index} entries"))
}
