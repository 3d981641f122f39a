//! Declarations as handed over by the scope resolver.
//!
//! Each generic declaration owns its `Combines` behind a mutex: the set grows
//! while call sites are modeled and is only read as a whole once analysis
//! reached its fixed point.

mod combines;

use bitflags::bitflags;
use parking_lot::Mutex;

use jule_ir::{Attribute, Directive, FnId, Name, StructId, Token};
use jule_types::{Combination, TypeKind};

use crate::CheckedBlock;

pub use combines::Combines;

bitflags! {
    /// Modifiers of a function declaration.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct FnFlags: u8 {
        const PUBLIC = 1 << 0;
        /// Body may reinterpret pointers.
        const UNSAFE = 1 << 1;
        /// Declared in the source, implemented by linked C++ code.
        const CPP_LINKED = 1 << 2;
    }
}

/// A function parameter.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    pub token: Token,
    pub ident: Name,
    pub kind: TypeKind,
    pub mutable: bool,
}

impl Param {
    pub fn new(token: Token, ident: Name, kind: TypeKind) -> Self {
        Param {
            token,
            ident,
            kind,
            mutable: false,
        }
    }
}

/// A function declaration.
///
/// Generic placeholders in `params`, `result` and the body are
/// `TypeKind::Generic` whose index points into `generics`.
#[derive(Debug)]
pub struct Fn {
    pub token: Token,
    pub ident: Name,
    pub flags: FnFlags,
    pub generics: Vec<Name>,
    pub params: Vec<Param>,
    /// `None` is void.
    pub result: Option<TypeKind>,
    /// `None` for C++-linked functions.
    pub scope: Option<CheckedBlock>,
    pub attributes: Vec<Attribute>,
    pub directives: Vec<Directive>,
    pub doc: String,
    combines: Mutex<Combines>,
}

impl Fn {
    /// A non-generic function with no parameters, void result and no body.
    pub fn new(token: Token, ident: Name) -> Self {
        Fn {
            token,
            ident,
            flags: FnFlags::empty(),
            generics: Vec::new(),
            params: Vec::new(),
            result: None,
            scope: None,
            attributes: Vec::new(),
            directives: Vec::new(),
            doc: String::new(),
            combines: Mutex::new(Combines::synthetic()),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: FnFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the generics list. A generic declaration starts with no
    /// combinations at all.
    #[must_use]
    pub fn with_generics(mut self, generics: Vec<Name>) -> Self {
        self.combines = Mutex::new(if generics.is_empty() {
            Combines::synthetic()
        } else {
            Combines::new()
        });
        self.generics = generics;
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: Vec<Param>) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn with_result(mut self, result: TypeKind) -> Self {
        self.result = Some(result);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: CheckedBlock) -> Self {
        self.scope = Some(body);
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    #[must_use]
    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    #[inline]
    pub fn is_generic(&self) -> bool {
        !self.generics.is_empty()
    }

    #[inline]
    pub fn is_unsafe(&self) -> bool {
        self.flags.contains(FnFlags::UNSAFE)
    }

    #[inline]
    pub fn is_cpp_linked(&self) -> bool {
        self.flags.contains(FnFlags::CPP_LINKED)
    }

    #[inline]
    pub fn is_public(&self) -> bool {
        self.flags.contains(FnFlags::PUBLIC)
    }

    /// The directive with the given tag, if attached.
    pub fn directive(&self, tag: Name) -> Option<&Directive> {
        self.directives.iter().find(|d| d.tag == tag)
    }

    /// Record a combination. See [`Combines::try_record`].
    pub fn record_combination(
        &self,
        combination: Combination,
        limit: usize,
    ) -> Result<(usize, bool), usize> {
        self.combines.lock().try_record(combination, limit)
    }

    /// Snapshot of the combinations recorded so far.
    pub fn combinations(&self) -> Vec<Combination> {
        self.combines.lock().iter().cloned().collect()
    }

    pub fn combination_count(&self) -> usize {
        self.combines.lock().len()
    }
}

/// A struct field.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Field {
    pub token: Token,
    pub ident: Name,
    pub kind: TypeKind,
    pub public: bool,
}

impl Field {
    pub fn new(token: Token, ident: Name, kind: TypeKind) -> Self {
        Field {
            token,
            ident,
            kind,
            public: false,
        }
    }
}

/// A struct declaration.
#[derive(Debug)]
pub struct Struct {
    pub token: Token,
    pub ident: Name,
    pub public: bool,
    pub generics: Vec<Name>,
    /// Declaration order; literals and definitions follow it.
    pub fields: Vec<Field>,
    pub directives: Vec<Directive>,
    combines: Mutex<Combines>,
}

impl Struct {
    pub fn new(token: Token, ident: Name) -> Self {
        Struct {
            token,
            ident,
            public: false,
            generics: Vec::new(),
            fields: Vec::new(),
            directives: Vec::new(),
            combines: Mutex::new(Combines::synthetic()),
        }
    }

    #[must_use]
    pub fn with_generics(mut self, generics: Vec<Name>) -> Self {
        self.combines = Mutex::new(if generics.is_empty() {
            Combines::synthetic()
        } else {
            Combines::new()
        });
        self.generics = generics;
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    #[inline]
    pub fn is_generic(&self) -> bool {
        !self.generics.is_empty()
    }

    /// Position of a field by identity.
    pub fn field_index(&self, ident: Name) -> Option<usize> {
        self.fields.iter().position(|f| f.ident == ident)
    }

    pub fn record_combination(
        &self,
        combination: Combination,
        limit: usize,
    ) -> Result<(usize, bool), usize> {
        self.combines.lock().try_record(combination, limit)
    }

    pub fn combinations(&self) -> Vec<Combination> {
        self.combines.lock().iter().cloned().collect()
    }
}

/// The scope-resolved declaration set of one compilation.
#[derive(Debug, Default)]
pub struct DeclTable {
    fns: Vec<Fn>,
    structs: Vec<Struct>,
}

impl DeclTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_fn(&mut self, decl: Fn) -> FnId {
        let id = FnId::new(next_index(self.fns.len()));
        self.fns.push(decl);
        id
    }

    pub fn add_struct(&mut self, decl: Struct) -> StructId {
        let id = StructId::new(next_index(self.structs.len()));
        self.structs.push(decl);
        id
    }

    #[inline]
    pub fn fn_decl(&self, id: FnId) -> &Fn {
        &self.fns[id.index()]
    }

    #[inline]
    pub fn struct_decl(&self, id: StructId) -> &Struct {
        &self.structs[id.index()]
    }

    pub fn fns(&self) -> impl Iterator<Item = (FnId, &Fn)> {
        self.fns
            .iter()
            .enumerate()
            .map(|(i, f)| (FnId::new(next_index(i)), f))
    }

    pub fn structs(&self) -> impl Iterator<Item = (StructId, &Struct)> {
        self.structs
            .iter()
            .enumerate()
            .map(|(i, s)| (StructId::new(next_index(i)), s))
    }

    pub fn find_fn(&self, ident: Name) -> Option<FnId> {
        self.fns().find(|(_, f)| f.ident == ident).map(|(id, _)| id)
    }

    pub fn fn_count(&self) -> usize {
        self.fns.len()
    }

    pub fn struct_count(&self) -> usize {
        self.structs.len()
    }
}

fn next_index(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("declaration table overflow: {len} entries"))
}

#[cfg(test)]
mod tests;
