//! The structural type enum.

use std::fmt;
use std::str::FromStr;

use jule_ir::{Name, StringInterner, StructId};

use crate::KindFlags;

/// Built-in primitive kinds.
///
/// `Any` is the dynamic placeholder: a parameter of this kind is left
/// type-erased and rendered through a target-language template.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub enum Prim {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    Int,
    Uint,
    Uintptr,
    F32,
    F64,
    Bool,
    Str,
    Any,
}

impl Prim {
    pub const ALL: [Prim; 16] = [
        Prim::I8,
        Prim::I16,
        Prim::I32,
        Prim::I64,
        Prim::U8,
        Prim::U16,
        Prim::U32,
        Prim::U64,
        Prim::Int,
        Prim::Uint,
        Prim::Uintptr,
        Prim::F32,
        Prim::F64,
        Prim::Bool,
        Prim::Str,
        Prim::Any,
    ];

    /// Source-language spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Prim::I8 => "i8",
            Prim::I16 => "i16",
            Prim::I32 => "i32",
            Prim::I64 => "i64",
            Prim::U8 => "u8",
            Prim::U16 => "u16",
            Prim::U32 => "u32",
            Prim::U64 => "u64",
            Prim::Int => "int",
            Prim::Uint => "uint",
            Prim::Uintptr => "uintptr",
            Prim::F32 => "f32",
            Prim::F64 => "f64",
            Prim::Bool => "bool",
            Prim::Str => "str",
            Prim::Any => "any",
        }
    }

    pub const fn is_signed_int(self) -> bool {
        matches!(self, Prim::I8 | Prim::I16 | Prim::I32 | Prim::I64 | Prim::Int)
    }

    pub const fn is_unsigned_int(self) -> bool {
        matches!(
            self,
            Prim::U8 | Prim::U16 | Prim::U32 | Prim::U64 | Prim::Uint | Prim::Uintptr
        )
    }

    pub const fn is_int(self) -> bool {
        self.is_signed_int() || self.is_unsigned_int()
    }

    pub const fn is_float(self) -> bool {
        matches!(self, Prim::F32 | Prim::F64)
    }

    pub const fn is_numeric(self) -> bool {
        self.is_int() || self.is_float()
    }
}

impl fmt::Display for Prim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Prim {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Prim::ALL.into_iter().find(|p| p.as_str() == s).ok_or(())
    }
}

/// Reference to a struct declaration, with its type arguments.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct StructRef {
    pub id: StructId,
    pub ident: Name,
    pub args: Vec<TypeKind>,
}

/// Function signature kind. `result` is `None` for void.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FnSig {
    pub params: Vec<TypeKind>,
    pub result: Option<Box<TypeKind>>,
}

/// Generic placeholder: the `index`-th type parameter of its declaration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct GenericParam {
    pub ident: Name,
    pub index: u32,
}

/// Canonical description of a type.
///
/// Equality is structural. Kinds are immutable once resolved; substitution
/// produces new kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Prim(Prim),
    Struct(StructRef),
    Ptr(Box<TypeKind>),
    Ref(Box<TypeKind>),
    Slice(Box<TypeKind>),
    Fn(FnSig),
    Generic(GenericParam),
}

/// Ordered type arguments bound to a declaration's generics.
pub type Combination = Vec<TypeKind>;

impl TypeKind {
    pub fn ptr(inner: TypeKind) -> Self {
        TypeKind::Ptr(Box::new(inner))
    }

    pub fn reference(inner: TypeKind) -> Self {
        TypeKind::Ref(Box::new(inner))
    }

    pub fn slice(elem: TypeKind) -> Self {
        TypeKind::Slice(Box::new(elem))
    }

    pub fn generic(ident: Name, index: u32) -> Self {
        TypeKind::Generic(GenericParam { ident, index })
    }

    pub fn strct(id: StructId, ident: Name, args: Vec<TypeKind>) -> Self {
        TypeKind::Struct(StructRef { id, ident, args })
    }

    pub fn func(params: Vec<TypeKind>, result: Option<TypeKind>) -> Self {
        TypeKind::Fn(FnSig {
            params,
            result: result.map(Box::new),
        })
    }

    #[inline]
    pub fn as_struct(&self) -> Option<&StructRef> {
        match self {
            TypeKind::Struct(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn is_ref(&self) -> bool {
        matches!(self, TypeKind::Ref(_))
    }

    /// The pointee of a pointer or reference kind.
    pub fn pointee(&self) -> Option<&TypeKind> {
        match self {
            TypeKind::Ptr(inner) | TypeKind::Ref(inner) => Some(inner),
            _ => None,
        }
    }

    /// The struct behind `S`, `&S` or `*S`.
    pub fn struct_behind_indirection(&self) -> Option<&StructRef> {
        match self {
            TypeKind::Struct(s) => Some(s),
            TypeKind::Ptr(inner) | TypeKind::Ref(inner) => inner.as_struct(),
            _ => None,
        }
    }

    pub fn flags(&self) -> KindFlags {
        KindFlags::of(self)
    }

    /// True if the `any` placeholder appears anywhere inside this kind.
    pub fn has_any(&self) -> bool {
        self.flags().contains(KindFlags::HAS_ANY)
    }

    /// True if a generic placeholder appears anywhere inside this kind.
    pub fn has_generic(&self) -> bool {
        self.flags().contains(KindFlags::HAS_GENERIC)
    }

    /// Display adapter that resolves interned identifiers.
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> KindDisplay<'a> {
        KindDisplay {
            kind: self,
            interner,
        }
    }
}

impl From<Prim> for TypeKind {
    fn from(prim: Prim) -> Self {
        TypeKind::Prim(prim)
    }
}

/// Source-language rendering of a kind (`*Pair[int, str]`, `fn(int): bool`).
pub struct KindDisplay<'a> {
    kind: &'a TypeKind,
    interner: &'a StringInterner,
}

impl KindDisplay<'_> {
    fn nested<'b>(&'b self, kind: &'b TypeKind) -> KindDisplay<'b> {
        KindDisplay {
            kind,
            interner: self.interner,
        }
    }

    fn write_list(&self, f: &mut fmt::Formatter<'_>, kinds: &[TypeKind]) -> fmt::Result {
        for (i, kind) in kinds.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", self.nested(kind))?;
        }
        Ok(())
    }
}

impl fmt::Display for KindDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TypeKind::Prim(p) => write!(f, "{p}"),
            TypeKind::Struct(s) => {
                f.write_str(self.interner.lookup(s.ident))?;
                if !s.args.is_empty() {
                    f.write_str("[")?;
                    self.write_list(f, &s.args)?;
                    f.write_str("]")?;
                }
                Ok(())
            }
            TypeKind::Ptr(inner) => write!(f, "*{}", self.nested(inner)),
            TypeKind::Ref(inner) => write!(f, "&{}", self.nested(inner)),
            TypeKind::Slice(elem) => write!(f, "[]{}", self.nested(elem)),
            TypeKind::Fn(sig) => {
                f.write_str("fn(")?;
                self.write_list(f, &sig.params)?;
                f.write_str(")")?;
                if let Some(result) = &sig.result {
                    write!(f, ": {}", self.nested(result))?;
                }
                Ok(())
            }
            TypeKind::Generic(g) => f.write_str(self.interner.lookup(g.ident)),
        }
    }
}
