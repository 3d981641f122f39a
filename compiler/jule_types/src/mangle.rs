//! Instance identifiers for monomorphized declarations.
//!
//! `max` instantiated with `[int]` becomes `max__int`; non-generic
//! declarations keep their identifier.
//!
//! The argument part is a prefix-free token sequence joined by `_`, so
//! distinct combinations of one declaration never share an identifier:
//!
//! ```text
//! int, str, ...          primitive spelling
//! 3Box                   struct, length-prefixed identifier
//! 4Pair_G2_int_str       generic struct: `G<arity>` then its arguments
//! ptr_X  ref_X  slice_X  indirections and slices
//! fn2_int_str_void       `fn<arity>`, parameters, result or `void`
//! T0                     unsubstituted placeholder
//! ```
//!
//! No token starts with `_`, so the first `__` of an identifier whose base
//! has none marks where the arguments begin.

use jule_ir::StringInterner;

use crate::TypeKind;

/// Identifier of one instance of `base` under `args`.
pub fn instance_ident(interner: &StringInterner, base: &str, args: &[TypeKind]) -> String {
    if args.is_empty() {
        return base.to_string();
    }
    let mut out = format!("{base}__");
    push_args(&mut out, interner, args);
    out
}

/// Instance identifier that cannot collide with any other identifier.
///
/// It opens with the length of `base`, and no source identifier starts with
/// a digit. The declaration handle follows, `d<n>` for functions and `t<n>`
/// for structs, so two qualified identifiers differ whenever their
/// declarations or combinations do.
pub fn qualified_instance_ident(
    interner: &StringInterner,
    base: &str,
    tag: char,
    index: u32,
    args: &[TypeKind],
) -> String {
    let mut out = format!("{}{base}__{tag}{index}", base.len());
    if !args.is_empty() {
        out.push('_');
        push_args(&mut out, interner, args);
    }
    out
}

/// Mangle a kind into identifier-safe text.
pub fn mangle_kind(interner: &StringInterner, kind: &TypeKind) -> String {
    let mut out = String::new();
    push_kind(&mut out, interner, kind);
    out
}

fn push_args(out: &mut String, interner: &StringInterner, args: &[TypeKind]) {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push('_');
        }
        push_kind(out, interner, arg);
    }
}

fn push_kind(out: &mut String, interner: &StringInterner, kind: &TypeKind) {
    match kind {
        TypeKind::Prim(p) => out.push_str(p.as_str()),
        TypeKind::Struct(s) => {
            let name = interner.lookup(s.ident);
            out.push_str(&name.len().to_string());
            out.push_str(name);
            if !s.args.is_empty() {
                out.push_str(&format!("_G{}_", s.args.len()));
                push_args(out, interner, &s.args);
            }
        }
        TypeKind::Ptr(inner) => {
            out.push_str("ptr_");
            push_kind(out, interner, inner);
        }
        TypeKind::Ref(inner) => {
            out.push_str("ref_");
            push_kind(out, interner, inner);
        }
        TypeKind::Slice(elem) => {
            out.push_str("slice_");
            push_kind(out, interner, elem);
        }
        TypeKind::Fn(sig) => {
            out.push_str(&format!("fn{}_", sig.params.len()));
            for param in &sig.params {
                push_kind(out, interner, param);
                out.push('_');
            }
            match &sig.result {
                Some(result) => push_kind(out, interner, result),
                None => out.push_str("void"),
            }
        }
        // Only reachable for kinds that were never substituted.
        TypeKind::Generic(g) => out.push_str(&format!("T{}", g.index)),
    }
}
