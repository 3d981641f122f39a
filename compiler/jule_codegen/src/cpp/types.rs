//! Kind to C++ type mapping.

use jule_types::{Prim, TypeKind};

use crate::context::CodegenContext;
use crate::error::RenderError;

/// Runtime spelling of a primitive.
///
/// `any` is left as the bare template parameter name; functions taking it
/// are rendered behind `template <typename any>`.
pub fn prim_type(prim: Prim) -> &'static str {
    match prim {
        Prim::I8 => "jule::I8",
        Prim::I16 => "jule::I16",
        Prim::I32 => "jule::I32",
        Prim::I64 => "jule::I64",
        Prim::U8 => "jule::U8",
        Prim::U16 => "jule::U16",
        Prim::U32 => "jule::U32",
        Prim::U64 => "jule::U64",
        Prim::Int => "jule::Int",
        Prim::Uint => "jule::Uint",
        Prim::Uintptr => "jule::Uintptr",
        Prim::F32 => "jule::F32",
        Prim::F64 => "jule::F64",
        Prim::Bool => "jule::Bool",
        Prim::Str => "jule::Str",
        Prim::Any => "any",
    }
}

/// Render a kind as a C++ type.
///
/// References are runtime smart pointers (`jule::Ptr<T>`), pointers are raw.
/// Struct kinds must name an instance the analysis created.
pub fn cpp_type(ctx: &CodegenContext<'_>, kind: &TypeKind) -> Result<String, RenderError> {
    if !kind.flags().is_resolved() {
        return Err(unresolved(ctx, kind));
    }
    resolved_type(ctx, kind)
}

fn resolved_type(ctx: &CodegenContext<'_>, kind: &TypeKind) -> Result<String, RenderError> {
    match kind {
        TypeKind::Prim(p) => Ok(prim_type(*p).to_string()),
        TypeKind::Struct(s) => match ctx.instances.resolve_struct(s) {
            Some(id) => Ok(ctx.struct_ident(id)),
            None => Err(RenderError::invariant(format!(
                "struct kind `{}` has no instance",
                kind.display(ctx.interner)
            ))),
        },
        TypeKind::Ptr(inner) => Ok(format!("{}*", resolved_type(ctx, inner)?)),
        TypeKind::Ref(inner) => Ok(format!("jule::Ptr<{}>", resolved_type(ctx, inner)?)),
        TypeKind::Slice(elem) => Ok(format!("jule::Slice<{}>", resolved_type(ctx, elem)?)),
        TypeKind::Fn(sig) => {
            let result = match sig.result.as_deref() {
                Some(result) => resolved_type(ctx, result)?,
                None => "void".to_string(),
            };
            let params = sig
                .params
                .iter()
                .map(|p| resolved_type(ctx, p))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("std::function<{result}({})>", params.join(", ")))
        }
        TypeKind::Generic(_) => Err(unresolved(ctx, kind)),
    }
}

fn unresolved(ctx: &CodegenContext<'_>, kind: &TypeKind) -> RenderError {
    RenderError::invariant(format!(
        "unresolved generic in `{}` reached the renderer",
        kind.display(ctx.interner)
    ))
}

/// A function result; no result renders as `void`.
pub fn result_type(
    ctx: &CodegenContext<'_>,
    result: Option<&TypeKind>,
) -> Result<String, RenderError> {
    match result {
        Some(kind) => cpp_type(ctx, kind),
        None => Ok("void".to_string()),
    }
}
