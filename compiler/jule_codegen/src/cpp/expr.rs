//! Expression Rendering
//!
//! One rule per `ExprModel` variant. Every compound form is parenthesized so
//! the source operator precedence survives without re-deriving it.

use jule_sema::{
    BinaryOp, CastExpr, ExprModel, FieldAccess, FnCall, Literal, SliceLiteral, StructLiteral,
    UnaryOp,
};
use jule_types::CastIdiom;

use super::types::cpp_type;
use crate::context::CodegenContext;
use crate::error::RenderError;

/// Render an expression model to C++ text.
pub fn emit_expr(ctx: &CodegenContext<'_>, expr: &ExprModel) -> Result<String, RenderError> {
    match expr {
        ExprModel::Lit(lit) => Ok(emit_literal(ctx, lit)),
        ExprModel::Ident(local) => Ok(ctx.local_ident(local.ident)),
        ExprModel::Binary(b) => emit_binary(ctx, b),
        ExprModel::Unary(u) => emit_unary(ctx, u),
        ExprModel::TakeRef(inner) => Ok(format!("({}).alloc", emit_expr(ctx, inner)?)),
        ExprModel::StructLit(lit) => emit_struct_literal(ctx, lit),
        ExprModel::HeapStructLit(heap) => {
            let ty = ctx.struct_ident(heap.lit.strct);
            let lit = emit_struct_literal(ctx, &heap.lit)?;
            Ok(format!("jule::new_struct<{ty}>(new (std::nothrow) {lit})"))
        }
        ExprModel::Cast(cast) => emit_cast(ctx, cast),
        ExprModel::Call(call) => emit_call(ctx, call),
        ExprModel::Slice(slice) => emit_slice(ctx, slice),
        ExprModel::Field(access) => emit_field(ctx, access),
    }
}

fn emit_literal(ctx: &CodegenContext<'_>, lit: &Literal) -> String {
    match lit {
        // The magnitude of `i64::MIN` has no literal of its own in C++.
        Literal::Int(i64::MIN) => format!("({} - 1)", i64::MIN + 1),
        Literal::Int(n) => n.to_string(),
        Literal::Uint(n) => format!("{n}U"),
        Literal::Float(f) => {
            if f.is_nan() {
                "NAN".to_string()
            } else if f.is_infinite() {
                if f.is_sign_positive() { "INFINITY" } else { "-INFINITY" }.to_string()
            } else {
                format!("{f:?}") // Use debug format to preserve precision
            }
        }
        Literal::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        Literal::Str(name) => emit_string_literal(ctx.resolve_name(*name)),
        Literal::Nil => "nullptr".to_string(),
    }
}

/// Emit a string literal with proper escaping.
pub fn emit_string_literal(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 12);
    result.push_str("jule::Str(\"");
    for b in s.bytes() {
        match b {
            b'"' => result.push_str("\\\""),
            b'\\' => result.push_str("\\\\"),
            b'\n' => result.push_str("\\n"),
            b'\r' => result.push_str("\\r"),
            b'\t' => result.push_str("\\t"),
            // Octal escapes take at most three digits, so a following digit
            // can never extend them.
            0x20..=0x7e => result.push(char::from(b)),
            _ => result.push_str(&format!("\\{b:03o}")),
        }
    }
    result.push_str("\")");
    result
}

fn emit_binary(ctx: &CodegenContext<'_>, b: &BinaryOp) -> Result<String, RenderError> {
    let left = emit_expr(ctx, &b.left)?;
    let right = emit_expr(ctx, &b.right)?;
    Ok(format!("({left} {} {right})", b.op))
}

fn emit_unary(ctx: &CodegenContext<'_>, u: &UnaryOp) -> Result<String, RenderError> {
    let operand = emit_expr(ctx, &u.operand)?;
    Ok(format!("({}{operand})", u.op))
}

/// `T{._a = x, ._b = y}` in field declaration order.
fn emit_struct_literal(
    ctx: &CodegenContext<'_>,
    lit: &StructLiteral,
) -> Result<String, RenderError> {
    let ty = ctx.struct_ident(lit.strct);
    let args = lit
        .args
        .iter()
        .map(|arg| {
            if arg.field.strct != lit.strct {
                return Err(RenderError::invariant(format!(
                    "argument of `{ty}` is bound to a field of another struct"
                )));
            }
            let value = emit_expr(ctx, &arg.value)?;
            Ok(format!(".{} = {value}", ctx.field_ident(arg.field)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("{ty}{{{}}}", args.join(", ")))
}

fn emit_cast(ctx: &CodegenContext<'_>, cast: &CastExpr) -> Result<String, RenderError> {
    // The source kind is never spelled out, but it still has to be resolved.
    cpp_type(ctx, &cast.source_kind)?;
    let ty = cpp_type(ctx, &cast.kind)?;
    let operand = emit_expr(ctx, &cast.operand)?;
    Ok(match cast.idiom {
        CastIdiom::Static => format!("static_cast<{ty}>({operand})"),
        CastIdiom::Reinterpret => format!("reinterpret_cast<{ty}>({operand})"),
        CastIdiom::Construct => format!("{ty}({operand})"),
    })
}

fn emit_call(ctx: &CodegenContext<'_>, call: &FnCall) -> Result<String, RenderError> {
    let callee = ctx.fn_ident(call.func);
    let decl = ctx.decls.fn_decl(ctx.instances.fn_ins(call.func).decl);
    // `#cdef` names a C macro constant; with no arguments it is not called.
    let is_cdef = decl
        .directives
        .iter()
        .any(|d| ctx.resolve_name(d.tag) == "cdef");
    if is_cdef && call.args.is_empty() {
        return Ok(callee);
    }
    let args = call
        .args
        .iter()
        .map(|arg| emit_expr(ctx, arg))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("{callee}({})", args.join(", ")))
}

fn emit_slice(ctx: &CodegenContext<'_>, slice: &SliceLiteral) -> Result<String, RenderError> {
    let elem = cpp_type(ctx, &slice.elem_kind)?;
    let elems = slice
        .elems
        .iter()
        .map(|e| emit_expr(ctx, e))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("jule::Slice<{elem}>({{{}}})", elems.join(", ")))
}

fn emit_field(ctx: &CodegenContext<'_>, access: &FieldAccess) -> Result<String, RenderError> {
    let base = emit_expr(ctx, &access.base)?;
    let field = ctx.field_ident(access.field);
    let sep = if access.through_pointer { "->" } else { "." };
    Ok(format!("{base}{sep}{field}"))
}
