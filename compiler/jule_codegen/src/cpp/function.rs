//! Function Rendering
//!
//! Renders one function instance as a C++ prototype or definition.

use jule_sema::{FnInsId, ParamIns, StmtModel};

use super::stmt::emit_stmts;
use super::types::{cpp_type, result_type};
use crate::context::CodegenContext;
use crate::error::RenderError;

/// Locale setup the runtime needs before any user code runs.
pub const ENTRY_POINT_STANDARD_CODES: &str = "
#pragma region JULE_ENTRY_POINT_STANDARD_CODES
  setlocale(0x0, \"\");
#pragma endregion JULE_ENTRY_POINT_STANDARD_CODES

";

/// Preamble of functions with an `any` parameter.
pub const ANY_TEMPLATE: &str = "template <typename any>\n";

/// Everything up to and including the closing parenthesis of the parameters.
///
/// ```text
/// template <typename any>      (only with an `any` parameter)
/// inline jule::Int _max__int(jule::Int _a, jule::Int _b)
/// ```
fn emit_head(ctx: &CodegenContext<'_>, id: FnInsId) -> Result<String, RenderError> {
    let ins = ctx.instances.fn_ins(id);
    let decl = ctx.decls.fn_decl(ins.decl);
    let mut head = String::new();

    if ins.has_any_param() {
        head.push_str(ANY_TEMPLATE);
    }
    for attribute in &decl.attributes {
        head.push_str(ctx.resolve_name(attribute.text));
        head.push(' ');
    }
    let result = if ctx.is_entry_point(ins) {
        "jule::I32".to_string()
    } else {
        result_type(ctx, ins.result.as_ref())?
    };
    head.push_str(&result);
    head.push(' ');
    head.push_str(&ctx.fn_ident(id));
    head.push('(');
    head.push_str(&emit_params(ctx, &ins.params)?);
    head.push(')');
    Ok(head)
}

/// Comma-joined parameters; no parameters render as empty text.
pub fn emit_params(ctx: &CodegenContext<'_>, params: &[ParamIns]) -> Result<String, RenderError> {
    let params = params
        .iter()
        .map(|p| Ok(format!("{} {}", cpp_type(ctx, &p.kind)?, ctx.local_ident(p.ident))))
        .collect::<Result<Vec<_>, RenderError>>()?;
    Ok(params.join(", "))
}

/// Emit a prototype: `<head>;`.
pub fn emit_prototype(ctx: &mut CodegenContext<'_>, id: FnInsId) -> Result<(), RenderError> {
    let head = emit_head(ctx, id)?;
    ctx.write(&head);
    ctx.write(";\n");
    Ok(())
}

/// Emit a full definition with `body` as its statements.
///
/// The entry point always gets the locale boilerplate first, whatever its
/// linkage or safety.
pub fn emit_function(
    ctx: &mut CodegenContext<'_>,
    id: FnInsId,
    body: &[StmtModel],
) -> Result<(), RenderError> {
    let head = emit_head(ctx, id)?;
    ctx.write(&head);
    ctx.write(" {");
    if ctx.is_entry_point(ctx.instances.fn_ins(id)) {
        ctx.write(ENTRY_POINT_STANDARD_CODES);
    } else {
        ctx.newline();
    }
    ctx.indent();
    let result = emit_stmts(ctx, body);
    ctx.dedent();
    result?;
    ctx.write("}\n");
    Ok(())
}
