//! Statement Rendering

use jule_sema::StmtModel;

use super::expr::emit_expr;
use super::types::cpp_type;
use crate::context::CodegenContext;
use crate::error::RenderError;

/// Emit a sequence of statements at the current indentation.
pub fn emit_stmts(ctx: &mut CodegenContext<'_>, stmts: &[StmtModel]) -> Result<(), RenderError> {
    for stmt in stmts {
        emit_stmt(ctx, stmt)?;
    }
    Ok(())
}

/// Emit one statement.
pub fn emit_stmt(ctx: &mut CodegenContext<'_>, stmt: &StmtModel) -> Result<(), RenderError> {
    match stmt {
        StmtModel::Expr(expr) => {
            let expr = emit_expr(ctx, expr)?;
            ctx.writeln(&format!("{expr};"));
        }
        StmtModel::Var { ident, kind, init } => {
            let ty = cpp_type(ctx, kind)?;
            let name = ctx.local_ident(*ident);
            match init {
                Some(init) => {
                    let init = emit_expr(ctx, init)?;
                    ctx.writeln(&format!("{ty} {name} = {init};"));
                }
                // Value-initialized; zero values come from the runtime types.
                None => ctx.writeln(&format!("{ty} {name}{{}};")),
            }
        }
        StmtModel::Assign { target, op, value } => {
            let target = emit_expr(ctx, target)?;
            let value = emit_expr(ctx, value)?;
            ctx.writeln(&format!("{target} {op} {value};"));
        }
        StmtModel::Return(None) => ctx.writeln("return;"),
        StmtModel::Return(Some(value)) => {
            let value = emit_expr(ctx, value)?;
            ctx.writeln(&format!("return {value};"));
        }
        StmtModel::Block(stmts) => {
            ctx.writeln("{");
            emit_nested(ctx, stmts)?;
            ctx.writeln("}");
        }
        StmtModel::If {
            cond,
            then,
            otherwise,
        } => {
            let cond = emit_expr(ctx, cond)?;
            ctx.writeln(&format!("if ({cond}) {{"));
            emit_nested(ctx, then)?;
            if let Some(otherwise) = otherwise {
                ctx.writeln("} else {");
                emit_nested(ctx, otherwise)?;
            }
            ctx.writeln("}");
        }
    }
    Ok(())
}

fn emit_nested(ctx: &mut CodegenContext<'_>, stmts: &[StmtModel]) -> Result<(), RenderError> {
    ctx.indent();
    let result = emit_stmts(ctx, stmts);
    ctx.dedent();
    result
}
