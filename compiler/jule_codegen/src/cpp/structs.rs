//! Struct Rendering
//!
//! Every struct instance becomes its own C++ struct; generics are already
//! substituted, so no C++ templates are involved.

use rustc_hash::FxHashSet;

use jule_sema::{InstanceArena, StructInsId};
use jule_types::TypeKind;

use super::types::cpp_type;
use crate::context::CodegenContext;
use crate::error::RenderError;

/// `struct _Point;`
pub fn emit_forward_decl(ctx: &mut CodegenContext<'_>, id: StructInsId) {
    let ident = ctx.struct_ident(id);
    ctx.writeln(&format!("struct {ident};"));
}

/// ```text
/// struct _Point {
///     jule::Int _x;
///     jule::Int _y;
/// };
/// ```
pub fn emit_struct(ctx: &mut CodegenContext<'_>, id: StructInsId) -> Result<(), RenderError> {
    let ins = ctx.instances.struct_ins(id);
    let fields = ins
        .fields
        .iter()
        .map(|f| Ok(format!("{} {};", cpp_type(ctx, &f.kind)?, ctx.local_ident(f.ident))))
        .collect::<Result<Vec<_>, RenderError>>()?;

    let ident = ctx.struct_ident(id);
    ctx.writeln(&format!("struct {ident} {{"));
    ctx.indent();
    for field in &fields {
        ctx.writeln(field);
    }
    ctx.dedent();
    ctx.writeln("};");
    Ok(())
}

/// Struct instances ordered so each one follows the structs it holds by
/// value. Ties keep declaration order, then combination order.
pub fn definition_order(instances: &InstanceArena) -> Vec<StructInsId> {
    let mut roots: Vec<_> = instances.structs().collect();
    roots.sort_by_key(|(_, s)| (s.decl, s.combine_index));

    let mut order = Vec::with_capacity(roots.len());
    let mut visited = FxHashSet::default();
    for (id, _) in roots {
        visit(instances, id, &mut visited, &mut order);
    }
    order
}

fn visit(
    instances: &InstanceArena,
    id: StructInsId,
    visited: &mut FxHashSet<StructInsId>,
    order: &mut Vec<StructInsId>,
) {
    // Marked before recursing: a by-value cycle cannot exist in a checked
    // program, and this keeps a malformed one from looping.
    if !visited.insert(id) {
        return;
    }
    for field in &instances.struct_ins(id).fields {
        if let TypeKind::Struct(s) = &field.kind {
            if let Some(dep) = instances.resolve_struct(s) {
                visit(instances, dep, visited, order);
            }
        }
    }
    order.push(id);
}
