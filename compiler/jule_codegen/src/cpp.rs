//! C++ renderer.
//!
//! Each render call builds a fresh `CodegenContext`, so rendering is
//! stateless across calls and a failing unit never leaves partial text in
//! another one.

mod expr;
mod function;
mod stmt;
mod structs;
mod types;

use rustc_hash::FxHashSet;

use jule_ir::StringInterner;
use jule_sema::{Analysis, DeclTable, ExprModel, FnInsId, StmtModel, StructInsId};
use tracing::{debug, trace};

use crate::config::CodegenConfig;
use crate::context::CodegenContext;
use crate::error::RenderError;
use crate::CodegenResult;

pub use function::{ANY_TEMPLATE, ENTRY_POINT_STANDARD_CODES};

/// Renders analyzed instances as C++.
pub struct CppCodegen<'a> {
    decls: &'a DeclTable,
    interner: &'a StringInterner,
    analysis: &'a Analysis,
    config: CodegenConfig,
}

impl<'a> CppCodegen<'a> {
    pub fn new(decls: &'a DeclTable, interner: &'a StringInterner, analysis: &'a Analysis) -> Self {
        CppCodegen {
            decls,
            interner,
            analysis,
            config: CodegenConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: CodegenConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    fn context(&self) -> CodegenContext<'_> {
        CodegenContext::new(
            self.interner,
            self.decls,
            &self.analysis.instances,
            &self.config,
        )
    }

    /// Render one expression model.
    pub fn render_expr(&self, expr: &ExprModel) -> Result<String, RenderError> {
        expr::emit_expr(&self.context(), expr)
    }

    /// Render the definition of one function instance with `body`.
    pub fn render_fn(&self, id: FnInsId, body: &[StmtModel]) -> Result<String, RenderError> {
        let mut ctx = self.context();
        function::emit_function(&mut ctx, id, body)
            .map_err(|e| e.in_unit(&self.fn_unit_name(id)))?;
        Ok(ctx.take_output())
    }

    /// Render the prototype of one function instance.
    pub fn render_prototype(&self, id: FnInsId) -> Result<String, RenderError> {
        let mut ctx = self.context();
        function::emit_prototype(&mut ctx, id).map_err(|e| e.in_unit(&self.fn_unit_name(id)))?;
        Ok(ctx.take_output())
    }

    /// Render the definition of one struct instance.
    pub fn render_struct(&self, id: StructInsId) -> Result<String, RenderError> {
        let mut ctx = self.context();
        structs::emit_struct(&mut ctx, id)
            .map_err(|e| e.in_unit(&self.analysis.instances.struct_ins(id).link_ident))?;
        Ok(ctx.take_output())
    }

    /// Function instances that get C++ text, ordered by declaration and then
    /// by combination. Foreign-linked functions are defined elsewhere, except
    /// for the entry point, which always carries the startup boilerplate.
    fn rendered_fns(&self) -> Vec<FnInsId> {
        let ctx = self.context();
        let mut fns: Vec<_> = self
            .analysis
            .instances
            .fns()
            .filter(|(_, ins)| {
                !self.decls.fn_decl(ins.decl).is_cpp_linked() || ctx.is_entry_point(ins)
            })
            .map(|(id, ins)| (id, (ins.decl, ins.combine_index)))
            .collect();
        fns.sort_by_key(|(_, key)| *key);
        fns.into_iter().map(|(id, _)| id).collect()
    }

    fn fn_unit_name(&self, id: FnInsId) -> String {
        self.analysis.instances.fn_ins(id).link_ident.clone()
    }

    /// Render the whole program.
    ///
    /// Sections, in order: runtime include, struct forward declarations,
    /// struct definitions (dependencies first), prototypes, definitions.
    /// A unit that fails is left out and its error collected.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(
            fns = self.analysis.instances.fn_count(),
            structs = self.analysis.instances.struct_count(),
        )
    )]
    pub fn render_program(&self) -> CodegenResult {
        let mut errors = Vec::new();
        let mut ctx = self.context();

        ctx.writeln(&format!("#include \"{}\"", self.config.runtime_header));

        let struct_order = structs::definition_order(&self.analysis.instances);
        if !struct_order.is_empty() {
            ctx.newline();
            for &id in &struct_order {
                structs::emit_forward_decl(&mut ctx, id);
            }
            for &id in &struct_order {
                match self.render_struct(id) {
                    Ok(text) => {
                        let ident = &self.analysis.instances.struct_ins(id).link_ident;
                        trace!(strct = %ident, "rendered struct");
                        ctx.newline();
                        ctx.write(&text);
                    }
                    Err(e) => errors.push(e),
                }
            }
        }

        let fns = self.rendered_fns();
        // A failing prototype fails its definition the same way.
        let mut failed = FxHashSet::default();
        if self.config.emit_prototypes {
            let prototypes: Vec<_> = fns
                .iter()
                .filter(|&&id| !ctx.is_entry_point(self.analysis.instances.fn_ins(id)))
                .collect();
            if !prototypes.is_empty() {
                ctx.newline();
            }
            for &id in prototypes {
                match self.render_prototype(id) {
                    Ok(text) => ctx.write(&text),
                    Err(e) => {
                        failed.insert(id);
                        errors.push(e);
                    }
                }
            }
        }

        for &id in fns.iter().filter(|id| !failed.contains(*id)) {
            let body = self.analysis.body(id).unwrap_or(&[]);
            match self.render_fn(id, body) {
                Ok(text) => {
                    trace!(func = %self.fn_unit_name(id), "rendered function");
                    ctx.newline();
                    ctx.write(&text);
                }
                Err(e) => errors.push(e),
            }
        }

        debug!(errors = errors.len(), "program rendered");
        CodegenResult::with_errors(ctx.take_output(), errors)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests;
