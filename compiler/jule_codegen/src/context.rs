//! Rendering context and state.
//!
//! The `CodegenContext` holds what one render unit needs: the declarations
//! and instances to resolve handles against, identifier mangling, and the
//! indented output buffer.

use jule_ir::{Name, StringInterner};
use jule_sema::{DeclTable, FieldRef, FnIns, FnInsId, InstanceArena, StructInsId};

use crate::config::CodegenConfig;

/// Per-unit rendering context.
pub struct CodegenContext<'a> {
    /// String interner for resolving names.
    pub interner: &'a StringInterner,
    pub decls: &'a DeclTable,
    pub instances: &'a InstanceArena,
    pub config: &'a CodegenConfig,
    /// Current indentation level.
    indent: usize,
    /// Generated code output.
    output: String,
}

impl<'a> CodegenContext<'a> {
    pub fn new(
        interner: &'a StringInterner,
        decls: &'a DeclTable,
        instances: &'a InstanceArena,
        config: &'a CodegenConfig,
    ) -> Self {
        Self {
            interner,
            decls,
            instances,
            config,
            indent: 0,
            output: String::with_capacity(1024),
        }
    }

    /// Resolve a name to its string representation.
    #[inline]
    pub fn resolve_name(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    /// Mangle an identifier for C++.
    ///
    /// Every identifier gets the configured prefix so it can never clash
    /// with a keyword or a runtime name. Letters outside ASCII are kept.
    pub fn mangle(&self, ident: &str) -> String {
        let prefix = &self.config.ident_prefix;
        let mut result = String::with_capacity(prefix.len() + ident.len());
        result.push_str(prefix);
        for c in ident.chars() {
            if c.is_alphanumeric() || c == '_' {
                result.push(c);
            } else {
                result.push('_');
            }
        }
        result
    }

    /// A local variable or parameter.
    pub fn local_ident(&self, name: Name) -> String {
        self.mangle(self.resolve_name(name))
    }

    pub fn struct_ident(&self, id: StructInsId) -> String {
        self.mangle(&self.instances.struct_ins(id).link_ident)
    }

    pub fn field_ident(&self, field: FieldRef) -> String {
        self.local_ident(self.instances.field(field).ident)
    }

    /// Whether `ins` is the designated program entry point.
    pub fn is_entry_point(&self, ins: &FnIns) -> bool {
        let decl = self.decls.fn_decl(ins.decl);
        !decl.is_generic() && self.resolve_name(decl.ident) == self.config.entry_point
    }

    /// The name a call site uses for `id`.
    ///
    /// Foreign-linked functions keep their raw identifier and the entry
    /// point stays unmangled; everything else is prefixed.
    pub fn fn_ident(&self, id: FnInsId) -> String {
        let ins = self.instances.fn_ins(id);
        let decl = self.decls.fn_decl(ins.decl);
        if decl.is_cpp_linked() {
            self.resolve_name(decl.ident).to_string()
        } else if self.is_entry_point(ins) {
            self.config.entry_point.clone()
        } else {
            self.mangle(&ins.link_ident)
        }
    }

    /// Increase indentation level.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease indentation level.
    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    /// Write indentation to output.
    pub fn write_indent(&mut self) {
        let width = self.indent * self.config.indent;
        self.output.extend(std::iter::repeat(' ').take(width));
    }

    /// Write a string to output.
    pub fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Write a line to output (with indentation and newline).
    pub fn writeln(&mut self, s: &str) {
        self.write_indent();
        self.output.push_str(s);
        self.output.push('\n');
    }

    /// Write a newline.
    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    /// Take the generated output.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}
