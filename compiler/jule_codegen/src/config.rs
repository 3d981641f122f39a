//! Renderer configuration.

/// Knobs for C++ rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodegenConfig {
    /// Identifier of the program entry point. Rendered unmangled, returning
    /// `jule::I32`, with the locale boilerplate in front of its body.
    pub entry_point: String,
    /// Prefix for every user identifier, keeping them clear of C++ keywords
    /// and runtime names.
    pub ident_prefix: String,
    /// Header included at the top of a rendered program.
    pub runtime_header: String,
    /// Spaces per indentation level.
    pub indent: usize,
    /// Emit function prototypes ahead of the definitions.
    pub emit_prototypes: bool,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        CodegenConfig {
            entry_point: "main".to_string(),
            ident_prefix: "_".to_string(),
            runtime_header: "julec.hpp".to_string(),
            indent: 4,
            emit_prototypes: true,
        }
    }
}
