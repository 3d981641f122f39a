//! C++ Rendering Backend for Jule
//!
//! Turns the output of `jule_sema` into C++ text against the Jule runtime
//! headers (`jule::Int`, `jule::Slice<T>`, `jule::Ptr<T>`, ...).
//!
//! # Architecture
//!
//! ```text
//! DeclTable + Analysis (instances, body models)
//!        ↓
//!     CppCodegen       (one fresh CodegenContext per render unit)
//!        ↓
//!    CodegenResult     (C++ source + any render errors)
//! ```
//!
//! Rendering never re-resolves generics: every instance and field is
//! addressed by the handle the analysis produced. A generic placeholder
//! that still reaches this crate aborts its render unit with
//! `RenderError::InternalInvariantViolation`.

pub mod config;
mod context;
pub mod cpp;
mod error;

pub use config::CodegenConfig;
pub use context::CodegenContext;
pub use cpp::{CppCodegen, ENTRY_POINT_STANDARD_CODES};
pub use error::RenderError;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=jule_sema=debug,jule_codegen=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Result of rendering a whole program.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodegenResult {
    /// Generated C++ code. Units that failed to render are left out.
    pub code: String,
    /// Errors encountered during rendering.
    pub errors: Vec<RenderError>,
    /// Whether every unit rendered.
    pub success: bool,
}

impl CodegenResult {
    /// Create a result from partial code and the errors of skipped units.
    pub fn with_errors(code: String, errors: Vec<RenderError>) -> Self {
        let success = errors.is_empty();
        Self {
            code,
            errors,
            success,
        }
    }

    /// Check if rendering failed.
    pub fn has_errors(&self) -> bool {
        !self.success || !self.errors.is_empty()
    }
}
