//! Whole-program analysis.
//!
//! Seeds one instance per non-generic declaration, then models instance
//! bodies until no call site produces a new instance. Generic declarations
//! only get instances through call sites, so unused ones never appear.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use jule_diagnostic::{DiagnosticQueue, ErrorGuaranteed};
use jule_ir::{FnId, StringInterner};

use crate::{
    DeclTable, ExprModelBuilder, FnInsId, InstanceArena, Instantiator, SemaError, StmtModel,
};

/// Analysis knobs.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct AnalysisConfig {
    /// Distinct combinations allowed per declaration (0 = unlimited).
    /// Stops runaway polymorphic recursion.
    pub max_combinations: usize,
    /// Model each wave of new instances with `rayon`.
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            max_combinations: 256,
            parallel: false,
        }
    }
}

/// Result of one analysis pass.
#[derive(Debug)]
pub struct Analysis {
    pub instances: InstanceArena,
    bodies: FxHashMap<FnInsId, Vec<StmtModel>>,
    /// Every recoverable error of the pass, ordered by source position.
    pub errors: Vec<SemaError>,
}

impl Analysis {
    /// Modeled body of an instance; `None` for C++-linked functions.
    pub fn body(&self, id: FnInsId) -> Option<&[StmtModel]> {
        self.bodies.get(&id).map(Vec::as_slice)
    }

    pub fn instances_of(&self, decl: FnId) -> Vec<FnInsId> {
        self.instances.instances_of(decl)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Push every error into `queue`.
    pub fn report(
        &self,
        queue: &mut DiagnosticQueue,
        interner: &StringInterner,
    ) -> Option<ErrorGuaranteed> {
        for err in &self.errors {
            err.report(queue, interner);
        }
        queue.has_errors()
    }
}

/// Drives instantiation and modeling to a fixed point.
pub struct Analyzer<'a> {
    decls: &'a DeclTable,
    interner: &'a StringInterner,
    config: AnalysisConfig,
}

impl<'a> Analyzer<'a> {
    pub fn new(decls: &'a DeclTable, interner: &'a StringInterner) -> Self {
        Analyzer {
            decls,
            interner,
            config: AnalysisConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the analysis, in parallel if configured.
    pub fn analyze(&self) -> Analysis {
        if self.config.parallel {
            self.analyze_parallel()
        } else {
            self.analyze_sequential()
        }
    }

    /// Single-threaded worklist.
    #[tracing::instrument(level = "debug", skip_all, fields(fns = self.decls.fn_count()))]
    pub fn analyze_sequential(&self) -> Analysis {
        let instantiator = self.instantiator();
        let mut errors = self.seed(&instantiator);
        let mut bodies = FxHashMap::default();

        loop {
            let wave = instantiator.take_pending();
            if wave.is_empty() {
                break;
            }
            for id in wave {
                let (body, errs) = model_body(&instantiator, id);
                bodies.extend(body.map(|b| (id, b)));
                errors.extend(errs);
            }
        }
        Self::finish(instantiator, bodies, errors)
    }

    /// Fork-join waves: every instance discovered by the previous wave is
    /// modeled concurrently. `Combines` and the instance cache synchronize
    /// internally; instance numbering may differ from the sequential run.
    #[tracing::instrument(level = "debug", skip_all, fields(fns = self.decls.fn_count()))]
    pub fn analyze_parallel(&self) -> Analysis {
        let instantiator = self.instantiator();
        let mut errors = self.seed(&instantiator);
        let mut bodies = FxHashMap::default();

        let mut waves = 0usize;
        loop {
            let wave = instantiator.take_pending();
            if wave.is_empty() {
                break;
            }
            waves += 1;
            let modeled: Vec<_> = wave
                .into_par_iter()
                .map(|id| (id, model_body(&instantiator, id)))
                .collect();
            for (id, (body, errs)) in modeled {
                bodies.extend(body.map(|b| (id, b)));
                errors.extend(errs);
            }
        }
        tracing::debug!(waves, "parallel analysis converged");
        Self::finish(instantiator, bodies, errors)
    }

    fn instantiator(&self) -> Instantiator<'a> {
        Instantiator::new(self.decls, self.interner, self.config.max_combinations)
    }

    /// Instantiate every non-generic declaration.
    fn seed(&self, instantiator: &Instantiator<'_>) -> Vec<SemaError> {
        let mut errors = Vec::new();
        for (id, decl) in self.decls.structs().filter(|(_, s)| !s.is_generic()) {
            if let Err(err) = instantiator.instantiate_struct(id, &[], decl.token) {
                errors.push(err);
            }
        }
        for (id, decl) in self.decls.fns().filter(|(_, f)| !f.is_generic()) {
            if let Err(err) = instantiator.instantiate_fn(id, &[], &[], decl.token) {
                errors.push(err);
            }
        }
        errors
    }

    fn finish(
        instantiator: Instantiator<'_>,
        bodies: FxHashMap<FnInsId, Vec<StmtModel>>,
        mut errors: Vec<SemaError>,
    ) -> Analysis {
        errors.sort_by_key(|e| (e.token.line, e.token.column, e.code()));
        let instances = instantiator.into_arena();
        tracing::debug!(
            fn_instances = instances.fn_count(),
            struct_instances = instances.struct_count(),
            errors = errors.len(),
            "analysis finished"
        );
        Analysis {
            instances,
            bodies,
            errors,
        }
    }
}

/// Model one instance's body, if it has one.
fn model_body(
    instantiator: &Instantiator<'_>,
    id: FnInsId,
) -> (Option<Vec<StmtModel>>, Vec<SemaError>) {
    let decl_id = instantiator.arena().fn_ins(id).decl;
    let Some(scope) = instantiator.decls().fn_decl(decl_id).scope.as_ref() else {
        return (None, Vec::new());
    };
    let mut builder = ExprModelBuilder::for_instance(instantiator, id);
    let body = builder.build_block(scope);
    (Some(body), builder.finish())
}
