//! Type Inference Pass
//!
//! Drives the whole rewrite for one input pattern:
//!
//! ```text
//! Pattern ── to_dnf ──► branch₁ … branchₙ
//!   per branch:
//!     ConstraintExtractor ─► InferenceCtx
//!     build_ontology_query ─► schema-level conjunction (empty ⇒ skip branch)
//!     SchemaQueryExecutor::execute ─► answers
//!     CandidateBindings / resolve ─► variables with exactly one candidate
//!     extension_atoms + merge_branch ─► Transformed<Pattern>
//! recombine branches (or hand back the input if nothing changed)
//! ```
//!
//! Branches are independent; the only state shared between them is the
//! placeholder arena, which keeps fresh names unique across the whole output.
//! Any error aborts the rewrite without partial output.

use crate::{
    config::InferenceConfig,
    pattern::{to_dnf, Conjunction, Pattern, VarPattern},
    query_planner::{transformed::Transformed, var_arena::VarArena},
    schema_executor::SchemaQueryExecutor,
};

use super::{
    constraint_extractor::ConstraintExtractor,
    diagnostics::{BranchDiagnostics, InferenceDiagnostics},
    errors::{AnalyzerError, Pass},
    ontology_query::build_ontology_query,
    resolver::{resolve, CandidateBindings},
    rewriter::{extension_atoms, merge_branch, recombine},
    AnalyzerResult,
};

/// Output of a rewrite.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRewrite {
    pub pattern: Pattern,
    pub diagnostics: InferenceDiagnostics,
    changed: bool,
}

impl TypeRewrite {
    /// Whether any extension atom was added.
    pub fn is_changed(&self) -> bool {
        self.changed
    }
}

#[derive(Debug, Clone, Default)]
pub struct TypeInference {
    config: InferenceConfig,
}

impl TypeInference {
    pub fn new(config: InferenceConfig) -> Self {
        TypeInference { config }
    }

    pub fn rewrite<E>(&self, pattern: &Pattern, executor: &E) -> AnalyzerResult<TypeRewrite>
    where
        E: SchemaQueryExecutor + ?Sized,
    {
        let dnf = to_dnf(pattern);
        let mut arena = VarArena::for_pattern(self.config.anonymous_var_prefix.as_str(), pattern);
        let mut diagnostics = InferenceDiagnostics::default();

        log::debug!("TypeInference: {} branch(es) for {}", dnf.len(), pattern);

        let mut branches = Vec::with_capacity(dnf.len());
        for (index, branch) in dnf.iter().enumerate() {
            let (rewritten, branch_diagnostics) =
                self.rewrite_branch(index, branch, executor, &mut arena)?;
            diagnostics.push(branch_diagnostics);
            branches.push(rewritten);
        }

        let changed = branches.iter().any(Transformed::is_yes);
        let pattern = if changed {
            recombine(branches.into_iter().map(Transformed::get_plan).collect())
        } else {
            pattern.clone()
        };

        log::info!(
            "TypeInference: {} resolved, {} ambiguous, {} skipped branch(es), changed={}",
            diagnostics.resolved_count(),
            diagnostics.ambiguous_count(),
            diagnostics.skipped_count(),
            changed
        );

        Ok(TypeRewrite {
            pattern,
            diagnostics,
            changed,
        })
    }

    fn rewrite_branch<E>(
        &self,
        index: usize,
        branch: &Conjunction<VarPattern>,
        executor: &E,
        arena: &mut VarArena,
    ) -> AnalyzerResult<(Transformed<Pattern>, BranchDiagnostics)>
    where
        E: SchemaQueryExecutor + ?Sized,
    {
        let unchanged = || Transformed::No(Pattern::from(branch.clone()));

        let ctx = ConstraintExtractor::new(self.config.missing_role_policy, arena).extract(branch)?;
        let query = build_ontology_query(&ctx);
        if query.is_empty() {
            log::debug!("TypeInference: branch {} has no type constraints, skipping", index);
            return Ok((unchanged(), BranchDiagnostics::skipped(index)));
        }

        log::debug!("TypeInference: branch {} ontology query {}", index, query);
        let answers = executor
            .execute(&query)
            .map_err(|source| AnalyzerError::SchemaExecution {
                pass: Pass::SchemaExecution,
                source,
            })?;
        for answer in &answers {
            log::trace!("TypeInference: branch {} binding {:?}", index, answer);
        }

        let mut diagnostics = BranchDiagnostics::new(index);
        diagnostics.query_size = query.len();
        diagnostics.answer_count = answers.len();
        if answers.is_empty() {
            diagnostics.warn("ontology query has no answers; pattern cannot match this schema");
        }

        let candidates = CandidateBindings::collect(&answers, &ctx);
        let resolution = resolve(&candidates, &ctx);
        log::debug!(
            "TypeInference: branch {} candidates for {} variable(s), {} resolved",
            index,
            candidates.len(),
            resolution.resolved.len()
        );

        for (name, labels) in &resolution.ambiguous {
            let labels: Vec<&str> = labels.iter().map(|l| l.as_str()).collect();
            log::warn!(
                "TypeInference: branch {}: {} is ambiguous ({}), left untyped",
                index,
                name,
                labels.join(", ")
            );
        }
        for (name, concept) in &resolution.kind_mismatches {
            diagnostics.warn(format!(
                "role variable {} bound to {} concept {}, left untyped",
                name, concept.kind, concept.label
            ));
        }
        diagnostics.ambiguous = resolution.ambiguous.clone();
        diagnostics.resolved = resolution
            .resolved
            .iter()
            .map(|(name, concept)| (name.clone(), concept.label.clone()))
            .collect();

        let extension = extension_atoms(&resolution, &ctx, branch, arena);
        if extension.is_empty() {
            return Ok((unchanged(), diagnostics));
        }

        let merged = merge_branch(branch, extension, self.config.preserve_grouping);
        log::debug!("TypeInference: branch {} rewritten to {}", index, merged);
        Ok((Transformed::Yes(merged), diagnostics))
    }
}
