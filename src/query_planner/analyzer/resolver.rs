//! Result Deduplicator / Resolver
//!
//! Folds the answers of the ontology query into candidate sets and keeps the
//! variables with exactly one candidate.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    graph_catalog::ConceptKind,
    pattern::{TypeLabel, VarName},
    schema_executor::{Binding, ConceptRef},
};

use super::inference_ctx::InferenceCtx;

/// Distinct candidate labels per inferable variable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateBindings {
    candidates: BTreeMap<VarName, BTreeMap<TypeLabel, ConceptKind>>,
}

impl CandidateBindings {
    pub fn collect(answers: &[Binding], ctx: &InferenceCtx) -> Self {
        let mut bindings = CandidateBindings::default();
        for answer in answers {
            for (name, concept) in answer {
                if ctx.is_inferable(name) {
                    bindings.insert(name.clone(), concept);
                }
            }
        }
        bindings
    }

    fn insert(&mut self, name: VarName, concept: &ConceptRef) {
        self.candidates
            .entry(name)
            .or_default()
            .insert(concept.label.clone(), concept.kind);
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Variables with a single candidate concept.
    pub resolved: BTreeMap<VarName, ConceptRef>,
    /// Variables with more than one candidate; left untouched.
    pub ambiguous: BTreeMap<VarName, BTreeSet<TypeLabel>>,
    /// Role variables whose single candidate is not a role concept.
    pub kind_mismatches: BTreeMap<VarName, ConceptRef>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

pub fn resolve(candidates: &CandidateBindings, ctx: &InferenceCtx) -> Resolution {
    let mut resolution = Resolution::default();

    for (name, labels) in &candidates.candidates {
        if labels.len() > 1 {
            resolution
                .ambiguous
                .insert(name.clone(), labels.keys().cloned().collect());
            continue;
        }
        let Some((label, kind)) = labels.iter().next() else {
            continue;
        };
        let concept = ConceptRef::new(label.clone(), *kind);
        if ctx.unknown_roles.contains(name) && !concept.is_role() {
            resolution.kind_mismatches.insert(name.clone(), concept);
        } else {
            resolution.resolved.insert(name.clone(), concept);
        }
    }

    resolution
}
