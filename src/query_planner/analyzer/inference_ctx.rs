//! Per-conjunction inference state.
//!
//! Each [`VarPattern`] of a conjunction is extracted into its own
//! [`InferenceCtx`]; the results are folded together with
//! [`InferenceCtx::merge`]. Nothing is shared or mutated across patterns, and
//! the empty context is the identity of the merge.

use std::collections::BTreeSet;

use crate::pattern::{VarName, VarPattern};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InferenceCtx {
    /// Variables whose type is already a literal (or that stand for a literal
    /// role label). Never re-inferred.
    pub known_types: BTreeSet<VarName>,
    /// Role variables. Resolved roles are written back as `sub` constraints
    /// rather than `isa`.
    pub unknown_roles: BTreeSet<VarName>,
    /// Placeholders standing in for role slots that had no role reference.
    /// Solved like any role but never written back.
    pub synthesized: BTreeSet<VarName>,
    /// Schema-level atoms contributed to the ontology query.
    pub atoms: Vec<VarPattern>,
}

impl InferenceCtx {
    pub fn merge(mut self, other: InferenceCtx) -> InferenceCtx {
        self.known_types.extend(other.known_types);
        self.unknown_roles.extend(other.unknown_roles);
        self.synthesized.extend(other.synthesized);
        self.atoms.extend(other.atoms);
        self
    }

    pub fn mark_known(&mut self, name: VarName) {
        self.known_types.insert(name);
    }

    pub fn mark_unknown_role(&mut self, name: VarName) {
        self.unknown_roles.insert(name);
    }

    pub fn push_atom(&mut self, atom: VarPattern) {
        self.atoms.push(atom);
    }

    /// Whether a binding for `name` is inference material.
    pub fn is_inferable(&self, name: &VarName) -> bool {
        !self.known_types.contains(name) && !self.synthesized.contains(name)
    }
}

impl FromIterator<InferenceCtx> for InferenceCtx {
    fn from_iter<I: IntoIterator<Item = InferenceCtx>>(iter: I) -> Self {
        iter.into_iter().fold(InferenceCtx::default(), InferenceCtx::merge)
    }
}
