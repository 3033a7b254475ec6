//! Rewriter
//!
//! Turns resolved variables into extension atoms and merges them back into
//! the branch they were inferred from:
//!
//! ```text
//! $x resolved to movie                  =>  $x isa movie;
//! role $a resolved to production-being-cast
//!                                       =>  $_1 label production-being-cast, sub $a;
//! ```
//!
//! Atoms that the branch already contains are not added again, so rewriting
//! an already rewritten pattern changes nothing.

use crate::{
    pattern::{var, Conjunction, Disjunction, Pattern, Property, TypeLabel, TypeRef, VarName, VarPattern},
    query_planner::var_arena::VarArena,
};

use super::{inference_ctx::InferenceCtx, resolver::Resolution};

/// Extension atoms in variable-name order.
pub fn extension_atoms(
    resolution: &Resolution,
    ctx: &InferenceCtx,
    branch: &Conjunction<VarPattern>,
    arena: &mut VarArena,
) -> Vec<VarPattern> {
    let mut atoms = Vec::new();
    for (name, concept) in &resolution.resolved {
        if ctx.unknown_roles.contains(name) {
            if !has_role_extension(branch, name, &concept.label) {
                atoms.push(var(arena.fresh()).label(concept.label.clone()).sub_var(name.clone()));
            }
        } else if !has_isa(branch, name, &concept.label) {
            atoms.push(var(name.clone()).isa(concept.label.clone()));
        }
    }
    atoms
}

fn has_isa(branch: &Conjunction<VarPattern>, name: &VarName, label: &TypeLabel) -> bool {
    branch.iter().any(|pattern| {
        pattern.name == *name
            && pattern
                .properties
                .iter()
                .any(|p| matches!(p, Property::Isa(TypeRef::Label(l)) if l == label))
    })
}

fn has_role_extension(branch: &Conjunction<VarPattern>, role: &VarName, label: &TypeLabel) -> bool {
    branch.iter().any(|pattern| match pattern.properties.as_slice() {
        [Property::Label(l), Property::Sub(TypeRef::Var(sup))] => l == label && sup == role,
        _ => false,
    })
}

/// `{ original; extension; }`, or `{ { original } { extension } }` when the
/// grouping is kept.
pub fn merge_branch(
    branch: &Conjunction<VarPattern>,
    extension: Vec<VarPattern>,
    preserve_grouping: bool,
) -> Pattern {
    if preserve_grouping {
        let original: Pattern = branch.clone().into();
        let extension: Pattern = Conjunction::new(extension).into();
        return Pattern::Conjunction(Conjunction::new(vec![original, extension]));
    }
    Pattern::Conjunction(branch.iter().cloned().chain(extension).map(Pattern::Var).collect())
}

/// Single branch stays a conjunction, several become a disjunction.
pub fn recombine(mut branches: Vec<Pattern>) -> Pattern {
    if branches.len() == 1 {
        if let Some(branch) = branches.pop() {
            return branch;
        }
    }
    Pattern::Disjunction(Disjunction::new(branches))
}
