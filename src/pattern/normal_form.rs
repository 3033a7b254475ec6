//! Disjunctive Normal Form
//!
//! Expands an arbitrary AND/OR pattern tree into an OR of ANDs over
//! [`VarPattern`]s, so every branch can be analysed on its own.
//!
//! ```text
//! { $x isa movie; { $r (actor: $x); } or { $r (director: $x); }; }
//! →
//! { $x isa movie; $r (actor: $x); } or { $x isa movie; $r (director: $x); }
//! ```
//!
//! Every `VarPattern` is copied as-is into each branch it belongs to; its
//! properties are never merged with other patterns on the same variable.
//! An empty conjunction is `true` (one empty branch) and an empty
//! disjunction is `false` (no branches).

use super::{Conjunction, Disjunction, Pattern, VarPattern};

pub fn to_dnf(pattern: &Pattern) -> Disjunction<Conjunction<VarPattern>> {
    match pattern {
        Pattern::Var(var_pattern) => {
            Disjunction::new(vec![Conjunction::new(vec![var_pattern.clone()])])
        }
        Pattern::Disjunction(disjunction) => disjunction
            .iter()
            .flat_map(|branch| to_dnf(branch).patterns)
            .collect(),
        Pattern::Conjunction(conjunction) => {
            // Cross product of the children's branches.
            let mut branches: Vec<Vec<VarPattern>> = vec![Vec::new()];
            for child in conjunction.iter() {
                let child_branches = to_dnf(child);
                let mut next = Vec::with_capacity(branches.len() * child_branches.len());
                for prefix in &branches {
                    for child_branch in child_branches.iter() {
                        let mut combined = prefix.clone();
                        combined.extend(child_branch.iter().cloned());
                        next.push(combined);
                    }
                }
                branches = next;
            }
            branches.into_iter().map(Conjunction::new).collect()
        }
    }
}
