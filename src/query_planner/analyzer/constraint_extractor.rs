//! Constraint Extractor
//!
//! Walks one conjunction and turns the type information implied by its
//! `isa` and relation properties into schema-level atoms.
//!
//! Every variable of the data pattern doubles as the variable for its own type
//! in the ontology query:
//!
//! ```text
//! $y isa person;                 =>  $y sub person;
//! $r (actor: $y, $a: $x);        =>  $_0 sub actor;
//!                                    $y plays $_0;  $r relates $_0;
//!                                    $x plays $a;   $r relates $a;
//! ```
//!
//! Literal types and role labels are anchored with `sub` rather than `label`.
//! `isa` matches instances of subtypes and a role slot matches castings in
//! any sub-role, so the schema declarations of the whole subtree count.
//!
//! `isa` with a variable target, `has`, and schema-level properties written in
//! the data pattern contribute nothing.

use crate::{
    config::MissingRolePolicy,
    pattern::{var, Conjunction, Property, RolePlayer, TypeRef, VarName, VarPattern},
    query_planner::var_arena::VarArena,
};

use super::{
    errors::{AnalyzerError, Pass},
    inference_ctx::InferenceCtx,
    AnalyzerResult,
};

pub struct ConstraintExtractor<'a> {
    policy: MissingRolePolicy,
    arena: &'a mut VarArena,
}

impl<'a> ConstraintExtractor<'a> {
    pub fn new(policy: MissingRolePolicy, arena: &'a mut VarArena) -> Self {
        ConstraintExtractor { policy, arena }
    }

    /// Fold the contexts of all patterns in the conjunction.
    pub fn extract(&mut self, conjunction: &Conjunction<VarPattern>) -> AnalyzerResult<InferenceCtx> {
        conjunction
            .iter()
            .try_fold(InferenceCtx::default(), |ctx, var_pattern| {
                Ok(ctx.merge(self.extract_var_pattern(var_pattern)?))
            })
    }

    fn extract_var_pattern(&mut self, var_pattern: &VarPattern) -> AnalyzerResult<InferenceCtx> {
        let mut ctx = InferenceCtx::default();
        for property in &var_pattern.properties {
            match property {
                Property::Isa(TypeRef::Label(label)) => {
                    ctx.mark_known(var_pattern.name.clone());
                    ctx.push_atom(var(var_pattern.name.clone()).sub(label.clone()));
                }
                Property::Relation(role_players) => {
                    let relation = self.extract_relation(&var_pattern.name, role_players)?;
                    ctx = ctx.merge(relation);
                }
                Property::Isa(TypeRef::Var(_))
                | Property::Sub(_)
                | Property::Label(_)
                | Property::Plays(_)
                | Property::Relates(_)
                | Property::Has { .. } => {}
            }
        }
        Ok(ctx)
    }

    fn extract_relation(
        &mut self,
        relation: &VarName,
        role_players: &[RolePlayer],
    ) -> AnalyzerResult<InferenceCtx> {
        let mut ctx = InferenceCtx::default();
        for role_player in role_players {
            let role = self.role_var(relation, role_player, &mut ctx)?;
            ctx.push_atom(var(role_player.player.clone()).plays(role.clone()));
            ctx.push_atom(var(relation.clone()).relates(role));
        }
        Ok(ctx)
    }

    /// Variable standing for the role type of one slot. A labelled slot gets a
    /// placeholder ranging over the label and its sub-roles.
    fn role_var(
        &mut self,
        relation: &VarName,
        role_player: &RolePlayer,
        ctx: &mut InferenceCtx,
    ) -> AnalyzerResult<VarName> {
        match &role_player.role {
            Some(TypeRef::Label(label)) => {
                let placeholder = self.arena.fresh();
                ctx.mark_known(placeholder.clone());
                ctx.push_atom(var(placeholder.clone()).sub(label.clone()));
                Ok(placeholder)
            }
            Some(TypeRef::Var(name)) => {
                ctx.mark_unknown_role(name.clone());
                Ok(name.clone())
            }
            None => match self.policy {
                MissingRolePolicy::Reject => Err(AnalyzerError::MalformedRelation {
                    pass: Pass::ConstraintExtraction,
                    relation: relation.clone(),
                    player: role_player.player.clone(),
                }),
                MissingRolePolicy::Synthesize => {
                    let placeholder = self.arena.fresh();
                    log::debug!(
                        "ConstraintExtractor: synthesized role {} for {} in {}",
                        placeholder,
                        role_player.player,
                        relation
                    );
                    ctx.mark_unknown_role(placeholder.clone());
                    ctx.synthesized.insert(placeholder.clone());
                    Ok(placeholder)
                }
            },
        }
    }
}
