//! Ontology Query Builder
//!
//! Collapses the atoms of an [`InferenceCtx`] into one conjunctive query over
//! schema concepts: one [`VarPattern`] per variable, duplicate properties
//! dropped. Variables anchored by a `label` or a literal `sub` come first so an
//! executor can bind them before exploring the rest of the schema.

use crate::pattern::{Conjunction, Property, TypeRef, VarPattern};

use super::inference_ctx::InferenceCtx;

pub fn build_ontology_query(ctx: &InferenceCtx) -> Conjunction<VarPattern> {
    let mut grouped: Vec<VarPattern> = Vec::new();

    for atom in &ctx.atoms {
        let index = match grouped.iter().position(|p| p.name == atom.name) {
            Some(index) => index,
            None => {
                grouped.push(VarPattern::new(atom.name.clone()));
                grouped.len() - 1
            }
        };
        let target = &mut grouped[index];
        for property in &atom.properties {
            if !target.properties.contains(property) {
                target.properties.push(property.clone());
            }
        }
    }

    let (anchored, free): (Vec<_>, Vec<_>) = grouped.into_iter().partition(|p| {
        p.properties
            .iter()
            .any(|prop| matches!(prop, Property::Label(_) | Property::Sub(TypeRef::Label(_))))
    });

    anchored.into_iter().chain(free).collect()
}
