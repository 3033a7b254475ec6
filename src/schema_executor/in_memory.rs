//! Backtracking evaluation of ontology queries over an in-memory
//! [`OntologySchema`].
//!
//! Every query variable ranges over schema concepts. Variables are assigned in
//! order of first appearance; a variable carrying a `label` constraint only
//! ever takes that one concept, one carrying `sub <label>` ranges over that
//! label's subtypes, everything else is tried against the whole schema. Each
//! constraint is checked as soon as all of its variables are bound.
//!
//! Answers are distinct and returned in a deterministic order.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::{
    graph_catalog::{OntologySchema, SchemaConcept},
    pattern::{Conjunction, Property, TypeLabel, TypeRef, VarName, VarPattern},
};

use super::{Binding, ConceptRef, SchemaExecutionError, SchemaQueryExecutor};

#[derive(Debug, Clone)]
pub struct InMemorySchemaExecutor {
    schema: Arc<OntologySchema>,
}

impl InMemorySchemaExecutor {
    pub fn new(schema: Arc<OntologySchema>) -> Self {
        InMemorySchemaExecutor { schema }
    }
}

impl From<OntologySchema> for InMemorySchemaExecutor {
    fn from(schema: OntologySchema) -> Self {
        InMemorySchemaExecutor::new(Arc::new(schema))
    }
}

#[derive(Debug, Clone)]
enum Term {
    Var(usize),
    Label(TypeLabel),
}

#[derive(Debug, Clone)]
enum Constraint {
    Label(usize, TypeLabel),
    Sub(usize, Term),
    Plays(usize, Term),
    Relates(usize, Term),
}

impl Constraint {
    fn subject(&self) -> usize {
        match self {
            Constraint::Label(subject, _)
            | Constraint::Sub(subject, _)
            | Constraint::Plays(subject, _)
            | Constraint::Relates(subject, _) => *subject,
        }
    }

    fn object_var(&self) -> Option<usize> {
        match self {
            Constraint::Sub(_, Term::Var(index))
            | Constraint::Plays(_, Term::Var(index))
            | Constraint::Relates(_, Term::Var(index)) => Some(*index),
            _ => None,
        }
    }
}

/// Query compiled to variable indices.
struct CompiledQuery {
    vars: Vec<VarName>,
    constraints: Vec<Constraint>,
}

impl CompiledQuery {
    fn compile(query: &Conjunction<VarPattern>) -> Result<Self, SchemaExecutionError> {
        let mut compiled = CompiledQuery {
            vars: Vec::new(),
            constraints: Vec::new(),
        };

        for var_pattern in query.iter() {
            let subject = compiled.var_index(&var_pattern.name);
            for property in &var_pattern.properties {
                let constraint = match property {
                    Property::Label(label) => Constraint::Label(subject, label.clone()),
                    Property::Sub(target) => Constraint::Sub(subject, compiled.term(target)),
                    Property::Plays(target) => Constraint::Plays(subject, compiled.term(target)),
                    Property::Relates(target) => {
                        Constraint::Relates(subject, compiled.term(target))
                    }
                    Property::Isa(_) | Property::Relation(_) | Property::Has { .. } => {
                        return Err(SchemaExecutionError::UnsupportedProperty {
                            var: var_pattern.name.clone(),
                            property: property.to_string(),
                        })
                    }
                };
                compiled.constraints.push(constraint);
            }
        }

        Ok(compiled)
    }

    fn var_index(&mut self, name: &VarName) -> usize {
        match self.vars.iter().position(|v| v == name) {
            Some(index) => index,
            None => {
                self.vars.push(name.clone());
                self.vars.len() - 1
            }
        }
    }

    fn term(&mut self, target: &TypeRef) -> Term {
        match target {
            TypeRef::Label(label) => Term::Label(label.clone()),
            TypeRef::Var(name) => Term::Var(self.var_index(name)),
        }
    }
}

struct Search<'a> {
    schema: &'a OntologySchema,
    query: &'a CompiledQuery,
    assignment: Vec<Option<&'a SchemaConcept>>,
    answers: BTreeSet<Binding>,
}

impl<'a> Search<'a> {
    fn run(&mut self, depth: usize) {
        if depth == self.query.vars.len() {
            let binding = self
                .query
                .vars
                .iter()
                .zip(&self.assignment)
                .filter_map(|(name, concept)| {
                    concept.map(|c| (name.clone(), ConceptRef::new(c.label.clone(), c.kind)))
                })
                .collect();
            self.answers.insert(binding);
            return;
        }

        for concept in self.domain(depth) {
            self.assignment[depth] = Some(concept);
            if self.consistent(depth) {
                self.run(depth + 1);
            }
        }
        self.assignment[depth] = None;
    }

    fn domain(&self, index: usize) -> Vec<&'a SchemaConcept> {
        let fixed = self.query.constraints.iter().find_map(|c| match c {
            Constraint::Label(subject, label) if *subject == index => Some(label),
            _ => None,
        });
        if let Some(label) = fixed {
            return self.schema.concept(label).into_iter().collect();
        }

        let schema = self.schema;
        let upper = self.query.constraints.iter().find_map(|c| match c {
            Constraint::Sub(subject, Term::Label(label)) if *subject == index => Some(label),
            _ => None,
        });
        match upper {
            Some(sup) => schema
                .concepts()
                .filter(|concept| schema.is_subtype_of(&concept.label, sup))
                .collect(),
            None => schema.concepts().collect(),
        }
    }

    /// Check every constraint that became fully bound with variable `index`.
    fn consistent(&self, index: usize) -> bool {
        self.query.constraints.iter().all(|constraint| {
            let subject = constraint.subject();
            let object = constraint.object_var();
            let involves = subject == index || object == Some(index);
            let bound = subject <= index && object.map_or(true, |o| o <= index);
            !(involves && bound) || self.holds(constraint)
        })
    }

    fn holds(&self, constraint: &Constraint) -> bool {
        match constraint {
            Constraint::Label(subject, label) => self.label_of(*subject) == Some(label),
            Constraint::Sub(subject, target) => match (self.label_of(*subject), self.resolve(target)) {
                (Some(sub), Some(sup)) => self.schema.is_subtype_of(sub, sup),
                _ => false,
            },
            Constraint::Plays(subject, role) => match (self.label_of(*subject), self.resolve(role)) {
                (Some(player), Some(role)) => self.schema.plays(player, role),
                _ => false,
            },
            Constraint::Relates(subject, role) => {
                match (self.label_of(*subject), self.resolve(role)) {
                    (Some(relation), Some(role)) => self.schema.relates(relation, role),
                    _ => false,
                }
            }
        }
    }

    fn label_of(&self, index: usize) -> Option<&TypeLabel> {
        self.assignment[index].map(|concept| &concept.label)
    }

    fn resolve<'t>(&'t self, term: &'t Term) -> Option<&'t TypeLabel> {
        match term {
            Term::Label(label) => Some(label),
            Term::Var(index) => self.label_of(*index),
        }
    }
}

impl SchemaQueryExecutor for InMemorySchemaExecutor {
    fn execute(
        &self,
        query: &Conjunction<VarPattern>,
    ) -> Result<Vec<Binding>, SchemaExecutionError> {
        let compiled = CompiledQuery::compile(query)?;
        let mut search = Search {
            schema: &self.schema,
            query: &compiled,
            assignment: vec![None; compiled.vars.len()],
            answers: BTreeSet::new(),
        };
        search.run(0);

        log::trace!(
            "InMemorySchemaExecutor: {} answers for {}",
            search.answers.len(),
            query
        );
        Ok(search.answers.into_iter().collect())
    }
}
