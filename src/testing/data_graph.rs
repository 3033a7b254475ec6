//! Instance-level pattern matching over a small in-memory graph.
//!
//! Variables range over instances and schema concepts, so a pattern and its
//! rewrite (which may mention `label`/`sub` type variables) can be executed
//! against the same data and their answers compared.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::{
    graph_catalog::OntologySchema,
    pattern::{to_dnf, Conjunction, Literal, Pattern, Property, RolePlayer, TypeLabel, TypeRef, VarName, VarPattern},
    schema_executor::InMemorySchemaExecutor,
};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Value {
    Instance(String),
    Concept(TypeLabel),
}

pub type Answer = BTreeMap<VarName, Value>;

#[derive(Debug, Clone)]
struct Instance {
    type_label: TypeLabel,
    attributes: Vec<(TypeLabel, Literal)>,
    /// (role, player id) pairs when the instance is a relation.
    castings: Vec<(TypeLabel, String)>,
}

#[derive(Debug, Clone)]
pub struct DataGraph {
    schema: Arc<OntologySchema>,
    instances: BTreeMap<String, Instance>,
}

impl DataGraph {
    pub fn new(schema: OntologySchema) -> Self {
        DataGraph {
            schema: Arc::new(schema),
            instances: BTreeMap::new(),
        }
    }

    pub fn executor(&self) -> InMemorySchemaExecutor {
        InMemorySchemaExecutor::new(self.schema.clone())
    }

    pub fn entity(mut self, id: &str, type_label: &str, attributes: &[(&str, Literal)]) -> Self {
        self.instances.insert(
            id.to_string(),
            Instance {
                type_label: TypeLabel::new(type_label),
                attributes: attributes
                    .iter()
                    .map(|(attribute, value)| (TypeLabel::new(*attribute), value.clone()))
                    .collect(),
                castings: Vec::new(),
            },
        );
        self
    }

    pub fn relation(mut self, id: &str, type_label: &str, castings: &[(&str, &str)]) -> Self {
        self.instances.insert(
            id.to_string(),
            Instance {
                type_label: TypeLabel::new(type_label),
                attributes: Vec::new(),
                castings: castings
                    .iter()
                    .map(|(role, player)| (TypeLabel::new(*role), player.to_string()))
                    .collect(),
            },
        );
        self
    }

    /// Distinct answers over every branch of the pattern.
    pub fn execute(&self, pattern: &Pattern) -> BTreeSet<Answer> {
        to_dnf(pattern)
            .iter()
            .flat_map(|branch| self.match_conjunction(branch))
            .collect()
    }

    fn match_conjunction(&self, branch: &Conjunction<VarPattern>) -> Vec<Answer> {
        let mut vars: Vec<VarName> = Vec::new();
        for var_pattern in branch.iter() {
            for name in var_pattern.var_names() {
                if !vars.contains(&name) {
                    vars.push(name);
                }
            }
        }

        let position = |name: &VarName| vars.iter().position(|v| v == name).unwrap_or(0);
        let mut ready: Vec<Vec<(&VarName, &Property)>> = vec![Vec::new(); vars.len()];
        for var_pattern in branch.iter() {
            for property in &var_pattern.properties {
                let single = VarPattern {
                    name: var_pattern.name.clone(),
                    properties: vec![property.clone()],
                };
                let depth = single.var_names().iter().map(position).max().unwrap_or(0);
                ready[depth].push((&var_pattern.name, property));
            }
        }

        let domains: Vec<Vec<Value>> = vars.iter().map(|name| self.domain(name, branch)).collect();

        let mut search = Search {
            graph: self,
            vars: &vars,
            domains: &domains,
            ready: &ready,
            assignment: Answer::new(),
            answers: Vec::new(),
        };
        search.run(0);
        search.answers
    }

    /// Instances for data variables, concepts for type variables.
    fn domain(&self, name: &VarName, branch: &Conjunction<VarPattern>) -> Vec<Value> {
        let mut instance = false;
        let mut concept = false;
        for var_pattern in branch.iter() {
            let is_subject = var_pattern.name == *name;
            for property in &var_pattern.properties {
                match property {
                    Property::Isa(target) => {
                        instance |= is_subject;
                        concept |= target.var() == Some(name);
                    }
                    Property::Has { .. } => instance |= is_subject,
                    Property::Relation(players) => {
                        instance |= is_subject || players.iter().any(|rp| rp.player == *name);
                        concept |= players
                            .iter()
                            .any(|rp| rp.role.as_ref().and_then(TypeRef::var) == Some(name));
                    }
                    Property::Label(_) => concept |= is_subject,
                    Property::Sub(target) | Property::Plays(target) | Property::Relates(target) => {
                        concept |= is_subject || target.var() == Some(name);
                    }
                }
            }
        }

        let instances = self.instances.keys().map(|id| Value::Instance(id.clone()));
        let concepts = self.schema.concepts().map(|c| Value::Concept(c.label.clone()));
        match (instance, concept) {
            (true, false) => instances.collect(),
            (false, true) => concepts.collect(),
            _ => instances.chain(concepts).collect(),
        }
    }

    fn concept_of<'a>(&'a self, target: &'a TypeRef, assignment: &'a Answer) -> Option<&'a TypeLabel> {
        match target {
            TypeRef::Label(label) => Some(label),
            TypeRef::Var(name) => match assignment.get(name) {
                Some(Value::Concept(label)) => Some(label),
                _ => None,
            },
        }
    }

    fn holds(&self, subject: &Value, property: &Property, assignment: &Answer) -> bool {
        let schema = &self.schema;
        match (subject, property) {
            (Value::Instance(id), Property::Isa(target)) => {
                match (self.instances.get(id), self.concept_of(target, assignment)) {
                    (Some(instance), Some(label)) => schema.is_subtype_of(&instance.type_label, label),
                    _ => false,
                }
            }
            (Value::Instance(id), Property::Has { attribute, value }) => {
                self.instances.get(id).is_some_and(|instance| {
                    instance
                        .attributes
                        .iter()
                        .any(|(a, v)| a == attribute && v == value)
                })
            }
            (Value::Instance(id), Property::Relation(players)) => match self.instances.get(id) {
                Some(instance) => {
                    let mut used = vec![false; instance.castings.len()];
                    self.cast(&instance.castings, players, &mut used, assignment)
                }
                None => false,
            },
            (Value::Concept(label), Property::Label(expected)) => label == expected,
            (Value::Concept(label), Property::Sub(target)) => self
                .concept_of(target, assignment)
                .is_some_and(|sup| schema.is_subtype_of(label, sup)),
            (Value::Concept(label), Property::Plays(target)) => self
                .concept_of(target, assignment)
                .is_some_and(|role| schema.plays(label, role)),
            (Value::Concept(label), Property::Relates(target)) => self
                .concept_of(target, assignment)
                .is_some_and(|role| schema.relates(label, role)),
            _ => false,
        }
    }

    /// Assign every role player to a distinct casting of the relation.
    fn cast(
        &self,
        castings: &[(TypeLabel, String)],
        players: &[RolePlayer],
        used: &mut [bool],
        assignment: &Answer,
    ) -> bool {
        let Some((first, rest)) = players.split_first() else {
            return true;
        };
        let Some(Value::Instance(player)) = assignment.get(&first.player) else {
            return false;
        };

        for (index, (role, casting_player)) in castings.iter().enumerate() {
            if used[index] || casting_player != player {
                continue;
            }
            let role_matches = match &first.role {
                None => true,
                Some(target) => self
                    .concept_of(target, assignment)
                    .is_some_and(|expected| self.schema.is_subtype_of(role, expected)),
            };
            if role_matches {
                used[index] = true;
                if self.cast(castings, rest, used, assignment) {
                    used[index] = false;
                    return true;
                }
                used[index] = false;
            }
        }
        false
    }
}

struct Search<'a> {
    graph: &'a DataGraph,
    vars: &'a [VarName],
    domains: &'a [Vec<Value>],
    ready: &'a [Vec<(&'a VarName, &'a Property)>],
    assignment: Answer,
    answers: Vec<Answer>,
}

impl Search<'_> {
    fn run(&mut self, depth: usize) {
        if depth == self.vars.len() {
            self.answers.push(self.assignment.clone());
            return;
        }

        let (vars, domains, ready) = (self.vars, self.domains, self.ready);
        let name = &vars[depth];
        for value in &domains[depth] {
            self.assignment.insert(name.clone(), value.clone());
            let consistent = ready[depth].iter().all(|(subject, property)| {
                self.assignment
                    .get(*subject)
                    .is_some_and(|value| self.graph.holds(value, property, &self.assignment))
            });
            if consistent {
                self.run(depth + 1);
            }
        }
        self.assignment.remove(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{and, var};
    use crate::testing::movie_graph;

    /// Distinct values of `name`, sorted.
    fn ids(answers: &BTreeSet<Answer>, name: &str) -> Vec<String> {
        let values: BTreeSet<String> = answers
            .iter()
            .filter_map(|answer| match answer.get(&VarName::new(name)) {
                Some(Value::Instance(id)) => Some(id.clone()),
                Some(Value::Concept(label)) => Some(label.to_string()),
                None => None,
            })
            .collect();
        values.into_iter().collect()
    }

    #[test]
    fn test_isa_is_transitive() {
        let answers = movie_graph().execute(&var("x").isa("production").into());
        assert_eq!(ids(&answers, "x"), vec!["apocalypse-now", "godfather", "the-wire"]);
    }

    #[test]
    fn test_has_filters_by_value() {
        let answers = movie_graph().execute(&var("x").isa("movie").has("title", "Godfather").into());
        assert_eq!(ids(&answers, "x"), vec!["godfather"]);
    }

    #[test]
    fn test_relation_binds_role_variables() {
        let pattern = and(vec![
            var("x").isa("movie").has("title", "Godfather").into(),
            var("r").rel("actor", "y").rel_var("a", "x").into(),
        ]);
        let answers = movie_graph().execute(&pattern);
        assert_eq!(ids(&answers, "y"), vec!["al-pacino", "marlon-brando"]);
        assert!(ids(&answers, "a").iter().all(|a| a == "production-being-cast"));
    }

    #[test]
    fn test_type_variables_range_over_concepts() {
        let pattern = and(vec![
            var("x").isa_var("t").has("title", "Godfather").into(),
        ]);
        let answers = movie_graph().execute(&pattern);
        assert_eq!(ids(&answers, "t"), vec!["movie", "production"]);
    }

    #[test]
    fn test_sub_on_type_variables() {
        let pattern = and(vec![var("_0").label("movie").sub_var("t").into()]);
        let answers = movie_graph().execute(&pattern);
        assert_eq!(ids(&answers, "t"), vec!["movie", "production"]);
    }
}
