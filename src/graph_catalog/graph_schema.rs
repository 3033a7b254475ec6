//! In-memory ontology: schema concepts, the `sub` hierarchy and the
//! `plays`/`relates` declarations between them.
//!
//! Declarations are inherited down the type hierarchy: if `production`
//! plays `production-being-cast` and `movie sub production`, then `movie`
//! plays it too.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::pattern::TypeLabel;

use super::config::{OntologySchemaConfig, RoleDefinition, TypeDefinition};
use super::errors::GraphSchemaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConceptKind {
    Entity,
    Relation,
    Attribute,
    Role,
}

impl ConceptKind {
    pub fn is_role(&self) -> bool {
        matches!(self, ConceptKind::Role)
    }
}

impl fmt::Display for ConceptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConceptKind::Entity => write!(f, "entity"),
            ConceptKind::Relation => write!(f, "relation"),
            ConceptKind::Attribute => write!(f, "attribute"),
            ConceptKind::Role => write!(f, "role"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaConcept {
    pub label: TypeLabel,
    pub kind: ConceptKind,
    /// Direct supertype
    pub sup: Option<TypeLabel>,
    /// Directly declared roles this type plays
    pub plays: Vec<TypeLabel>,
    /// Directly declared roles of a relation type
    pub relates: Vec<TypeLabel>,
}

impl SchemaConcept {
    fn new(label: &str, kind: ConceptKind, sup: Option<&String>) -> Self {
        SchemaConcept {
            label: TypeLabel::new(label),
            kind,
            sup: sup.map(|s| TypeLabel::new(s.as_str())),
            plays: Vec::new(),
            relates: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OntologySchema {
    name: Option<String>,
    concepts: BTreeMap<TypeLabel, SchemaConcept>,
}

impl OntologySchema {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, GraphSchemaError> {
        OntologySchemaConfig::from_yaml_str(yaml)?.try_into()
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, GraphSchemaError> {
        OntologySchemaConfig::from_yaml_file(path)?.try_into()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    pub fn concept(&self, label: &TypeLabel) -> Option<&SchemaConcept> {
        self.concepts.get(label)
    }

    /// All concepts, in label order.
    pub fn concepts(&self) -> impl Iterator<Item = &SchemaConcept> {
        self.concepts.values()
    }

    /// `label` followed by its transitive supertypes. Empty for unknown labels.
    pub fn supertypes(&self, label: &TypeLabel) -> Vec<&TypeLabel> {
        let mut chain = Vec::new();
        let mut current = self.concepts.get(label);
        while let Some(concept) = current {
            chain.push(&concept.label);
            current = concept.sup.as_ref().and_then(|sup| self.concepts.get(sup));
        }
        chain
    }

    /// Reflexive, transitive `sub`.
    pub fn is_subtype_of(&self, sub: &TypeLabel, sup: &TypeLabel) -> bool {
        self.supertypes(sub).contains(&sup)
    }

    /// Whether instances of `type_label` may play `role`, directly or through a
    /// supertype's declaration.
    pub fn plays(&self, type_label: &TypeLabel, role: &TypeLabel) -> bool {
        match self.concepts.get(type_label) {
            Some(concept) if !concept.kind.is_role() => self
                .supertypes(type_label)
                .into_iter()
                .filter_map(|label| self.concepts.get(label))
                .any(|ancestor| ancestor.plays.contains(role)),
            _ => false,
        }
    }

    /// Whether relation type `relation` has the role slot `role`, directly or
    /// through a supertype's declaration.
    pub fn relates(&self, relation: &TypeLabel, role: &TypeLabel) -> bool {
        match self.concepts.get(relation) {
            Some(concept) if concept.kind == ConceptKind::Relation => self
                .supertypes(relation)
                .into_iter()
                .filter_map(|label| self.concepts.get(label))
                .any(|ancestor| ancestor.relates.contains(role)),
            _ => false,
        }
    }

    fn insert(&mut self, concept: SchemaConcept) -> Result<(), GraphSchemaError> {
        if self.concepts.contains_key(&concept.label) {
            return Err(GraphSchemaError::DuplicateLabel {
                label: concept.label.to_string(),
            });
        }
        self.concepts.insert(concept.label.clone(), concept);
        Ok(())
    }

    fn validate(&self) -> Result<(), GraphSchemaError> {
        for concept in self.concepts.values() {
            if let Some(sup) = &concept.sup {
                match self.concepts.get(sup) {
                    None => {
                        return Err(GraphSchemaError::UnknownSupertype {
                            label: concept.label.to_string(),
                            sup: sup.to_string(),
                        })
                    }
                    Some(parent) if parent.kind != concept.kind => {
                        return Err(GraphSchemaError::SubKindMismatch {
                            label: concept.label.to_string(),
                            sup: sup.to_string(),
                        })
                    }
                    Some(_) => {}
                }
            }

            for role in concept.plays.iter().chain(concept.relates.iter()) {
                match self.concepts.get(role) {
                    None => {
                        return Err(GraphSchemaError::UnknownRole {
                            owner: concept.label.to_string(),
                            role: role.to_string(),
                        })
                    }
                    Some(target) if !target.kind.is_role() => {
                        return Err(GraphSchemaError::NotARole {
                            owner: concept.label.to_string(),
                            label: role.to_string(),
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        for label in self.concepts.keys() {
            let mut seen = BTreeSet::new();
            let mut current = Some(label);
            while let Some(step) = current {
                if !seen.insert(step) {
                    return Err(GraphSchemaError::CyclicSub {
                        label: label.to_string(),
                    });
                }
                current = self.concepts.get(step).and_then(|c| c.sup.as_ref());
            }
        }

        Ok(())
    }
}

impl TryFrom<OntologySchemaConfig> for OntologySchema {
    type Error = GraphSchemaError;

    fn try_from(config: OntologySchemaConfig) -> Result<Self, Self::Error> {
        let definition = config.ontology;
        let mut schema = OntologySchema {
            name: config.name,
            concepts: BTreeMap::new(),
        };

        let typed = |def: &TypeDefinition, kind: ConceptKind| {
            let mut concept = SchemaConcept::new(&def.label, kind, def.sub.as_ref());
            concept.plays = def.plays.iter().map(|r| TypeLabel::new(r.as_str())).collect();
            concept
        };

        for entity in &definition.entities {
            schema.insert(typed(entity, ConceptKind::Entity))?;
        }
        for attribute in &definition.attributes {
            schema.insert(typed(attribute, ConceptKind::Attribute))?;
        }
        for relation in &definition.relations {
            let mut concept =
                SchemaConcept::new(&relation.label, ConceptKind::Relation, relation.sub.as_ref());
            concept.plays = relation.plays.iter().map(|r| TypeLabel::new(r.as_str())).collect();
            concept.relates = relation
                .relates
                .iter()
                .map(|r| TypeLabel::new(r.as_str()))
                .collect();
            schema.insert(concept)?;
        }
        for RoleDefinition { label, sub } in &definition.roles {
            schema.insert(SchemaConcept::new(label, ConceptKind::Role, sub.as_ref()))?;
        }

        // Roles named in `relates` need no separate declaration.
        for relation in &definition.relations {
            for role in &relation.relates {
                let label = TypeLabel::new(role.as_str());
                if !schema.concepts.contains_key(&label) {
                    schema.insert(SchemaConcept::new(role, ConceptKind::Role, None))?;
                }
            }
        }

        schema.validate()?;

        log::debug!(
            "OntologySchema: loaded {} concepts{}",
            schema.concepts.len(),
            schema
                .name
                .as_ref()
                .map(|n| format!(" for '{}'", n))
                .unwrap_or_default()
        );
        Ok(schema)
    }
}
