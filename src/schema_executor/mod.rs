//! # Schema Query Execution
//!
//! The type inference pass asks a schema store which concepts satisfy an
//! ontology query. The store is a collaborator supplied by the caller through
//! [`SchemaQueryExecutor`]; this crate ships [`InMemorySchemaExecutor`] over an
//! [`OntologySchema`](crate::graph_catalog::OntologySchema).
//!
//! Ontology queries only use schema-level properties:
//!
//! ```text
//! $y sub person;            -- $y is `person` or one of its subtypes
//! $_0 label actor;          -- $_0 is the role `actor`
//! $y plays $_0;             -- type $y plays role $_0
//! $r relates $_0;           -- relation type $r has role $_0
//! $_1 sub $a;               -- $_1 is $a or one of its subtypes
//! ```
//!
//! An answer ([`Binding`]) maps every variable of the query to a concept.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

pub mod errors;
mod in_memory;

pub use errors::SchemaExecutionError;
pub use in_memory::InMemorySchemaExecutor;

use crate::{
    graph_catalog::ConceptKind,
    pattern::{Conjunction, TypeLabel, VarName, VarPattern},
};

/// Handle on a schema concept returned by an executor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ConceptRef {
    pub label: TypeLabel,
    pub kind: ConceptKind,
}

impl ConceptRef {
    pub fn new(label: impl Into<TypeLabel>, kind: ConceptKind) -> Self {
        ConceptRef {
            label: label.into(),
            kind,
        }
    }

    /// Distinguishes role concepts from types that have instances.
    pub fn is_role(&self) -> bool {
        self.kind.is_role()
    }
}

/// One answer to an ontology query.
pub type Binding = BTreeMap<VarName, ConceptRef>;

pub trait SchemaQueryExecutor {
    /// Run a conjunctive schema-level query.
    ///
    /// Called once per branch with a non-empty ontology query. Blocking;
    /// timeouts and retries are the implementation's business.
    fn execute(
        &self,
        query: &Conjunction<VarPattern>,
    ) -> Result<Vec<Binding>, SchemaExecutionError>;
}

impl<T: SchemaQueryExecutor + ?Sized> SchemaQueryExecutor for &T {
    fn execute(
        &self,
        query: &Conjunction<VarPattern>,
    ) -> Result<Vec<Binding>, SchemaExecutionError> {
        (**self).execute(query)
    }
}

impl<T: SchemaQueryExecutor + ?Sized> SchemaQueryExecutor for Box<T> {
    fn execute(
        &self,
        query: &Conjunction<VarPattern>,
    ) -> Result<Vec<Binding>, SchemaExecutionError> {
        (**self).execute(query)
    }
}

impl<T: SchemaQueryExecutor + ?Sized> SchemaQueryExecutor for Arc<T> {
    fn execute(
        &self,
        query: &Conjunction<VarPattern>,
    ) -> Result<Vec<Binding>, SchemaExecutionError> {
        (**self).execute(query)
    }
}
