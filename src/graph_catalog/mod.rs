pub mod config;
pub mod errors;
pub mod graph_schema;

// Re-export commonly used types
pub use config::{OntologyDefinition, OntologySchemaConfig};
pub use errors::GraphSchemaError;
pub use graph_schema::{ConceptKind, OntologySchema, SchemaConcept};
