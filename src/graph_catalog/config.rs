//! Ontology configuration management.
//!
//! Ontologies are defined in YAML with the following structure:
//!
//! ```yaml
//! name: movies                      # Optional schema name
//! ontology:
//!   entities:
//!     - label: person
//!       plays: [actor, director]
//!     - label: movie
//!       sub: production             # Optional supertype
//!       plays: [production-being-cast]
//!   relations:
//!     - label: production-with-cast
//!       relates: [actor, production-being-cast]
//!   attributes:
//!     - label: title
//!   roles:                          # Optional; roles named in `relates` are implicit
//!     - label: actor
//!       sub: performer
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let config = OntologySchemaConfig::from_yaml_file("movies.yaml")?;
//! let schema = OntologySchema::try_from(config)?;
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::GraphSchemaError;

/// Configuration for an ontology loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OntologySchemaConfig {
    /// Optional schema name
    #[serde(default)]
    pub name: Option<String>,
    pub ontology: OntologyDefinition,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OntologyDefinition {
    #[serde(default)]
    pub entities: Vec<TypeDefinition>,
    #[serde(default)]
    pub relations: Vec<RelationDefinition>,
    #[serde(default)]
    pub attributes: Vec<TypeDefinition>,
    #[serde(default)]
    pub roles: Vec<RoleDefinition>,
}

/// Entity or attribute type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub label: String,
    #[serde(default)]
    pub sub: Option<String>,
    /// Roles instances of this type may play
    #[serde(default)]
    pub plays: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationDefinition {
    pub label: String,
    #[serde(default)]
    pub sub: Option<String>,
    /// Role slots of the relation
    #[serde(default)]
    pub relates: Vec<String>,
    #[serde(default)]
    pub plays: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub label: String,
    #[serde(default)]
    pub sub: Option<String>,
}

impl OntologySchemaConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, GraphSchemaError> {
        serde_yaml::from_str(yaml).map_err(|e| GraphSchemaError::ConfigParseError {
            error: e.to_string(),
        })
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, GraphSchemaError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| GraphSchemaError::read_error_with_context(path.display().to_string(), e))?;
        Self::from_yaml_str(&content)
    }
}
