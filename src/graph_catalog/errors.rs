//! # Ontology Schema Error Types
//!
//! Errors raised while loading and validating an ontology definition.
//!
//! ## Error Categories
//!
//! - **Configuration Errors**: file I/O and YAML parsing
//! - **Declaration Errors**: duplicate labels, unknown references
//! - **Hierarchy Errors**: `sub` across kinds, cyclic `sub` chains

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphSchemaError {
    #[error("Failed to read configuration file: {error}")]
    ConfigReadError { error: String },
    #[error("Failed to parse configuration: {error}")]
    ConfigParseError { error: String },
    #[error("Label `{label}` is declared more than once")]
    DuplicateLabel { label: String },
    #[error("`{label}` is declared as a subtype of unknown type `{sup}`")]
    UnknownSupertype { label: String, sup: String },
    #[error("`{label}` cannot be a subtype of `{sup}`: they are different kinds of concept")]
    SubKindMismatch { label: String, sup: String },
    #[error("Cyclic type hierarchy through `{label}`")]
    CyclicSub { label: String },
    #[error("`{owner}` refers to undeclared role `{role}`")]
    UnknownRole { owner: String, role: String },
    #[error("`{owner}` refers to `{label}` as a role, but it is declared as another kind of type")]
    NotARole { owner: String, label: String },
}

impl GraphSchemaError {
    /// Create a configuration read error with context information
    ///
    /// # Example
    /// ```ignore
    /// GraphSchemaError::read_error_with_context("movies.yaml", io_error)
    /// ```
    pub fn read_error_with_context(
        config_path: impl Into<String>,
        error: impl std::fmt::Display,
    ) -> Self {
        GraphSchemaError::ConfigReadError {
            error: format!("'{}': {}", config_path.into(), error),
        }
    }
}
