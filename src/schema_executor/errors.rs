//! Error types for schema query execution.
//!
//! Executors backed by an external store report their own failures through
//! [`SchemaExecutionError::Backend`]; the type inference pass surfaces them
//! unchanged.

use thiserror::Error;

use crate::pattern::VarName;

#[derive(Debug, Error)]
pub enum SchemaExecutionError {
    #[error("`{property}` on {var} is not a schema-level constraint")]
    UnsupportedProperty { var: VarName, property: String },

    #[error("Schema store failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl SchemaExecutionError {
    pub fn backend(error: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        SchemaExecutionError::Backend(error.into())
    }
}
