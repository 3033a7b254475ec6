//! ontoplan - Ontology-guided type inference for graph match patterns
//!
//! This crate rewrites match patterns so that every type the schema can pin
//! down is stated explicitly:
//! - Pattern model with disjunctive normal form conversion
//! - Ontology definitions loaded from YAML
//! - Schema query execution behind a pluggable executor trait
//! - Type inference and additive pattern rewriting

pub mod config;
pub mod graph_catalog;
pub mod pattern;
pub mod query_planner;
pub mod schema_executor;


pub use config::InferenceConfig;
pub use pattern::Pattern;
pub use query_planner::{optimise_types, AnalyzerError, InferenceDiagnostics, TypeRewrite};
pub use schema_executor::{InMemorySchemaExecutor, SchemaQueryExecutor};
