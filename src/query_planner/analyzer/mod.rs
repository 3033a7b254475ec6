//! # Type Inference Analyzer
//!
//! Derives missing type annotations of a match pattern from the schema and
//! writes them back as extra constraints.
//!
//! ## Pass Pipeline Overview
//!
//! ```text
//! 1. ConstraintExtraction - isa / relation properties to schema-level atoms
//! 2. OntologyQuery        - atoms folded into one conjunctive schema query
//! 3. SchemaExecution      - query run through the SchemaQueryExecutor
//! 4. Resolution           - variables with exactly one candidate concept
//! 5. Rewriting            - isa / sub extension atoms merged into the branch
//! ```
//!
//! Each disjunction branch goes through the pipeline on its own.
//!
//! ## Module Organization
//!
//! - `type_inference.rs`: orchestration and the `TypeRewrite` result
//! - `inference_ctx.rs`: per-conjunction accumulators
//! - `constraint_extractor.rs`: isa and relation properties to atoms
//! - `ontology_query.rs`: schema query assembly
//! - `resolver.rs`: candidate sets and resolution
//! - `rewriter.rs`: extension atoms and branch recombination
//! - `diagnostics.rs`: per-branch report returned to the caller

pub mod constraint_extractor;
pub mod diagnostics;
pub mod errors;
pub mod inference_ctx;
pub mod ontology_query;
pub mod resolver;
pub mod rewriter;
pub mod type_inference;

use errors::AnalyzerError;

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
