//! # Query Planner
//!
//! Entry point of the type inference rewrite. [`optimise_types`] takes a
//! pattern whose variables may lack type annotations and returns an
//! equivalent pattern with every type that the schema pins down to a single
//! concept made explicit:
//!
//! ```text
//! { $x isa movie; $r (actor: $y, $a: $x); }
//!   =>
//! { $x isa movie; $r (actor: $y, $a: $x);
//!   $_1 label production-being-cast, sub $a;
//!   $r isa production-with-cast; $y isa person; }
//! ```
//!
//! Rewriting only adds constraints. Ambiguous variables are left alone and
//! reported through [`InferenceDiagnostics`].

use crate::{config::InferenceConfig, pattern::Pattern, schema_executor::SchemaQueryExecutor};

pub mod analyzer;
pub mod transformed;
pub mod var_arena;

pub use analyzer::{
    diagnostics::{BranchDiagnostics, InferenceDiagnostics},
    errors::{AnalyzerError, Pass},
    type_inference::{TypeInference, TypeRewrite},
    AnalyzerResult,
};
pub use transformed::Transformed;
pub use var_arena::VarArena;

pub fn optimise_types<E>(
    pattern: &Pattern,
    executor: &E,
    config: &InferenceConfig,
) -> Result<TypeRewrite, AnalyzerError>
where
    E: SchemaQueryExecutor + ?Sized,
{
    TypeInference::new(config.clone()).rewrite(pattern, executor)
}
