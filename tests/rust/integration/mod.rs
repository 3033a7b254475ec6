//! Integration tests - the ontology, executor and type inference working together.
//!
//! Everything runs in memory; no external schema store is required.

mod executor_contract_tests;
mod type_inference_tests;

/// Movie ontology shared by the integration tests.
pub const MOVIES_YAML: &str = r#"
name: movies
ontology:
  entities:
    - label: person
      plays: [actor, director]
    - label: production
      plays: [production-being-cast, production-being-directed]
    - label: movie
      sub: production
    - label: tv-show
      sub: production
  relations:
    - label: production-with-cast
      relates: [actor, production-being-cast]
    - label: directed-by
      relates: [director, production-being-directed]
  attributes:
    - label: title
"#;
