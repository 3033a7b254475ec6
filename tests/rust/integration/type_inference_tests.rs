//! End-to-end rewrites through the public entry point.

use std::sync::Arc;

use ontoplan::{
    config::{InferenceConfig, MissingRolePolicy},
    graph_catalog::OntologySchema,
    optimise_types,
    pattern::{and, or, var, Pattern},
    query_planner::{AnalyzerError, Pass},
    schema_executor::InMemorySchemaExecutor,
};

use super::MOVIES_YAML;

fn executor() -> Arc<InMemorySchemaExecutor> {
    let schema = OntologySchema::from_yaml_str(MOVIES_YAML).unwrap();
    Arc::new(InMemorySchemaExecutor::from(schema))
}

#[test]
fn test_rewrite_of_json_pattern() {
    let json = r#"{
        "conjunction": [
            {"var": {"name": "x", "properties": [{"isa": "movie"}]}},
            {"var": {"name": "r", "properties": [{"relation": [
                {"role": "actor", "player": "y"},
                {"role": "$a", "player": "x"}
            ]}]}}
        ]
    }"#;
    let pattern: Pattern = serde_json::from_str(json).unwrap();
    let rewrite = optimise_types(&pattern, &executor(), &InferenceConfig::default()).unwrap();

    assert!(rewrite.is_changed());
    assert_eq!(
        rewrite.pattern.to_string(),
        "{ $x isa movie; $r (actor: $y, $a: $x); $_1 label production-being-cast, sub $a; \
         $r isa production-with-cast; $y isa person; }"
    );
    assert_eq!(rewrite.diagnostics.resolved_count(), 3);
    assert_eq!(rewrite.diagnostics.ambiguous_count(), 0);
}

#[test]
fn test_executor_handle_can_be_shared() {
    let executor = executor();
    let pattern: Pattern = var("r").rel("director", "y").into();
    let config = InferenceConfig::default();

    let first = optimise_types(&pattern, &executor, &config).unwrap();
    let second = optimise_types(&pattern, &*executor, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_anonymous_prefix_is_configurable() {
    let config = InferenceConfig {
        anonymous_var_prefix: "anon".to_string(),
        ..Default::default()
    };
    let pattern = and(vec![
        var("x").isa("movie").into(),
        var("r").rel("actor", "y").rel_var("a", "x").into(),
    ]);
    let rewrite = optimise_types(&pattern, &executor(), &config).unwrap();
    assert!(rewrite
        .pattern
        .to_string()
        .contains("$anon1 label production-being-cast, sub $a;"));
}

#[test]
fn test_placeholders_avoid_existing_names() {
    let pattern = and(vec![
        var("_0").isa("movie").into(),
        var("_1").rel("actor", "_2").rel_var("_3", "_0").into(),
    ]);
    let rewrite = optimise_types(&pattern, &executor(), &InferenceConfig::default()).unwrap();
    // _4 labels the literal actor role inside the ontology query, _5 is written back.
    assert!(rewrite
        .pattern
        .to_string()
        .contains("$_5 label production-being-cast, sub $_3;"));
}

#[test]
fn test_disjunction_output_shape() {
    let pattern = or(vec![
        var("r").rel("actor", "y").into(),
        var("r").rel("director", "y").into(),
    ]);
    let rewrite = optimise_types(&pattern, &executor(), &InferenceConfig::default()).unwrap();
    assert_eq!(
        rewrite.pattern.to_string(),
        "{ $r (actor: $y); $r isa production-with-cast; $y isa person; } or \
         { $r (director: $y); $r isa directed-by; $y isa person; };"
    );
}

#[test]
fn test_malformed_relation_is_fatal() {
    let pattern: Pattern = var("r").rel("actor", "y").rel_player("x").into();
    let error = optimise_types(&pattern, &executor(), &InferenceConfig::default()).unwrap_err();

    assert_eq!(error.pass(), Pass::ConstraintExtraction);
    assert!(matches!(error, AnalyzerError::MalformedRelation { .. }));
    assert!(error.to_string().contains("role player $x"));
}

#[test]
fn test_synthesize_policy_accepts_missing_roles() {
    let config = InferenceConfig {
        missing_role_policy: MissingRolePolicy::Synthesize,
        ..Default::default()
    };
    let pattern: Pattern = var("r").rel("actor", "y").rel_player("x").into();
    let rewrite = optimise_types(&pattern, &executor(), &config).unwrap();
    assert_eq!(
        rewrite.pattern.to_string(),
        "{ $r (actor: $y, $x); $r isa production-with-cast; $y isa person; }"
    );
}
