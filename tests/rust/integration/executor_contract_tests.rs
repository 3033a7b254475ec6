//! How type inference drives a third-party schema executor.

use std::collections::BTreeMap;

use mockall::mock;
use mockall::predicate::always;
use ontoplan::{
    config::InferenceConfig,
    graph_catalog::ConceptKind,
    optimise_types,
    pattern::{and, or, var, Conjunction, Pattern, Property, TypeRef, VarName, VarPattern},
    query_planner::{AnalyzerError, Pass},
    schema_executor::{Binding, ConceptRef, SchemaExecutionError, SchemaQueryExecutor},
};

mock! {
    pub Executor {}

    impl SchemaQueryExecutor for Executor {
        fn execute(
            &self,
            query: &Conjunction<VarPattern>,
        ) -> Result<Vec<Binding>, SchemaExecutionError>;
    }
}

fn binding(pairs: &[(&str, &str, ConceptKind)]) -> Binding {
    pairs
        .iter()
        .map(|(name, label, kind)| (VarName::new(*name), ConceptRef::new(*label, *kind)))
        .collect::<BTreeMap<_, _>>()
}

#[test]
fn test_backend_failure_surfaces_unchanged() {
    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .times(1)
        .returning(|_| Err(SchemaExecutionError::backend("schema store timed out")));

    let pattern: Pattern = var("r").rel("actor", "y").into();
    let error = optimise_types(&pattern, &executor, &InferenceConfig::default()).unwrap_err();

    assert_eq!(error.pass(), Pass::SchemaExecution);
    match error {
        AnalyzerError::SchemaExecution { source, .. } => {
            assert_eq!(source.to_string(), "Schema store failure: schema store timed out");
        }
        other => panic!("Expected SchemaExecution, got {:?}", other),
    }
}

#[test]
fn test_branches_without_type_constraints_are_not_executed() {
    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .with(always())
        .times(1)
        .returning(|_| Ok(vec![]));

    let pattern = or(vec![
        var("x").isa("person").into(),
        var("x").has("name", "Al Pacino").into(),
    ]);
    let rewrite = optimise_types(&pattern, &executor, &InferenceConfig::default()).unwrap();

    assert!(!rewrite.is_changed());
    assert_eq!(rewrite.diagnostics.skipped_count(), 1);
}

#[test]
fn test_ontology_query_uses_schema_level_properties_only() {
    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .withf(|query: &Conjunction<VarPattern>| {
            query.iter().flat_map(|p| p.properties.iter()).all(|property| {
                matches!(
                    property,
                    Property::Label(_) | Property::Sub(_) | Property::Plays(_) | Property::Relates(_)
                )
            })
        })
        .times(1)
        .returning(|_| Ok(vec![]));

    let pattern = and(vec![
        var("y").isa("person").has("name", "Al Pacino").into(),
        var("r").rel("actor", "y").rel_var("a", "x").into(),
    ]);
    optimise_types(&pattern, &executor, &InferenceConfig::default()).unwrap();
}

#[test]
fn test_known_types_and_role_labels_cover_their_subtypes() {
    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .withf(|query: &Conjunction<VarPattern>| {
            let anchored = |name: &str, label: &str| {
                query.iter().any(|p| {
                    p.name == VarName::new(name)
                        && p.properties.contains(&Property::Sub(TypeRef::Label(label.into())))
                })
            };
            let has_label = query
                .iter()
                .flat_map(|p| p.properties.iter())
                .any(|property| matches!(property, Property::Label(_)));
            anchored("y", "person") && anchored("_0", "actor") && !has_label
        })
        .times(1)
        .returning(|_| Ok(vec![]));

    let pattern = and(vec![
        var("y").isa("person").into(),
        var("r").rel("actor", "y").rel_var("a", "x").into(),
    ]);
    optimise_types(&pattern, &executor, &InferenceConfig::default()).unwrap();
}

#[test]
fn test_candidates_are_deduplicated_across_answers() {
    let mut executor = MockExecutor::new();
    executor.expect_execute().times(1).returning(|_| {
        Ok(vec![
            binding(&[
                ("x", "movie", ConceptKind::Entity),
                ("a", "production-being-cast", ConceptKind::Role),
            ]),
            binding(&[
                ("x", "movie", ConceptKind::Entity),
                ("a", "production-being-cast", ConceptKind::Role),
            ]),
            binding(&[
                ("x", "movie", ConceptKind::Entity),
                ("a", "production-being-directed", ConceptKind::Role),
            ]),
        ])
    });

    let pattern = and(vec![
        var("y").isa("person").into(),
        var("r").rel("actor", "y").rel_var("a", "x").into(),
    ]);
    let rewrite = optimise_types(&pattern, &executor, &InferenceConfig::default()).unwrap();

    assert_eq!(
        rewrite.pattern,
        and(vec![
            var("y").isa("person").into(),
            var("r").rel("actor", "y").rel_var("a", "x").into(),
            var("x").isa("movie").into(),
        ])
    );
    let branch = &rewrite.diagnostics.branches[0];
    assert_eq!(branch.answer_count, 3);
    assert_eq!(branch.ambiguous[&VarName::new("a")].len(), 2);
}

#[test]
fn test_known_types_in_answers_are_ignored() {
    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .times(1)
        .returning(|_| Ok(vec![binding(&[("y", "somebody-else", ConceptKind::Entity)])]));

    let pattern = and(vec![
        var("y").isa("person").into(),
        var("r").rel("actor", "y").into(),
    ]);
    let rewrite = optimise_types(&pattern, &executor, &InferenceConfig::default()).unwrap();
    assert!(!rewrite.is_changed());
    assert_eq!(rewrite.pattern, pattern);
}
