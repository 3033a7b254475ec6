//! Pattern model: builders, rendering, serde encoding and normal form.

use ontoplan::pattern::{and, or, to_dnf, var, Pattern, TypeRef, VarName};
use test_case::test_case;

#[test_case("person", TypeRef::Label("person".into()) ; "label")]
#[test_case("$t", TypeRef::Var(VarName::new("t")) ; "variable")]
#[test_case("production-with-cast", TypeRef::Label("production-with-cast".into()) ; "hyphenated label")]
fn test_type_ref_string_encoding(encoded: &str, expected: TypeRef) {
    let parsed = TypeRef::try_from(encoded.to_string()).unwrap();
    assert_eq!(parsed, expected);
    assert_eq!(String::from(parsed), encoded);
}

#[test]
fn test_display_matches_query_syntax() {
    let pattern = and(vec![
        var("y").isa("person").into(),
        var("r").rel("actor", "y").rel_var("a", "x").into(),
        var("x").has("title", "Godfather").into(),
    ]);
    assert_eq!(
        pattern.to_string(),
        r#"{ $y isa person; $r (actor: $y, $a: $x); $x has title "Godfather"; }"#
    );
}

#[test]
fn test_json_round_trip_keeps_structure() {
    let pattern = or(vec![
        var("r").rel("actor", "y").into(),
        and(vec![var("r").rel_player("y").into(), var("y").isa_var("t").into()]),
    ]);
    let json = serde_json::to_string(&pattern).unwrap();
    let decoded: Pattern = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, pattern);
}

#[test]
fn test_dnf_distributes_conjunction_over_disjunction() {
    let pattern = and(vec![
        var("x").isa("movie").into(),
        or(vec![
            var("r").rel("actor", "y").into(),
            var("r").rel("director", "y").into(),
        ]),
        or(vec![
            var("y").has("name", "Al Pacino").into(),
            var("y").has("name", "Marlon Brando").into(),
        ]),
    ]);
    let dnf = to_dnf(&pattern);
    assert_eq!(dnf.len(), 4);
    assert!(dnf.iter().all(|branch| branch.len() == 3));
    assert_eq!(dnf.patterns[0].patterns[0], var("x").isa("movie"));
}

#[test]
fn test_var_names_cover_every_position() {
    let pattern = and(vec![
        var("x").isa_var("t").into(),
        var("_0").label("actor").sub_var("s").into(),
        var("r").rel_var("a", "x").into(),
    ]);
    let names: Vec<String> = pattern
        .var_names()
        .iter()
        .map(|n| n.as_str().to_string())
        .collect();
    assert_eq!(names, vec!["x", "t", "_0", "s", "r", "a"]);
}
