//! InferenceConfig loading from YAML files.

use std::io::Write;

use ontoplan::config::{ConfigError, InferenceConfig, MissingRolePolicy};
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_yaml_config_with_all_fields() {
    let file = write_config(
        "missing_role_policy: synthesize\nanonymous_var_prefix: tmp_\npreserve_grouping: true\n",
    );
    let config = InferenceConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config.missing_role_policy, MissingRolePolicy::Synthesize);
    assert_eq!(config.anonymous_var_prefix, "tmp_");
    assert!(config.preserve_grouping);
}

#[test]
fn test_yaml_config_defaults_missing_fields() {
    let file = write_config("preserve_grouping: true\n");
    let config = InferenceConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config.missing_role_policy, MissingRolePolicy::Reject);
    assert_eq!(config.anonymous_var_prefix, "_");
}

#[test]
fn test_yaml_config_is_validated() {
    let file = write_config("anonymous_var_prefix: \"has space\"\n");
    assert!(matches!(
        InferenceConfig::from_yaml_file(file.path()),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn test_unknown_policy_is_a_parse_error() {
    let file = write_config("missing_role_policy: guess\n");
    assert!(matches!(
        InferenceConfig::from_yaml_file(file.path()),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn test_missing_file_is_a_parse_error() {
    let result = InferenceConfig::from_yaml_file("/nonexistent/ontoplan.yaml");
    assert!(matches!(result, Err(ConfigError::Parse { field, .. }) if field == "yaml_file"));
}
