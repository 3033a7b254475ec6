use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// What the constraint extractor does with a role player that has neither a
/// role label nor a role variable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingRolePolicy {
    /// Fail the rewrite with `AnalyzerError::MalformedRelation`.
    #[default]
    Reject,
    /// Solve the slot through a placeholder role variable that is never
    /// written back into the pattern.
    Synthesize,
}

#[derive(Debug, Error)]
#[error("unknown missing role policy `{0}`, expected `reject` or `synthesize`")]
pub struct UnknownPolicyError(String);

impl FromStr for MissingRolePolicy {
    type Err = UnknownPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(MissingRolePolicy::Reject),
            "synthesize" | "synthesise" => Ok(MissingRolePolicy::Synthesize),
            _ => Err(UnknownPolicyError(s.to_string())),
        }
    }
}

impl fmt::Display for MissingRolePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingRolePolicy::Reject => write!(f, "reject"),
            MissingRolePolicy::Synthesize => write!(f, "synthesize"),
        }
    }
}

/// Type inference configuration with validation
#[derive(Clone, Debug, PartialEq, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Handling of role players without any role reference
    pub missing_role_policy: MissingRolePolicy,

    /// Prefix of placeholder variables introduced by the engine
    #[validate(
        length(
            min = 1,
            max = 16,
            message = "Anonymous variable prefix must be 1 to 16 characters"
        ),
        custom(function = "validate_prefix")
    )]
    pub anonymous_var_prefix: String,

    /// Keep `{ original } { extension }` grouping instead of flattening the
    /// inferred atoms into the original conjunction
    pub preserve_grouping: bool,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            missing_role_policy: MissingRolePolicy::Reject,
            anonymous_var_prefix: "_".to_string(),
            preserve_grouping: false,
        }
    }
}

fn validate_prefix(prefix: &str) -> Result<(), ValidationError> {
    if prefix.chars().any(|c| c.is_whitespace() || c == '$') {
        let mut error = ValidationError::new("anonymous_var_prefix");
        error.message = Some("Anonymous variable prefix cannot contain whitespace or `$`".into());
        return Err(error);
    }
    Ok(())
}

impl InferenceConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            missing_role_policy: parse_env_var("ONTOPLAN_MISSING_ROLE_POLICY", "reject")?,
            anonymous_var_prefix: env::var("ONTOPLAN_ANON_PREFIX").unwrap_or_else(|_| "_".to_string()),
            preserve_grouping: parse_env_var("ONTOPLAN_PRESERVE_GROUPING", "false")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from command line arguments on top of the defaults
    pub fn from_cli(cli: CliConfig) -> Result<Self, ConfigError> {
        Self::default().merge(cli)
    }

    /// Apply command line overrides on top of this configuration
    pub fn merge(mut self, cli: CliConfig) -> Result<Self, ConfigError> {
        if cli.synthesize_missing_roles {
            self.missing_role_policy = MissingRolePolicy::Synthesize;
        }
        if cli.preserve_grouping {
            self.preserve_grouping = true;
        }
        if let Some(prefix) = cli.anonymous_var_prefix {
            self.anonymous_var_prefix = prefix;
        }

        self.validate()?;
        Ok(self)
    }
}

/// CLI configuration (parsed from command line arguments)
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub synthesize_missing_roles: bool,
    pub preserve_grouping: bool,
    pub anonymous_var_prefix: Option<String>,
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
