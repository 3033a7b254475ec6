use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ontoplan::{
    config::{CliConfig, InferenceConfig},
    graph_catalog::OntologySchema,
    optimise_types,
    pattern::Pattern,
    schema_executor::InMemorySchemaExecutor,
};

/// ontoplan - Infer missing types in a graph match pattern from its ontology
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Ontology definition (YAML)
    #[arg(long)]
    schema: PathBuf,

    /// Pattern to rewrite (JSON, or YAML for any other extension)
    #[arg(long)]
    pattern: PathBuf,

    /// Inference configuration (YAML); environment variables are used otherwise
    #[arg(long)]
    config: Option<PathBuf>,

    /// Solve role players without a role through placeholder roles instead of failing
    #[arg(long)]
    synthesize_missing_roles: bool,

    /// Keep inferred constraints in their own group instead of flattening
    #[arg(long)]
    preserve_grouping: bool,

    /// Prefix for placeholder variables
    #[arg(long)]
    anon_prefix: Option<String>,

    /// Output format of the rewritten pattern
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Print the inference report to stderr
    #[arg(long)]
    diagnostics: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Yaml,
    Json,
}

impl From<&Cli> for CliConfig {
    fn from(cli: &Cli) -> Self {
        CliConfig {
            synthesize_missing_roles: cli.synthesize_missing_roles,
            preserve_grouping: cli.preserve_grouping,
            anonymous_var_prefix: cli.anon_prefix.clone(),
        }
    }
}

fn read_pattern(path: &Path) -> Result<Pattern> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading pattern file {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let pattern = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("parsing JSON pattern {}", path.display()))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("parsing YAML pattern {}", path.display()))?
    };
    Ok(pattern)
}

fn main() -> Result<()> {
    // Initialize logger - defaults to INFO level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => InferenceConfig::from_yaml_file(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => InferenceConfig::from_env().context("loading configuration from environment")?,
    };
    let config = base.merge(CliConfig::from(&cli))?;

    let schema = OntologySchema::from_yaml_file(&cli.schema)
        .with_context(|| format!("loading ontology {}", cli.schema.display()))?;
    log::info!(
        "Loaded ontology {} with {} concepts",
        schema.name().unwrap_or("<unnamed>"),
        schema.len()
    );
    let executor = InMemorySchemaExecutor::from(schema);

    let pattern = read_pattern(&cli.pattern)?;
    let rewrite = optimise_types(&pattern, &executor, &config)?;

    match cli.output {
        OutputFormat::Text => println!("{}", rewrite.pattern),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&rewrite.pattern)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rewrite.pattern)?),
    }

    if cli.diagnostics {
        eprint!("{}", rewrite.diagnostics);
    }

    Ok(())
}
