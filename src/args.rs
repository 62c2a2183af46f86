//! CLI argument definitions.

use clap::Args;
use std::path::PathBuf;

/// Arguments of `seedfill populate`.
#[derive(Args, Clone, Debug)]
pub struct PopulateArgs {
    /// Path to schema YAML file
    #[arg(long, short = 's', env = "SEEDFILL_SCHEMA")]
    pub schema: PathBuf,

    /// Type to populate
    #[arg(long = "type", short = 't', value_name = "NAME")]
    pub type_name: String,

    /// Number of objects to generate
    #[arg(long, short = 'n', default_value = "1")]
    pub count: u64,

    /// Random seed for deterministic generation (overrides the schema's seed)
    #[arg(long, env = "SEEDFILL_SEED")]
    pub seed: Option<u64>,

    /// Output JSONL file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Fields to leave null, as `type.field` or bare field names (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Maximum nesting depth for object fields (overrides the schema)
    #[arg(long)]
    pub depth: Option<usize>,
}

/// Arguments of `seedfill describe`.
#[derive(Args, Clone, Debug)]
pub struct DescribeArgs {
    /// Path to schema YAML file
    #[arg(long, short = 's', env = "SEEDFILL_SCHEMA")]
    pub schema: PathBuf,

    /// Type to describe (default: every type in the schema)
    #[arg(long = "type", short = 't', value_name = "NAME")]
    pub type_name: Option<String>,
}
