use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "distsim",
    about = "Generate star-schema dimension tables for a consumer-goods distributor",
    version,
    after_help = "Examples:\n  distsim generate --seed 42 --out-dir out\n  distsim generate --from-lock             # rebuild the last run exactly\n  distsim preview --rows 5\n  distsim check                            # verify distsim.lock still reproduces\n  distsim graph --format dot"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding distsim.toml
    #[arg(long, global = true, default_value = ".")]
    pub config_dir: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate every dimension table and write the lock file
    Generate(GenerateArgs),

    /// Print the first rows of every table without writing anything
    Preview(PreviewArgs),

    /// Rebuild from the lock file and verify the tables are identical
    Check(CheckArgs),

    /// Visualize the generator dependency graph
    Graph(GraphArgs),
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Random seed for deterministic generation
    #[arg(long, env = "DISTSIM_SEED")]
    pub seed: Option<u64>,

    /// Reuse the seed and config recorded in distsim.lock
    #[arg(long)]
    pub from_lock: bool,

    /// Output directory (overrides [output].dir)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Output format (overrides [output].format)
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Lock file path
    #[arg(long, default_value = distsim_core::lock::LOCK_FILE_NAME)]
    pub lock: PathBuf,
}

#[derive(Parser, Debug)]
pub struct PreviewArgs {
    /// Random seed for deterministic generation
    #[arg(long, env = "DISTSIM_SEED")]
    pub seed: Option<u64>,

    /// Number of rows to show per table
    #[arg(long, default_value = "5")]
    pub rows: usize,

    /// Only show these tables
    #[arg(long, value_delimiter = ',')]
    pub tables: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Lock file path
    #[arg(long, default_value = distsim_core::lock::LOCK_FILE_NAME)]
    pub lock: PathBuf,

    /// Output format for the report
    #[arg(long, default_value = "text")]
    pub format: CheckFormat,
}

#[derive(Parser, Debug)]
pub struct GraphArgs {
    /// Output format for the dependency graph
    #[arg(long, default_value = "mermaid")]
    pub format: GraphFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CheckFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GraphFormat {
    Mermaid,
    Dot,
}

impl From<OutputFormat> for distsim_core::config::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => Self::Csv,
            OutputFormat::Json => Self::Json,
        }
    }
}

impl From<GraphFormat> for distsim_core::graph::GraphFormat {
    fn from(format: GraphFormat) -> Self {
        match format {
            GraphFormat::Mermaid => Self::Mermaid,
            GraphFormat::Dot => Self::Dot,
        }
    }
}
