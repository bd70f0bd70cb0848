use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "movie-kg-dashboard",
    version,
    about = "Hybrid GNN + LLM movie recommendation dashboard",
    long_about = "Render precomputed movie recommendations, evaluation scores, and a two-hop user-movie-genre neighborhood of the knowledge graph as a self-contained HTML dashboard. Inputs are JSON files produced offline; nothing is computed here beyond the neighborhood projection."
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Only log errors and suppress non-essential output
    #[arg(short, long, default_value_t = false, global = true)]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FallbackArg {
    /// Use the lexicographically smallest node key
    Smallest,
    /// Fail when the center node is missing
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RankDirArg {
    #[value(name = "LR")]
    LR,
    #[value(name = "TB")]
    TB,
}

/// Where the input files live. Per-file flags override `--data-dir`.
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Directory holding the input JSON files (default: current directory)
    #[arg(short, long, env = "MOVIE_KG_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Recommendation record JSON
    #[arg(long)]
    pub recommendations: Option<PathBuf>,
    /// Evaluation record JSON
    #[arg(long)]
    pub evaluation: Option<PathBuf>,
    /// Knowledge graph JSON (node-link layout)
    #[arg(long)]
    pub graph: Option<PathBuf>,
    /// Movie node keys JSON array
    #[arg(long)]
    pub movies: Option<PathBuf>,
}

/// Neighborhood projection parameters. Unset flags fall back to config, then defaults.
#[derive(Debug, Clone, Default, Args)]
pub struct ProjectionArgs {
    /// Center node key (default: User_1)
    #[arg(long)]
    pub center: Option<String>,
    /// Relation label of the first hop (default: rated)
    #[arg(long)]
    pub first_hop: Option<String>,
    /// Relation label of the second hop (default: belongs_to)
    #[arg(long)]
    pub second_hop: Option<String>,
    /// Behavior when the center node is missing (default: smallest)
    #[arg(long, value_enum)]
    pub fallback: Option<FallbackArg>,
    /// Maximum node label length before truncation (default: 25)
    #[arg(long)]
    pub label_max: Option<usize>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render the dashboard HTML document
    Render {
        #[command(flatten)]
        inputs: InputArgs,
        #[command(flatten)]
        projection: ProjectionArgs,
        /// Output HTML path (default: dashboard.html)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Also write the projected neighborhood as DOT
        #[arg(long)]
        dot: Option<PathBuf>,
        /// Also write the projected neighborhood as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Print the projected neighborhood of the center node
    Neighborhood {
        #[command(flatten)]
        inputs: InputArgs,
        #[command(flatten)]
        projection: ProjectionArgs,
        /// Output format: text or json
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Write a standalone interactive network HTML document
        #[arg(long)]
        html: Option<PathBuf>,
        /// Write the neighborhood as DOT
        #[arg(long)]
        dot: Option<PathBuf>,
        /// DOT: omit the legend
        #[arg(long, default_value_t = false)]
        no_legend: bool,
        /// DOT: rank direction
        #[arg(long, value_enum, default_value = "LR")]
        rankdir: RankDirArg,
    },
    /// Print the ranked recommendations with their descriptions
    Recommendations {
        #[command(flatten)]
        inputs: InputArgs,
        /// Output format: text or json
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Generate shell completion scripts
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
