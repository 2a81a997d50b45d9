//! CLI argument definitions using clap

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Source complexity and risk metadata analyzer for Java
#[derive(Parser, Debug)]
#[command(name = "riskmeta")]
#[command(about = "Computes complexity, business-criticality and risk metadata for Java sources")]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Files or directories to analyze (directories are searched for .java files)
    #[arg(value_name = "PATHS", required = true)]
    pub paths: Vec<PathBuf>,

    /// Repository URL recorded in every result
    #[arg(long, env = "RISKMETA_REPO_URL", default_value = "")]
    pub repo_url: String,

    /// Branch name recorded in every result
    #[arg(long, env = "RISKMETA_BRANCH", default_value = "main")]
    pub branch: String,

    /// Output format
    #[arg(short, long, default_value = "text", value_enum)]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of worker threads for batch analysis
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Maximum directory recursion depth
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Output format options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Boxed human-readable report
    #[default]
    Text,
    /// JSON - one array of metadata records
    Json,
    /// TOON (Token-Oriented Object Notation) - token-efficient format
    Toon,
}

impl Cli {
    /// Default log filter for the verbosity level
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "riskmeta=info,warn",
            2 => "riskmeta=debug,info",
            _ => "trace",
        }
    }
}
