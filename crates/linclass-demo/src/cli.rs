use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "linclass")]
#[command(
    author,
    version,
    about = "Run the hardcoded linear classifier pipeline"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify one or more input rows
    Run {
        /// Comma-separated feature row; repeat for a batch
        #[arg(short, long = "input", value_parser = parse_row, allow_hyphen_values = true)]
        inputs: Vec<FeatureRow>,

        /// Pipeline configuration file (YAML or JSON)
        #[arg(short, long, env = "LINCLASS_CONFIG")]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the hardcoded model constants
    ShowModel {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines
    Text,
    /// A single JSON document
    Json,
}

/// One comma-separated input row
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow(pub Vec<f64>);

/// Parse `1.0,2.0,3.0,4.0` into a feature row
pub fn parse_row(s: &str) -> Result<FeatureRow, String> {
    s.split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid feature '{}': {}", v.trim(), e))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(FeatureRow)
}
