//! Command-line interface for jobdiff

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jobdiff")]
#[command(about = "Report semantic changes between two versions of an ETL job export")]
#[command(version)]
pub struct Cli {
    /// Old job export (file, or directory of *.json exports)
    pub old: PathBuf,

    /// New job export (file, or directory of *.json exports)
    pub new: PathBuf,

    /// Output format: "pretty", "json"
    #[arg(long, default_value = "pretty")]
    pub format: String,

    /// JSON file listing the attributes to compare
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Hide progress bars
    #[arg(short, long)]
    pub quiet: bool,
}

/// Parse output format string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}. Use 'pretty' or 'json'", s)),
        }
    }
}
