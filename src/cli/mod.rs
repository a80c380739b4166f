//! Command-line interface for Code Collector

use crate::export::OutputFormat;
use clap::{ArgAction, ArgGroup, Parser};
use std::path::PathBuf;

pub mod commands;

/// Code Collector - gather a source tree into a single document
#[derive(Parser, Debug)]
#[command(
    name = "codecollector",
    version,
    disable_version_flag = true,
    about = "Collect the source files of a directory or repository into one file",
    long_about = "Code Collector walks a directory or a cloned repository, honours .gitignore files and configured ignore patterns, and writes the directory tree together with every collected file as JSON, text or Markdown."
)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["directory", "github"]),
))]
pub struct Cli {
    /// Path of the folder to traverse
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Repository URL to clone and process
    #[arg(long)]
    pub github: Option<String>,

    /// Branch to clone from the repository
    #[arg(long, default_value = "main")]
    pub branch: String,

    /// Output file name without extension
    #[arg(short, long, default_value = "collected_code")]
    pub output: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub output_format: OutputFormat,

    /// Path to configuration file (YAML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of file read workers (default: twice the CPU count)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Print the version number
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: (),

    /// Disable progress bars
    #[arg(long)]
    pub no_progress: bool,
}
