//! CLI interface for the ATS advisor

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Extensions the input layer can read
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "markdown"];

#[derive(Parser, Debug)]
#[command(name = "ats-advisor")]
#[command(version)]
#[command(about = "Score a resume against a job description the way an ATS would")]
#[command(long_about = "Lexical ATS compatibility scoring, prioritized resume recommendations and LinkedIn profile copy suggestions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored console output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the ATS compatibility score
    Score(AnalysisArgs),

    /// List prioritized resume improvements
    Recommend(AnalysisArgs),

    /// Suggest LinkedIn headline, about and skills copy
    Linkedin(AnalysisArgs),

    /// Score, recommendations and LinkedIn suggestions together
    Analyze(AnalysisArgs),

    /// List the skill vocabulary
    Vocab {
        /// Show a single category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct AnalysisArgs {
    /// Path to resume file (PDF, TXT, MD)
    #[arg(short, long)]
    pub resume: PathBuf,

    /// Path to job description file (PDF, TXT, MD)
    #[arg(short, long)]
    pub job: PathBuf,

    /// Output format: console, json, markdown (defaults to the configured format)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Save output to a file, or into a directory under a generated name
    #[arg(short, long)]
    pub save: Option<PathBuf>,

    /// Include skill insights and every about variant
    #[arg(short, long)]
    pub detailed: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" | "text" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if allowed_extensions.contains(&ext.to_lowercase().as_str()) => Ok(()),
        Some(ext) => Err(format!(
            "Unsupported file extension: .{}. Allowed: {}",
            ext,
            allowed_extensions.join(", ")
        )),
        None => Err("File has no extension".to_string()),
    }
}
