//! CLI interface for the hiring matcher

use crate::config::{OutputFormat, PolicyKind};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hiring-matcher")]
#[command(about = "Score a resume against a job description")]
#[command(long_about = "Match resumes to job descriptions using skill overlap and semantic similarity, and decide selection")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match a stored candidate against a stored job
    Match {
        /// Job identifier
        #[arg(short, long)]
        job: String,

        /// Candidate identifier
        #[arg(short = 'n', long)]
        candidate: String,

        /// Manifest mapping ids to documents (overrides config)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Skill matching policy: exact, fuzzy
        #[arg(short, long)]
        policy: Option<String>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,

        /// Append the score to this JSONL ledger (overrides config)
        #[arg(short, long)]
        record: Option<PathBuf>,
    },

    /// Score two document files directly
    Score {
        /// Path to job description file (PDF, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Skill matching policy: exact, fuzzy
        #[arg(short, long)]
        policy: Option<String>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Embedding model management
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// List catalogued embedding models
    List,

    /// Download an embedding model
    Download {
        /// Model id, name or HuggingFace repo ID
        model: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!("Invalid output format: {}. Supported: console, json", format)),
    }
}

pub fn parse_policy(policy: &str) -> Result<PolicyKind, String> {
    match policy.to_lowercase().as_str() {
        "exact" => Ok(PolicyKind::Exact),
        "fuzzy" => Ok(PolicyKind::Fuzzy),
        _ => Err(format!("Invalid policy: {}. Supported: exact, fuzzy", policy)),
    }
}

pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
