//! Error handling for the hiring matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("No {missing} record found (job_id={job_id}, candidate_id={candidate_id})")]
    NotFound {
        job_id: String,
        candidate_id: String,
        missing: RecordKind,
    },

    #[error("File for {id} not found: {path}")]
    FileMissing { id: String, path: String },

    #[error("Text extraction failed: {0}")]
    ExtractionFailure(String),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Which side of a (job, candidate) pair had no stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Job,
    Resume,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Job => write!(f, "job description"),
            RecordKind::Resume => write!(f, "resume"),
        }
    }
}

pub type Result<T> = std::result::Result<T, MatcherError>;

/// Model loading reports through anyhow; anything surfacing that way is a backend failure
impl From<anyhow::Error> for MatcherError {
    fn from(err: anyhow::Error) -> Self {
        MatcherError::ModelUnavailable(err.to_string())
    }
}
