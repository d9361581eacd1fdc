//! Narrow interfaces to the document storage and score persistence layers

pub mod ledger;
pub mod manifest;

use crate::error::Result;
use crate::processing::matcher::MatchResult;
use std::path::PathBuf;

pub use ledger::JsonlScoreRecorder;
pub use manifest::ManifestStore;

/// An opaque record id resolved to the document backing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub id: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPair {
    pub job: DocumentRef,
    pub resume: DocumentRef,
}

/// Resolves job and candidate ids to their stored documents
pub trait DocumentStore: Send + Sync {
    /// Fails with `NotFound` when either side has no record
    fn resolve_documents(&self, job_id: &str, candidate_id: &str) -> Result<DocumentPair>;
}

/// Persists the outcome of one (job, candidate) match
pub trait ScoreRecorder: Send + Sync {
    fn record(&self, job_id: &str, candidate_id: &str, result: &MatchResult) -> Result<()>;
}
