//! TOML manifest mapping job and candidate ids to document paths

use crate::error::{MatcherError, RecordKind, Result};
use crate::store::{DocumentPair, DocumentRef, DocumentStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// ```toml
/// [jobs]
/// "101" = "jobs/backend.pdf"
///
/// [candidates]
/// "4821" = "uploads/4821.pdf"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestStore {
    #[serde(default)]
    jobs: HashMap<String, PathBuf>,
    #[serde(default)]
    candidates: HashMap<String, PathBuf>,
}

impl ManifestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a manifest; relative paths resolve against its directory
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut store: ManifestStore = toml::from_str(&content).map_err(|e| {
            MatcherError::Configuration(format!("Failed to parse manifest '{}': {}", path.display(), e))
        })?;

        if let Some(base) = path.parent() {
            for doc_path in store.jobs.values_mut().chain(store.candidates.values_mut()) {
                if doc_path.is_relative() {
                    *doc_path = base.join(&*doc_path);
                }
            }
        }

        Ok(store)
    }

    pub fn with_job(mut self, job_id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.jobs.insert(job_id.into(), path.into());
        self
    }

    pub fn with_candidate(mut self, candidate_id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.candidates.insert(candidate_id.into(), path.into());
        self
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }
}

impl DocumentStore for ManifestStore {
    fn resolve_documents(&self, job_id: &str, candidate_id: &str) -> Result<DocumentPair> {
        let not_found = |missing| MatcherError::NotFound {
            job_id: job_id.to_string(),
            candidate_id: candidate_id.to_string(),
            missing,
        };

        let job_path = self.jobs.get(job_id).ok_or_else(|| not_found(RecordKind::Job))?;
        let resume_path = self
            .candidates
            .get(candidate_id)
            .ok_or_else(|| not_found(RecordKind::Resume))?;

        Ok(DocumentPair {
            job: DocumentRef {
                id: job_id.to_string(),
                path: job_path.clone(),
            },
            resume: DocumentRef {
                id: candidate_id.to_string(),
                path: resume_path.clone(),
            },
        })
    }
}
