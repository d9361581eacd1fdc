//! Append-only JSON Lines ledger of application scores

use crate::error::Result;
use crate::processing::matcher::MatchResult;
use crate::store::ScoreRecorder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub job_id: String,
    pub candidate_id: String,
    pub final_score: f32,
    pub recorded_at: DateTime<Utc>,
}

pub struct JsonlScoreRecorder {
    path: PathBuf,
}

impl JsonlScoreRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record back, oldest first
    pub fn read_all(&self) -> Result<Vec<ApplicationRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(Into::into))
            .collect()
    }
}

impl ScoreRecorder for JsonlScoreRecorder {
    fn record(&self, job_id: &str, candidate_id: &str, result: &MatchResult) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let record = ApplicationRecord {
            job_id: job_id.to_string(),
            candidate_id: candidate_id.to_string(),
            final_score: result.rounded_final_score(),
            recorded_at: Utc::now(),
        };

        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::scoring::{Selection, WeightTier};
    use crate::processing::skills::SkillVocabulary;
    use tempfile::TempDir;

    fn result(final_score: f32) -> MatchResult {
        MatchResult {
            selection: Selection::from_score(final_score),
            final_score,
            content_similarity: 50.0,
            skill_match: 90.0,
            matched_skills: SkillVocabulary::default().skill_set(["sql"]),
            tier: WeightTier::StrongSkillMatch,
        }
    }

    #[test]
    fn test_missing_ledger_reads_empty() {
        let dir = TempDir::new().unwrap();
        let recorder = JsonlScoreRecorder::new(dir.path().join("none.jsonl"));
        assert!(recorder.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_records_append_in_order() {
        let dir = TempDir::new().unwrap();
        let recorder = JsonlScoreRecorder::new(dir.path().join("nested/applications.jsonl"));

        recorder.record("7", "11", &result(73.456)).unwrap();
        recorder.record("7", "12", &result(88.0)).unwrap();

        let records = recorder.read_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].candidate_id, "11");
        assert_eq!(records[0].final_score, 73.46);
        assert_eq!(records[1].final_score, 88.0);
        assert!(records[0].recorded_at <= records[1].recorded_at);
    }
}
