//! Matching engine: fetch documents, extract text, score skills and content, combine

use crate::config::Config;
use crate::error::{MatcherError, Result};
use crate::input::{ExtractedText, InputManager};
use crate::processing::embedding_manager::EmbeddingModelManager;
use crate::processing::embeddings::{Model2VecEmbedder, SemanticScorer, SentenceEmbedder};
use crate::processing::scoring::{self, Selection, WeightTier};
use crate::processing::skill_comparator::{MatchPolicy, SkillComparator};
use crate::processing::skills::{SkillExtractor, SkillSet, SkillVocabulary};
use crate::store::{DocumentRef, DocumentStore, ScoreRecorder};
use log::{debug, info};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::sync::Arc;

/// Outcome of matching one resume against one job description
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub selection: Selection,
    pub final_score: f32,
    pub content_similarity: f32,
    pub skill_match: f32,
    pub matched_skills: SkillSet,
    pub tier: WeightTier,
}

impl MatchResult {
    pub fn rounded_final_score(&self) -> f32 {
        round2(self.final_score)
    }

    pub fn is_selected(&self) -> bool {
        self.selection == Selection::Selected
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

impl Serialize for MatchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MatchResult", 5)?;
        state.serialize_field("candidate_selection", self.selection.label())?;
        state.serialize_field("final_score", &round2(self.final_score))?;
        state.serialize_field("content_similarity", &round2(self.content_similarity))?;
        state.serialize_field("skill_match", &self.skill_match)?;
        state.serialize_field("matched_skills", &self.matched_skills)?;
        state.end()
    }
}

/// Progress of a single match call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchStage {
    Start,
    DocumentsFetched,
    TextExtracted,
    Scored,
    Done,
    Failed(String),
}

impl MatchStage {
    /// Terminal stage reached by a finished match
    pub fn terminal(outcome: &Result<MatchResult>) -> Self {
        match outcome {
            Ok(_) => MatchStage::Done,
            Err(e) => MatchStage::Failed(e.to_string()),
        }
    }
}

pub struct MatchEngine {
    input: InputManager,
    skills: SkillExtractor,
    comparator: SkillComparator,
    semantic: SemanticScorer,
}

impl MatchEngine {
    pub fn new(
        vocabulary: SkillVocabulary,
        policy: MatchPolicy,
        embedder: Arc<dyn SentenceEmbedder>,
    ) -> Result<Self> {
        Ok(Self {
            input: InputManager::new(),
            skills: SkillExtractor::new(vocabulary)?,
            comparator: SkillComparator::new(policy),
            semantic: SemanticScorer::new(embedder),
        })
    }

    /// Resolve and load the configured embedding model, then build the engine
    pub async fn from_config(config: &Config) -> Result<Self> {
        let mut manager = EmbeddingModelManager::new(config.models_dir().clone()).await?;
        let model_id = manager
            .resolve_model_id(&config.models.embedding_model)
            .unwrap_or_else(|| config.models.embedding_model.clone());
        let model_path = manager.ensure_model_available(&model_id).await?;

        let embedder = tokio::task::spawn_blocking(move || Model2VecEmbedder::load(&model_path, &model_id))
            .await
            .map_err(|e| MatcherError::ModelUnavailable(format!("Model loader aborted: {}", e)))??;

        let vocabulary = SkillVocabulary::with_extra_skills(config.matching.extra_skills.as_slice());
        info!(
            "Match engine ready: {} skills, {:?} policy, model {}",
            vocabulary.len(),
            config.match_policy(),
            embedder.model_name()
        );

        Self::new(vocabulary, config.match_policy(), Arc::new(embedder))
    }

    /// Score a job description against a resume given as raw text
    pub fn match_texts(&self, job_text: &str, resume_text: &str) -> MatchResult {
        let job_skills = self.skills.extract(job_text);
        let resume_skills = self.skills.extract(resume_text);
        debug!("Job skills: {:?}, resume skills: {:?}", job_skills, resume_skills);

        let comparison = self.comparator.compare(&job_skills, &resume_skills);
        let content_similarity = self.semantic.similarity(job_text, resume_text);

        let skill_match = scoring::clamp_percent(comparison.skill_match);
        let combined = scoring::combine(content_similarity, skill_match);
        trace_stage(MatchStage::Scored);

        MatchResult {
            selection: combined.selection,
            final_score: combined.final_score,
            content_similarity,
            skill_match,
            matched_skills: comparison.matched_skills,
            tier: combined.tier,
        }
    }

    /// Match documents resolved by a store from a (job, candidate) id pair
    pub async fn match_resume<S>(&self, store: &S, job_id: &str, candidate_id: &str) -> Result<MatchResult>
    where
        S: DocumentStore + ?Sized,
    {
        trace_stage(MatchStage::Start);
        let result = self.run(store, job_id, candidate_id).await;
        trace_stage(MatchStage::terminal(&result));
        result
    }

    async fn run<S>(&self, store: &S, job_id: &str, candidate_id: &str) -> Result<MatchResult>
    where
        S: DocumentStore + ?Sized,
    {
        let pair = store.resolve_documents(job_id, candidate_id)?;
        self.score_documents(&pair.job, &pair.resume).await
    }

    /// Match two documents on disk, bypassing any store lookup
    pub async fn match_files(&self, job: &DocumentRef, resume: &DocumentRef) -> Result<MatchResult> {
        trace_stage(MatchStage::Start);
        let result = self.score_documents(job, resume).await;
        trace_stage(MatchStage::terminal(&result));
        result
    }

    /// Match, then hand the result to a recorder
    pub async fn match_and_record<S, R>(
        &self,
        store: &S,
        recorder: &R,
        job_id: &str,
        candidate_id: &str,
    ) -> Result<MatchResult>
    where
        S: DocumentStore + ?Sized,
        R: ScoreRecorder + ?Sized,
    {
        let result = self.match_resume(store, job_id, candidate_id).await?;
        recorder.record(job_id, candidate_id, &result)?;
        Ok(result)
    }

    async fn score_documents(&self, job: &DocumentRef, resume: &DocumentRef) -> Result<MatchResult> {
        for doc in [job, resume] {
            if !doc.path.exists() {
                return Err(MatcherError::FileMissing {
                    id: doc.id.clone(),
                    path: doc.path.display().to_string(),
                });
            }
        }
        trace_stage(MatchStage::DocumentsFetched);

        let job_text: ExtractedText = self.input.extract_text(&job.path).await;
        let resume_text: ExtractedText = self.input.extract_text(&resume.path).await;
        trace_stage(MatchStage::TextExtracted);

        let result = self.match_texts(job_text.as_str(), resume_text.as_str());
        info!(
            "{}: final {:.2}, content {:.2}, skills {:.2}",
            result.selection, result.final_score, result.content_similarity, result.skill_match
        );
        Ok(result)
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        self.skills.vocabulary()
    }

    pub fn policy(&self) -> MatchPolicy {
        self.comparator.policy()
    }

    pub fn model_name(&self) -> &str {
        self.semantic.model_name()
    }
}

fn trace_stage(stage: MatchStage) {
    debug!("match stage: {:?}", stage);
}
