//! Sentence embeddings and semantic similarity scoring

use crate::error::Result;
use crate::processing::text_processor::TextProcessor;
use log::info;
use model2vec_rs::model::StaticModel;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// A loaded sentence embedding model, shared read-only across matches
pub trait SentenceEmbedder: Send + Sync {
    fn model_name(&self) -> &str;
    fn embed(&self, text: &str) -> Vec<f32>;
}

pub struct Model2VecEmbedder {
    model: StaticModel,
    model_name: String,
}

impl Model2VecEmbedder {
    /// Load a Model2Vec model from a local directory or Hugging Face repo id
    pub fn load(model_path: &Path, model_name: &str) -> Result<Self> {
        let start_time = Instant::now();
        info!("Loading Model2Vec embedding model from: {}", model_path.display());

        let model = StaticModel::from_pretrained(
            model_path,
            None, // token
            None, // normalize
            None, // subfolder
        )?;

        info!("Model loaded successfully in {:.2?}", start_time.elapsed());

        Ok(Self {
            model,
            model_name: model_name.to_string(),
        })
    }
}

impl SentenceEmbedder for Model2VecEmbedder {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn embed(&self, text: &str) -> Vec<f32> {
        self.model.encode_single(text)
    }
}

/// Cosine similarity; 0.0 for empty, zero-norm or mismatched vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

pub struct SemanticScorer {
    embedder: Arc<dyn SentenceEmbedder>,
    processor: TextProcessor,
}

impl SemanticScorer {
    pub fn new(embedder: Arc<dyn SentenceEmbedder>) -> Self {
        Self {
            embedder,
            processor: TextProcessor::new(),
        }
    }

    /// Content similarity of two raw texts as a percentage in [0, 100]
    pub fn similarity(&self, job_text: &str, resume_text: &str) -> f32 {
        let job = self.processor.normalize(job_text);
        let resume = self.processor.normalize(resume_text);

        if job.is_empty() || resume.is_empty() {
            return 0.0;
        }

        let job_embedding = self.embedder.embed(&job);
        let resume_embedding = self.embedder.embed(&resume);

        let score = cosine_similarity(&job_embedding, &resume_embedding) * 100.0;
        if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 100.0)
        }
    }

    pub fn model_name(&self) -> &str {
        self.embedder.model_name()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::MatcherError;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    /// Deterministic bag-of-words embedder for tests
    pub(crate) struct HashedBagEmbedder {
        pub dims: usize,
    }

    impl SentenceEmbedder for HashedBagEmbedder {
        fn model_name(&self) -> &str {
            "hashed-bag"
        }

        fn embed(&self, text: &str) -> Vec<f32> {
            let mut vector = vec![0.0; self.dims];
            for word in text.split_whitespace() {
                let mut hasher = DefaultHasher::new();
                word.hash(&mut hasher);
                vector[(hasher.finish() as usize) % self.dims] += 1.0;
            }
            vector
        }
    }

    /// Always returns a fixed vector regardless of input
    struct FixedEmbedder(Vec<f32>);

    impl SentenceEmbedder for FixedEmbedder {
        fn model_name(&self) -> &str {
            "fixed"
        }

        fn embed(&self, _text: &str) -> Vec<f32> {
            self.0.clone()
        }
    }

    fn scorer() -> SemanticScorer {
        SemanticScorer::new(Arc::new(HashedBagEmbedder { dims: 256 }))
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_identical_text_is_full_similarity() {
        let text = "Experienced Python developer skilled in React and Node.js";
        let score = scorer().similarity(text, text);
        assert!((score - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let scorer = scorer();
        assert_eq!(scorer.similarity("", "python developer"), 0.0);
        assert_eq!(scorer.similarity("python developer", "   42 !!"), 0.0);
    }

    #[test]
    fn test_negative_cosine_clamps_to_zero() {
        // same vector for both texts is always +1, so flip one via two embedders
        struct Flip;
        impl SentenceEmbedder for Flip {
            fn model_name(&self) -> &str {
                "flip"
            }
            fn embed(&self, text: &str) -> Vec<f32> {
                if text.starts_with("job") { vec![1.0, 0.0] } else { vec![-1.0, 0.0] }
            }
        }

        let scorer = SemanticScorer::new(Arc::new(Flip));
        assert_eq!(scorer.similarity("job text", "resume text"), 0.0);
    }

    #[test]
    fn test_incomplete_model_dir_is_model_unavailable() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("tokenizer.json"), b"{}").unwrap();

        match Model2VecEmbedder::load(dir.path(), "broken") {
            Err(MatcherError::ModelUnavailable(reason)) => assert!(!reason.is_empty()),
            Err(other) => panic!("expected ModelUnavailable, got {:?}", other),
            Ok(_) => panic!("an incomplete model directory must not load"),
        }
    }

    #[test]
    fn test_zero_vector_model_scores_zero() {
        let scorer = SemanticScorer::new(Arc::new(FixedEmbedder(vec![0.0; 8])));
        assert_eq!(scorer.similarity("python", "python"), 0.0);
        assert_eq!(scorer.model_name(), "fixed");
    }
}
