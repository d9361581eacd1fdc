//! Skill vocabulary and skill-term extraction

use crate::error::{MatcherError, Result};
use crate::processing::text_processor::TextProcessor;
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const DEFAULT_SKILLS: &[&str] = &[
    "python", "java", "javascript", "c++", "c#", "sql", "firebase", "mongodb",
    "react", "reactjs", "angular", "node.js", "machine learning", "deep learning",
    "artificial intelligence", "data science", "nlp", "pandas", "numpy", "tensorflow",
    "pytorch", "django", "flask", "spring boot", "aws", "azure", "docker", "kubernetes",
    "git", "github", "html", "css", "bootstrap", "tailwind", "typescript",
];

/// Canonical lowercase skill terms, single- and multi-word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillVocabulary {
    terms: BTreeSet<String>,
}

impl SkillVocabulary {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    /// Built-in list plus any configured extras
    pub fn with_extra_skills<S: AsRef<str>>(extra: &[S]) -> Self {
        Self::new(
            DEFAULT_SKILLS
                .iter()
                .copied()
                .chain(extra.iter().map(|s| s.as_ref())),
        )
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Build a SkillSet from arbitrary terms, dropping anything outside the vocabulary
    pub fn skill_set<I, S>(&self, terms: I) -> SkillSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = SkillSet::default();
        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if self.contains(&term) {
                set.insert(term);
            }
        }
        set
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS)
    }
}

/// Ordered set of vocabulary terms found in one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub(crate) fn insert(&mut self, term: String) -> bool {
        self.0.insert(term)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.0.contains(term)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn intersection(&self, other: &SkillSet) -> SkillSet {
        SkillSet(self.0.intersection(&other.0).cloned().collect())
    }

    pub fn is_subset(&self, other: &SkillSet) -> bool {
        self.0.is_subset(&other.0)
    }
}

pub struct SkillExtractor {
    vocabulary: SkillVocabulary,
    patterns: Vec<String>,
    phrase_matcher: AhoCorasick,
    processor: TextProcessor,
}

impl SkillExtractor {
    pub fn new(vocabulary: SkillVocabulary) -> Result<Self> {
        let patterns: Vec<String> = vocabulary.iter().map(str::to_string).collect();

        let phrase_matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| MatcherError::ModelUnavailable(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self {
            vocabulary,
            patterns,
            phrase_matcher,
            processor: TextProcessor::new(),
        })
    }

    /// Union of single-token hits and phrase-chunk hits
    pub fn extract(&self, text: &str) -> SkillSet {
        let mut skills = SkillSet::default();

        for token in self.processor.tokenize(text) {
            if self.vocabulary.contains(&token) {
                skills.insert(token);
            }
        }

        for chunk in self.processor.phrase_chunks(text) {
            for term in self.phrase_hits(&chunk) {
                skills.insert(term.to_string());
            }
        }

        skills
    }

    /// Vocabulary terms inside a chunk that start and end on token boundaries
    fn phrase_hits<'a>(&'a self, chunk: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let bytes = chunk.as_bytes();
        self.phrase_matcher.find_iter(chunk).filter_map(move |m| {
            let starts_clean = m.start() == 0 || bytes[m.start() - 1] == b' ';
            let ends_clean = m.end() == bytes.len() || bytes[m.end()] == b' ';
            if starts_clean && ends_clean {
                Some(self.patterns[m.pattern().as_usize()].as_str())
            } else {
                None
            }
        })
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> SkillExtractor {
        SkillExtractor::new(SkillVocabulary::default()).unwrap()
    }

    #[test]
    fn test_default_vocabulary() {
        let vocabulary = SkillVocabulary::default();
        assert_eq!(vocabulary.len(), 35);
        assert!(vocabulary.contains("machine learning"));
        assert!(vocabulary.contains("node.js"));
    }

    #[test]
    fn test_extra_skills_are_normalized() {
        let vocabulary = SkillVocabulary::with_extra_skills(&["  Rust ", "GraphQL"]);
        assert!(vocabulary.contains("rust"));
        assert!(vocabulary.contains("graphql"));
        assert_eq!(vocabulary.len(), 37);
    }

    #[test]
    fn test_single_token_skills() {
        let skills = extractor().extract("Experienced Python developer skilled in React and Node.js");

        assert_eq!(skills.iter().collect::<Vec<_>>(), vec!["node.js", "python", "react"]);
    }

    #[test]
    fn test_multi_word_skills_need_phrase_pass() {
        let skills = extractor().extract("Strong background in Machine Learning, deep learning and Spring Boot services.");

        assert!(skills.contains("machine learning"));
        assert!(skills.contains("deep learning"));
        assert!(skills.contains("spring boot"));
    }

    #[test]
    fn test_partial_words_do_not_match() {
        // "javascript" must not yield "java", "gitlab" must not yield "git"
        let skills = extractor().extract("JavaScript on GitLab");

        assert!(skills.contains("javascript"));
        assert!(!skills.contains("java"));
        assert!(!skills.contains("git"));
    }

    #[test]
    fn test_symbol_skills() {
        let skills = extractor().extract("Backend work in C#, C++ and SQL.");

        assert!(skills.contains("c#"));
        assert!(skills.contains("c++"));
        assert!(skills.contains("sql"));
    }

    #[test]
    fn test_empty_text_has_no_skills() {
        assert!(extractor().extract("").is_empty());
    }

    #[test]
    fn test_every_extracted_skill_is_in_vocabulary() {
        let extractor = extractor();
        let skills = extractor.extract("Python, Rust, Haskell, AWS, Dockerfile, Kubernetes, NLP.");

        assert!(skills.iter().all(|s| extractor.vocabulary().contains(s)));
        assert!(skills.contains("aws"));
        assert!(skills.contains("kubernetes"));
        assert!(!skills.contains("docker"));
    }

    #[test]
    fn test_hyphenated_compounds_yield_skills() {
        let extractor = extractor();

        let skills = extractor.extract("Python-based services on AWS-hosted infra");
        assert_eq!(skills.iter().collect::<Vec<_>>(), vec!["aws", "python"]);

        let skills = extractor.extract("Built a React-driven UI on Docker-ready, machine-learning infra");
        assert!(skills.contains("react"));
        assert!(skills.contains("docker"));
        assert!(skills.contains("machine learning"));

        let skills = extractor.extract("Skills: git-flow, GitHub Actions, AWS-certified");
        assert!(skills.contains("git"));
        assert!(skills.contains("github"));
        assert!(skills.contains("aws"));
    }

    #[test]
    fn test_skill_set_filters_unknown_terms() {
        let vocabulary = SkillVocabulary::default();
        let set = vocabulary.skill_set(["Python", "cobol"]);

        assert_eq!(set.len(), 1);
        assert!(set.contains("python"));
    }
}
