//! Skill overlap between a job's required skills and a resume's skills

use crate::processing::skills::SkillSet;
use log::debug;
use serde::Serialize;
use strsim::normalized_levenshtein;

/// How job and resume skills are paired up
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchPolicy {
    /// Set intersection
    Exact,
    /// Best Levenshtein-ratio pairing, accepted strictly above `threshold` (0-100)
    Fuzzy { threshold: f32 },
}

impl Default for MatchPolicy {
    fn default() -> Self {
        MatchPolicy::Exact
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillComparison {
    /// Percentage of job skills covered, 0-100
    pub skill_match: f32,
    pub matched_skills: SkillSet,
}

#[derive(Debug, Clone, Default)]
pub struct SkillComparator {
    policy: MatchPolicy,
}

impl SkillComparator {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    pub fn compare(&self, job_skills: &SkillSet, resume_skills: &SkillSet) -> SkillComparison {
        match self.policy {
            MatchPolicy::Exact => Self::compare_exact(job_skills, resume_skills),
            MatchPolicy::Fuzzy { threshold } => Self::compare_fuzzy(job_skills, resume_skills, threshold),
        }
    }

    fn compare_exact(job_skills: &SkillSet, resume_skills: &SkillSet) -> SkillComparison {
        if job_skills.is_empty() {
            return SkillComparison {
                skill_match: 0.0,
                matched_skills: SkillSet::default(),
            };
        }

        let matched_skills = job_skills.intersection(resume_skills);
        let skill_match = matched_skills.len() as f32 / job_skills.len() as f32 * 100.0;

        SkillComparison {
            skill_match,
            matched_skills,
        }
    }

    fn compare_fuzzy(job_skills: &SkillSet, resume_skills: &SkillSet, threshold: f32) -> SkillComparison {
        let mut matched_skills = SkillSet::default();

        for resume_skill in resume_skills.iter() {
            let mut best: Option<(&str, f32)> = None;

            for job_skill in job_skills.iter() {
                let score = similarity_ratio(resume_skill, job_skill);
                // strict comparison keeps the first job skill on ties
                if best.map_or(true, |(_, best_score)| score > best_score) {
                    best = Some((job_skill, score));
                }
            }

            if let Some((job_skill, score)) = best {
                if score > threshold {
                    debug!("Fuzzy skill match: {} ~ {} ({:.1})", resume_skill, job_skill, score);
                    matched_skills.insert(job_skill.to_string());
                }
            }
        }

        let skill_match = (matched_skills.len() as f32 / job_skills.len().max(1) as f32 * 100.0).min(100.0);

        SkillComparison {
            skill_match,
            matched_skills,
        }
    }
}

/// Levenshtein ratio on a 0-100 scale
pub fn similarity_ratio(a: &str, b: &str) -> f32 {
    (normalized_levenshtein(a, b) * 100.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::skills::SkillVocabulary;

    fn set(terms: &[&str]) -> SkillSet {
        SkillVocabulary::default().skill_set(terms)
    }

    #[test]
    fn test_exact_full_match() {
        let comparator = SkillComparator::new(MatchPolicy::Exact);
        let result = comparator.compare(&set(&["python", "react"]), &set(&["python", "react", "node.js"]));

        assert_eq!(result.skill_match, 100.0);
        assert_eq!(result.matched_skills, set(&["python", "react"]));
    }

    #[test]
    fn test_exact_partial_match() {
        let comparator = SkillComparator::default();
        let result = comparator.compare(&set(&["python", "react", "docker", "aws"]), &set(&["python"]));

        assert_eq!(result.skill_match, 25.0);
        assert_eq!(result.matched_skills.len(), 1);
    }

    #[test]
    fn test_exact_empty_job_skills_is_zero() {
        let comparator = SkillComparator::new(MatchPolicy::Exact);
        let result = comparator.compare(&SkillSet::default(), &set(&["python"]));

        assert_eq!(result.skill_match, 0.0);
        assert!(result.matched_skills.is_empty());
    }

    #[test]
    fn test_fuzzy_accepts_near_variants() {
        let comparator = SkillComparator::new(MatchPolicy::Fuzzy { threshold: 80.0 });
        // "reactjs" vs "react": 1 - 2/7 = 71.4, below threshold; "react" itself is exact
        let result = comparator.compare(&set(&["react", "python"]), &set(&["reactjs", "react"]));

        assert_eq!(result.matched_skills, set(&["react"]));
        assert_eq!(result.skill_match, 50.0);
    }

    #[test]
    fn test_fuzzy_threshold_is_strict() {
        // "github" vs "git": 1 - 3/6 = 50
        let strict = SkillComparator::new(MatchPolicy::Fuzzy { threshold: 50.0 });
        let result = strict.compare(&set(&["github"]), &set(&["git"]));
        assert!(result.matched_skills.is_empty());

        let loose = SkillComparator::new(MatchPolicy::Fuzzy { threshold: 49.0 });
        let result = loose.compare(&set(&["github"]), &set(&["git"]));
        assert_eq!(result.skill_match, 100.0);
    }

    #[test]
    fn test_fuzzy_counts_each_job_skill_once() {
        let comparator = SkillComparator::new(MatchPolicy::Fuzzy { threshold: 60.0 });
        // both resume skills land on "react"
        let result = comparator.compare(&set(&["react"]), &set(&["react", "reactjs"]));

        assert_eq!(result.skill_match, 100.0);
        assert_eq!(result.matched_skills.len(), 1);
    }

    #[test]
    fn test_fuzzy_tie_keeps_first_job_skill() {
        let vocabulary = SkillVocabulary::with_extra_skills(&["abcd", "abce", "abcf"]);
        let job = vocabulary.skill_set(["abce", "abcd"]);
        let resume = vocabulary.skill_set(["abcf"]);

        // "abcf" scores 75 against both job skills
        assert_eq!(similarity_ratio("abcf", "abcd"), similarity_ratio("abcf", "abce"));

        let comparator = SkillComparator::new(MatchPolicy::Fuzzy { threshold: 70.0 });
        for _ in 0..3 {
            let result = comparator.compare(&job, &resume);
            assert_eq!(result.matched_skills, vocabulary.skill_set(["abcd"]));
            assert_eq!(result.skill_match, 50.0);
        }
    }

    #[test]
    fn test_fuzzy_empty_sets() {
        let comparator = SkillComparator::new(MatchPolicy::Fuzzy { threshold: 80.0 });

        let result = comparator.compare(&SkillSet::default(), &set(&["python"]));
        assert_eq!(result.skill_match, 0.0);

        let result = comparator.compare(&set(&["python"]), &SkillSet::default());
        assert_eq!(result.skill_match, 0.0);
    }

    #[test]
    fn test_similarity_ratio_scale() {
        assert_eq!(similarity_ratio("python", "python"), 100.0);
        assert!(similarity_ratio("python", "java") < 50.0);
    }
}
