//! Tiered weighting of content similarity and skill match into a final score

use serde::{Deserialize, Serialize};

/// Skill match at or above this (but below 100) gets equal weighting
pub const STRONG_SKILL_MATCH: f32 = 90.0;
/// Full skill coverage
pub const FULL_SKILL_MATCH: f32 = 100.0;
/// Final score needed for selection, inclusive
pub const SELECTION_THRESHOLD: f32 = 75.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    Selected,
    NotSelected,
}

impl Selection {
    pub fn from_score(final_score: f32) -> Self {
        if final_score >= SELECTION_THRESHOLD {
            Selection::Selected
        } else {
            Selection::NotSelected
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Selection::Selected => "Candidate Selected",
            Selection::NotSelected => "Candidate Not Selected",
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Weighting tier picked by the skill match, first match wins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightTier {
    FullSkillMatch,
    StrongSkillMatch,
    Standard,
}

impl WeightTier {
    pub fn for_skill_match(skill_match: f32) -> Self {
        if skill_match == FULL_SKILL_MATCH {
            WeightTier::FullSkillMatch
        } else if skill_match >= STRONG_SKILL_MATCH {
            WeightTier::StrongSkillMatch
        } else {
            WeightTier::Standard
        }
    }

    /// (content weight, skill weight)
    pub fn weights(&self) -> (f32, f32) {
        match self {
            WeightTier::FullSkillMatch => (0.4, 0.6),
            WeightTier::StrongSkillMatch => (0.5, 0.5),
            WeightTier::Standard => (0.6, 0.4),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinedScore {
    pub final_score: f32,
    pub tier: WeightTier,
    pub selection: Selection,
}

/// Combine two 0-100 scores; inputs outside the range are clamped first
pub fn combine(content_similarity: f32, skill_match: f32) -> CombinedScore {
    let content = clamp_percent(content_similarity);
    let skill = clamp_percent(skill_match);

    let tier = WeightTier::for_skill_match(skill);
    let (content_weight, skill_weight) = tier.weights();
    let final_score = (content_weight * content + skill_weight * skill).min(100.0);

    CombinedScore {
        final_score,
        tier,
        selection: Selection::from_score(final_score),
    }
}

pub(crate) fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
