//! Match results, skill gaps and score bands

use crate::catalog::SkillLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_NAMED_ITEMS: usize = 3;
const HIGH_PRIORITY_IMPORTANCE: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Stretch,
    Challenging,
    Good,
    Excellent,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            ScoreBand::Excellent
        } else if score >= 0.6 {
            ScoreBand::Good
        } else if score >= 0.4 {
            ScoreBand::Challenging
        } else {
            ScoreBand::Stretch
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "excellent",
            ScoreBand::Good => "good",
            ScoreBand::Challenging => "challenging",
            ScoreBand::Stretch => "stretch",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A required skill the profile lacks or holds below the required level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill_id: String,
    pub name: String,
    pub category: String,
    pub held_level: Option<SkillLevel>,
    pub required_level: SkillLevel,
    pub importance: f64,
    pub mandatory: bool,
}

impl SkillGap {
    pub fn is_missing(&self) -> bool {
        self.held_level.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub opportunity_id: String,
    #[serde(default)]
    pub opportunity_title: String,
    pub overall_score: f64,
    pub skill_score: f64,
    pub experience_score: f64,
    pub preference_score: f64,
    pub skill_gaps: Vec<SkillGap>,
    pub strengths: Vec<String>,
    pub explanation: String,
    /// Mandatory requirements met at or above the required level.
    pub matched_mandatory_skills: usize,
}

impl MatchResult {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.overall_score)
    }

    pub fn mandatory_gaps(&self) -> impl Iterator<Item = &SkillGap> {
        self.skill_gaps.iter().filter(|gap| gap.mandatory)
    }

    /// Short actionable advice: whether to apply, what to develop, what to highlight.
    pub fn recommendations(&self) -> Vec<String> {
        let mut recommendations = Vec::new();

        recommendations.push(
            match self.band() {
                ScoreBand::Excellent => "This is an excellent match! Consider applying immediately.",
                ScoreBand::Good => "This is a good match with some areas for improvement.",
                _ => "This opportunity might be challenging but could offer good growth.",
            }
            .to_string(),
        );

        let high_priority: Vec<&str> = self
            .skill_gaps
            .iter()
            .filter(|gap| gap.importance > HIGH_PRIORITY_IMPORTANCE)
            .take(MAX_NAMED_ITEMS)
            .map(|gap| gap.name.as_str())
            .collect();
        if !high_priority.is_empty() {
            recommendations.push(format!("Focus on developing: {}", high_priority.join(", ")));
        }

        if !self.strengths.is_empty() {
            let highlighted: Vec<&str> = self
                .strengths
                .iter()
                .take(MAX_NAMED_ITEMS)
                .map(String::as_str)
                .collect();
            recommendations.push(format!("Highlight your strengths in: {}", highlighted.join(", ")));
        }

        recommendations
    }
}
