//! Natural-language match explanations

use crate::error::Result;
use crate::matching::result::{ScoreBand, SkillGap};

/// Score breakdown an explanation is written from.
#[derive(Debug, Clone, Copy)]
pub struct ExplanationContext<'a> {
    pub overall_score: f64,
    pub skill_score: f64,
    pub experience_score: f64,
    pub preference_score: f64,
    /// Ordered by descending importance.
    pub skill_gaps: &'a [SkillGap],
    pub strengths: &'a [String],
}

/// Produces the prose part of a match result.
///
/// Implementations only write text; the scoring engine computes every number
/// before a generator is consulted, and falls back to [`TemplateExplainer`]
/// when one fails.
pub trait ExplanationGenerator: Send + Sync {
    fn name(&self) -> &str;
    fn explain(&self, context: &ExplanationContext<'_>) -> Result<String>;
}

/// Deterministic sentence composition from score bands.
#[derive(Debug, Clone)]
pub struct TemplateExplainer {
    high_importance_threshold: f64,
    max_named_gaps: usize,
}

impl TemplateExplainer {
    pub fn new(high_importance_threshold: f64, max_named_gaps: usize) -> Self {
        Self {
            high_importance_threshold,
            max_named_gaps,
        }
    }

    pub fn compose(&self, context: &ExplanationContext<'_>) -> String {
        let mut parts: Vec<String> = Vec::new();

        parts.push(
            match ScoreBand::from_score(context.overall_score) {
                ScoreBand::Excellent => "This is an excellent match for your profile.",
                ScoreBand::Good => "This is a good match with some areas for growth.",
                ScoreBand::Challenging => {
                    "This opportunity could be challenging but offers learning potential."
                }
                ScoreBand::Stretch => {
                    "This may be a stretch opportunity requiring significant skill development."
                }
            }
            .to_string(),
        );

        parts.push(
            match ScoreBand::from_score(context.skill_score) {
                ScoreBand::Excellent => "Your skills align very well with the requirements.",
                ScoreBand::Good => "You have most of the required skills.",
                ScoreBand::Challenging => {
                    "You have some relevant skills but would need to develop others."
                }
                ScoreBand::Stretch => "Significant skill development would be needed.",
            }
            .to_string(),
        );

        let experience = if context.experience_score >= 1.0 {
            "Your experience level meets or exceeds requirements."
        } else if context.experience_score >= 0.7 {
            "Your experience is close to what's required."
        } else {
            "You may need more experience for this role."
        };
        parts.push(experience.to_string());

        match ScoreBand::from_score(context.preference_score) {
            ScoreBand::Excellent => {
                parts.push("The opportunity aligns well with your preferences.".to_string())
            }
            ScoreBand::Good => {
                parts.push("The opportunity partially matches your preferences.".to_string())
            }
            _ => {}
        }

        let key_gaps: Vec<&str> = context
            .skill_gaps
            .iter()
            .filter(|gap| gap.importance > self.high_importance_threshold)
            .take(self.max_named_gaps)
            .map(|gap| gap.name.as_str())
            .collect();
        if !key_gaps.is_empty() {
            parts.push(format!("Key skills to develop: {}.", key_gaps.join(", ")));
        }

        parts.join(" ")
    }
}

impl Default for TemplateExplainer {
    fn default() -> Self {
        Self::new(0.7, 3)
    }
}

impl ExplanationGenerator for TemplateExplainer {
    fn name(&self) -> &str {
        "template"
    }

    fn explain(&self, context: &ExplanationContext<'_>) -> Result<String> {
        Ok(self.compose(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SkillLevel;

    fn gap(name: &str, importance: f64) -> SkillGap {
        SkillGap {
            skill_id: name.to_lowercase(),
            name: name.to_string(),
            category: "programming".to_string(),
            held_level: None,
            required_level: SkillLevel::new("advanced"),
            importance,
            mandatory: true,
        }
    }

    fn context<'a>(scores: [f64; 4], gaps: &'a [SkillGap]) -> ExplanationContext<'a> {
        ExplanationContext {
            overall_score: scores[0],
            skill_score: scores[1],
            experience_score: scores[2],
            preference_score: scores[3],
            skill_gaps: gaps,
            strengths: &[],
        }
    }

    #[test]
    fn test_excellent_explanation() {
        let text = TemplateExplainer::default().compose(&context([0.95, 1.0, 1.0, 0.9], &[]));

        assert_eq!(
            text,
            "This is an excellent match for your profile. \
             Your skills align very well with the requirements. \
             Your experience level meets or exceeds requirements. \
             The opportunity aligns well with your preferences."
        );
    }

    #[test]
    fn test_names_high_importance_gaps_only() {
        let gaps = vec![
            gap("Go", 0.9),
            gap("Kafka", 0.8),
            gap("SQL", 0.3),
            gap("Rust", 0.75),
            gap("Scala", 0.71),
        ];
        let text = TemplateExplainer::default().compose(&context([0.3, 0.2, 0.5, 0.7], &gaps));

        assert!(text.starts_with("This may be a stretch opportunity"));
        assert!(text.contains("You may need more experience for this role."));
        assert!(text.contains("partially matches your preferences"));
        assert!(text.ends_with("Key skills to develop: Go, Kafka, Rust."));
        assert!(!text.contains("SQL"));
    }

    #[test]
    fn test_low_preference_omits_sentence() {
        let text = TemplateExplainer::default().compose(&context([0.5, 0.5, 0.8, 0.5], &[]));

        assert!(text.contains("could be challenging"));
        assert!(text.contains("close to what's required"));
        assert!(!text.contains("preferences"));
    }
}
