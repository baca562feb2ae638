//! Multi-factor profile/opportunity scoring

use crate::catalog::{SkillCatalog, SkillLevel};
use crate::config::ScoringConfig;
use crate::error::Result;
use crate::matching::explain::{ExplanationContext, ExplanationGenerator, TemplateExplainer};
use crate::matching::opportunity::{Opportunity, RequiredSkill};
use crate::matching::profile::{HeldSkill, Profile};
use crate::matching::result::{MatchResult, SkillGap};
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

const UNCATEGORIZED: &str = "uncategorized";
const PORTFOLIO_YEARS_RATE: f64 = 0.1;
const PORTFOLIO_YEARS_CAP: f64 = 0.5;

/// Scores a profile against an opportunity.
///
/// Scoring is a pure function of its inputs and the catalog: the same pair
/// always yields an identical [`MatchResult`]. Only structurally invalid input
/// is an error; missing optional data resolves to neutral defaults.
pub struct ScoringEngine {
    catalog: Arc<SkillCatalog>,
    config: ScoringConfig,
    template: TemplateExplainer,
    generator: Option<Box<dyn ExplanationGenerator>>,
}

impl ScoringEngine {
    pub fn new(catalog: Arc<SkillCatalog>, config: ScoringConfig) -> Result<Self> {
        config.validate()?;
        let template = TemplateExplainer::new(config.high_importance_threshold, config.max_named_gaps);
        Ok(Self {
            catalog,
            config,
            template,
            generator: None,
        })
    }

    pub fn with_defaults(catalog: Arc<SkillCatalog>) -> Self {
        Self {
            catalog,
            config: ScoringConfig::default(),
            template: TemplateExplainer::default(),
            generator: None,
        }
    }

    /// Replace the templated explanation with another generator.
    pub fn with_generator(mut self, generator: Box<dyn ExplanationGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, profile: &Profile, opportunity: &Opportunity) -> Result<MatchResult> {
        profile.validate()?;
        opportunity.validate()?;

        // Later duplicates overwrite earlier ones.
        let held: HashMap<&str, &HeldSkill> = profile
            .held_skills
            .iter()
            .map(|skill| (skill.skill_id.as_str(), skill))
            .collect();

        let skill_score = self.skill_score(&held, opportunity);
        let experience_score = self.experience_score(profile, opportunity);
        let preference_score = self.preference_score(profile, opportunity);

        let overall_score = (self.config.skill_weight * skill_score
            + self.config.experience_weight * experience_score
            + self.config.preference_weight * preference_score)
            .clamp(0.0, 1.0);

        let skill_gaps = self.skill_gaps(&held, &opportunity.required_skills);
        let strengths = self.strengths(profile, &held, &opportunity.required_skills);
        let matched_mandatory_skills = opportunity
            .mandatory_skills()
            .filter(|required| {
                held.get(required.skill_id.as_str())
                    .is_some_and(|h| self.meets(&h.level, &required.required_level))
            })
            .count();

        let context = ExplanationContext {
            overall_score,
            skill_score,
            experience_score,
            preference_score,
            skill_gaps: &skill_gaps,
            strengths: &strengths,
        };
        let explanation = self.explain(&context);

        debug!(
            "Scored {} against {}: overall {:.3} (skill {:.3}, experience {:.3}, preference {:.3})",
            profile.id, opportunity.id, overall_score, skill_score, experience_score, preference_score
        );

        Ok(MatchResult {
            opportunity_id: opportunity.id.clone(),
            opportunity_title: opportunity.title.clone(),
            overall_score,
            skill_score,
            experience_score,
            preference_score,
            skill_gaps,
            strengths,
            explanation,
            matched_mandatory_skills,
        })
    }

    /// Per-category strength in `[0, 1]`, keyed by category id.
    ///
    /// Skills unknown to the catalog are not counted.
    pub fn portfolio(&self, profile: &Profile) -> BTreeMap<String, f64> {
        let max_rank = self.catalog.levels().max_rank() as f64;
        let mut totals: BTreeMap<String, (f64, f64)> = BTreeMap::new();

        let mut seen = HashSet::new();
        for held in profile.held_skills.iter().rev() {
            if !seen.insert(held.skill_id.as_str()) {
                continue;
            }
            let Some(skill) = self.catalog.get(&held.skill_id) else {
                continue;
            };
            let rank = self.catalog.rank(&held.level) as f64;
            let bonus = (held.years() * PORTFOLIO_YEARS_RATE).min(PORTFOLIO_YEARS_CAP);

            let entry = totals.entry(skill.category.clone()).or_insert((0.0, 0.0));
            entry.0 += rank + bonus;
            entry.1 += max_rank + PORTFOLIO_YEARS_CAP;
        }

        totals
            .into_iter()
            .map(|(category, (earned, possible))| (category, (earned / possible).clamp(0.0, 1.0)))
            .collect()
    }

    fn rank(&self, level: &SkillLevel) -> u32 {
        self.catalog.rank(level)
    }

    fn meets(&self, held: &SkillLevel, required: &SkillLevel) -> bool {
        self.rank(held) >= self.rank(required)
    }

    fn skill_score(&self, held: &HashMap<&str, &HeldSkill>, opportunity: &Opportunity) -> f64 {
        let required = &opportunity.required_skills;
        if required.is_empty() {
            return 1.0;
        }

        let credits: Vec<f64> = required.iter().map(|r| self.skill_credit(held, r)).collect();
        let total_importance = opportunity.importance_sum();

        let score = if total_importance > 0.0 {
            required
                .iter()
                .zip(&credits)
                .map(|(r, credit)| credit * r.importance)
                .sum::<f64>()
                / total_importance
        } else {
            credits.iter().sum::<f64>() / credits.len() as f64
        };

        score.clamp(0.0, 1.0)
    }

    fn skill_credit(&self, held: &HashMap<&str, &HeldSkill>, required: &RequiredSkill) -> f64 {
        let required_rank = self.rank(&required.required_level);

        match held.get(required.skill_id.as_str()) {
            Some(skill) => {
                let held_rank = self.rank(&skill.level);
                if held_rank >= required_rank {
                    let bonus = (skill.years() * self.config.skill_years_bonus_rate)
                        .min(self.config.skill_years_bonus_cap);
                    (1.0 + bonus).min(1.0)
                } else {
                    held_rank as f64 / required_rank as f64
                }
            }
            None => self.related_credit(held, &required.skill_id),
        }
    }

    /// Best partial credit from a held skill the catalog lists as related.
    fn related_credit(&self, held: &HashMap<&str, &HeldSkill>, skill_id: &str) -> f64 {
        self.catalog
            .related_skills(skill_id)
            .iter()
            .filter_map(|related| held.get(related.as_str()))
            .map(|skill| {
                (self.rank(&skill.level) as f64 / self.config.related_skill_rank_divisor)
                    .min(self.config.related_skill_cap)
            })
            .fold(0.0, f64::max)
    }

    fn experience_score(&self, profile: &Profile, opportunity: &Opportunity) -> f64 {
        let required = opportunity.min_experience_years.unwrap_or(0.0);
        if required <= 0.0 {
            return 1.0;
        }

        let actual = profile.total_experience_years;
        if actual >= required {
            let bonus = ((actual - required) * self.config.excess_experience_rate)
                .min(self.config.excess_experience_cap);
            (1.0 + bonus).min(1.0)
        } else {
            actual / required
        }
    }

    /// Mean of the applicable preference factors, or the neutral score when none apply.
    fn preference_score(&self, profile: &Profile, opportunity: &Opportunity) -> f64 {
        let preferences = &profile.preferences;
        let mut factors: Vec<f64> = Vec::new();

        if !preferences.work_types.is_empty() && !opportunity.work_types.is_empty() {
            let overlap = preferences
                .work_types
                .iter()
                .any(|wanted| opportunity.work_types.contains(wanted));
            factors.push(if overlap { 1.0 } else { self.config.work_type_mismatch });
        }

        let wanted_locations = non_empty_lowercase(&preferences.locations);
        if let Some(location) = opportunity.location.as_deref().filter(|l| !l.trim().is_empty()) {
            if !wanted_locations.is_empty() {
                let location = location.to_lowercase();
                let matched = wanted_locations.iter().any(|wanted| location.contains(wanted.as_str()));
                factors.push(if matched { 1.0 } else { self.config.location_mismatch });
            }
        }

        if let (Some(minimum), Some(maximum)) = (preferences.salary_min, opportunity.salary_max) {
            if minimum > 0.0 && maximum > 0.0 {
                factors.push(if maximum >= minimum {
                    1.0
                } else {
                    (maximum / minimum).max(self.config.salary_ratio_floor)
                });
            }
        }

        let wanted_industries = non_empty_lowercase(&preferences.industries);
        if let Some(industry) = opportunity.effective_industry() {
            if !wanted_industries.is_empty() {
                let industry = industry.to_lowercase();
                let matched = wanted_industries.iter().any(|wanted| industry.contains(wanted.as_str()));
                factors.push(if matched { 1.0 } else { self.config.industry_mismatch });
            }
        }

        if factors.is_empty() {
            self.config.neutral_preference
        } else {
            factors.iter().sum::<f64>() / factors.len() as f64
        }
    }

    /// Unmet requirements, most important first; ties keep requirement order.
    fn skill_gaps(&self, held: &HashMap<&str, &HeldSkill>, required: &[RequiredSkill]) -> Vec<SkillGap> {
        let mut gaps: Vec<SkillGap> = required
            .iter()
            .filter_map(|requirement| {
                let held_level = held.get(requirement.skill_id.as_str()).map(|h| &h.level);
                if held_level.is_some_and(|level| self.meets(level, &requirement.required_level)) {
                    return None;
                }

                let skill = self.catalog.get(&requirement.skill_id);
                Some(SkillGap {
                    skill_id: requirement.skill_id.clone(),
                    name: skill
                        .map(|s| s.name.clone())
                        .unwrap_or_else(|| requirement.skill_id.clone()),
                    category: skill
                        .map(|s| s.category.clone())
                        .unwrap_or_else(|| UNCATEGORIZED.to_string()),
                    held_level: held_level.cloned(),
                    required_level: requirement.required_level.clone(),
                    importance: requirement.importance,
                    mandatory: requirement.mandatory,
                })
            })
            .collect();

        gaps.sort_by(|a, b| b.importance.total_cmp(&a.importance));
        gaps
    }

    fn strengths(
        &self,
        profile: &Profile,
        held: &HashMap<&str, &HeldSkill>,
        required: &[RequiredSkill],
    ) -> Vec<String> {
        let mut strengths: Vec<String> = Vec::new();

        for requirement in required {
            let Some(skill) = held.get(requirement.skill_id.as_str()) else {
                continue;
            };
            let name = self
                .catalog
                .get(&skill.skill_id)
                .map(|s| s.name.as_str())
                .unwrap_or(skill.skill_id.as_str());
            let held_rank = self.rank(&skill.level);
            let required_rank = self.rank(&requirement.required_level);

            if held_rank > required_rank {
                strengths.push(name.to_string());
            } else if held_rank == required_rank
                && skill.years() > self.config.strength_years_threshold
            {
                strengths.push(format!("{} (experienced)", name));
            }
        }

        let strong_level = SkillLevel::new(&self.config.category_strength_level);
        let Some(strong_rank) = self.catalog.levels().try_rank(&strong_level) else {
            debug!(
                "Level `{}` is not on the catalog scale; skipping category strengths",
                strong_level
            );
            return dedup(strengths);
        };
        let mut per_category: BTreeMap<&str, usize> = BTreeMap::new();
        let mut seen = HashSet::new();
        for skill in profile.held_skills.iter().rev() {
            if !seen.insert(skill.skill_id.as_str()) || self.rank(&skill.level) < strong_rank {
                continue;
            }
            if let Some(known) = self.catalog.get(&skill.skill_id) {
                *per_category.entry(known.category.as_str()).or_default() += 1;
            }
        }
        for category in self.catalog.categories() {
            let count = per_category.get(category.category_id.as_str()).copied().unwrap_or(0);
            if count >= self.config.category_strength_min_skills {
                strengths.push(format!("Strong in {}", category.name));
            }
        }

        dedup(strengths)
    }

    fn explain(&self, context: &ExplanationContext<'_>) -> String {
        match &self.generator {
            Some(generator) => match generator.explain(context) {
                Ok(text) => text,
                Err(e) => {
                    warn!(
                        "Explanation generator `{}` failed, using template: {}",
                        generator.name(),
                        e
                    );
                    self.template.compose(context)
                }
            },
            None => self.template.compose(context),
        }
    }
}

fn non_empty_lowercase(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Drop repeated strengths, keeping first occurrences.
fn dedup(mut strengths: Vec<String>) -> Vec<String> {
    let mut unique = HashSet::new();
    strengths.retain(|s| unique.insert(s.clone()));
    strengths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SkillMatchError;
    use crate::matching::profile::{Preferences, WorkType};

    const CATALOG: &str = r#"{
        "skill_categories": {
            "programming": {
                "category_name": "Programming Languages",
                "skills": {
                    "python": {"name": "Python", "related_skills": ["r"]},
                    "r": {"name": "R", "related_skills": ["python"]},
                    "rust": {"name": "Rust"},
                    "go": {"name": "Go"}
                }
            },
            "data": {
                "category_name": "Data & Analytics",
                "skills": {"sql": {"name": "SQL"}}
            }
        }
    }"#;

    fn engine() -> ScoringEngine {
        let catalog = SkillCatalog::from_json_str(CATALOG).unwrap();
        ScoringEngine::with_defaults(Arc::new(catalog))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn data_profile() -> Profile {
        Profile::new("p1")
            .with_skill(HeldSkill::new("python", "advanced").with_years(5.0))
            .with_skill(HeldSkill::new("sql", "intermediate").with_years(2.0))
    }

    fn data_job() -> Opportunity {
        Opportunity::new("job-1")
            .with_title("Data Engineer")
            .with_skill(RequiredSkill::new("python", "intermediate", 0.7))
            .with_skill(RequiredSkill::new("sql", "advanced", 0.3))
    }

    #[test]
    fn test_partial_and_full_credit() {
        let result = engine().score(&data_profile(), &data_job()).unwrap();

        // python full credit, sql 2/3
        assert!(approx(result.skill_score, 0.9));
        assert!(approx(result.experience_score, 1.0));
        assert!(approx(result.preference_score, 0.7));
        assert!(approx(result.overall_score, 0.5 * 0.9 + 0.3 + 0.2 * 0.7));

        assert_eq!(result.skill_gaps.len(), 1);
        let gap = &result.skill_gaps[0];
        assert_eq!(gap.skill_id, "sql");
        assert_eq!(gap.name, "SQL");
        assert_eq!(gap.category, "data");
        assert_eq!(gap.importance, 0.3);
        assert_eq!(gap.held_level.as_ref().unwrap().as_str(), "intermediate");

        assert_eq!(result.strengths, vec!["Python".to_string()]);
        assert_eq!(result.matched_mandatory_skills, 1);
        assert_eq!(result.opportunity_title, "Data Engineer");
    }

    #[test]
    fn test_empty_requirements_are_full_skill_match() {
        let result = engine()
            .score(&Profile::new("p1"), &Opportunity::new("open"))
            .unwrap();

        assert_eq!(result.skill_score, 1.0);
        assert!(result.skill_gaps.is_empty());
    }

    #[test]
    fn test_related_skill_substitution() {
        let profile = Profile::new("p1").with_skill(HeldSkill::new("python", "expert"));
        let opportunity = Opportunity::new("stats").with_skill(RequiredSkill::new("r", "advanced", 1.0));

        let result = engine().score(&profile, &opportunity).unwrap();
        assert!(approx(result.skill_score, 0.6));
        assert!(result.skill_gaps[0].is_missing());
    }

    #[test]
    fn test_related_credit_scales_with_rank() {
        let profile = Profile::new("p1").with_skill(HeldSkill::new("python", "beginner"));
        let opportunity = Opportunity::new("stats").with_skill(RequiredSkill::new("r", "advanced", 1.0));

        let result = engine().score(&profile, &opportunity).unwrap();
        assert!(approx(result.skill_score, 0.25));
    }

    #[test]
    fn test_unknown_level_gets_lowest_rank() {
        let profile = Profile::new("p1").with_skill(HeldSkill::new("rust", "guru"));
        let opportunity = Opportunity::new("sys").with_skill(RequiredSkill::new("rust", "expert", 1.0));

        let result = engine().score(&profile, &opportunity).unwrap();
        assert!(approx(result.skill_score, 0.25));
        assert_eq!(result.skill_gaps.len(), 1);
    }

    #[test]
    fn test_unknown_skill_matches_by_id_only() {
        let profile = Profile::new("p1").with_skill(HeldSkill::new("cobol", "expert"));
        let opportunity = Opportunity::new("legacy")
            .with_skill(RequiredSkill::new("cobol", "advanced", 0.5))
            .with_skill(RequiredSkill::new("fortran", "advanced", 0.5));

        let result = engine().score(&profile, &opportunity).unwrap();
        assert!(approx(result.skill_score, 0.5));
        assert_eq!(result.skill_gaps[0].name, "fortran");
        assert_eq!(result.skill_gaps[0].category, "uncategorized");
    }

    #[test]
    fn test_zero_importance_uses_plain_mean() {
        let profile = Profile::new("p1").with_skill(HeldSkill::new("python", "expert"));
        let opportunity = Opportunity::new("job")
            .with_skill(RequiredSkill::new("python", "advanced", 0.0))
            .with_skill(RequiredSkill::new("go", "advanced", 0.0));

        let result = engine().score(&profile, &opportunity).unwrap();
        assert!(approx(result.skill_score, 0.5));
    }

    #[test]
    fn test_experience_score() {
        let engine = engine();
        let junior = Profile::new("p1").with_experience(2.0);
        let senior = Profile::new("p2").with_experience(10.0);
        let opportunity = Opportunity::new("job").with_min_experience(4.0);

        assert!(approx(engine.score(&junior, &opportunity).unwrap().experience_score, 0.5));
        assert!(approx(engine.score(&senior, &opportunity).unwrap().experience_score, 1.0));
    }

    #[test]
    fn test_preference_factors() {
        let profile = Profile::new("p1").with_preferences(Preferences {
            locations: vec!["berlin".to_string()],
            industries: vec!["fintech".to_string()],
            salary_min: Some(100_000.0),
            work_types: vec![WorkType::Remote],
        });
        let mut opportunity = Opportunity::new("job");
        opportunity.location = Some("Munich, Germany".to_string());
        opportunity.industry = Some("FinTech".to_string());
        opportunity.salary_max = Some(50_000.0);
        opportunity.work_types = vec![WorkType::Onsite];

        let result = engine().score(&profile, &opportunity).unwrap();
        // work type 0.3, location 0.5, salary 0.5, industry 1.0
        assert!(approx(result.preference_score, (0.3 + 0.5 + 0.5 + 1.0) / 4.0));
    }

    #[test]
    fn test_salary_ratio_floor() {
        let profile = Profile::new("p1").with_preferences(Preferences {
            salary_min: Some(100_000.0),
            ..Default::default()
        });
        let mut opportunity = Opportunity::new("job");
        opportunity.salary_max = Some(10_000.0);

        let result = engine().score(&profile, &opportunity).unwrap();
        assert!(approx(result.preference_score, 0.2));
    }

    #[test]
    fn test_full_match_scores_one() {
        let profile = data_profile()
            .with_skill(HeldSkill::new("sql", "expert"))
            .with_experience(6.0)
            .with_preferences(Preferences {
                locations: vec!["Remote".to_string()],
                work_types: vec![WorkType::Remote],
                ..Default::default()
            });
        let mut opportunity = data_job().with_min_experience(3.0);
        opportunity.location = Some("Remote (EU)".to_string());
        opportunity.work_types = vec![WorkType::Remote, WorkType::Fulltime];

        let result = engine().score(&profile, &opportunity).unwrap();
        assert_eq!(result.overall_score, 1.0);
        assert!(result.skill_gaps.is_empty());
        assert_eq!(result.matched_mandatory_skills, 2);
    }

    #[test]
    fn test_gaps_sorted_by_importance_then_requirement_order() {
        let opportunity = Opportunity::new("job")
            .with_skill(RequiredSkill::new("rust", "advanced", 0.5))
            .with_skill(RequiredSkill::new("go", "advanced", 0.5))
            .with_skill(RequiredSkill::new("sql", "advanced", 0.9));

        let result = engine().score(&Profile::new("p1"), &opportunity).unwrap();
        let order: Vec<&str> = result.skill_gaps.iter().map(|g| g.skill_id.as_str()).collect();
        assert_eq!(order, vec!["sql", "rust", "go"]);
    }

    #[test]
    fn test_category_strength() {
        let profile = Profile::new("p1")
            .with_skill(HeldSkill::new("python", "expert"))
            .with_skill(HeldSkill::new("rust", "advanced"))
            .with_skill(HeldSkill::new("go", "proficient"))
            .with_skill(HeldSkill::new("r", "intermediate").with_years(4.0));
        let opportunity = Opportunity::new("job").with_skill(RequiredSkill::new("r", "competent", 1.0));

        let result = engine().score(&profile, &opportunity).unwrap();
        assert_eq!(
            result.strengths,
            vec![
                "R (experienced)".to_string(),
                "Strong in Programming Languages".to_string()
            ]
        );
    }

    #[test]
    fn test_category_strength_skipped_when_level_not_on_scale() {
        let catalog = SkillCatalog::from_json_str(
            r#"{
                "skill_categories": {
                    "programming": {
                        "category_name": "Programming",
                        "skills": {"python": {}, "rust": {}, "go": {}}
                    }
                },
                "level_values": {"novice": 1, "skilled": 2, "master": 3}
            }"#,
        )
        .unwrap();
        let engine = ScoringEngine::with_defaults(Arc::new(catalog));
        let profile = Profile::new("p1")
            .with_skill(HeldSkill::new("python", "novice"))
            .with_skill(HeldSkill::new("rust", "novice"))
            .with_skill(HeldSkill::new("go", "novice"));

        let result = engine.score(&profile, &Opportunity::new("job")).unwrap();
        assert!(result.strengths.is_empty());
    }

    #[test]
    fn test_malformed_input_is_rejected() {
        let opportunity = Opportunity::new("job").with_skill(RequiredSkill::new("python", "expert", 2.0));
        assert!(matches!(
            engine().score(&Profile::new("p1"), &opportunity),
            Err(SkillMatchError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let engine = engine();
        let first = engine.score(&data_profile(), &data_job()).unwrap();
        let second = engine.score(&data_profile(), &data_job()).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    struct FailingGenerator;

    impl ExplanationGenerator for FailingGenerator {
        fn name(&self) -> &str {
            "failing"
        }

        fn explain(&self, _context: &ExplanationContext<'_>) -> Result<String> {
            Err(SkillMatchError::Configuration("generator unavailable".to_string()))
        }
    }

    struct FixedGenerator;

    impl ExplanationGenerator for FixedGenerator {
        fn name(&self) -> &str {
            "fixed"
        }

        fn explain(&self, context: &ExplanationContext<'_>) -> Result<String> {
            Ok(format!("{} gaps", context.skill_gaps.len()))
        }
    }

    #[test]
    fn test_generator_does_not_change_scores() {
        let plain = engine().score(&data_profile(), &data_job()).unwrap();
        let fixed = engine()
            .with_generator(Box::new(FixedGenerator))
            .score(&data_profile(), &data_job())
            .unwrap();
        let failing = engine()
            .with_generator(Box::new(FailingGenerator))
            .score(&data_profile(), &data_job())
            .unwrap();

        assert_eq!(fixed.explanation, "1 gaps");
        assert_eq!(fixed.overall_score, plain.overall_score);
        assert_eq!(failing, plain);
    }

    #[test]
    fn test_portfolio() {
        let profile = Profile::new("p1")
            .with_skill(HeldSkill::new("python", "expert").with_years(10.0))
            .with_skill(HeldSkill::new("sql", "intermediate"))
            .with_skill(HeldSkill::new("cobol", "expert"));

        let portfolio = engine().portfolio(&profile);
        assert_eq!(portfolio.len(), 2);
        assert!(approx(portfolio["programming"], 1.0));
        assert!(approx(portfolio["data"], 2.0 / 4.5));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let catalog = Arc::new(SkillCatalog::from_json_str(CATALOG).unwrap());
        let config = ScoringConfig {
            skill_weight: 0.9,
            ..Default::default()
        };
        assert!(ScoringEngine::new(catalog, config).is_err());
    }
}
