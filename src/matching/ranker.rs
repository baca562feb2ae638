//! Batch ranking of opportunities for one profile

use crate::error::Result;
use crate::matching::opportunity::{Opportunity, OpportunityKind};
use crate::matching::profile::Profile;
use crate::matching::result::MatchResult;
use crate::matching::scorer::ScoringEngine;
use log::{info, warn};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
pub struct RankOptions {
    pub min_score: f64,
    pub top_n: Option<usize>,
    /// Only these kinds are scored; empty means all.
    pub kinds: Vec<OpportunityKind>,
    pub include_inactive: bool,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            min_score: 0.0,
            top_n: None,
            kinds: Vec::new(),
            include_inactive: false,
        }
    }
}

pub struct BatchRanker<'a> {
    engine: &'a ScoringEngine,
}

impl<'a> BatchRanker<'a> {
    pub fn new(engine: &'a ScoringEngine) -> Self {
        Self { engine }
    }

    pub fn rank(
        &self,
        profile: &Profile,
        opportunities: &[Opportunity],
        min_score: f64,
        top_n: Option<usize>,
    ) -> Result<Vec<MatchResult>> {
        let options = RankOptions {
            min_score,
            top_n,
            include_inactive: true,
            ..Default::default()
        };
        self.rank_with(profile, opportunities, &options)
    }

    /// Score every eligible opportunity, drop those under `min_score`, sort,
    /// then truncate to `top_n`.
    ///
    /// An invalid profile fails the whole call. An opportunity that fails to
    /// score is logged and skipped.
    pub fn rank_with(
        &self,
        profile: &Profile,
        opportunities: &[Opportunity],
        options: &RankOptions,
    ) -> Result<Vec<MatchResult>> {
        profile.validate()?;

        let mut skipped = 0usize;
        let mut results: Vec<MatchResult> = opportunities
            .iter()
            .filter(|o| options.include_inactive || o.active)
            .filter(|o| options.kinds.is_empty() || options.kinds.contains(&o.kind))
            .filter_map(|opportunity| match self.engine.score(profile, opportunity) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Skipping opportunity `{}`: {}", opportunity.id, e);
                    skipped += 1;
                    None
                }
            })
            .filter(|result| result.overall_score >= options.min_score)
            .collect();

        results.sort_by(compare_results);

        if let Some(top_n) = options.top_n {
            results.truncate(top_n);
        }

        info!(
            "Ranked {} of {} opportunities for {} ({} skipped)",
            results.len(),
            opportunities.len(),
            profile.id,
            skipped
        );

        Ok(results)
    }
}

/// Best first: higher score, then more mandatory skills met, then id.
fn compare_results(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.overall_score
        .total_cmp(&a.overall_score)
        .then_with(|| b.matched_mandatory_skills.cmp(&a.matched_mandatory_skills))
        .then_with(|| a.opportunity_id.cmp(&b.opportunity_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SkillCatalog;
    use crate::matching::opportunity::RequiredSkill;
    use crate::matching::profile::HeldSkill;
    use std::sync::Arc;

    const CATALOG: &str = r#"{
        "skill_categories": {
            "programming": {"skills": {"python": {"name": "Python"}, "go": {"name": "Go"}}},
            "data": {"skills": {"sql": {"name": "SQL"}}}
        }
    }"#;

    fn engine() -> ScoringEngine {
        ScoringEngine::with_defaults(Arc::new(SkillCatalog::from_json_str(CATALOG).unwrap()))
    }

    fn profile() -> Profile {
        Profile::new("p1")
            .with_skill(HeldSkill::new("python", "expert"))
            .with_skill(HeldSkill::new("sql", "beginner"))
    }

    fn opportunities() -> Vec<Opportunity> {
        vec![
            Opportunity::new("go-job").with_skill(RequiredSkill::new("go", "advanced", 1.0)),
            Opportunity::new("py-job").with_skill(RequiredSkill::new("python", "advanced", 1.0)),
            Opportunity::new("sql-job").with_skill(RequiredSkill::new("sql", "advanced", 1.0)),
            Opportunity::new("open-job"),
        ]
    }

    #[test]
    fn test_sorted_non_increasing() {
        let engine = engine();
        let results = BatchRanker::new(&engine)
            .rank(&profile(), &opportunities(), 0.0, None)
            .unwrap();

        assert_eq!(results.len(), 4);
        for pair in results.windows(2) {
            assert!(pair[0].overall_score >= pair[1].overall_score);
        }
        assert_eq!(results.last().unwrap().opportunity_id, "go-job");
    }

    #[test]
    fn test_ties_prefer_mandatory_matches_then_id() {
        let engine = engine();
        let results = BatchRanker::new(&engine)
            .rank(&profile(), &opportunities(), 0.0, None)
            .unwrap();

        // py-job and open-job both score 1.0; py-job meets one mandatory skill.
        assert_eq!(results[0].opportunity_id, "py-job");
        assert_eq!(results[1].opportunity_id, "open-job");
    }

    #[test]
    fn test_min_score_and_top_n() {
        let engine = engine();
        let ranker = BatchRanker::new(&engine);

        let filtered = ranker.rank(&profile(), &opportunities(), 0.9, None).unwrap();
        assert!(filtered.iter().all(|r| r.overall_score >= 0.9));
        assert_eq!(filtered.len(), 2);

        let top = ranker.rank(&profile(), &opportunities(), 0.0, Some(1)).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].opportunity_id, "py-job");
    }

    #[test]
    fn test_bad_record_is_skipped() {
        let engine = engine();
        let mut opportunities = opportunities();
        opportunities.push(
            Opportunity::new("broken").with_skill(RequiredSkill::new("python", "advanced", 3.0)),
        );

        let results = BatchRanker::new(&engine)
            .rank(&profile(), &opportunities, 0.0, None)
            .unwrap();
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.opportunity_id != "broken"));
    }

    #[test]
    fn test_invalid_profile_fails_batch() {
        let engine = engine();
        let profile = Profile::new("p1").with_experience(-1.0);

        assert!(BatchRanker::new(&engine)
            .rank(&profile, &opportunities(), 0.0, None)
            .is_err());
    }

    #[test]
    fn test_options_filter_kind_and_inactive() {
        let engine = engine();
        let mut opportunities = opportunities();
        opportunities[1].active = false;
        opportunities[2].kind = OpportunityKind::Learning;

        let ranker = BatchRanker::new(&engine);
        let active = ranker
            .rank_with(&profile(), &opportunities, &RankOptions::default())
            .unwrap();
        assert!(active.iter().all(|r| r.opportunity_id != "py-job"));

        let learning = ranker
            .rank_with(
                &profile(),
                &opportunities,
                &RankOptions {
                    kinds: vec![OpportunityKind::Learning],
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(learning.len(), 1);
        assert_eq!(learning[0].opportunity_id, "sql-job");
    }
}
