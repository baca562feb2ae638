//! Profile-to-opportunity matching: scoring, gaps, explanations and ranking

pub mod explain;
pub mod normalize;
pub mod opportunity;
pub mod profile;
pub mod ranker;
pub mod result;
pub mod scorer;

pub use explain::{ExplanationContext, ExplanationGenerator, TemplateExplainer};
pub use normalize::SkillRecord;
pub use opportunity::{Opportunity, OpportunityKind, RequiredSkill};
pub use profile::{HeldSkill, Preferences, Profile, WorkType};
pub use ranker::{BatchRanker, RankOptions};
pub use result::{MatchResult, ScoreBand, SkillGap};
pub use scorer::ScoringEngine;
