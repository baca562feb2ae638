//! Report structures handed to the formatters

use crate::matching::MatchResult;
use crate::retrieval::{Partition, SearchHit};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
}

impl ReportMetadata {
    pub fn now() -> Self {
        Self {
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// A single profile/opportunity score with its advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub metadata: ReportMetadata,
    pub profile_id: String,
    pub result: MatchResult,
    pub recommendations: Vec<String>,
}

impl MatchReport {
    pub fn new(profile_id: impl Into<String>, result: MatchResult) -> Self {
        let recommendations = result.recommendations();
        Self {
            metadata: ReportMetadata::now(),
            profile_id: profile_id.into(),
            result,
            recommendations,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingReport {
    pub metadata: ReportMetadata,
    pub profile_id: String,
    pub min_score: f64,
    pub considered: usize,
    pub results: Vec<MatchResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    pub metadata: ReportMetadata,
    pub partition: Partition,
    pub query_preview: String,
    pub hits: Vec<SearchHit>,
}
