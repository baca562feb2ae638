//! Configuration management for the skill matcher

use crate::error::{Result, SkillMatchError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Weights and partial-credit constants used by the scoring engine.
///
/// The partial-credit values are empirical tuning knobs carried over from the
/// production matcher; none of them has a documented derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub skill_weight: f64,
    pub experience_weight: f64,
    pub preference_weight: f64,

    /// Bonus per year of hands-on experience with a skill that meets its requirement.
    pub skill_years_bonus_rate: f64,
    pub skill_years_bonus_cap: f64,

    /// Related-skill substitution: `min(rank / divisor, cap)`.
    pub related_skill_rank_divisor: f64,
    pub related_skill_cap: f64,

    /// Bonus per year above the experience requirement, before the 1.0 clamp.
    pub excess_experience_rate: f64,
    pub excess_experience_cap: f64,

    pub work_type_mismatch: f64,
    pub location_mismatch: f64,
    pub salary_ratio_floor: f64,
    pub industry_mismatch: f64,
    /// Preference score when neither side states anything comparable.
    pub neutral_preference: f64,

    /// Equal-rank skills count as strengths above this many years.
    pub strength_years_threshold: f64,
    pub category_strength_min_skills: usize,
    /// Level whose rank (and above) counts toward a category strength.
    pub category_strength_level: String,

    pub high_importance_threshold: f64,
    pub max_named_gaps: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            skill_weight: 0.5,
            experience_weight: 0.3,
            preference_weight: 0.2,
            skill_years_bonus_rate: 0.05,
            skill_years_bonus_cap: 0.2,
            related_skill_rank_divisor: 4.0,
            related_skill_cap: 0.6,
            excess_experience_rate: 0.1,
            excess_experience_cap: 0.3,
            work_type_mismatch: 0.3,
            location_mismatch: 0.5,
            salary_ratio_floor: 0.2,
            industry_mismatch: 0.4,
            neutral_preference: 0.7,
            strength_years_threshold: 2.0,
            category_strength_min_skills: 3,
            category_strength_level: "advanced".to_string(),
            high_importance_threshold: 0.7,
            max_named_gaps: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Vocabulary cap; rarer terms beyond it are dropped.
    pub max_features: usize,
    /// Terms present in more than this fraction of documents are pruned.
    pub max_df: f64,
    pub min_df: usize,
    pub ngram_max: usize,
    /// Hits at or below this cosine similarity are suppressed.
    pub similarity_floor: f64,
    pub default_top_n: usize,
    pub preview_chars: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_features: 5000,
            max_df: 0.9,
            min_df: 1,
            ngram_max: 2,
            similarity_floor: 0.01,
            default_top_n: 10,
            preview_chars: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub detailed: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
            detailed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Config {
    /// Load from the user config directory, writing defaults on first use.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| SkillMatchError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SkillMatchError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skill-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        self.index.validate()
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("skill_weight", self.skill_weight),
            ("experience_weight", self.experience_weight),
            ("preference_weight", self.preference_weight),
            ("skill_years_bonus_rate", self.skill_years_bonus_rate),
            ("skill_years_bonus_cap", self.skill_years_bonus_cap),
            ("related_skill_cap", self.related_skill_cap),
            ("excess_experience_rate", self.excess_experience_rate),
            ("excess_experience_cap", self.excess_experience_cap),
            ("strength_years_threshold", self.strength_years_threshold),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SkillMatchError::Configuration(format!(
                    "scoring.{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }

        let unit_interval = [
            ("work_type_mismatch", self.work_type_mismatch),
            ("location_mismatch", self.location_mismatch),
            ("salary_ratio_floor", self.salary_ratio_floor),
            ("industry_mismatch", self.industry_mismatch),
            ("neutral_preference", self.neutral_preference),
            ("high_importance_threshold", self.high_importance_threshold),
        ];
        for (name, value) in unit_interval {
            if !(0.0..=1.0).contains(&value) {
                return Err(SkillMatchError::Configuration(format!(
                    "scoring.{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if !self.related_skill_rank_divisor.is_finite() || self.related_skill_rank_divisor <= 0.0 {
            return Err(SkillMatchError::Configuration(
                "scoring.related_skill_rank_divisor must be positive".to_string(),
            ));
        }

        let weight_sum = self.skill_weight + self.experience_weight + self.preference_weight;
        if (weight_sum - 1.0).abs() > 1e-6 {
            return Err(SkillMatchError::Configuration(format!(
                "scoring weights must sum to 1.0, got {:.4}",
                weight_sum
            )));
        }

        Ok(())
    }
}

impl IndexConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_features == 0 {
            return Err(SkillMatchError::Configuration(
                "index.max_features must be at least 1".to_string(),
            ));
        }
        if !(self.max_df > 0.0 && self.max_df <= 1.0) {
            return Err(SkillMatchError::Configuration(format!(
                "index.max_df must be within (0, 1], got {}",
                self.max_df
            )));
        }
        if self.ngram_max == 0 {
            return Err(SkillMatchError::Configuration(
                "index.ngram_max must be at least 1".to_string(),
            ));
        }
        if !(-1.0..=1.0).contains(&self.similarity_floor) {
            return Err(SkillMatchError::Configuration(format!(
                "index.similarity_floor must be a cosine value, got {}",
                self.similarity_floor
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scoring.skill_weight, 0.5);
        assert_eq!(config.index.max_features, 5000);
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let mut config = Config::default();
        config.scoring.preference_weight = 0.5;

        assert!(matches!(config.validate(), Err(SkillMatchError::Configuration(_))));
    }

    #[test]
    fn test_partial_values_bounded() {
        let mut config = Config::default();
        config.scoring.location_mismatch = 1.5;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.index.similarity_floor = 0.05;
        config.output.format = OutputFormat::Json;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[index]\nmax_features = 100\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.index.max_features, 100);
        assert_eq!(loaded.index.max_df, 0.9);
        assert_eq!(loaded.scoring, ScoringConfig::default());
    }
}
