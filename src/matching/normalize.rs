//! Boundary normalization of loosely shaped skill records

use crate::catalog::{SkillCatalog, SkillLevel};
use crate::error::{Result, SkillMatchError};
use crate::matching::profile::{HeldSkill, Preferences, Profile};
use serde::Deserialize;

/// A profile skill as collaborators actually send it: a bare name, or a map
/// whose keys vary between sources.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SkillRecord {
    Name(String),
    Detailed(DetailedRecord),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DetailedRecord {
    #[serde(default)]
    pub skill_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "proficiency")]
    pub level: Option<String>,
    #[serde(default, alias = "years")]
    pub years_experience: Option<f64>,
}

impl SkillRecord {
    /// Canonical `HeldSkill` for this record.
    ///
    /// Names and aliases resolve to catalog ids; unknown identifiers are kept
    /// lowercased so they still match by id. A missing level becomes the lowest
    /// level on the catalog's scale.
    pub fn normalize(&self, catalog: &SkillCatalog) -> Result<HeldSkill> {
        let (identifier, level, years) = match self {
            SkillRecord::Name(name) => (Some(name.as_str()), None, None),
            SkillRecord::Detailed(record) => (
                record
                    .skill_id
                    .as_deref()
                    .or(record.id.as_deref())
                    .or(record.name.as_deref()),
                record.level.as_deref(),
                record.years_experience,
            ),
        };

        let identifier = identifier
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| SkillMatchError::invalid("skill record", "has no skill_id, id or name"))?;

        let skill_id = catalog
            .resolve(identifier)
            .map(|skill| skill.skill_id.clone())
            .unwrap_or_else(|| identifier.to_lowercase());

        let level = match level.map(str::trim).filter(|s| !s.is_empty()) {
            Some(level) => SkillLevel::new(level),
            None => catalog
                .levels()
                .levels()
                .next()
                .map(|(level, _)| level.clone())
                .unwrap_or_else(|| SkillLevel::new("beginner")),
        };

        if let Some(years) = years {
            if !years.is_finite() || years < 0.0 {
                return Err(SkillMatchError::invalid(
                    format!("skill record `{}`.years_experience", skill_id),
                    format!("must be a finite non-negative number, got {}", years),
                ));
            }
        }

        Ok(HeldSkill {
            skill_id,
            level,
            years_experience: years,
        })
    }
}

impl Profile {
    /// Build a profile from raw records; duplicates collapse with last write winning.
    pub fn from_records(
        id: impl Into<String>,
        records: &[SkillRecord],
        total_experience_years: f64,
        preferences: Preferences,
        catalog: &SkillCatalog,
    ) -> Result<Self> {
        let mut profile = Profile::new(id)
            .with_experience(total_experience_years)
            .with_preferences(preferences);
        for record in records {
            profile.add_skill(record.normalize(catalog)?);
        }
        profile.validate()?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "skill_categories": {
            "programming": {"skills": {"python": {"name": "Python", "aliases": ["py"]}}},
            "data": {"skills": {"sql": {"name": "SQL"}}}
        },
        "level_values": {"novice": 1, "intermediate": 2, "advanced": 3}
    }"#;

    fn catalog() -> SkillCatalog {
        SkillCatalog::from_json_str(CATALOG).unwrap()
    }

    #[test]
    fn test_heterogeneous_records() {
        let records: Vec<SkillRecord> = serde_json::from_str(
            r#"[
                "Python",
                {"name": "SQL", "proficiency": "Advanced", "years": 3},
                {"id": "Kubernetes", "level": "intermediate"}
            ]"#,
        )
        .unwrap();
        let catalog = catalog();

        let held: Vec<HeldSkill> = records.iter().map(|r| r.normalize(&catalog).unwrap()).collect();

        assert_eq!(held[0].skill_id, "python");
        assert_eq!(held[0].level.as_str(), "novice");
        assert_eq!(held[1].skill_id, "sql");
        assert_eq!(held[1].level.as_str(), "advanced");
        assert_eq!(held[1].years_experience, Some(3.0));
        assert_eq!(held[2].skill_id, "kubernetes");
    }

    #[test]
    fn test_record_without_identifier_is_invalid() {
        let record = SkillRecord::Detailed(DetailedRecord {
            level: Some("advanced".to_string()),
            ..Default::default()
        });
        assert!(matches!(
            record.normalize(&catalog()),
            Err(SkillMatchError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_from_records_last_write_wins() {
        let records = vec![
            SkillRecord::Name("py".to_string()),
            SkillRecord::Detailed(DetailedRecord {
                skill_id: Some("python".to_string()),
                level: Some("advanced".to_string()),
                ..Default::default()
            }),
        ];
        let profile =
            Profile::from_records("p1", &records, 4.0, Preferences::default(), &catalog()).unwrap();

        assert_eq!(profile.held_skills.len(), 1);
        assert_eq!(profile.held_skills[0].level.as_str(), "advanced");
        assert_eq!(profile.total_experience_years, 4.0);
    }
}
