//! Candidate profile structures

use crate::catalog::SkillLevel;
use crate::error::{Result, SkillMatchError};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkType {
    Remote,
    Hybrid,
    #[serde(alias = "on-site", alias = "on_site")]
    Onsite,
    Contract,
    #[serde(alias = "full-time", alias = "full_time")]
    Fulltime,
    #[serde(alias = "part-time", alias = "part_time")]
    Parttime,
    Internship,
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkType::Remote => "remote",
            WorkType::Hybrid => "hybrid",
            WorkType::Onsite => "onsite",
            WorkType::Contract => "contract",
            WorkType::Fulltime => "fulltime",
            WorkType::Parttime => "parttime",
            WorkType::Internship => "internship",
        };
        f.write_str(name)
    }
}

/// A skill the candidate holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeldSkill {
    pub skill_id: String,
    pub level: SkillLevel,
    #[serde(default)]
    pub years_experience: Option<f64>,
}

impl HeldSkill {
    pub fn new(skill_id: impl Into<String>, level: impl Into<SkillLevel>) -> Self {
        Self {
            skill_id: skill_id.into(),
            level: level.into(),
            years_experience: None,
        }
    }

    pub fn with_years(mut self, years: f64) -> Self {
        self.years_experience = Some(years);
        self
    }

    pub fn years(&self) -> f64 {
        self.years_experience.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default, alias = "work_type")]
    pub work_types: Vec<WorkType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub held_skills: Vec<HeldSkill>,
    #[serde(default)]
    pub total_experience_years: f64,
    #[serde(default)]
    pub preferences: Preferences,
}

impl Profile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            held_skills: Vec::new(),
            total_experience_years: 0.0,
            preferences: Preferences::default(),
        }
    }

    pub fn with_experience(mut self, years: f64) -> Self {
        self.total_experience_years = years;
        self
    }

    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn with_skill(mut self, skill: HeldSkill) -> Self {
        self.add_skill(skill);
        self
    }

    /// Insert or replace; a later entry for the same skill wins.
    pub fn add_skill(&mut self, skill: HeldSkill) {
        self.held_skills.retain(|s| s.skill_id != skill.skill_id);
        self.held_skills.push(skill);
    }

    pub fn remove_skill(&mut self, skill_id: &str) -> bool {
        let before = self.held_skills.len();
        self.held_skills.retain(|s| s.skill_id != skill_id);
        self.held_skills.len() < before
    }

    /// The effective entry for `skill_id`; the last one if the list has duplicates.
    pub fn skill(&self, skill_id: &str) -> Option<&HeldSkill> {
        self.held_skills.iter().rev().find(|s| s.skill_id == skill_id)
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(SkillMatchError::invalid("profile.id", "must not be empty"));
        }
        if !self.total_experience_years.is_finite() || self.total_experience_years < 0.0 {
            return Err(SkillMatchError::invalid(
                "profile.total_experience_years",
                format!("must be a finite non-negative number, got {}", self.total_experience_years),
            ));
        }
        if let Some(salary) = self.preferences.salary_min {
            if !salary.is_finite() || salary < 0.0 {
                return Err(SkillMatchError::invalid(
                    "profile.preferences.salary_min",
                    format!("must be a finite non-negative number, got {}", salary),
                ));
            }
        }
        for (i, skill) in self.held_skills.iter().enumerate() {
            if skill.skill_id.trim().is_empty() {
                return Err(SkillMatchError::invalid(
                    format!("profile.held_skills[{}].skill_id", i),
                    "must not be empty",
                ));
            }
            if let Some(years) = skill.years_experience {
                if !years.is_finite() || years < 0.0 {
                    return Err(SkillMatchError::invalid(
                        format!("profile.held_skills[{}].years_experience", i),
                        format!("must be a finite non-negative number, got {}", years),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_skill_last_write_wins() {
        let mut profile = Profile::new("p1");
        profile.add_skill(HeldSkill::new("python", "beginner"));
        profile.add_skill(HeldSkill::new("sql", "advanced"));
        profile.add_skill(HeldSkill::new("python", "expert").with_years(6.0));

        assert_eq!(profile.held_skills.len(), 2);
        assert_eq!(profile.skill("python").unwrap().level.as_str(), "expert");
        assert!(profile.remove_skill("sql"));
        assert!(!profile.remove_skill("sql"));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "id": "p1",
            "held_skills": [{"skill_id": "python", "level": "Advanced", "years_experience": 5}],
            "preferences": {"work_type": ["remote", "full-time"], "locations": ["Berlin"]}
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.total_experience_years, 0.0);
        assert_eq!(profile.held_skills[0].level.as_str(), "advanced");
        assert_eq!(
            profile.preferences.work_types,
            vec![WorkType::Remote, WorkType::Fulltime]
        );
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_years() {
        let profile = Profile::new("p1").with_skill(HeldSkill::new("python", "expert").with_years(-1.0));

        match profile.validate() {
            Err(SkillMatchError::InvalidInput { field, .. }) => {
                assert_eq!(field, "profile.held_skills[0].years_experience")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        assert!(Profile::new("  ").validate().is_err());
        assert!(Profile::new("p").with_experience(f64::NAN).validate().is_err());
    }
}
