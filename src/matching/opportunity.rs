//! Opportunity structures: jobs, projects, courses

use crate::catalog::SkillLevel;
use crate::error::{Result, SkillMatchError};
use crate::matching::profile::WorkType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpportunityKind {
    #[default]
    Job,
    Project,
    Internship,
    #[serde(alias = "course")]
    Learning,
    Volunteer,
    Freelance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredSkill {
    pub skill_id: String,
    pub required_level: SkillLevel,
    pub importance: f64,
    #[serde(default = "default_mandatory", alias = "is_mandatory")]
    pub mandatory: bool,
}

fn default_mandatory() -> bool {
    true
}

fn default_active() -> bool {
    true
}

impl RequiredSkill {
    pub fn new(skill_id: impl Into<String>, level: impl Into<SkillLevel>, importance: f64) -> Self {
        Self {
            skill_id: skill_id.into(),
            required_level: level.into(),
            importance,
            mandatory: true,
        }
    }

    pub fn optional(mut self) -> Self {
        self.mandatory = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub kind: OpportunityKind,
    #[serde(default)]
    pub required_skills: Vec<RequiredSkill>,
    #[serde(default)]
    pub min_experience_years: Option<f64>,
    #[serde(default)]
    pub category: String,
    /// Industry compared against profile preferences; falls back to `category`.
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary_max: Option<f64>,
    #[serde(default, alias = "work_type")]
    pub work_types: Vec<WorkType>,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Opportunity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            kind: OpportunityKind::Job,
            required_skills: Vec::new(),
            min_experience_years: None,
            category: String::new(),
            industry: None,
            location: None,
            salary_max: None,
            work_types: Vec::new(),
            active: true,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_skill(mut self, skill: RequiredSkill) -> Self {
        self.required_skills.push(skill);
        self
    }

    pub fn with_min_experience(mut self, years: f64) -> Self {
        self.min_experience_years = Some(years);
        self
    }

    pub fn mandatory_skills(&self) -> impl Iterator<Item = &RequiredSkill> {
        self.required_skills.iter().filter(|s| s.mandatory)
    }

    pub fn importance_sum(&self) -> f64 {
        self.required_skills.iter().map(|s| s.importance).sum()
    }

    /// Industry the preference check compares against, if any.
    pub fn effective_industry(&self) -> Option<&str> {
        fn non_blank(s: &str) -> Option<&str> {
            Some(s.trim()).filter(|s| !s.is_empty())
        }
        self.industry
            .as_deref()
            .and_then(non_blank)
            .or_else(|| non_blank(&self.category))
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(SkillMatchError::invalid("opportunity.id", "must not be empty"));
        }
        if let Some(years) = self.min_experience_years {
            if !years.is_finite() || years < 0.0 {
                return Err(SkillMatchError::invalid(
                    format!("opportunity[{}].min_experience_years", self.id),
                    format!("must be a finite non-negative number, got {}", years),
                ));
            }
        }
        if let Some(salary) = self.salary_max {
            if !salary.is_finite() || salary < 0.0 {
                return Err(SkillMatchError::invalid(
                    format!("opportunity[{}].salary_max", self.id),
                    format!("must be a finite non-negative number, got {}", salary),
                ));
            }
        }
        for (i, skill) in self.required_skills.iter().enumerate() {
            if skill.skill_id.trim().is_empty() {
                return Err(SkillMatchError::invalid(
                    format!("opportunity[{}].required_skills[{}].skill_id", self.id, i),
                    "must not be empty",
                ));
            }
            if !(0.0..=1.0).contains(&skill.importance) {
                return Err(SkillMatchError::invalid(
                    format!("opportunity[{}].required_skills[{}].importance", self.id, i),
                    format!("must be within [0, 1], got {}", skill.importance),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "id": "job-1",
            "title": "Data Engineer",
            "required_skills": [
                {"skill_id": "python", "required_level": "intermediate", "importance": 0.7},
                {"skill_id": "sql", "required_level": "advanced", "importance": 0.3, "is_mandatory": false}
            ],
            "category": "Technology",
            "work_type": ["remote"]
        }"#;
        let opportunity: Opportunity = serde_json::from_str(json).unwrap();

        assert_eq!(opportunity.kind, OpportunityKind::Job);
        assert!(opportunity.active);
        assert!(opportunity.required_skills[0].mandatory);
        assert!(!opportunity.required_skills[1].mandatory);
        assert_eq!(opportunity.mandatory_skills().count(), 1);
        assert!((opportunity.importance_sum() - 1.0).abs() < 1e-9);
        assert_eq!(opportunity.effective_industry(), Some("Technology"));
    }

    #[test]
    fn test_course_alias() {
        let opportunity: Opportunity =
            serde_json::from_str(r#"{"id": "c1", "kind": "course"}"#).unwrap();
        assert_eq!(opportunity.kind, OpportunityKind::Learning);
        assert_eq!(opportunity.effective_industry(), None);
    }

    #[test]
    fn test_blank_industry_falls_back_to_category() {
        let mut opportunity = Opportunity::new("job-1");
        opportunity.industry = Some("  ".to_string());
        opportunity.category = "Healthcare".to_string();
        assert_eq!(opportunity.effective_industry(), Some("Healthcare"));

        opportunity.industry = Some("Biotech".to_string());
        assert_eq!(opportunity.effective_industry(), Some("Biotech"));
    }

    #[test]
    fn test_validate_importance_range() {
        let opportunity = Opportunity::new("job-1").with_skill(RequiredSkill::new("python", "expert", 1.2));

        match opportunity.validate() {
            Err(SkillMatchError::InvalidInput { field, .. }) => {
                assert_eq!(field, "opportunity[job-1].required_skills[0].importance")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_experience() {
        let opportunity = Opportunity::new("job-1").with_min_experience(-2.0);
        assert!(opportunity.validate().is_err());
        assert!(Opportunity::new("job-1").with_min_experience(3.0).validate().is_ok());
    }
}
