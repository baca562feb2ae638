//! Skill reference entities

use crate::catalog::level::SkillLevel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub skill_id: String,
    pub name: String,
    pub category: String,
    pub aliases: Vec<String>,
    pub related_skills: Vec<String>,
    pub description: Option<String>,
    /// Levels this skill may be assessed at. Empty means any level on the scale.
    pub levels: Vec<SkillLevel>,
}

impl Skill {
    /// Name, id and aliases; every surface form the skill is known by.
    pub fn surface_forms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(std::iter::once(self.skill_id.as_str()))
            .chain(self.aliases.iter().map(|a| a.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category_id: String,
    pub name: String,
    pub weight: f64,
}
