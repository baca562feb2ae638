//! Skill catalog loading, validation and lookup

use crate::catalog::detector::SkillDetector;
use crate::catalog::level::{LevelScale, SkillLevel};
use crate::catalog::skill::{Skill, SkillCategory};
use crate::error::{Result, SkillMatchError};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use strsim::jaro_winkler;

/// Jaro-Winkler similarity needed for a fuzzy skill search hit.
const FUZZY_THRESHOLD: f64 = 0.8;
const RELATED_SIMILARITY: f64 = 0.8;
const SAME_CATEGORY_SIMILARITY: f64 = 0.6;
const DEFAULT_CATEGORY_WEIGHT: f64 = 1.0;

/// On-disk catalog shape, as supplied by the catalog collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub skill_categories: BTreeMap<String, CategoryData>,
    #[serde(default)]
    pub skill_weights: BTreeMap<String, f64>,
    #[serde(default)]
    pub level_values: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryData {
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub skills: BTreeMap<String, SkillData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub related_skills: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub levels: Vec<String>,
}

/// Immutable skill reference data, loaded once and shared by the scoring engine.
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    skills: Vec<Skill>,
    by_id: HashMap<String, usize>,
    /// Lowercased names, ids and aliases.
    by_form: HashMap<String, usize>,
    categories: Vec<SkillCategory>,
    levels: LevelScale,
    detector: SkillDetector,
}

impl SkillCatalog {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content)?;
        info!(
            "Loaded skill catalog from {} ({} skills, {} categories)",
            path.display(),
            catalog.len(),
            catalog.categories.len()
        );
        Ok(catalog)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let data: CatalogData = serde_json::from_str(content)?;
        Self::from_data(data)
    }

    pub fn from_data(data: CatalogData) -> Result<Self> {
        let levels = if data.level_values.is_empty() {
            LevelScale::default()
        } else {
            LevelScale::new(data.level_values.iter().map(|(name, rank)| (name.as_str(), *rank)))?
        };

        for (category, weight) in &data.skill_weights {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(SkillMatchError::Catalog(format!(
                    "category `{}` has invalid weight {}",
                    category, weight
                )));
            }
        }

        let mut skills = Vec::new();
        let mut by_id = HashMap::new();
        let mut categories = Vec::new();

        for (category_id, category) in &data.skill_categories {
            categories.push(SkillCategory {
                category_id: category_id.clone(),
                name: category
                    .category_name
                    .clone()
                    .unwrap_or_else(|| category_id.clone()),
                weight: data
                    .skill_weights
                    .get(category_id)
                    .copied()
                    .unwrap_or(DEFAULT_CATEGORY_WEIGHT),
            });

            for (skill_id, skill) in &category.skills {
                if skill_id.trim().is_empty() {
                    return Err(SkillMatchError::Catalog(format!(
                        "category `{}` contains a skill with an empty id",
                        category_id
                    )));
                }
                if let Some(&existing) = by_id.get(skill_id) {
                    let existing: &Skill = &skills[existing];
                    return Err(SkillMatchError::Catalog(format!(
                        "skill `{}` is defined in both `{}` and `{}`",
                        skill_id, existing.category, category_id
                    )));
                }

                by_id.insert(skill_id.clone(), skills.len());
                skills.push(Skill {
                    skill_id: skill_id.clone(),
                    name: skill.name.clone().unwrap_or_else(|| skill_id.clone()),
                    category: category_id.clone(),
                    aliases: skill.aliases.clone(),
                    related_skills: skill.related_skills.clone(),
                    description: skill.description.clone(),
                    levels: skill.levels.iter().map(|l| SkillLevel::new(l)).collect(),
                });
            }
        }

        // Dangling references are reference-data gaps, not fatal.
        for idx in 0..skills.len() {
            let skill_id = skills[idx].skill_id.clone();
            skills[idx].related_skills.retain(|related| {
                let known = by_id.contains_key(related) && *related != skill_id;
                if !known {
                    warn!("Dropping related skill `{}` of `{}`: not in catalog", related, skill_id);
                }
                known
            });
        }

        let mut by_form: HashMap<String, usize> = HashMap::new();
        for (idx, skill) in skills.iter().enumerate() {
            for form in skill.surface_forms() {
                let key = form.trim().to_lowercase();
                match by_form.get(&key) {
                    Some(&owner) if owner != idx => warn!(
                        "Surface form `{}` of `{}` already names `{}`",
                        key, skill.skill_id, skills[owner].skill_id
                    ),
                    Some(_) => {}
                    None => {
                        by_form.insert(key, idx);
                    }
                }
            }
        }

        let detector = SkillDetector::build(&skills)?;

        Ok(Self {
            skills,
            by_id,
            by_form,
            categories,
            levels,
            detector,
        })
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Skills in catalog order (category id, then skill id).
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    pub fn levels(&self) -> &LevelScale {
        &self.levels
    }

    pub fn get(&self, skill_id: &str) -> Option<&Skill> {
        self.by_id.get(skill_id).map(|&idx| &self.skills[idx])
    }

    pub fn contains(&self, skill_id: &str) -> bool {
        self.by_id.contains_key(skill_id)
    }

    /// Look a skill up by id, display name or alias, case-insensitively.
    pub fn resolve(&self, name_or_alias: &str) -> Option<&Skill> {
        if let Some(skill) = self.get(name_or_alias) {
            return Some(skill);
        }
        self.by_form
            .get(&name_or_alias.trim().to_lowercase())
            .map(|&idx| &self.skills[idx])
    }

    pub fn rank(&self, level: &SkillLevel) -> u32 {
        self.levels.rank(level)
    }

    pub fn category_name<'a>(&'a self, category_id: &'a str) -> &'a str {
        self.categories
            .iter()
            .find(|c| c.category_id == category_id)
            .map(|c| c.name.as_str())
            .unwrap_or(category_id)
    }

    pub fn category_weight(&self, category_id: &str) -> f64 {
        self.categories
            .iter()
            .find(|c| c.category_id == category_id)
            .map(|c| c.weight)
            .unwrap_or(DEFAULT_CATEGORY_WEIGHT)
    }

    pub fn related_skills(&self, skill_id: &str) -> &[String] {
        self.get(skill_id)
            .map(|s| s.related_skills.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `level` is a valid assessment level for `skill_id`.
    pub fn validate_skill_level(&self, skill_id: &str, level: &SkillLevel) -> bool {
        match self.get(skill_id) {
            Some(skill) if !skill.levels.is_empty() => skill.levels.contains(level),
            Some(_) => self.levels.contains(level),
            None => false,
        }
    }

    /// Substring search on id, name and description, topped up with fuzzy name matches.
    pub fn search_skills(&self, query: &str, limit: usize) -> Vec<&Skill> {
        let query = query.trim().to_lowercase();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut results: Vec<&Skill> = self
            .skills
            .iter()
            .filter(|skill| {
                skill.skill_id.to_lowercase().contains(&query)
                    || skill.name.to_lowercase().contains(&query)
                    || skill
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&query))
            })
            .take(limit)
            .collect();

        if results.len() < limit {
            let mut fuzzy: Vec<(&Skill, f64)> = self
                .skills
                .iter()
                .filter(|skill| !results.iter().any(|r| r.skill_id == skill.skill_id))
                .map(|skill| (skill, jaro_winkler(&query, &skill.name.to_lowercase())))
                .filter(|(_, similarity)| *similarity >= FUZZY_THRESHOLD)
                .collect();
            fuzzy.sort_by(|a, b| b.1.total_cmp(&a.1));
            results.extend(fuzzy.into_iter().map(|(skill, _)| skill).take(limit - results.len()));
        }

        results
    }

    /// Skills close to `skill_id`: declared relations first, then category peers.
    pub fn similar_skills(&self, skill_id: &str, limit: usize) -> Vec<(&Skill, f64)> {
        let Some(skill) = self.get(skill_id) else {
            return Vec::new();
        };

        let mut similar: Vec<(&Skill, f64)> = skill
            .related_skills
            .iter()
            .filter_map(|id| self.get(id))
            .map(|related| (related, RELATED_SIMILARITY))
            .collect();

        similar.extend(
            self.skills
                .iter()
                .filter(|other| {
                    other.category == skill.category
                        && other.skill_id != skill.skill_id
                        && !skill.related_skills.contains(&other.skill_id)
                })
                .map(|peer| (peer, SAME_CATEGORY_SIMILARITY)),
        );

        similar.truncate(limit);
        similar
    }

    /// Catalog skills mentioned anywhere in `text`, in order of first mention.
    pub fn detect_skills(&self, text: &str) -> Vec<&Skill> {
        self.detector
            .detect(text)
            .into_iter()
            .map(|idx| &self.skills[idx])
            .collect()
    }
}
