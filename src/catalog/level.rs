//! Proficiency level names and their ordinal ranks

use crate::error::{Result, SkillMatchError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A proficiency level name, normalised to trimmed lowercase.
///
/// Level names are data, not a closed enum: the catalog decides which names
/// exist and what rank each one carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SkillLevel(String);

impl SkillLevel {
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SkillLevel {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl From<&str> for SkillLevel {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<SkillLevel> for String {
    fn from(level: SkillLevel) -> Self {
        level.0
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordinal mapping from level name to rank.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelScale {
    /// Sorted by rank ascending, then by name.
    ranks: Vec<(SkillLevel, u32)>,
}

impl LevelScale {
    pub fn new<I, L>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (L, u32)>,
        L: Into<SkillLevel>,
    {
        let mut ranks: Vec<(SkillLevel, u32)> = Vec::new();
        for (level, rank) in entries {
            let level: SkillLevel = level.into();
            if rank == 0 {
                return Err(SkillMatchError::Catalog(format!(
                    "level `{}` has rank 0; ranks start at 1",
                    level
                )));
            }
            match ranks.iter_mut().find(|(existing, _)| *existing == level) {
                Some(entry) => entry.1 = rank,
                None => ranks.push((level, rank)),
            }
        }

        if ranks.is_empty() {
            return Err(SkillMatchError::Catalog("level scale is empty".to_string()));
        }

        ranks.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
        Ok(Self { ranks })
    }

    /// Rank of `level`. Unknown names fail closed to the lowest rank.
    pub fn rank(&self, level: &SkillLevel) -> u32 {
        match self.try_rank(level) {
            Some(rank) => rank,
            None => {
                debug!("Unknown skill level `{}`, using lowest rank", level);
                self.min_rank()
            }
        }
    }

    pub fn try_rank(&self, level: &SkillLevel) -> Option<u32> {
        self.ranks
            .iter()
            .find(|(name, _)| name == level)
            .map(|(_, rank)| *rank)
    }

    pub fn contains(&self, level: &SkillLevel) -> bool {
        self.try_rank(level).is_some()
    }

    pub fn min_rank(&self) -> u32 {
        self.ranks.first().map(|(_, rank)| *rank).unwrap_or(1)
    }

    pub fn max_rank(&self) -> u32 {
        self.ranks.last().map(|(_, rank)| *rank).unwrap_or(1)
    }

    pub fn levels(&self) -> impl Iterator<Item = (&SkillLevel, u32)> {
        self.ranks.iter().map(|(level, rank)| (level, *rank))
    }
}

impl Default for LevelScale {
    /// Seven names on a four-step scale; `expert` is the top rank.
    fn default() -> Self {
        let ranks = [
            ("beginner", 1),
            ("developing", 1),
            ("competent", 2),
            ("intermediate", 2),
            ("advanced", 3),
            ("proficient", 3),
            ("expert", 4),
        ];
        let mut ranks: Vec<(SkillLevel, u32)> = ranks
            .iter()
            .map(|(name, rank)| (SkillLevel::new(name), *rank))
            .collect();
        ranks.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
        Self { ranks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names_are_normalised() {
        assert_eq!(SkillLevel::new("  Advanced "), SkillLevel::new("advanced"));

        let parsed: SkillLevel = serde_json::from_str("\"EXPERT\"").unwrap();
        assert_eq!(parsed.as_str(), "expert");
    }

    #[test]
    fn test_default_scale_ordering() {
        let scale = LevelScale::default();
        let rank = |name: &str| scale.rank(&SkillLevel::new(name));

        assert!(rank("beginner") <= rank("developing"));
        assert!(rank("developing") <= rank("competent"));
        assert!(rank("competent") <= rank("intermediate"));
        assert!(rank("intermediate") < rank("advanced"));
        assert!(rank("advanced") <= rank("proficient"));
        assert!(rank("proficient") < rank("expert"));
        assert_eq!(scale.max_rank(), 4);
    }

    #[test]
    fn test_unknown_level_fails_closed() {
        let scale = LevelScale::new([("novice", 2), ("guru", 5)]).unwrap();

        assert_eq!(scale.rank(&SkillLevel::new("wizard")), 2);
        assert_eq!(scale.try_rank(&SkillLevel::new("wizard")), None);
    }

    #[test]
    fn test_zero_rank_rejected() {
        assert!(LevelScale::new([("none", 0)]).is_err());
        assert!(LevelScale::new(Vec::<(&str, u32)>::new()).is_err());
    }
}
