//! Skill mention detection in free text

use crate::catalog::skill::Skill;
use crate::error::{Result, SkillMatchError};
use aho_corasick::{AhoCorasick, MatchKind};
use log::debug;
use std::collections::HashSet;

/// Shortest surface form worth scanning for; single letters match everywhere.
const MIN_PATTERN_LEN: usize = 2;

/// Case-insensitive multi-pattern scanner over every skill name and alias.
#[derive(Debug, Clone)]
pub struct SkillDetector {
    matcher: Option<AhoCorasick>,
    /// Index into the catalog's skill list for each pattern.
    owners: Vec<usize>,
}

impl SkillDetector {
    pub fn build(skills: &[Skill]) -> Result<Self> {
        let mut patterns: Vec<String> = Vec::new();
        let mut owners = Vec::new();
        let mut seen = HashSet::new();

        for (idx, skill) in skills.iter().enumerate() {
            for form in skill.surface_forms() {
                let form = form.trim().to_lowercase();
                if form.chars().count() < MIN_PATTERN_LEN {
                    debug!("Skipping short surface form `{}` for {}", form, skill.skill_id);
                    continue;
                }
                if seen.insert(form.clone()) {
                    patterns.push(form);
                    owners.push(idx);
                }
            }
        }

        if patterns.is_empty() {
            return Ok(Self { matcher: None, owners });
        }

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| SkillMatchError::Catalog(format!("Failed to build skill detector: {}", e)))?;

        Ok(Self {
            matcher: Some(matcher),
            owners,
        })
    }

    /// Catalog indices of skills mentioned in `text`, in order of first mention.
    pub fn detect(&self, text: &str) -> Vec<usize> {
        let Some(matcher) = &self.matcher else {
            return Vec::new();
        };

        let mut found = Vec::new();
        let mut seen = HashSet::new();

        for mat in matcher.find_iter(text) {
            if !is_word_bounded(text, mat.start(), mat.end()) {
                continue;
            }
            let owner = self.owners[mat.pattern().as_usize()];
            if seen.insert(owner) {
                found.push(owner);
            }
        }

        found
    }
}

fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text.get(..start).and_then(|s| s.chars().next_back());
    let after = text.get(end..).and_then(|s| s.chars().next());
    let is_word = |c: char| c.is_alphanumeric() || c == '_';

    !before.is_some_and(is_word) && !after.is_some_and(is_word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(id: &str, name: &str, aliases: &[&str]) -> Skill {
        Skill {
            skill_id: id.to_string(),
            name: name.to_string(),
            category: "programming".to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            related_skills: Vec::new(),
            description: None,
            levels: Vec::new(),
        }
    }

    #[test]
    fn test_detects_names_and_aliases() {
        let skills = vec![
            skill("python", "Python", &["py"]),
            skill("javascript", "JavaScript", &["js", "ecmascript"]),
        ];
        let detector = SkillDetector::build(&skills).unwrap();

        let found = detector.detect("Wrote ECMAScript and Python services; some JS too.");
        assert_eq!(found, vec![1, 0]);
    }

    #[test]
    fn test_requires_word_boundaries() {
        let skills = vec![skill("java", "Java", &[])];
        let detector = SkillDetector::build(&skills).unwrap();

        assert!(detector.detect("Experienced with JavaScript").is_empty());
        assert_eq!(detector.detect("Java, Kotlin"), vec![0]);
    }

    #[test]
    fn test_symbol_names_match() {
        let skills = vec![skill("cpp", "C++", &[])];
        let detector = SkillDetector::build(&skills).unwrap();

        assert_eq!(detector.detect("Modern C++ and Rust"), vec![0]);
    }

    #[test]
    fn test_empty_catalog_detects_nothing() {
        let detector = SkillDetector::build(&[]).unwrap();
        assert!(detector.detect("python").is_empty());
    }
}
