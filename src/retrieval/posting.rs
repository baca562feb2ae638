//! Job postings as indexable documents

use crate::retrieval::index::DocumentMetadata;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: String,
}

impl JobPosting {
    /// Labelled lines for each non-empty field; empty when the posting has no text.
    pub fn to_document_text(&self) -> String {
        let mut parts = Vec::new();

        if !self.title.trim().is_empty() {
            parts.push(format!("Job Title: {}", self.title.trim()));
        }
        if !self.description.trim().is_empty() {
            parts.push(format!("Description: {}", self.description.trim()));
        }
        if !self.requirements.is_empty() {
            parts.push(format!("Requirements: {}", self.requirements.join(", ")));
        }
        if !self.skills.is_empty() {
            parts.push(format!("Skills: {}", self.skills.join(", ")));
        }

        parts.join("\n")
    }

    pub fn metadata(&self) -> DocumentMetadata {
        let non_empty = |s: &str| Some(s.trim().to_string()).filter(|s| !s.is_empty());
        DocumentMetadata {
            title: non_empty(&self.title),
            company: non_empty(&self.company),
            location: non_empty(&self.location),
            category: non_empty(&self.category),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_text_layout() {
        let posting = JobPosting {
            id: "j1".to_string(),
            title: "Python Developer".to_string(),
            description: "Build data services.".to_string(),
            requirements: vec!["3 years Python".to_string(), "SQL".to_string()],
            skills: vec!["python".to_string(), "flask".to_string()],
            ..Default::default()
        };

        assert_eq!(
            posting.to_document_text(),
            "Job Title: Python Developer\n\
             Description: Build data services.\n\
             Requirements: 3 years Python, SQL\n\
             Skills: python, flask"
        );
    }

    #[test]
    fn test_empty_posting_has_no_text() {
        let posting = JobPosting {
            id: "j1".to_string(),
            company: "Acme".to_string(),
            ..Default::default()
        };

        assert!(posting.to_document_text().is_empty());
        assert_eq!(posting.metadata().company.as_deref(), Some("Acme"));
        assert!(posting.metadata().title.is_none());
    }
}
