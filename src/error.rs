//! Error handling for the skill matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillMatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Structurally invalid caller input. Continuing would produce meaningless scores.
    #[error("Invalid input: field `{field}` {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Skill catalog error: {0}")]
    Catalog(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Document `{0}` has no indexable text")]
    EmptyDocument(String),

    #[error("Vectorizer has not been fitted")]
    NotFitted,

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl SkillMatchError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SkillMatchError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SkillMatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_names_field() {
        let err = SkillMatchError::invalid("required_skills[2].importance", "must be within [0, 1]");
        let message = err.to_string();

        assert!(message.contains("required_skills[2].importance"));
        assert!(message.contains("must be within [0, 1]"));
    }
}
