//! Skill reference data: definitions, categories and level ranks

pub mod detector;
pub mod level;
pub mod skill;
pub mod store;

pub use level::{LevelScale, SkillLevel};
pub use skill::{Skill, SkillCategory};
pub use store::{CatalogData, SkillCatalog};
