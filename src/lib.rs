//! Skill matcher library

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod matching;
pub mod output;
pub mod retrieval;

pub use config::Config;
pub use error::{Result, SkillMatchError};
