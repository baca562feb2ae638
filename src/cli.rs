//! CLI interface for the skill matcher

use crate::config::OutputFormat;
use crate::retrieval::Partition;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skill-matcher")]
#[command(about = "Explainable skill matching and resume/job similarity search")]
#[command(long_about = "Score candidate profiles against opportunities with a deterministic multi-factor engine, rank opportunity collections, and search resumes or job postings by TF-IDF similarity")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: console, json, markdown
    #[arg(short, long, global = true, value_parser = parse_output_format)]
    pub format: Option<OutputFormat>,

    /// Save output to file
    #[arg(short, long, global = true)]
    pub save: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score one profile against one opportunity
    Score {
        /// Skill catalog (JSON)
        #[arg(long)]
        catalog: PathBuf,

        /// Profile (JSON)
        #[arg(short, long)]
        profile: PathBuf,

        /// Opportunity (JSON)
        #[arg(short, long)]
        opportunity: PathBuf,
    },

    /// Rank a collection of opportunities for one profile
    Rank {
        /// Skill catalog (JSON)
        #[arg(long)]
        catalog: PathBuf,

        /// Profile (JSON)
        #[arg(short, long)]
        profile: PathBuf,

        /// Opportunities (JSON array)
        #[arg(short, long)]
        opportunities: PathBuf,

        /// Drop results below this overall score
        #[arg(long, default_value_t = 0.0)]
        min_score: f64,

        /// Keep only the best N results
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Include inactive opportunities
        #[arg(long)]
        include_inactive: bool,

        /// Show the full breakdown for every result
        #[arg(short, long)]
        detailed: bool,
    },

    /// Search an index snapshot for documents similar to a query file
    Search {
        /// Index snapshot (JSON)
        #[arg(long)]
        corpus: PathBuf,

        /// Partition to search: resumes or jobs
        #[arg(long, default_value = "jobs", value_parser = parse_partition)]
        partition: Partition,

        /// Plain-text query document
        #[arg(short, long)]
        query: PathBuf,

        /// Number of hits to return
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Show text previews
        #[arg(short, long)]
        detailed: bool,
    },

    /// Add documents to an index snapshot, creating it if missing
    Index {
        /// Index snapshot (JSON)
        #[arg(long)]
        corpus: PathBuf,

        #[command(subcommand)]
        action: IndexAction,
    },

    /// Query the skill catalog
    Skills {
        /// Skill catalog (JSON)
        #[arg(long)]
        catalog: PathBuf,

        #[command(subcommand)]
        action: SkillsAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum IndexAction {
    /// Add or replace a resume from a plain-text file
    Resume {
        /// Document id
        id: String,

        /// Plain-text resume
        file: PathBuf,
    },

    /// Add or replace job postings from a JSON array
    Jobs {
        /// Job postings (JSON array)
        file: PathBuf,
    },

    /// Remove a document
    Remove {
        #[arg(value_parser = parse_partition)]
        partition: Partition,

        id: String,
    },
}

#[derive(Subcommand)]
pub enum SkillsAction {
    /// Search skills by name or description
    Search {
        query: String,

        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// List skills similar to a skill
    Similar {
        skill_id: String,

        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },

    /// Detect catalog skills mentioned in a text file
    Detect {
        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

pub fn parse_partition(partition: &str) -> Result<Partition, String> {
    partition.parse::<Partition>().map_err(|e| e.to_string())
}
