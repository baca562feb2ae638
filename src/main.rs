//! Skill matcher: explainable skill matching and document similarity search

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use serde::de::DeserializeOwned;
use skill_matcher::catalog::SkillCatalog;
use skill_matcher::cli::{Cli, Commands, ConfigAction, IndexAction, SkillsAction};
use skill_matcher::config::{Config, OutputFormat};
use skill_matcher::matching::{BatchRanker, Opportunity, Profile, RankOptions, ScoringEngine};
use skill_matcher::output::{
    save_report_to_file, MatchReport, RankingReport, ReportGenerator, ReportMetadata, SearchReport,
};
use skill_matcher::retrieval::{IndexSnapshot, JobPosting, Partition, SimilarityIndex};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            process::exit(1);
        }
    };

    let format = cli.format.unwrap_or(config.output.format);
    if let Err(e) = run_command(cli.command, config, format, cli.save) {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("reading config {}", path.display())),
        None => Config::load().context("reading user config"),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {} from {}", what, path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {} in {}", what, path.display()))
}

fn load_catalog(path: &Path) -> Result<Arc<SkillCatalog>> {
    let catalog = SkillCatalog::from_path(path)
        .with_context(|| format!("loading skill catalog {}", path.display()))?;
    Ok(Arc::new(catalog))
}

fn emit(content: &str, save: Option<&PathBuf>) -> Result<()> {
    match save {
        Some(path) => {
            save_report_to_file(content, path)
                .with_context(|| format!("saving output to {}", path.display()))?;
            info!("Saved output to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn open_index(config: &Config, corpus: &Path) -> Result<SimilarityIndex> {
    if corpus.exists() {
        let snapshot = IndexSnapshot::from_path(corpus)
            .with_context(|| format!("reading index snapshot {}", corpus.display()))?;
        SimilarityIndex::restore(config.index.clone(), snapshot)
            .with_context(|| format!("rebuilding index from {}", corpus.display()))
    } else {
        info!("No snapshot at {}, starting an empty index", corpus.display());
        Ok(SimilarityIndex::new(config.index.clone()))
    }
}

fn run_command(command: Commands, config: Config, format: OutputFormat, save: Option<PathBuf>) -> Result<()> {
    let use_colors = config.output.color_output && save.is_none();

    match command {
        Commands::Score {
            catalog,
            profile,
            opportunity,
        } => {
            let engine = ScoringEngine::new(load_catalog(&catalog)?, config.scoring.clone())?;
            let profile: Profile = read_json(&profile, "profile")?;
            let opportunity: Opportunity = read_json(&opportunity, "opportunity")?;

            let result = engine.score(&profile, &opportunity)?;
            let report = MatchReport::new(profile.id.clone(), result);
            let generator = ReportGenerator::new(use_colors, config.output.detailed);
            emit(&generator.format_match(&report, format)?, save.as_ref())?;
        }

        Commands::Rank {
            catalog,
            profile,
            opportunities,
            min_score,
            top_n,
            include_inactive,
            detailed,
        } => {
            let engine = ScoringEngine::new(load_catalog(&catalog)?, config.scoring.clone())?;
            let profile: Profile = read_json(&profile, "profile")?;
            let opportunities: Vec<Opportunity> = read_json(&opportunities, "opportunities")?;

            let options = RankOptions {
                min_score,
                top_n,
                include_inactive,
                ..Default::default()
            };
            let results = BatchRanker::new(&engine).rank_with(&profile, &opportunities, &options)?;

            let report = RankingReport {
                metadata: ReportMetadata::now(),
                profile_id: profile.id.clone(),
                min_score,
                considered: opportunities.len(),
                results,
            };
            let generator = ReportGenerator::new(use_colors, detailed || config.output.detailed);
            emit(&generator.format_ranking(&report, format)?, save.as_ref())?;
        }

        Commands::Search {
            corpus,
            partition,
            query,
            top_n,
            detailed,
        } => {
            let index = open_index(&config, &corpus)?;
            let query_text = std::fs::read_to_string(&query)
                .with_context(|| format!("reading query {}", query.display()))?;
            let top_n = top_n.unwrap_or(config.index.default_top_n);

            let hits = index.search(partition, &query_text, top_n);
            let report = SearchReport {
                metadata: ReportMetadata::now(),
                partition,
                query_preview: query_text.chars().take(config.index.preview_chars).collect(),
                hits,
            };
            let generator = ReportGenerator::new(use_colors, detailed || config.output.detailed);
            emit(&generator.format_search(&report, format)?, save.as_ref())?;
        }

        Commands::Index { corpus, action } => {
            let mut index = open_index(&config, &corpus)?;

            match action {
                IndexAction::Resume { id, file } => {
                    let text = std::fs::read_to_string(&file)
                        .with_context(|| format!("reading resume {}", file.display()))?;
                    let metadata = skill_matcher::retrieval::DocumentMetadata {
                        source: Some(file.display().to_string()),
                        ..Default::default()
                    };
                    index.add_document(Partition::Resumes, &id, &text, metadata)?;
                }
                IndexAction::Jobs { file } => {
                    let postings: Vec<JobPosting> = read_json(&file, "job postings")?;
                    let documents = postings
                        .iter()
                        .map(|p| (p.id.clone(), p.to_document_text(), p.metadata()))
                        .collect();
                    index.add_documents(Partition::Jobs, documents)?;
                }
                IndexAction::Remove { partition, id } => {
                    if !index.remove_document(partition, &id)? {
                        println!("No {} document `{}` in {}", partition, id, corpus.display());
                        return Ok(());
                    }
                }
            }

            index
                .snapshot()
                .save_to(&corpus)
                .with_context(|| format!("writing index snapshot {}", corpus.display()))?;
            println!(
                "Index saved: {} resumes, {} jobs, {} terms",
                index.len(Partition::Resumes),
                index.len(Partition::Jobs),
                index.vocabulary_size()
            );
        }

        Commands::Skills { catalog, action } => {
            let catalog = load_catalog(&catalog)?;

            match action {
                SkillsAction::Search { query, limit } => {
                    let skills = catalog.search_skills(&query, limit);
                    if skills.is_empty() {
                        println!("No skills match `{}`", query);
                    }
                    for skill in skills {
                        println!(
                            "{:<20} {:<24} {}",
                            skill.skill_id,
                            skill.name,
                            catalog.category_name(&skill.category)
                        );
                    }
                }
                SkillsAction::Similar { skill_id, limit } => {
                    if !catalog.contains(&skill_id) {
                        anyhow::bail!("unknown skill `{}`", skill_id);
                    }
                    for (skill, similarity) in catalog.similar_skills(&skill_id, limit) {
                        println!("{:<20} {:<24} {:.1}", skill.skill_id, skill.name, similarity);
                    }
                }
                SkillsAction::Detect { file } => {
                    let text = std::fs::read_to_string(&file)
                        .with_context(|| format!("reading {}", file.display()))?;
                    for skill in catalog.detect_skills(&text) {
                        println!("{:<20} {}", skill.skill_id, skill.name);
                    }
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("{}", toml::to_string_pretty(&config).context("serializing config")?);
            }
            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save()?;
                println!("✅ Configuration reset successfully!");
            }
            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }
        },
    }

    Ok(())
}
