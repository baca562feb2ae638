//! Output formatters: console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::matching::{MatchResult, ScoreBand};
use crate::output::report::{MatchReport, RankingReport, SearchReport};
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_match(&self, report: &MatchReport) -> Result<String>;
    fn format_ranking(&self, report: &RankingReport) -> Result<String>;
    fn format_search(&self, report: &SearchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Coloured terminal output
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Dispatches to the formatter for the requested format.
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn percent(score: f64) -> u32 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u32
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };
        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_band_badge(&self, band: ScoreBand) -> String {
        let color = match band {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::Good => Color::Yellow,
            ScoreBand::Challenging => Color::BrightYellow,
            ScoreBand::Stretch => Color::Red,
        };
        let label = band.label().to_uppercase();

        if self.use_colors {
            format!("[{}]", label.color(color).bold())
        } else {
            format!("[{}]", label)
        }
    }

    fn format_result_body(&self, result: &MatchResult, output: &mut String) {
        output.push_str(&format!(
            "Overall Score: {}% {}\n",
            percent(result.overall_score),
            self.format_band_badge(result.band())
        ));
        output.push_str(&format!(
            "  Skills: {}% | Experience: {}% | Preferences: {}%\n",
            percent(result.skill_score),
            percent(result.experience_score),
            percent(result.preference_score)
        ));

        if !result.strengths.is_empty() {
            output.push_str(&self.format_header("Strengths", 3));
            for strength in &result.strengths {
                output.push_str(&format!("  • {}\n", self.colorize(strength, Color::Green)));
            }
        }

        if !result.skill_gaps.is_empty() {
            output.push_str(&self.format_header("Skill Gaps", 3));
            for gap in &result.skill_gaps {
                let held = gap
                    .held_level
                    .as_ref()
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "none".to_string());
                let marker = if gap.mandatory { " (mandatory)" } else { "" };
                output.push_str(&format!(
                    "  • {}: {} → {} [importance {:.2}]{}\n",
                    self.colorize(&gap.name, Color::Yellow),
                    held,
                    gap.required_level,
                    gap.importance,
                    marker
                ));
            }
        }

        output.push_str(&format!("\n{}\n", result.explanation));
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_match(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();
        let result = &report.result;
        let title = if result.opportunity_title.is_empty() {
            result.opportunity_id.clone()
        } else {
            format!("{} ({})", result.opportunity_title, result.opportunity_id)
        };

        output.push_str(&self.format_header(&format!("MATCH: {} → {}", report.profile_id, title), 1));
        self.format_result_body(result, &mut output);

        if !report.recommendations.is_empty() {
            output.push_str(&self.format_header("Recommendations", 2));
            for (i, recommendation) in report.recommendations.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, recommendation));
            }
        }

        Ok(output)
    }

    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.format_header(
            &format!("RANKING for {} ({} of {} shown)", report.profile_id, report.results.len(), report.considered),
            1,
        ));

        if report.results.is_empty() {
            output.push_str(&format!(
                "No opportunities scored at or above {}%\n",
                percent(report.min_score)
            ));
            return Ok(output);
        }

        for (i, result) in report.results.iter().enumerate() {
            let name = if result.opportunity_title.is_empty() {
                result.opportunity_id.as_str()
            } else {
                result.opportunity_title.as_str()
            };
            output.push_str(&format!(
                "{:>3}. {:>3}% {} {} ({} gaps)\n",
                i + 1,
                percent(result.overall_score),
                self.format_band_badge(result.band()),
                self.colorize(name, Color::Cyan),
                result.skill_gaps.len()
            ));
            if self.detailed {
                self.format_result_body(result, &mut output);
            }
        }

        Ok(output)
    }

    fn format_search(&self, report: &SearchReport) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.format_header(&format!("SEARCH in {}", report.partition), 1));

        if report.hits.is_empty() {
            output.push_str("No similar documents found\n");
            return Ok(output);
        }

        for (i, hit) in report.hits.iter().enumerate() {
            let title = hit.metadata.title.as_deref().unwrap_or(&hit.id);
            output.push_str(&format!(
                "{:>3}. {:.3} {}",
                i + 1,
                hit.score,
                self.colorize(title, Color::Cyan)
            ));
            if let Some(company) = &hit.metadata.company {
                output.push_str(&format!(" @ {}", company));
            }
            output.push('\n');
            if !hit.shared_terms.is_empty() {
                output.push_str(&format!("     shared: {}\n", hit.shared_terms.join(", ")));
            }
            if self.detailed {
                output.push_str(&format!("     {}\n", hit.preview));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_match(&self, report: &MatchReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_search(&self, report: &SearchReport) -> Result<String> {
        self.to_json(report)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_band_badge(band: ScoreBand) -> &'static str {
        match band {
            ScoreBand::Excellent => "🟢 Excellent",
            ScoreBand::Good => "🟡 Good",
            ScoreBand::Challenging => "🟠 Challenging",
            ScoreBand::Stretch => "🔴 Stretch",
        }
    }

    fn metadata_line(&self, generated_at: &chrono::DateTime<chrono::Utc>) -> String {
        if self.include_metadata {
            format!("**Generated:** {}\n\n", generated_at.format("%Y-%m-%d %H:%M:%S UTC"))
        } else {
            String::new()
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_match(&self, report: &MatchReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&format!(
            "# Match: {} → {}\n\n",
            report.profile_id, result.opportunity_id
        ));
        output.push_str(&self.metadata_line(&report.metadata.generated_at));
        output.push_str(&format!(
            "**Overall Score:** {}% {}\n\n",
            percent(result.overall_score),
            Self::markdown_band_badge(result.band())
        ));

        output.push_str("| Component | Score |\n");
        output.push_str("|-----------|-------|\n");
        output.push_str(&format!("| Skills | {}% |\n", percent(result.skill_score)));
        output.push_str(&format!("| Experience | {}% |\n", percent(result.experience_score)));
        output.push_str(&format!("| Preferences | {}% |\n\n", percent(result.preference_score)));

        if !result.strengths.is_empty() {
            output.push_str("## Strengths\n\n");
            for strength in &result.strengths {
                output.push_str(&format!("- {}\n", strength));
            }
            output.push('\n');
        }

        if !result.skill_gaps.is_empty() {
            output.push_str("## Skill Gaps\n\n");
            output.push_str("| Skill | Held | Required | Importance | Mandatory |\n");
            output.push_str("|-------|------|----------|------------|-----------|\n");
            for gap in &result.skill_gaps {
                output.push_str(&format!(
                    "| {} | {} | {} | {:.2} | {} |\n",
                    gap.name,
                    gap.held_level.as_ref().map(|l| l.as_str()).unwrap_or("-"),
                    gap.required_level,
                    gap.importance,
                    if gap.mandatory { "yes" } else { "no" }
                ));
            }
            output.push('\n');
        }

        output.push_str(&format!("## Explanation\n\n{}\n\n", result.explanation));

        if !report.recommendations.is_empty() {
            output.push_str("## Recommendations\n\n");
            for recommendation in &report.recommendations {
                output.push_str(&format!("- {}\n", recommendation));
            }
        }

        Ok(output)
    }

    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();
        output.push_str(&format!("# Ranking for {}\n\n", report.profile_id));
        output.push_str(&self.metadata_line(&report.metadata.generated_at));

        output.push_str("| # | Opportunity | Score | Band | Gaps |\n");
        output.push_str("|---|-------------|-------|------|------|\n");
        for (i, result) in report.results.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {}% | {} | {} |\n",
                i + 1,
                result.opportunity_id,
                percent(result.overall_score),
                Self::markdown_band_badge(result.band()),
                result.skill_gaps.len()
            ));
        }

        Ok(output)
    }

    fn format_search(&self, report: &SearchReport) -> Result<String> {
        let mut output = String::new();
        output.push_str(&format!("# Similar {}\n\n", report.partition));
        output.push_str(&self.metadata_line(&report.metadata.generated_at));

        output.push_str("| # | Document | Similarity | Shared terms |\n");
        output.push_str("|---|----------|------------|--------------|\n");
        for (i, hit) in report.hits.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {:.3} | {} |\n",
                i + 1,
                hit.metadata.title.as_deref().unwrap_or(&hit.id),
                hit.score,
                hit.shared_terms.join(", ")
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn format_match(&self, report: &MatchReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_match(report)
    }

    pub fn format_ranking(&self, report: &RankingReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_ranking(report)
    }

    pub fn format_search(&self, report: &SearchReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_search(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(true, false)
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}
