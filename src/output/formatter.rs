//! Output formatters for screening reports

use crate::config::OutputFormat;
use crate::error::{Result, ScreenerError};
use crate::output::report::{RankedCandidate, ScreeningReport};
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

/// Trait for formatting screening reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for structured output
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for shareable reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

const NONE_DETECTED: &str = "None detected.";

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

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".blue().bold(), title.blue().bold())
        } else {
            format!("\n█ {}\n", title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let (badge, color) = match score {
            s if s >= 80.0 => ("STRONG", Color::Green),
            s if s >= 60.0 => ("GOOD", Color::BrightGreen),
            s if s >= 40.0 => ("FAIR", Color::Yellow),
            s if s >= 20.0 => ("WEAK", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_keywords(&self, label: &str, keywords: &[String], color: Color) -> String {
        let mut output = format!("   {}\n", label);
        if keywords.is_empty() {
            output.push_str(&format!("     {}\n", NONE_DETECTED));
        } else {
            for keyword in keywords {
                output.push_str(&format!("     • {}\n", self.colorize(keyword, color)));
            }
        }
        output
    }

    fn format_candidate(&self, candidate: &RankedCandidate) -> String {
        let result = &candidate.result;
        let mut output = format!(
            "{}. {} — Score: {:.1} {}\n",
            candidate.rank,
            self.colorize(&result.file_name, Color::Cyan),
            result.display_score(),
            self.format_score_badge(result.score)
        );

        if self.detailed {
            output.push_str(&format!("   Summary: {}\n", result.summary));
            output.push_str(&self.format_keywords(
                "Strengths (keywords matched):",
                &result.strengths,
                Color::Green,
            ));
            output.push_str(&self.format_keywords(
                "Gaps (keywords missing):",
                &result.gaps,
                Color::Yellow,
            ));
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RANKED RESULTS"));
        output.push_str(&format!(
            "Generated: {} | Candidates: {} | Processing time: {}ms\n\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.candidates_screened,
            report.metadata.processing_time_ms
        ));

        if report.results.is_empty() {
            output.push_str(&self.colorize("No results generated.\n", Color::Yellow));
            return Ok(output);
        }

        for candidate in &report.results {
            output.push_str(&self.format_candidate(candidate));
            if self.detailed {
                output.push('\n');
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
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_keywords(keywords: &[String]) -> String {
        if keywords.is_empty() {
            format!("{}\n", NONE_DETECTED)
        } else {
            keywords.iter().map(|k| format!("- `{}`\n", k)).collect()
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# 📊 Resume Screening Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Job:** `{}` | **Candidates:** {}\n\n",
                report.metadata.job_source, report.metadata.candidates_screened
            ));
        }

        output.push_str("## Ranking\n\n");
        output.push_str("| Rank | Resume | Score |\n");
        output.push_str("|------|--------|-------|\n");
        for candidate in &report.results {
            output.push_str(&format!(
                "| {} | {} | {:.1} |\n",
                candidate.rank,
                candidate.result.file_name,
                candidate.result.display_score()
            ));
        }
        output.push('\n');

        for candidate in &report.results {
            let result = &candidate.result;
            output.push_str(&format!("## {}. {}\n\n", candidate.rank, result.file_name));
            output.push_str(&format!("**Summary:** {}\n\n", result.summary));
            output.push_str("**Strengths (keywords matched):**\n\n");
            output.push_str(&Self::markdown_keywords(&result.strengths));
            output.push_str("\n**Gaps (keywords missing):**\n\n");
            output.push_str(&Self::markdown_keywords(&result.gaps));
            output.push('\n');
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &ScreeningReport, format: &OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        };
        formatter.format_report(report)
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content).map_err(|e| {
        ScreenerError::OutputFormatting(format!(
            "Failed to write report to {}: {}",
            file_path.display(),
            e
        ))
    })
}

/// A directory gets a timestamped file named after the format; any other path is used as given
pub fn resolve_save_path(path: &Path, format: &OutputFormat) -> PathBuf {
    if path.is_dir() {
        path.join(suggest_filename(format, true))
    } else {
        path.to_path_buf()
    }
}

pub fn suggest_filename(format: &OutputFormat, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("screening{}.txt", timestamp_suffix),
        OutputFormat::Json => format!("screening{}.json", timestamp_suffix),
        OutputFormat::Markdown => format!("screening{}.md", timestamp_suffix),
    }
}
