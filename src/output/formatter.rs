//! Console and JSON renderings of a match report

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{MatchLevel, MatchReport};
use colored::{Color, Colorize};

/// Trait for formatting match reports
pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
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

    fn format_score_badge(&self, level: MatchLevel) -> String {
        let (badge, color) = match level {
            MatchLevel::Excellent => ("EXCELLENT", Color::Green),
            MatchLevel::Good => ("GOOD", Color::Yellow),
            MatchLevel::Fair => ("FAIR", Color::BrightYellow),
            MatchLevel::Poor => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_keyword_list(&self, keywords: &[String], color: Color) -> String {
        if keywords.is_empty() {
            return "  (none)\n".to_string();
        }
        keywords
            .iter()
            .map(|keyword| format!("  • {}\n", self.colorize(keyword, color)))
            .collect()
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();
        let level = report.match_level();

        output.push_str(&self.format_header("RESUME MATCH REPORT", 1));
        if let Some(path) = &report.resume_path {
            output.push_str(&format!("Resume: {}\n", path));
        }
        output.push_str(&format!(
            "Generated: {}\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output.push_str(&self.format_header("Score", 2));
        output.push_str(&format!(
            "Match Score: {:.2}% {}\n",
            report.result.score,
            self.format_score_badge(level)
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(level.verdict(), Color::Cyan)));

        if report.resume_text_missing() {
            output.push_str(&self.colorize(
                "No text could be extracted from the resume; it may be scanned, encrypted, or corrupt.\n",
                Color::Red,
            ));
        }

        output.push_str(&self.format_header(
            &format!("Matched Keywords ({})", report.result.matched.len()),
            3,
        ));
        output.push_str(&self.format_keyword_list(&report.result.matched, Color::Green));

        output.push_str(&self.format_header(
            &format!("Missing Keywords ({})", report.result.missing.len()),
            3,
        ));
        output.push_str(&self.format_keyword_list(&report.result.missing, Color::Yellow));

        if self.detailed {
            output.push_str(&self.format_header("Extracted Keywords", 2));
            output.push_str(&format!(
                "{} (via {}):\n",
                self.colorize("Resume", Color::Cyan),
                report.resume_strategy
            ));
            output.push_str(&self.format_keyword_list(&report.resume_keywords, Color::White));
            output.push_str(&format!(
                "{} (via {}):\n",
                self.colorize("Job description", Color::Cyan),
                report.job_strategy
            ));
            output.push_str(&self.format_keyword_list(&report.job_keywords, Color::White));
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
    fn format_report(&self, report: &MatchReport) -> Result<String> {
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

/// Report generator that dispatches to the formatter for a format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
        }
    }

    pub fn generate_report(&self, report: &MatchReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::keywords::ExtractionStrategy;
    use crate::processing::scorer::MatchResult;
    use chrono::Utc;

    fn sample_report() -> MatchReport {
        MatchReport {
            resume_path: Some("cv.pdf".to_string()),
            resume_keywords: vec!["python".to_string(), "docker".to_string()],
            job_keywords: vec!["python".to_string(), "kubernetes".to_string()],
            result: MatchResult {
                score: 60.0,
                matched: vec!["python".to_string()],
                missing: vec!["kubernetes".to_string()],
            },
            resume_strategy: ExtractionStrategy::Model,
            job_strategy: ExtractionStrategy::Frequency,
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_console_output_without_colors() {
        let formatter = ConsoleFormatter::new(false, true);
        let output = formatter.format_report(&sample_report()).unwrap();

        assert!(output.contains("Match Score: 60.00% [GOOD]"));
        assert!(output.contains("Matched Keywords (1)"));
        assert!(output.contains("  • kubernetes"));
        assert!(output.contains("via frequency fallback"));
        assert!(!output.contains("No text could be extracted"));
    }

    #[test]
    fn test_console_flags_missing_resume_text() {
        let mut report = sample_report();
        report.resume_strategy = ExtractionStrategy::Empty;
        report.resume_keywords.clear();

        let output = ConsoleFormatter::new(false, false).format_report(&report).unwrap();
        assert!(output.contains("No text could be extracted"));
        assert!(!output.contains("Extracted Keywords"));
    }

    #[test]
    fn test_json_output_round_trips() {
        let report = sample_report();
        let json = ReportGenerator::with_options(false, false, false)
            .generate_report(&report, &OutputFormat::Json)
            .unwrap();

        let parsed: MatchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.result, report.result);
        assert_eq!(parsed.job_strategy, ExtractionStrategy::Frequency);
    }
}
