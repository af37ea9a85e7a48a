//! Free-function entry points backed by a process-wide matcher.
//!
//! The matcher is built on first use from the user's configuration file; if
//! that is missing or cannot be loaded the built-in defaults are used instead.
//! Nothing is written to disk.

pub use crate::config::DEFAULT_TOP_N;

use crate::config::Config;
use crate::matcher::ResumeMatcher;
use std::path::Path;
use std::sync::OnceLock;

static DEFAULT_MATCHER: OnceLock<ResumeMatcher> = OnceLock::new();

pub fn default_matcher() -> &'static ResumeMatcher {
    DEFAULT_MATCHER.get_or_init(|| matcher_from_config_file(&Config::config_path()))
}

/// Build a matcher from a config file without creating or modifying it
pub fn matcher_from_config_file(config_path: &Path) -> ResumeMatcher {
    let config = Config::read_from(config_path).unwrap_or_else(|e| {
        log::warn!("Failed to load configuration, using defaults: {}", e);
        Config::default()
    });

    ResumeMatcher::from_config(&config).unwrap_or_else(|e| {
        log::warn!("Invalid matcher configuration, using built-in tables: {}", e);
        ResumeMatcher::default()
    })
}

pub fn extract_resume_text(path: impl AsRef<Path>) -> String {
    default_matcher().extract_resume_text(path.as_ref())
}

pub fn extract_keywords(text: &str, top_n: usize) -> Vec<String> {
    default_matcher().extract_keywords(text, top_n)
}

pub fn calculate_match_score(
    resume_keywords: &[String],
    job_keywords: &[String],
) -> (f64, Vec<String>, Vec<String>) {
    default_matcher().calculate_match_score(resume_keywords, job_keywords)
}

pub fn normalize_keyword(raw: &str) -> String {
    default_matcher().normalize_keyword(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_matcher_from_missing_config_leaves_directory_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("resume-matcher").join("config.toml");

        let matcher = matcher_from_config_file(&path);
        assert_eq!(matcher.default_top_n(), DEFAULT_TOP_N);
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }
}
