//! Resume matcher: the extraction and scoring pipeline behind one handle

use crate::config::{Config, ExtractionConfig};
use crate::error::Result;
use crate::input::text_extractor;
use crate::output::report::MatchReport;
use crate::processing::keyphrase::ModelState;
use crate::processing::keywords::{ExtractionStrategy, KeywordExtractor};
use crate::processing::normalizer::{KeywordNormalizer, SynonymTable};
use crate::processing::scorer::{ImportanceWeights, MatchResult, MatchScorer};
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;

/// Owns the loaded keyphrase model and the read-only synonym and weight
/// tables. Safe to share across threads.
pub struct ResumeMatcher {
    normalizer: Arc<KeywordNormalizer>,
    extractor: KeywordExtractor,
    scorer: MatchScorer,
    top_n: usize,
}

impl ResumeMatcher {
    pub fn new(
        synonyms: &SynonymTable,
        weights: ImportanceWeights,
        model: ModelState,
        extraction: ExtractionConfig,
    ) -> Self {
        let normalizer = Arc::new(KeywordNormalizer::new(synonyms));
        let top_n = extraction.top_n;

        Self {
            extractor: KeywordExtractor::new(model, Arc::clone(&normalizer), extraction),
            normalizer,
            scorer: MatchScorer::new(weights),
            top_n,
        }
    }

    /// Build from configuration, loading the keyphrase model from disk.
    ///
    /// Fails only on invalid configuration; a missing model leaves the
    /// matcher on the frequency fallback.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_model(config, ModelState::load(config))
    }

    /// Build from configuration with an already-resolved model state
    pub fn with_model(config: &Config, model: ModelState) -> Result<Self> {
        config.validate()?;

        let synonyms = SynonymTable::builtin().merged_with(&config.synonyms);
        let weights = ImportanceWeights::builtin().merged_with(&config.scoring.weights)?;

        Ok(Self::new(&synonyms, weights, model, config.extraction.clone()))
    }

    pub fn model_available(&self) -> bool {
        self.extractor.model_state().is_available()
    }

    pub fn default_top_n(&self) -> usize {
        self.top_n
    }

    /// Plain text of a resume PDF, or "" when nothing could be extracted
    pub fn extract_resume_text(&self, path: &Path) -> String {
        text_extractor::extract_resume_text(path)
    }

    pub fn extract_keywords(&self, text: &str, top_n: usize) -> Vec<String> {
        self.extractor.extract_keywords(text, top_n)
    }

    /// Keywords plus the path that actually produced them; a loaded model
    /// that fails at inference reports the fallback
    pub fn extract_keywords_with_strategy(&self, text: &str, top_n: usize) -> (Vec<String>, ExtractionStrategy) {
        self.extractor.extract(text, top_n)
    }

    pub fn calculate_match_score(
        &self,
        resume_keywords: &[String],
        job_keywords: &[String],
    ) -> (f64, Vec<String>, Vec<String>) {
        self.score(resume_keywords, job_keywords).into_tuple()
    }

    pub fn score(&self, resume_keywords: &[String], job_keywords: &[String]) -> MatchResult {
        self.scorer.score(resume_keywords, job_keywords)
    }

    pub fn normalize_keyword(&self, raw: &str) -> String {
        self.normalizer.normalize(raw)
    }

    /// Extract the resume at `path` and compare it with `job_text`
    pub fn match_resume(&self, path: &Path, job_text: &str) -> MatchReport {
        let resume_text = self.extract_resume_text(path);
        if resume_text.is_empty() {
            log::warn!("No text available from resume {}", path.display());
        }

        let mut report = self.match_texts(&resume_text, job_text);
        report.resume_path = Some(path.display().to_string());
        report
    }

    pub fn match_texts(&self, resume_text: &str, job_text: &str) -> MatchReport {
        let (resume_keywords, resume_strategy) = self.extractor.extract(resume_text, self.top_n);
        let (job_keywords, job_strategy) = self.extractor.extract(job_text, self.top_n);
        log::debug!(
            "Resume keywords via {}, job keywords via {}",
            resume_strategy,
            job_strategy
        );

        let result = self.scorer.score(&resume_keywords, &job_keywords);
        log::info!(
            "Match score {:.2}% ({} matched, {} missing)",
            result.score,
            result.matched.len(),
            result.missing.len()
        );

        MatchReport {
            resume_path: None,
            resume_keywords,
            job_keywords,
            result,
            resume_strategy,
            job_strategy,
            generated_at: Utc::now(),
        }
    }
}

impl Default for ResumeMatcher {
    /// Built-in tables with no keyphrase model
    fn default() -> Self {
        Self::new(
            &SynonymTable::builtin(),
            ImportanceWeights::builtin(),
            ModelState::unavailable("no model configured"),
            ExtractionConfig::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResumeMatcherError;
    use crate::processing::keyphrase::{Keyphrase, KeyphraseModel};

    struct FailingModel;

    impl KeyphraseModel for FailingModel {
        fn extract_keyphrases(&self, _text: &str, _top_n: usize, _settings: &ExtractionConfig) -> Result<Vec<Keyphrase>> {
            Err(ResumeMatcherError::Embedding("inference failed".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_default_matcher_uses_fallback() {
        let matcher = ResumeMatcher::default();
        assert!(!matcher.model_available());
        assert_eq!(matcher.default_top_n(), 15);
        assert_eq!(matcher.normalize_keyword(" K8s "), "kubernetes");
    }

    #[test]
    fn test_config_tables_are_merged() {
        let mut config = Config::default();
        config.synonyms.insert("rust".to_string(), vec!["rustlang".to_string()]);
        config.scoring.weights.insert("rust".to_string(), 4.0);

        let matcher = ResumeMatcher::with_model(&config, ModelState::unavailable("test")).unwrap();
        assert_eq!(matcher.normalize_keyword("RustLang"), "rust");
        assert_eq!(matcher.normalize_keyword("py"), "python");

        let (score, matched, missing) = matcher.calculate_match_score(
            &["rust".to_string()],
            &["rust".to_string(), "terraform".to_string()],
        );
        assert_eq!(score, 80.0);
        assert_eq!(matched, vec!["rust"]);
        assert_eq!(missing, vec!["terraform"]);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = Config::default();
        config.scoring.weights.insert("rust".to_string(), -2.0);
        assert!(ResumeMatcher::with_model(&config, ModelState::unavailable("test")).is_err());
    }

    #[test]
    fn test_match_texts_reports_strategies() {
        let matcher = ResumeMatcher::default();
        let report = matcher.match_texts("", "Python and SQL. Python services.");

        assert_eq!(report.resume_strategy, ExtractionStrategy::Empty);
        assert_eq!(report.job_strategy, ExtractionStrategy::Frequency);
        assert!(report.resume_keywords.is_empty());
        assert_eq!(report.result.score, 0.0);
        assert_eq!(report.result.missing, report.job_keywords);
    }

    #[test]
    fn test_strategy_reflects_the_path_taken() {
        let matcher = ResumeMatcher::new(
            &SynonymTable::builtin(),
            ImportanceWeights::builtin(),
            ModelState::Available(Arc::new(FailingModel)),
            ExtractionConfig::default(),
        );
        assert!(matcher.model_available());

        let (keywords, strategy) = matcher.extract_keywords_with_strategy("Python services in Python.", 5);
        assert_eq!(strategy, ExtractionStrategy::Frequency);
        assert_eq!(strategy.to_string(), "frequency fallback");
        assert_eq!(keywords[0], "python");

        let (keywords, strategy) = matcher.extract_keywords_with_strategy("   ", 5);
        assert_eq!(strategy, ExtractionStrategy::Empty);
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_unreadable_resume_is_reported_not_raised() {
        let matcher = ResumeMatcher::default();
        let report = matcher.match_resume(Path::new("missing/resume.pdf"), "kubernetes terraform");

        assert!(report.resume_text_missing());
        assert_eq!(report.resume_path.as_deref(), Some("missing/resume.pdf"));
        assert_eq!(report.result.missing, vec!["kubernetes", "terraform"]);
    }
}
