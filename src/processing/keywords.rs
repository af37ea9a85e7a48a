//! Keyword extraction with a model-based primary strategy and a frequency fallback

use crate::config::ExtractionConfig;
use crate::processing::keyphrase::ModelState;
use crate::processing::normalizer::KeywordNormalizer;
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Which path produced a keyword list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionStrategy {
    Model,
    Frequency,
    Empty,
}

impl fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExtractionStrategy::Model => "keyphrase model",
            ExtractionStrategy::Frequency => "frequency fallback",
            ExtractionStrategy::Empty => "no text",
        };
        f.write_str(label)
    }
}

pub struct KeywordExtractor {
    model: ModelState,
    normalizer: Arc<KeywordNormalizer>,
    text_processor: TextProcessor,
    settings: ExtractionConfig,
}

impl KeywordExtractor {
    pub fn new(model: ModelState, normalizer: Arc<KeywordNormalizer>, settings: ExtractionConfig) -> Self {
        Self {
            model,
            normalizer,
            text_processor: TextProcessor::new(),
            settings,
        }
    }

    pub fn model_state(&self) -> &ModelState {
        &self.model
    }

    pub fn settings(&self) -> &ExtractionConfig {
        &self.settings
    }

    /// Deduplicated, relevance-ordered keywords; never fails
    pub fn extract_keywords(&self, text: &str, top_n: usize) -> Vec<String> {
        self.extract(text, top_n).0
    }

    /// Keywords plus the strategy that produced them.
    ///
    /// Errors from the keyphrase model are logged and answered with the
    /// frequency fallback.
    pub fn extract(&self, text: &str, top_n: usize) -> (Vec<String>, ExtractionStrategy) {
        if text.trim().is_empty() || top_n == 0 {
            return (Vec::new(), ExtractionStrategy::Empty);
        }

        match &self.model {
            ModelState::Available(model) => {
                match model.extract_keyphrases(text, top_n, &self.settings) {
                    Ok(keyphrases) => {
                        log::debug!("Extracted {} keyphrases with model '{}'", keyphrases.len(), model.name());
                        let keywords = self.canonical_unique(
                            keyphrases.into_iter().map(|k| k.phrase),
                            top_n,
                        );
                        return (keywords, ExtractionStrategy::Model);
                    }
                    Err(e) => {
                        log::warn!("Keyphrase model failed, using frequency fallback: {}", e);
                    }
                }
            }
            ModelState::Unavailable { reason } => {
                log::debug!("Keyphrase model unavailable ({}), using frequency fallback", reason);
            }
        }

        (self.frequency_keywords(text, top_n), ExtractionStrategy::Frequency)
    }

    /// Most frequent non-stop-word tokens.
    ///
    /// Tokens are counted per canonical form; equal counts keep the order in
    /// which the canonical form first appeared in the text.
    pub fn frequency_keywords(&self, text: &str, top_n: usize) -> Vec<String> {
        // canonical -> (count, first occurrence)
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();

        for (position, token) in self.text_processor.alphabetic_tokens(text).into_iter().enumerate() {
            let keyword = self.normalizer.normalize(&token);
            if keyword.chars().count() <= 2 {
                continue;
            }
            counts.entry(keyword).or_insert((0, position)).0 += 1;
        }

        let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
        ranked.sort_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_b.cmp(count_a).then(first_a.cmp(first_b))
        });

        ranked.into_iter().take(top_n).map(|(keyword, _)| keyword).collect()
    }

    /// Normalize, drop keywords of two characters or fewer, dedupe, truncate
    fn canonical_unique(&self, phrases: impl IntoIterator<Item = String>, top_n: usize) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut keywords = Vec::new();

        for phrase in phrases {
            let keyword = self.normalizer.normalize(&phrase);
            if keyword.chars().count() <= 2 {
                continue;
            }
            if seen.insert(keyword.clone()) {
                keywords.push(keyword);
                if keywords.len() == top_n {
                    break;
                }
            }
        }

        keywords
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, ResumeMatcherError};
    use crate::processing::keyphrase::{Keyphrase, KeyphraseModel};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedModel(Vec<&'static str>);

    impl KeyphraseModel for FixedModel {
        fn extract_keyphrases(&self, _text: &str, top_n: usize, _settings: &ExtractionConfig) -> Result<Vec<Keyphrase>> {
            Ok(self
                .0
                .iter()
                .take(top_n)
                .map(|phrase| Keyphrase {
                    phrase: phrase.to_string(),
                    relevance: 0.5,
                })
                .collect())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[derive(Default)]
    struct FailingModel {
        calls: AtomicUsize,
    }

    impl KeyphraseModel for FailingModel {
        fn extract_keyphrases(&self, _text: &str, _top_n: usize, _settings: &ExtractionConfig) -> Result<Vec<Keyphrase>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ResumeMatcherError::Embedding("model exploded".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn extractor(model: ModelState) -> KeywordExtractor {
        KeywordExtractor::new(model, Arc::new(KeywordNormalizer::default()), ExtractionConfig::default())
    }

    #[test]
    fn test_empty_text_skips_the_model() {
        let model = Arc::new(FailingModel::default());
        let extractor = extractor(ModelState::Available(model.clone()));

        assert_eq!(extractor.extract("   \n ", 10), (Vec::new(), ExtractionStrategy::Empty));
        assert!(extractor.extract_keywords("", 5).is_empty());
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_model_output_is_normalized_and_deduplicated() {
        let model = FixedModel(vec!["JS", "javascript", "ml", "go", "AWS", "docker"]);
        let extractor = extractor(ModelState::Available(Arc::new(model)));

        let (keywords, strategy) = extractor.extract("some resume text", 10);
        assert_eq!(strategy, ExtractionStrategy::Model);
        assert_eq!(
            keywords,
            vec!["javascript", "machine learning", "golang", "amazon web services", "docker"]
        );
    }

    #[test]
    fn test_model_output_is_truncated_after_dedup() {
        let model = FixedModel(vec!["js", "javascript", "python", "rust"]);
        let extractor = extractor(ModelState::Available(Arc::new(model)));

        // the model hands back top_n phrases, dedup can only shrink them
        assert_eq!(extractor.extract_keywords("text", 3), vec!["javascript", "python"]);
    }

    #[test]
    fn test_short_keywords_are_dropped() {
        let model = FixedModel(vec!["qa", "r", "sql"]);
        let extractor = extractor(ModelState::Available(Arc::new(model)));

        assert_eq!(extractor.extract_keywords("text", 5), vec!["sql"]);
    }

    #[test]
    fn test_failing_model_falls_back_deterministically() {
        let model = Arc::new(FailingModel::default());
        let extractor = extractor(ModelState::Available(model.clone()));
        let text = "Python developer. Python, SQL and Docker. Docker compose. Python scripts.";

        let (first, strategy) = extractor.extract(text, 3);
        let (second, _) = extractor.extract(text, 3);

        assert_eq!(strategy, ExtractionStrategy::Frequency);
        assert_eq!(first, vec!["python", "docker", "developer"]);
        assert_eq!(first, second);
        assert_eq!(model.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unavailable_model_uses_fallback() {
        let extractor = extractor(ModelState::unavailable("not downloaded"));
        let (keywords, strategy) = extractor.extract("Kubernetes kubernetes terraform", 10);

        assert_eq!(strategy, ExtractionStrategy::Frequency);
        assert_eq!(keywords, vec!["kubernetes", "terraform"]);
    }

    #[test]
    fn test_fallback_ties_keep_first_occurrence() {
        let extractor = extractor(ModelState::unavailable("test"));
        let keywords = extractor.frequency_keywords("zeta alpha mike alpha zeta", 10);

        assert_eq!(keywords, vec!["zeta", "alpha", "mike"]);
    }

    #[test]
    fn test_fallback_counts_synonyms_together() {
        let extractor = extractor(ModelState::unavailable("test"));
        let keywords = extractor.frequency_keywords("terraform postgres postgresql psql terraform", 10);

        assert_eq!(keywords, vec!["postgresql", "terraform"]);
    }

    #[test]
    fn test_results_are_bounded_and_unique() {
        let extractor = extractor(ModelState::unavailable("test"));
        let text = "Rust tokio serde axum hyper tonic tracing clap anyhow thiserror rayon";

        for top_n in 0..12 {
            let keywords = extractor.extract_keywords(text, top_n);
            assert!(keywords.len() <= top_n);
            let unique: HashSet<_> = keywords.iter().collect();
            assert_eq!(unique.len(), keywords.len());
        }
    }
}
