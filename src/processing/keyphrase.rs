//! Embedding-based keyphrase ranking with Maximal Marginal Relevance

use crate::config::{Config, ExtractionConfig};
use crate::error::{Result, ResumeMatcherError};
use crate::processing::embedding_manager::EmbeddingModelManager;
use crate::processing::embeddings::{cosine_similarity, Model2VecEmbedder, TextEmbedder};
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyphrase {
    pub phrase: String,
    /// Cosine similarity between the phrase and the whole document
    pub relevance: f32,
}

/// Primary keyword extraction strategy.
///
/// Implementations are shared read-only across calls and threads.
pub trait KeyphraseModel: Send + Sync {
    /// Up to `top_n` keyphrases, most relevant first
    fn extract_keyphrases(
        &self,
        text: &str,
        top_n: usize,
        settings: &ExtractionConfig,
    ) -> Result<Vec<Keyphrase>>;

    fn name(&self) -> &str;
}

/// Ranks stop-word-free n-grams by similarity to the document embedding and
/// picks a diverse subset with MMR.
pub struct EmbeddingKeyphraseModel<E: TextEmbedder> {
    embedder: E,
    text_processor: TextProcessor,
}

impl<E: TextEmbedder> EmbeddingKeyphraseModel<E> {
    pub fn new(embedder: E) -> Self {
        Self {
            embedder,
            text_processor: TextProcessor::new(),
        }
    }
}

impl<E: TextEmbedder> KeyphraseModel for EmbeddingKeyphraseModel<E> {
    fn extract_keyphrases(
        &self,
        text: &str,
        top_n: usize,
        settings: &ExtractionConfig,
    ) -> Result<Vec<Keyphrase>> {
        let candidates = self.text_processor.candidate_phrases(
            text,
            settings.min_ngram,
            settings.max_ngram,
            settings.candidate_limit,
        );
        if candidates.is_empty() || top_n == 0 {
            return Ok(Vec::new());
        }

        let document = self.embedder.embed(&[text.to_string()])?;
        let document = document
            .first()
            .ok_or_else(|| ResumeMatcherError::Embedding("No document embedding returned".to_string()))?;
        let candidate_embeddings = self.embedder.embed(&candidates)?;

        let relevance = candidate_embeddings
            .iter()
            .map(|embedding| cosine_similarity(embedding, document))
            .collect::<Result<Vec<f32>>>()?;

        let selected =
            maximal_marginal_relevance(&relevance, &candidate_embeddings, top_n, settings.diversity)?;

        Ok(selected
            .into_iter()
            .map(|idx| Keyphrase {
                phrase: candidates[idx].clone(),
                relevance: relevance[idx],
            })
            .collect())
    }

    fn name(&self) -> &str {
        self.embedder.model_name()
    }
}

/// Select up to `top_n` candidate indices trading relevance against
/// redundancy with the phrases already selected.
///
/// Each step picks the candidate maximizing
/// `(1 - diversity) * relevance - diversity * max_similarity_to_selected`.
/// With `diversity == 0` this is plain relevance order. Ties go to the
/// lower index.
pub fn maximal_marginal_relevance(
    relevance: &[f32],
    embeddings: &[Vec<f32>],
    top_n: usize,
    diversity: f32,
) -> Result<Vec<usize>> {
    let count = relevance.len().min(embeddings.len());
    let target = top_n.min(count);
    let mut selected: Vec<usize> = Vec::with_capacity(target);
    let mut remaining: Vec<usize> = (0..count).collect();
    // max similarity of each candidate to anything selected so far
    let mut redundancy = vec![f32::NEG_INFINITY; count];

    while selected.len() < target {
        let mut best: Option<(usize, f32)> = None;
        for (pos, &idx) in remaining.iter().enumerate() {
            let score = if selected.is_empty() {
                relevance[idx]
            } else {
                (1.0 - diversity) * relevance[idx] - diversity * redundancy[idx]
            };
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((pos, score));
            }
        }

        let Some((pos, _)) = best else { break };
        let chosen = remaining.remove(pos);
        selected.push(chosen);

        for &idx in &remaining {
            let similarity = cosine_similarity(&embeddings[idx], &embeddings[chosen])?;
            if similarity > redundancy[idx] {
                redundancy[idx] = similarity;
            }
        }
    }

    Ok(selected)
}

/// Whether the primary keyphrase model could be loaded.
#[derive(Clone)]
pub enum ModelState {
    Available(Arc<dyn KeyphraseModel>),
    Unavailable { reason: String },
}

impl ModelState {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        ModelState::Unavailable { reason: reason.into() }
    }

    /// Load the configured keyphrase model from the local models directory.
    ///
    /// Never fails: a missing or broken model yields `Unavailable`.
    pub fn load(config: &Config) -> Self {
        let model_name = &config.models.keyphrase_model;
        let manager = EmbeddingModelManager::new(&config.models);

        let Some(model_path) = manager.get_model_path(model_name) else {
            let reason = format!(
                "model '{}' not found in {} (run `resume-matcher models download {}`)",
                model_name,
                manager.models_dir().display(),
                model_name
            );
            log::warn!("Keyphrase model unavailable, using frequency fallback: {}", reason);
            return Self::unavailable(reason);
        };

        match Model2VecEmbedder::load(&model_path, model_name) {
            Ok(embedder) => ModelState::Available(Arc::new(EmbeddingKeyphraseModel::new(embedder))),
            Err(e) => {
                log::warn!("Keyphrase model unavailable, using frequency fallback: {}", e);
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ModelState::Available(_))
    }
}

impl fmt::Debug for ModelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelState::Available(model) => f.debug_tuple("Available").field(&model.name()).finish(),
            ModelState::Unavailable { reason } => {
                f.debug_struct("Unavailable").field("reason", reason).finish()
            }
        }
    }
}
