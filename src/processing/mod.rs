//! Keyword processing: normalization, extraction, and scoring

pub mod embedding_manager;
pub mod embeddings;
pub mod keyphrase;
pub mod keywords;
pub mod normalizer;
pub mod scorer;
pub mod text_processor;

pub use keyphrase::{KeyphraseModel, ModelState};
pub use keywords::{ExtractionStrategy, KeywordExtractor};
pub use normalizer::{KeywordNormalizer, SynonymTable};
pub use scorer::{ImportanceWeights, MatchResult, MatchScorer};
