//! Configuration management for the resume matcher

use crate::error::{Result, ResumeMatcherError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Number of keywords extracted per document unless configured otherwise
pub const DEFAULT_TOP_N: usize = 15;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub models: ModelConfig,
    pub extraction: ExtractionConfig,
    pub scoring: ScoringConfig,
    /// Extra synonym groups merged over the built-in table (canonical -> synonyms)
    #[serde(default)]
    pub synonyms: BTreeMap<String, Vec<String>>,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    /// Name of the embedding model backing keyphrase extraction
    pub keyphrase_model: String,
    pub available_models: Vec<AvailableModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableModel {
    pub name: String,
    pub repo_id: String,
    pub size_mb: u64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub top_n: usize,
    pub min_ngram: usize,
    pub max_ngram: usize,
    /// MMR diversity in [0, 1]; higher values penalize near-duplicate phrases
    pub diversity: f32,
    /// Upper bound on distinct candidate phrases embedded per document
    pub candidate_limit: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Importance weights merged over the built-in weights
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            min_ngram: 1,
            max_ngram: 3,
            diversity: 0.7,
            candidate_limit: 2000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-matcher")
            .join("models");

        Self {
            models: ModelConfig {
                models_dir,
                keyphrase_model: "potion-base-8M".to_string(),
                available_models: vec![
                    AvailableModel {
                        name: "potion-base-8M".to_string(),
                        repo_id: "minishlab/potion-base-8M".to_string(),
                        size_mb: 33,
                        description: "Compact Model2Vec embeddings, good default for keyphrases".to_string(),
                    },
                    AvailableModel {
                        name: "m2v-base".to_string(),
                        repo_id: "minishlab/M2V_base_output".to_string(),
                        size_mb: 90,
                        description: "Model2Vec base embeddings model".to_string(),
                    },
                ],
            },
            extraction: ExtractionConfig::default(),
            scoring: ScoringConfig::default(),
            synonyms: BTreeMap::new(),
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location without touching the filesystem;
    /// a missing file yields the defaults
    pub fn load() -> Result<Self> {
        Self::read_from(&Self::config_path())
    }

    /// Read-only load: a missing file yields the defaults and nothing is written
    pub fn read_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ResumeMatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load for the binary, writing defaults on first run
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            Self::read_from(config_path)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let extraction = &self.extraction;
        if extraction.min_ngram == 0 || extraction.min_ngram > extraction.max_ngram {
            return Err(ResumeMatcherError::Configuration(format!(
                "Invalid n-gram range ({}, {})",
                extraction.min_ngram, extraction.max_ngram
            )));
        }
        if !(0.0..=1.0).contains(&extraction.diversity) {
            return Err(ResumeMatcherError::Configuration(format!(
                "Diversity must be within [0, 1], got {}",
                extraction.diversity
            )));
        }
        for (keyword, weight) in &self.scoring.weights {
            if !weight.is_finite() || *weight <= 0.0 {
                return Err(ResumeMatcherError::Configuration(format!(
                    "Weight for '{}' must be positive, got {}",
                    keyword, weight
                )));
            }
        }
        Ok(())
    }

    pub fn get_model_by_name(&self, name: &str) -> Option<&AvailableModel> {
        self.models.available_models.iter().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.extraction.top_n, 15);
        assert_eq!(config.extraction.max_ngram, 3);
        assert!(config.get_model_by_name(&config.models.keyphrase_model).is_some());
    }

    #[test]
    fn test_load_creates_default_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.extraction.top_n, 15);
    }

    #[test]
    fn test_read_from_missing_file_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config::read_from(&path).unwrap();
        assert_eq!(config.extraction.top_n, DEFAULT_TOP_N);
        assert!(!path.exists());
        assert!(!temp_dir.path().join("nested").exists());
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_round_trip_keeps_custom_tables() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.scoring.weights.insert("rust".to_string(), 2.5);
        config.synonyms.insert("rust".to_string(), vec!["rustlang".to_string()]);
        config.output.format = OutputFormat::Json;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.scoring.weights.get("rust"), Some(&2.5));
        assert_eq!(loaded.synonyms["rust"], vec!["rustlang".to_string()]);
        assert_eq!(loaded.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_rejects_non_positive_weight() {
        let mut config = Config::default();
        config.scoring.weights.insert("python".to_string(), 0.0);
        assert!(matches!(config.validate(), Err(ResumeMatcherError::Configuration(_))));
    }

    #[test]
    fn test_rejects_bad_ngram_range() {
        let mut config = Config::default();
        config.extraction.min_ngram = 3;
        config.extraction.max_ngram = 1;
        assert!(config.validate().is_err());
    }
}
