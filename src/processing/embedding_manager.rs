//! Embedding model management for locating and downloading Model2Vec models

use crate::config::{AvailableModel, ModelConfig};
use crate::error::{Result, ResumeMatcherError};
use hf_hub::api::tokio::Api;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Files a Model2Vec directory needs before it can be loaded
const REQUIRED_FILES: [&str; 3] = ["tokenizer.json", "model.safetensors", "config.json"];
const OPTIONAL_FILES: [&str; 1] = ["README.md"];

/// Manager for embedding models in the local models directory
pub struct EmbeddingModelManager {
    models_dir: PathBuf,
    available_models: Vec<AvailableModel>,
}

impl EmbeddingModelManager {
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            models_dir: config.models_dir.clone(),
            available_models: config.available_models.clone(),
        }
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    /// Directory a model lives in, whether or not it is downloaded
    pub fn model_dir(&self, model_id: &str) -> PathBuf {
        self.models_dir.join(model_id)
    }

    /// Check if a model directory holds every file the loader needs
    pub fn is_model_downloaded(&self, model_id: &str) -> bool {
        is_valid_model_directory(&self.model_dir(model_id))
    }

    /// Path to a downloaded model
    pub fn get_model_path(&self, model_id: &str) -> Option<PathBuf> {
        if self.is_model_downloaded(model_id) {
            Some(self.model_dir(model_id))
        } else {
            None
        }
    }

    pub fn list_available_models(&self) -> &[AvailableModel] {
        &self.available_models
    }

    /// Resolve model ID from various formats (name, repo_id, case-insensitive name)
    pub fn resolve_model(&self, input: &str) -> Option<&AvailableModel> {
        self.available_models
            .iter()
            .find(|m| m.name == input)
            .or_else(|| self.available_models.iter().find(|m| m.repo_id == input))
            .or_else(|| {
                let input_lower = input.to_lowercase();
                self.available_models
                    .iter()
                    .find(|m| m.name.to_lowercase() == input_lower)
            })
    }

    /// Download an embedding model from the Hugging Face Hub
    pub async fn download_model(&self, input: &str, force: bool) -> Result<PathBuf> {
        let model_info = self.resolve_model(input).ok_or_else(|| {
            ResumeMatcherError::InvalidInput(format!("Unknown embedding model: {}", input))
        })?;

        let model_dir = self.model_dir(&model_info.name);
        if !force && self.is_model_downloaded(&model_info.name) {
            log::info!("Model '{}' already present at {}", model_info.name, model_dir.display());
            return Ok(model_dir);
        }

        log::info!(
            "Downloading embedding model {} ({} MB) from {}",
            model_info.name,
            model_info.size_mb,
            model_info.repo_id
        );

        fs::create_dir_all(&model_dir).await?;

        let api = Api::new()
            .map_err(|e| ResumeMatcherError::Network(format!("Failed to initialize HF API: {}", e)))?;
        let repo = api.repo(hf_hub::Repo::model(model_info.repo_id.clone()));

        for file in REQUIRED_FILES {
            let cached = repo.get(file).await.map_err(|e| {
                ResumeMatcherError::Network(format!("Failed to download required file {}: {}", file, e))
            })?;
            fs::copy(&cached, model_dir.join(file)).await?;
            log::debug!("Downloaded: {}", file);
        }

        for file in OPTIONAL_FILES {
            match repo.get(file).await {
                Ok(cached) => {
                    fs::copy(&cached, model_dir.join(file)).await?;
                    log::debug!("Downloaded: {}", file);
                }
                Err(e) => log::debug!("Optional file {} not found: {}", file, e),
            }
        }

        log::info!("Embedding model {} downloaded to {}", model_info.name, model_dir.display());
        Ok(model_dir)
    }
}

fn is_valid_model_directory(path: &Path) -> bool {
    REQUIRED_FILES.iter().all(|file| path.join(file).is_file())
}
