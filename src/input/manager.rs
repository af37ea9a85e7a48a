//! Input manager for the documents handed to the matcher

use crate::error::{Result, ResumeMatcherError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{extract_resume_text, MarkdownExtractor};
use log::info;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Read a job description from a plain text or Markdown file.
pub async fn load_job_description(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ResumeMatcherError::InvalidInput(format!(
            "File does not exist: {}",
            path.display()
        )));
    }

    match FileType::from_path(path) {
        FileType::Text => {
            info!("Reading plain text job description: {}", path.display());
            Ok(fs::read_to_string(path).await?)
        }
        FileType::Markdown => {
            info!("Processing markdown job description: {}", path.display());
            let content = fs::read_to_string(path).await?;
            Ok(MarkdownExtractor.to_plain_text(&content))
        }
        FileType::Pdf | FileType::Unknown => Err(ResumeMatcherError::UnsupportedFormat(format!(
            "Job descriptions must be .txt or .md: {}",
            path.display()
        ))),
    }
}

/// Read any supported document as text.
///
/// PDFs go through the resume extractor, so an unreadable PDF yields an empty
/// string rather than an error.
pub async fn load_document(path: &Path) -> Result<String> {
    match FileType::from_path(path) {
        FileType::Pdf => {
            if !path.exists() {
                return Err(ResumeMatcherError::InvalidInput(format!(
                    "File does not exist: {}",
                    path.display()
                )));
            }
            info!("Extracting text from PDF: {}", path.display());
            let owned: PathBuf = path.to_path_buf();
            tokio::task::spawn_blocking(move || extract_resume_text(&owned))
                .await
                .map_err(|e| ResumeMatcherError::PdfExtraction(format!("Extraction task failed: {}", e)))
        }
        FileType::Text | FileType::Markdown => load_job_description(path).await,
        FileType::Unknown => Err(ResumeMatcherError::UnsupportedFormat(format!(
            "Unsupported file type for: {}",
            path.display()
        ))),
    }
}
