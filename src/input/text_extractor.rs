//! Text extraction from resumes and job descriptions

use crate::error::{Result, ResumeMatcherError};
use pulldown_cmark::{Event, Parser, Tag};
use regex::Regex;
use std::panic;
use std::path::Path;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<String>;
}

/// Extracts the text layer of a PDF document.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;

        // pdf-extract panics on some malformed documents instead of returning an error
        let extracted = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(&bytes))
            .map_err(|_| {
                ResumeMatcherError::PdfExtraction(format!(
                    "PDF parser aborted on '{}'",
                    path.display()
                ))
            })?;

        let text = extracted.map_err(|e| {
            ResumeMatcherError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(normalize_whitespace(&text))
    }
}

pub struct MarkdownExtractor;

impl MarkdownExtractor {
    /// Drop markup, keeping text and inline code, one block per line
    pub fn to_plain_text(&self, markdown: &str) -> String {
        let mut output = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(text) | Event::Code(text) => output.push_str(&text),
                Event::SoftBreak | Event::HardBreak => output.push('\n'),
                Event::End(
                    Tag::Paragraph
                    | Tag::Heading(..)
                    | Tag::Item
                    | Tag::CodeBlock(_)
                    | Tag::BlockQuote,
                ) => output.push('\n'),
                _ => {}
            }
        }

        output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Collapse every whitespace run (newlines included) to one space and trim.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Extract the text of a resume PDF.
///
/// Failures are logged and reported as an empty string; callers treat empty
/// output as "no text available".
pub fn extract_resume_text(path: &Path) -> String {
    match PdfExtractor.extract(path) {
        Ok(text) => {
            log::debug!("Extracted {} characters from {}", text.len(), path.display());
            text
        }
        Err(e) => {
            log::warn!("Resume text extraction failed: {}", e);
            String::new()
        }
    }
}
