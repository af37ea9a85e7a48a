//! Input processing module
//! Handles file detection, PDF text extraction, and job description loading

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use text_extractor::extract_resume_text;
