//! Match report structures

use crate::processing::keywords::ExtractionStrategy;
use crate::processing::scorer::MatchResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything one resume/job comparison produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    /// Resume file the keywords came from, if any
    pub resume_path: Option<String>,

    /// Keywords extracted from the resume, most relevant first
    pub resume_keywords: Vec<String>,

    /// Keywords extracted from the job description, most relevant first
    pub job_keywords: Vec<String>,

    /// Weighted score plus matched/missing keywords
    pub result: MatchResult,

    pub resume_strategy: ExtractionStrategy,
    pub job_strategy: ExtractionStrategy,

    pub generated_at: DateTime<Utc>,
}

impl MatchReport {
    /// True when the resume produced no text to extract keywords from
    pub fn resume_text_missing(&self) -> bool {
        self.resume_strategy == ExtractionStrategy::Empty
    }

    pub fn match_level(&self) -> MatchLevel {
        MatchLevel::from_score(self.result.score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl MatchLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            MatchLevel::Excellent
        } else if score >= 60.0 {
            MatchLevel::Good
        } else if score >= 40.0 {
            MatchLevel::Fair
        } else {
            MatchLevel::Poor
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            MatchLevel::Excellent => "Strong match for this role",
            MatchLevel::Good => "Good match with a few gaps",
            MatchLevel::Fair => "Partial match, several keywords missing",
            MatchLevel::Poor => "Weak match, most job keywords are missing",
        }
    }
}
