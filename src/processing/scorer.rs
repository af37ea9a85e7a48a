//! Weighted keyword overlap scoring

use crate::error::{Result, ResumeMatcherError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Weight applied to keywords without an explicit entry
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Canonical keyword -> importance weight. Lookups are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportanceWeights {
    weights: HashMap<String, f64>,
}

impl ImportanceWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a weight; it must be positive and finite
    pub fn insert(&mut self, keyword: &str, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(ResumeMatcherError::Configuration(format!(
                "Weight for '{}' must be positive, got {}",
                keyword, weight
            )));
        }
        self.weights.insert(keyword.trim().to_lowercase(), weight);
        Ok(())
    }

    /// Merge extra weights, e.g. from the `[scoring]` config section
    pub fn merged_with(mut self, extra: &BTreeMap<String, f64>) -> Result<Self> {
        for (keyword, weight) in extra {
            self.insert(keyword, *weight)?;
        }
        Ok(self)
    }

    pub fn weight(&self, keyword: &str) -> f64 {
        self.weights
            .get(&keyword.trim().to_lowercase())
            .copied()
            .unwrap_or(DEFAULT_WEIGHT)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Built-in weights favoring hard technical skills
    pub fn builtin() -> Self {
        let entries: [(&str, f64); 16] = [
            ("python", 1.5),
            ("javascript", 1.5),
            ("typescript", 1.5),
            ("golang", 1.5),
            ("sql", 1.5),
            ("postgresql", 1.3),
            ("machine learning", 2.0),
            ("deep learning", 2.0),
            ("natural language processing", 2.0),
            ("artificial intelligence", 1.8),
            ("amazon web services", 1.5),
            ("kubernetes", 1.5),
            ("docker", 1.3),
            ("ci/cd", 1.2),
            ("leadership", 1.2),
            ("project management", 1.2),
        ];

        Self {
            weights: entries
                .into_iter()
                .map(|(keyword, weight)| (keyword.to_string(), weight))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Weighted percentage in [0, 100], two decimals
    pub score: f64,
    /// Job keywords present in the resume, in job order
    pub matched: Vec<String>,
    /// Job keywords absent from the resume, in job order
    pub missing: Vec<String>,
}

impl MatchResult {
    pub fn empty() -> Self {
        Self {
            score: 0.0,
            matched: Vec::new(),
            missing: Vec::new(),
        }
    }

    pub fn into_tuple(self) -> (f64, Vec<String>, Vec<String>) {
        (self.score, self.matched, self.missing)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchScorer {
    weights: ImportanceWeights,
}

impl MatchScorer {
    pub fn new(weights: ImportanceWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ImportanceWeights {
        &self.weights
    }

    /// Score how well resume keywords cover job keywords.
    ///
    /// Every entry of `job_keywords` contributes its weight to the total,
    /// duplicates included; matched entries also contribute to the matched
    /// weight.
    pub fn score(&self, resume_keywords: &[String], job_keywords: &[String]) -> MatchResult {
        if job_keywords.is_empty() {
            return MatchResult::empty();
        }

        let resume: HashSet<String> = resume_keywords.iter().map(|k| k.trim().to_lowercase()).collect();

        let mut seen = HashSet::new();
        let mut matched = Vec::new();
        let mut missing = Vec::new();
        let mut total_weight = 0.0;
        let mut matched_weight = 0.0;

        for keyword in job_keywords {
            let keyword = keyword.trim().to_lowercase();
            let weight = self.weights.weight(&keyword);
            let is_match = resume.contains(&keyword);

            total_weight += weight;
            if is_match {
                matched_weight += weight;
            }

            if seen.insert(keyword.clone()) {
                if is_match {
                    matched.push(keyword);
                } else {
                    missing.push(keyword);
                }
            }
        }

        let score = if total_weight > 0.0 {
            round_percentage(matched_weight / total_weight * 100.0)
        } else {
            0.0
        };

        MatchResult { score, matched, missing }
    }
}

fn round_percentage(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
