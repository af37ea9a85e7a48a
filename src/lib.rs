//! Resume matcher library
//!
//! Extracts keywords from a resume and a job description and scores their
//! weighted overlap.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod matcher;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{Result, ResumeMatcherError};
pub use matcher::ResumeMatcher;
