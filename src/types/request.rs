// src/types/request.rs
use serde::{Deserialize, Serialize};

use crate::error::MatchError;

/// Minimum length of a usable job description, counted after trimming.
pub const MIN_JOB_DESCRIPTION_CHARS: usize = 50;

/// Job description text taken from the page selection, trimmed and length-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescription(String);

impl JobDescription {
    pub fn from_selection(selection: &str, min_chars: usize) -> Result<Self, MatchError> {
        let trimmed = selection.trim();
        if trimmed.is_empty() {
            return Err(MatchError::NoSelection);
        }

        let length = trimmed.chars().count();
        if length < min_chars {
            return Err(MatchError::SelectionTooShort {
                length,
                minimum: min_chars,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Body of `POST /analyze`. Built fresh for every match attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub resume: String,
    pub job_description: String,
}

impl AnalysisRequest {
    pub fn new(resume: String, job_description: JobDescription) -> Self {
        Self {
            resume,
            job_description: job_description.0,
        }
    }
}
