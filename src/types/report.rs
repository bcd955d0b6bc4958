// src/types/report.rs
//! Normalizes an analysis service reply into a [`ResultReport`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::error::MatchError;
use crate::types::response::{AnalysisResponse, ServiceErrorBody};

fn score_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([0-9]+)/100").expect("score pattern is valid"))
}

/// Leading integer of the first `<n>/100` in `text`, capped at 100. Zero when absent.
pub fn parse_score(text: &str) -> u8 {
    score_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse::<u32>().ok())
        .map(|score| score.min(100) as u8)
        .unwrap_or(0)
}

/// Structured result of one analysis call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultReport {
    pub score: u8,
    pub explanation: String,
    pub strengths: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub gaps: Vec<String>,
    pub suggestions: Vec<String>,
    pub verdict: String,
}

impl ResultReport {
    /// Parses a successful response body.
    ///
    /// A body carrying a truthy `"error"` value is a service-reported failure. Any other
    /// deviation from the expected shape is rejected as malformed, including
    /// missing list fields.
    pub fn from_body(body: &str) -> Result<Self, MatchError> {
        let value: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| MatchError::MalformedResponse(format!("invalid JSON: {}", e)))?;

        if !value.is_object() {
            return Err(MatchError::MalformedResponse(
                "expected a JSON object".to_string(),
            ));
        }

        if let Some(error) = value.get("error") {
            let error_body = ServiceErrorBody {
                error: error.clone(),
            };
            if error_body.is_reported() {
                return Err(MatchError::ServiceReported(error_body.message()));
            }
        }

        let response: AnalysisResponse = serde_json::from_value(value)
            .map_err(|e| MatchError::MalformedResponse(e.to_string()))?;

        Ok(Self::from(response))
    }
}

impl From<AnalysisResponse> for ResultReport {
    fn from(response: AnalysisResponse) -> Self {
        Self {
            score: parse_score(&response.ats_match_score),
            explanation: response.ats_match_score,
            strengths: response.strengths,
            matched_keywords: response.matched_keywords,
            missing_keywords: response.missing_keywords,
            gaps: response.gaps,
            suggestions: response.suggestions,
            verdict: response.verdict,
        }
    }
}
