// src/types/response.rs
//! Wire format of the analysis service reply. Field names are fixed by the service.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(rename = "ATS Match Score")]
    pub ats_match_score: String,
    #[serde(rename = "Strengths")]
    pub strengths: Vec<String>,
    #[serde(rename = "Matched Keywords")]
    pub matched_keywords: Vec<String>,
    #[serde(rename = "Missing Keywords")]
    pub missing_keywords: Vec<String>,
    #[serde(rename = "Gaps & Weaknesses")]
    pub gaps: Vec<String>,
    #[serde(rename = "Suggestions for Improvement")]
    pub suggestions: Vec<String>,
    #[serde(rename = "Overall Verdict")]
    pub verdict: String,
}

/// Error body the service sends instead of a report.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceErrorBody {
    pub error: serde_json::Value,
}

impl ServiceErrorBody {
    /// `null`, `false`, `0` and `""` mean the service reported nothing.
    pub fn is_reported(&self) -> bool {
        match &self.error {
            serde_json::Value::Null => false,
            serde_json::Value::Bool(flag) => *flag,
            serde_json::Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
            serde_json::Value::String(text) => !text.is_empty(),
            _ => true,
        }
    }

    pub fn message(&self) -> String {
        match &self.error {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}
