// src/core/service_client.rs
//! HTTP client for the remote analysis service

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{error, info, trace};

use crate::error::MatchError;
use crate::types::response::ServiceErrorBody;
use crate::types::{AnalysisRequest, ResultReport};

const ANALYZE_ENDPOINT: &str = "/analyze";

/// Turns a resume and job description into a report.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<ResultReport, MatchError>;
}

pub struct AnalysisClient {
    client: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    /// `timeout` of `None` leaves the request bounded only by the network stack.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, ANALYZE_ENDPOINT)
    }
}

#[async_trait]
impl AnalysisService for AnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<ResultReport, MatchError> {
        let url = self.endpoint();

        info!(
            "Calling analysis service: {} (resume {} chars, job description {} chars)",
            url,
            request.resume.chars().count(),
            request.job_description.chars().count()
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("Analysis request failed: {}", e);
                MatchError::Transport(e.to_string())
            })?;

        let status = response.status();
        trace!("Response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| MatchError::Transport(format!("failed to read response body: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ServiceErrorBody>(&body)
                .ok()
                .filter(ServiceErrorBody::is_reported)
                .map(|b| b.message())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });

            error!("Analysis service error {}: {}", status, body);
            return Err(MatchError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        ResultReport::from_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::JobDescription;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_request() -> AnalysisRequest {
        let jd = JobDescription::from_selection(&"Backend engineer, Go and Rust. ".repeat(3), 50)
            .unwrap();
        AnalysisRequest::new("Jane Doe, Software Engineer".to_string(), jd)
    }

    fn report_json() -> serde_json::Value {
        serde_json::json!({
            "ATS Match Score": "81/100 – Strong backend overlap.",
            "Strengths": ["Go services"],
            "Matched Keywords": ["Go", "REST API"],
            "Missing Keywords": ["Kubernetes"],
            "Gaps & Weaknesses": ["No cloud experience"],
            "Suggestions for Improvement": ["Mention AWS work"],
            "Overall Verdict": "Apply with tweaks."
        })
    }

    #[tokio::test]
    async fn test_analyze_posts_request_and_parses_report() {
        let server = MockServer::start().await;
        let request = sample_request();

        Mock::given(method("POST"))
            .and(path("/analyze"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::to_value(&request).unwrap()))
            .respond_with(ResponseTemplate::new(200).set_body_json(report_json()))
            .expect(1)
            .mount(&server)
            .await;

        let client = AnalysisClient::new(&format!("{}/", server.uri()), None).unwrap();
        let report = client.analyze(&request).await.unwrap();

        assert_eq!(report.score, 81);
        assert_eq!(report.matched_keywords, vec!["Go", "REST API"]);
        assert_eq!(report.verdict, "Apply with tweaks.");
    }

    #[tokio::test]
    async fn test_analyze_server_error_uses_error_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/analyze"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"error": "OpenAI timeout"})),
            )
            .mount(&server)
            .await;

        let client = AnalysisClient::new(&server.uri(), None).unwrap();
        match client.analyze(&sample_request()).await {
            Err(MatchError::HttpStatus { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "OpenAI timeout");
            }
            other => panic!("expected HttpStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_analyze_server_error_without_body_uses_reason() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/analyze"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let client = AnalysisClient::new(&server.uri(), None).unwrap();
        let err = client.analyze(&sample_request()).await.unwrap_err();
        assert_eq!(err.to_string(), "Server error: 503 - Service Unavailable");
    }

    #[tokio::test]
    async fn test_analyze_server_error_with_null_error_uses_reason() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/analyze"))
            .respond_with(
                ResponseTemplate::new(502).set_body_json(serde_json::json!({"error": null})),
            )
            .mount(&server)
            .await;

        let client = AnalysisClient::new(&server.uri(), None).unwrap();
        let err = client.analyze(&sample_request()).await.unwrap_err();
        assert_eq!(err.to_string(), "Server error: 502 - Bad Gateway");
    }

    #[tokio::test]
    async fn test_analyze_success_with_error_field_is_service_reported() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/analyze"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"error": "Invalid JSON response from AI"})),
            )
            .mount(&server)
            .await;

        let client = AnalysisClient::new(&server.uri(), None).unwrap();
        assert!(matches!(
            client.analyze(&sample_request()).await,
            Err(MatchError::ServiceReported(_))
        ));
    }

    #[tokio::test]
    async fn test_analyze_unreachable_service_is_transport_error() {
        let uri = {
            let server = MockServer::start().await;
            server.uri()
        };

        let client = AnalysisClient::new(&uri, Some(Duration::from_secs(2))).unwrap();
        assert!(matches!(
            client.analyze(&sample_request()).await,
            Err(MatchError::Transport(_))
        ));
    }
}
