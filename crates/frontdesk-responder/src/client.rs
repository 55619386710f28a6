// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the classify-and-answer service.
//!
//! Provides [`ResponderClient`] which handles request construction, the
//! bounded per-call timeout, and transient error retry.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use frontdesk_core::FrontdeskError;

/// Request body for the classify-and-answer call.
#[derive(Debug, Serialize)]
pub struct ClassifyRequest<'a> {
    /// The visitor's utterance.
    pub message: &'a str,
}

/// Response body from the classify-and-answer call.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyResponse {
    /// Intent label from the closed set ("greeting", "faq", ...).
    pub intent: String,
    /// Generated reply text, absent for intents the service does not answer.
    #[serde(default)]
    pub reply: Option<String>,
}

/// HTTP client for responder service communication.
///
/// Carries a hard per-request timeout (the webhook path must never wait on
/// an unbounded LLM call) and retries once on transient status codes.
#[derive(Debug, Clone)]
pub struct ResponderClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    max_retries: u32,
}

impl ResponderClient {
    /// Creates a new responder client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the responder service
    /// * `timeout` - Upper bound on a single classify call
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, FrontdeskError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| FrontdeskError::Responder {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            max_retries: 1,
        })
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Classify one utterance.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second
    /// delay. A request timeout maps to [`FrontdeskError::Timeout`] so the
    /// caller can distinguish it in logs; every failure shape degrades the
    /// same way (fixed apology, no handoff).
    pub async fn classify(&self, message: &str) -> Result<ClassifyResponse, FrontdeskError> {
        let url = format!("{}/respond", self.base_url);
        let body = ClassifyRequest { message };

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying classify request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = match self.client.post(&url).json(&body).send().await {
                Ok(r) => r,
                Err(e) if e.is_timeout() => {
                    return Err(FrontdeskError::Timeout {
                        duration: self.timeout,
                    });
                }
                Err(e) => {
                    return Err(FrontdeskError::Responder {
                        message: format!("HTTP request failed: {e}"),
                        source: Some(Box::new(e)),
                    });
                }
            };

            let status = response.status();
            debug!(status = %status, attempt, "classify response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| FrontdeskError::Responder {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                let decoded: ClassifyResponse =
                    serde_json::from_str(&body).map_err(|e| FrontdeskError::Responder {
                        message: format!("failed to parse classify response: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                return Ok(decoded);
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(FrontdeskError::Responder {
                    message: format!("responder returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            return Err(FrontdeskError::Responder {
                message: format!("responder returned {status}: {body}"),
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| FrontdeskError::Responder {
            message: "classify request failed after retries".into(),
            source: None,
        }))
    }

    /// Probe the service's health endpoint.
    pub async fn probe(&self) -> Result<(), FrontdeskError> {
        let url = format!("{}/health", self.base_url);
        let response =
            self.client
                .get(&url)
                .send()
                .await
                .map_err(|e| FrontdeskError::Responder {
                    message: format!("health probe failed: {e}"),
                    source: Some(Box::new(e)),
                })?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(FrontdeskError::Responder {
                message: format!("health probe returned {}", response.status()),
                source: None,
            })
        }
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> ResponderClient {
        ResponderClient::new(base_url.to_string(), Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn classify_success_decodes_intent_and_reply() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/respond"))
            .and(body_json_string(r#"{"message":"How do I check billing?"}"#))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "intent": "faq",
                "reply": "Billing lives under Settings."
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.classify("How do I check billing?").await.unwrap();
        assert_eq!(result.intent, "faq");
        assert_eq!(result.reply.as_deref(), Some("Billing lives under Settings."));
    }

    #[tokio::test]
    async fn classify_tolerates_missing_reply_field() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/respond"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"intent": "unrelated"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.classify("I want a refund").await.unwrap();
        assert_eq!(result.intent, "unrelated");
        assert!(result.reply.is_none());
    }

    #[tokio::test]
    async fn classify_retries_on_503() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/respond"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/respond"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "intent": "greeting",
                "reply": "Hi!"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.classify("hello").await.unwrap();
        assert_eq!(result.intent, "greeting");
    }

    #[tokio::test]
    async fn classify_fails_on_400_without_retry() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/respond"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.classify("hello").await.unwrap_err();
        assert!(err.to_string().contains("400"), "got: {err}");
    }

    #[tokio::test]
    async fn classify_times_out_as_timeout_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/respond"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"intent": "faq"}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let client = ResponderClient::new(server.uri(), Duration::from_millis(200)).unwrap();
        let err = client.classify("slow").await.unwrap_err();
        assert!(
            matches!(err, FrontdeskError::Timeout { .. }),
            "expected timeout, got: {err}"
        );
    }

    #[tokio::test]
    async fn classify_rejects_undecodable_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/respond"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.classify("hello").await.unwrap_err();
        assert!(err.to_string().contains("parse"), "got: {err}");
    }

    #[tokio::test]
    async fn probe_succeeds_on_healthy_service() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.probe().await.is_ok());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client =
            ResponderClient::new("http://x/".to_string(), Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://x");
    }
}
