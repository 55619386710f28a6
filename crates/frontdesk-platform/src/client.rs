// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the chat platform REST API.
//!
//! Three one-way endpoints: send a message, set the typing indicator, and
//! transfer conversation ownership. Every call carries the shared secret in
//! the `x-api-key` header and retries once on transient status codes.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;
use tracing::{debug, warn};

use frontdesk_core::FrontdeskError;

/// Default upper bound on one platform call.
const CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Payload for the send-message endpoint.
#[derive(Debug, Serialize)]
struct SendMessageBody<'a> {
    chat_id: &'a str,
    message: &'a str,
}

/// Payload for the typing-indicator endpoint.
#[derive(Debug, Serialize)]
struct TypingBody<'a> {
    chat_id: &'a str,
    typing: &'a str,
}

/// Payload for the transfer endpoint.
#[derive(Debug, Serialize)]
struct TransferBody<'a> {
    chat_id: &'a str,
    to_operator_id: &'a str,
}

/// HTTP client for platform API communication.
#[derive(Debug, Clone)]
pub struct PlatformClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl PlatformClient {
    /// Creates a new platform client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the platform REST API
    /// * `api_key` - Shared secret sent in the `x-api-key` header
    pub fn new(base_url: String, api_key: &str) -> Result<Self, FrontdeskError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key).map_err(|e| {
                FrontdeskError::Config(format!("invalid platform API key header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(CALL_TIMEOUT)
            .build()
            .map_err(|e| FrontdeskError::Platform {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: 1,
        })
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Deliver a message into a conversation.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), FrontdeskError> {
        self.post("send_message", &SendMessageBody { chat_id, message: text })
            .await
    }

    /// Turn the typing indicator on or off.
    pub async fn set_typing(&self, chat_id: &str, typing: bool) -> Result<(), FrontdeskError> {
        let flag = if typing { "on" } else { "off" };
        self.post("typing", &TypingBody { chat_id, typing: flag })
            .await
    }

    /// Transfer conversation ownership to the named operator.
    pub async fn transfer(&self, chat_id: &str, to_operator: &str) -> Result<(), FrontdeskError> {
        self.post(
            "transfer_chat",
            &TransferBody {
                chat_id,
                to_operator_id: to_operator,
            },
        )
        .await
    }

    /// Probe the platform API.
    pub async fn probe(&self) -> Result<(), FrontdeskError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FrontdeskError::Platform {
                message: format!("health probe failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(FrontdeskError::Platform {
                message: format!("health probe returned {}", response.status()),
                source: None,
            })
        }
    }

    /// POST a JSON body to `{base}/{path}`, retrying once on transient status.
    async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<(), FrontdeskError> {
        let url = format!("{}/{path}", self.base_url);

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, path, "retrying platform call after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&url)
                .json(body)
                .send()
                .await
                .map_err(|e| FrontdeskError::Platform {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, path, attempt, "platform response received");

            if status.is_success() {
                return Ok(());
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, path, "transient error, will retry");
                last_error = Some(FrontdeskError::Platform {
                    message: format!("platform returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(FrontdeskError::Platform {
                message: format!("platform returned {status}: {body}"),
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| FrontdeskError::Platform {
            message: "platform call failed after retries".into(),
            source: None,
        }))
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
