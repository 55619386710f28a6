// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the webhook endpoint.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::warn;

use crate::event::{parse_event, WebhookEnvelope};
use crate::server::WebhookState;

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_secs: u64,
}

/// POST /webhook
///
/// Decodes the event envelope and runs the controller's quick local work.
/// The response is always an empty success status once the body has been
/// read, regardless of processing outcome -- the platform retries non-2xx
/// deliveries, and retry amplification is worse than a dropped event.
pub async fn post_webhook(State(state): State<WebhookState>, body: Bytes) -> StatusCode {
    let envelope = match serde_json::from_slice::<WebhookEnvelope>(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(error = %e, "malformed webhook payload ignored");
            return StatusCode::OK;
        }
    };

    // handle() is quick local work; slow reply generation is detached
    // inside the controller, so this await does not delay the ack.
    state.controller.handle(parse_event(envelope)).await;

    StatusCode::OK
}

/// GET /health
///
/// Returns service status without auth.
pub async fn get_health(State(state): State<WebhookState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Instant;

    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use frontdesk_test_utils::TestHarness;

    use crate::auth::AuthConfig;
    use crate::server::{build_router, HealthState, WebhookState};

    use super::*;

    async fn test_app(secret: Option<&str>) -> (axum::Router, Arc<TestHarness>) {
        let harness = Arc::new(TestHarness::builder().build().await);
        let state = WebhookState {
            controller: harness.controller.clone(),
            health: HealthState {
                start_time: Instant::now(),
            },
        };
        let app = build_router(
            state,
            AuthConfig {
                secret: secret.map(|s| s.to_string()),
            },
        );
        (app, harness)
    }

    fn webhook_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn valid_event_is_acknowledged_with_empty_body() {
        let (app, harness) = test_app(None).await;

        let response = app
            .oneshot(webhook_request(
                r#"{"event":"new_message","data":{"chat_id":"c1","sender":{"type":"user"},"type":"text","content":"hello"}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty(), "ack body must be empty");

        harness.drain().await;
        assert_eq!(harness.responder.call_count().await, 1);
    }

    #[tokio::test]
    async fn malformed_json_is_acknowledged_and_ignored() {
        let (app, harness) = test_app(None).await;

        let response = app.oneshot(webhook_request("{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        harness.drain().await;
        assert_eq!(harness.responder.call_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_event_is_acknowledged_and_ignored() {
        let (app, harness) = test_app(None).await;

        let response = app
            .oneshot(webhook_request(r#"{"event":"visitor_typing","data":{}}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        harness.drain().await;
        assert!(harness.platform.calls().await.is_empty());
    }

    #[tokio::test]
    async fn configured_secret_is_enforced() {
        let (app, _harness) = test_app(Some("hook-secret")).await;

        let missing = app
            .clone()
            .oneshot(webhook_request(r#"{"event":"close_chat","data":{"chat_id":"c"}}"#))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let mut request = webhook_request(r#"{"event":"close_chat","data":{"chat_id":"c"}}"#);
        request
            .headers_mut()
            .insert("x-webhook-secret", "hook-secret".parse().unwrap());
        let accepted = app.oneshot(request).await.unwrap();
        assert_eq!(accepted.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn health_endpoint_skips_auth() {
        let (app, _harness) = test_app(Some("hook-secret")).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let health: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(health["status"], "ok");
    }
}
