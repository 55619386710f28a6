// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use frontdesk_core::FrontdeskError;
use frontdesk_handoff::HandoffController;

use crate::auth::{auth_middleware, AuthConfig};
use crate::handlers;

/// Health state for the unauthenticated health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct WebhookState {
    /// The handoff controller processing decoded events.
    pub controller: Arc<HandoffController>,
    /// Health state for the health endpoint.
    pub health: HealthState,
}

/// Webhook server configuration (mirrors WebhookConfig from frontdesk-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Shared secret for delivery verification (None = accept all).
    pub secret: Option<String>,
}

/// Build the webhook router.
///
/// - POST /webhook (shared-secret verification when configured)
/// - GET /health (no auth)
pub fn build_router(state: WebhookState, auth: AuthConfig) -> Router {
    let hook_routes = Router::new()
        .route("/webhook", post(handlers::post_webhook))
        .route_layer(axum_middleware::from_fn_with_state(auth, auth_middleware))
        .with_state(state.clone());

    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state);

    Router::new()
        .merge(hook_routes)
        .merge(public_routes)
        .layer(TraceLayer::new_for_http())
}

/// Start the webhook HTTP server and serve until the task is aborted.
pub async fn start_server(
    config: &ServerConfig,
    state: WebhookState,
) -> Result<(), FrontdeskError> {
    if config.secret.is_none() {
        tracing::warn!("webhook.secret not configured -- accepting unauthenticated deliveries");
    }

    let auth = AuthConfig {
        secret: config.secret.clone(),
    };
    let app = build_router(state, auth);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| FrontdeskError::Internal(format!("failed to bind webhook to {addr}: {e}")))?;

    tracing::info!("webhook server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| FrontdeskError::Internal(format!("webhook server error: {e}")))?;

    Ok(())
}
