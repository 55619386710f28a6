// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared-secret verification for inbound webhook deliveries.
//!
//! When a secret is configured, every delivery must carry it in the
//! `x-webhook-secret` header; mismatches are rejected before any event
//! processing. With no secret configured all deliveries are accepted
//! (the serve command logs a startup warning for that mode).

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

/// Header the platform puts the shared secret in.
pub const SECRET_HEADER: &str = "x-webhook-secret";

/// Authentication configuration for the webhook endpoint.
#[derive(Clone)]
pub struct AuthConfig {
    /// Expected shared secret. `None` disables verification.
    pub secret: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &self.secret.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

/// Middleware that validates the shared-secret header when configured.
pub async fn auth_middleware(
    State(auth): State<AuthConfig>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(ref expected) = auth.secret else {
        return Ok(next.run(request).await);
    };

    let provided = request
        .headers()
        .get(SECRET_HEADER)
        .and_then(|v| v.to_str().ok());

    if provided == Some(expected.as_str()) {
        Ok(next.run(request).await)
    } else {
        tracing::warn!("webhook delivery rejected: bad or missing shared secret");
        Err(StatusCode::UNAUTHORIZED)
    }
}
