// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `frontdesk serve` command implementation.
//!
//! Wires the configured session store, responder client, and platform
//! client into the handoff controller, starts the webhook server, and
//! handles graceful shutdown: stop accepting deliveries, let detached
//! background work finish, checkpoint the store.

use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use frontdesk_config::FrontdeskConfig;
use frontdesk_core::{FrontdeskError, SessionStore};
use frontdesk_handoff::{HandoffConfig, HandoffController};
use frontdesk_platform::HttpPlatform;
use frontdesk_responder::HttpResponder;
use frontdesk_storage::SqliteSessionStore;
use frontdesk_webhook::{HealthState, ServerConfig, WebhookState};

/// Runs the `frontdesk serve` command.
pub async fn run_serve(config: FrontdeskConfig) -> Result<(), FrontdeskError> {
    init_tracing(&config.service.log_level);

    info!(service = config.service.name.as_str(), "starting frontdesk serve");

    // Session store: single source of truth for conversation ownership.
    let store = Arc::new(SqliteSessionStore::new(config.storage.clone()));
    store.initialize().await?;
    let store: Arc<dyn SessionStore + Send + Sync> = store;

    // External collaborators behind their narrow trait interfaces.
    let responder = Arc::new(HttpResponder::new(&config.responder)?);
    let platform = Arc::new(HttpPlatform::new(&config.platform)?);

    let controller = Arc::new(HandoffController::new(
        store.clone(),
        responder,
        platform,
        HandoffConfig::from_platform(&config.platform)?,
    ));

    let server_config = ServerConfig {
        host: config.webhook.host.clone(),
        port: config.webhook.port,
        secret: config.webhook.secret.clone(),
    };
    let state = WebhookState {
        controller: controller.clone(),
        health: HealthState {
            start_time: Instant::now(),
        },
    };

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
                cancel.cancel();
            }
        });
    }

    let server = tokio::spawn(async move {
        if let Err(e) = frontdesk_webhook::start_server(&server_config, state).await {
            tracing::error!(error = %e, "webhook server error");
        }
    });

    cancel.cancelled().await;

    // Stop accepting deliveries, then let in-flight detached work (replies,
    // transfers) run to completion -- nothing is cancelled mid-flight.
    server.abort();
    controller.drain().await;
    store.close().await?;

    info!("frontdesk stopped");
    Ok(())
}

/// Initialize the tracing subscriber from config, honoring `RUST_LOG`.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
