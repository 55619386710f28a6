// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Responder adapter for the Frontdesk service.
//!
//! Implements [`ResponderAdapter`] over the external classify-and-answer
//! HTTP service: one call classifies a visitor utterance into the closed
//! intent set and optionally generates a reply; the dispatch table turns
//! the pair into a deliverable reply or the defer-to-human signal.

pub mod client;
pub mod intent;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use frontdesk_config::model::ResponderConfig;
use frontdesk_core::types::{AdapterType, HealthStatus};
use frontdesk_core::{FrontdeskError, PluginAdapter, ResponderAdapter, ResponderVerdict};

use crate::client::ResponderClient;
use crate::intent::Intent;

/// HTTP-backed responder implementing [`ResponderAdapter`].
pub struct HttpResponder {
    client: ResponderClient,
}

impl HttpResponder {
    /// Creates a new responder from configuration.
    pub fn new(config: &ResponderConfig) -> Result<Self, FrontdeskError> {
        let client = ResponderClient::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Self { client })
    }

    /// Creates a responder over an already-built client (tests).
    pub fn from_client(client: ResponderClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PluginAdapter for HttpResponder {
    fn name(&self) -> &str {
        "http-responder"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Responder
    }

    async fn health_check(&self) -> Result<HealthStatus, FrontdeskError> {
        match self.client.probe().await {
            Ok(()) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "responder unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), FrontdeskError> {
        Ok(())
    }
}

#[async_trait]
impl ResponderAdapter for HttpResponder {
    async fn respond(&self, utterance: &str) -> Result<ResponderVerdict, FrontdeskError> {
        let classified = self.client.classify(utterance).await?;
        let intent = Intent::parse_lenient(&classified.intent);

        debug!(intent = %intent, "utterance classified");

        // Complaints are recorded on a dedicated log target so operations
        // can route them to a review channel.
        if intent == Intent::Complaint {
            info!(target: "complaint", utterance = %utterance, "visitor complaint recorded");
        }

        Ok(intent::resolve(intent, classified.reply))
    }
}
