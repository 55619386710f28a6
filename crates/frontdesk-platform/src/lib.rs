// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat platform adapter for the Frontdesk service.
//!
//! Implements [`PlatformAdapter`] over the platform's REST API. The
//! controller treats each call as fire-and-forget: failures here are logged
//! by the caller and never reach the webhook response.

pub mod client;

use async_trait::async_trait;

use frontdesk_config::model::PlatformConfig;
use frontdesk_core::types::{AdapterType, HealthStatus};
use frontdesk_core::{FrontdeskError, PlatformAdapter, PluginAdapter};

use crate::client::PlatformClient;

/// HTTP-backed platform adapter.
pub struct HttpPlatform {
    client: PlatformClient,
}

impl HttpPlatform {
    /// Creates a new platform adapter from configuration.
    ///
    /// Requires `platform.api_base` and `platform.api_key` to be set
    /// (validation enforces this before serve starts).
    pub fn new(config: &PlatformConfig) -> Result<Self, FrontdeskError> {
        let api_base = config
            .api_base
            .as_deref()
            .ok_or_else(|| FrontdeskError::Config("platform.api_base is required".into()))?;
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| FrontdeskError::Config("platform.api_key is required".into()))?;

        let client = PlatformClient::new(api_base.to_string(), api_key)?;
        Ok(Self { client })
    }

    /// Creates an adapter over an already-built client (tests).
    pub fn from_client(client: PlatformClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PluginAdapter for HttpPlatform {
    fn name(&self) -> &str {
        "http-platform"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Platform
    }

    async fn health_check(&self) -> Result<HealthStatus, FrontdeskError> {
        match self.client.probe().await {
            Ok(()) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "platform unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), FrontdeskError> {
        Ok(())
    }
}

#[async_trait]
impl PlatformAdapter for HttpPlatform {
    async fn send_message(
        &self,
        conversation_id: &str,
        text: &str,
    ) -> Result<(), FrontdeskError> {
        self.client.send_message(conversation_id, text).await
    }

    async fn set_typing(
        &self,
        conversation_id: &str,
        typing: bool,
    ) -> Result<(), FrontdeskError> {
        self.client.set_typing(conversation_id, typing).await
    }

    async fn transfer(
        &self,
        conversation_id: &str,
        to_operator: &str,
    ) -> Result<(), FrontdeskError> {
        self.client.transfer(conversation_id, to_operator).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> PlatformConfig {
        PlatformConfig {
            api_base: Some("https://chat.example.com/v1".to_string()),
            api_key: Some("key".to_string()),
            bot_operator_id: Some("op-bot".to_string()),
            fallback_operator_id: Some("op-human".to_string()),
        }
    }

    #[test]
    fn new_requires_api_base() {
        let mut config = full_config();
        config.api_base = None;
        assert!(HttpPlatform::new(&config).is_err());
    }

    #[test]
    fn new_requires_api_key() {
        let mut config = full_config();
        config.api_key = None;
        assert!(HttpPlatform::new(&config).is_err());
    }

    #[test]
    fn plugin_adapter_metadata() {
        let platform = HttpPlatform::new(&full_config()).unwrap();
        assert_eq!(platform.name(), "http-platform");
        assert_eq!(platform.version(), semver::Version::new(0, 1, 0));
        assert_eq!(platform.adapter_type(), AdapterType::Platform);
    }
}
