// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Frontdesk service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Frontdesk configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values;
/// required secrets are checked by validation, not by deserialization.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FrontdeskConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Inbound webhook endpoint settings.
    #[serde(default)]
    pub webhook: WebhookConfig,

    /// Responder (classify-and-answer) service settings.
    #[serde(default)]
    pub responder: ResponderConfig,

    /// Chat platform API settings.
    #[serde(default)]
    pub platform: PlatformConfig,

    /// Session store settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Display name of the service.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "frontdesk".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Inbound webhook endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookConfig {
    /// Host address to bind.
    #[serde(default = "default_webhook_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_webhook_port")]
    pub port: u16,

    /// Shared secret the platform includes with each delivery. `None`
    /// accepts unauthenticated deliveries (logged as a warning at startup).
    #[serde(default)]
    pub secret: Option<String>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            host: default_webhook_host(),
            port: default_webhook_port(),
            secret: None,
        }
    }
}

fn default_webhook_host() -> String {
    "127.0.0.1".to_string()
}

fn default_webhook_port() -> u16 {
    8085
}

/// Responder service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResponderConfig {
    /// Base URL of the classify-and-answer service.
    #[serde(default = "default_responder_base_url")]
    pub base_url: String,

    /// Upper bound on one responder call, in seconds.
    #[serde(default = "default_responder_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            base_url: default_responder_base_url(),
            timeout_secs: default_responder_timeout_secs(),
        }
    }
}

fn default_responder_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_responder_timeout_secs() -> u64 {
    30
}

/// Chat platform API configuration.
///
/// Operator identities are deployment configuration: the bot's own operator
/// id and the human operator that escalated conversations go to.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformConfig {
    /// Base URL of the platform REST API. `None` disables outbound calls.
    #[serde(default)]
    pub api_base: Option<String>,

    /// Shared secret sent in the auth header of every outbound call.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Operator id the bot acts as (reverse-transfer target on close).
    #[serde(default)]
    pub bot_operator_id: Option<String>,

    /// Human operator id that escalated conversations are transferred to.
    #[serde(default)]
    pub fallback_operator_id: Option<String>,
}

/// Session store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("frontdesk").join("frontdesk.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("frontdesk.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = FrontdeskConfig::default();
        assert_eq!(config.service.name, "frontdesk");
        assert_eq!(config.service.log_level, "info");
        assert_eq!(config.webhook.host, "127.0.0.1");
        assert_eq!(config.webhook.port, 8085);
        assert!(config.webhook.secret.is_none());
        assert_eq!(config.responder.timeout_secs, 30);
        assert!(config.platform.api_base.is_none());
        assert!(config.storage.wal_mode);
    }

    #[test]
    fn toml_overrides_defaults() {
        let toml_str = r#"
[service]
log_level = "debug"

[platform]
api_base = "https://chat.example.com/v1"
api_key = "secret"
bot_operator_id = "op-bot"
fallback_operator_id = "op-human"
"#;
        let config: FrontdeskConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.service.log_level, "debug");
        assert_eq!(config.service.name, "frontdesk"); // untouched default
        assert_eq!(
            config.platform.api_base.as_deref(),
            Some("https://chat.example.com/v1")
        );
        assert_eq!(config.platform.bot_operator_id.as_deref(), Some("op-bot"));
        assert_eq!(
            config.platform.fallback_operator_id.as_deref(),
            Some("op-human")
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml_str = r#"
[webhook]
prot = 9000
"#;
        let result = toml::from_str::<FrontdeskConfig>(toml_str);
        assert!(result.is_err());
    }
}
