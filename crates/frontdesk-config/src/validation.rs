// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, non-empty paths, and the
//! operator identities required once a platform API base is configured.

use crate::diagnostic::ConfigError;
use crate::model::FrontdeskConfig;

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &FrontdeskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !VALID_LOG_LEVELS.contains(&config.service.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "service.log_level `{}` is not one of {}",
                config.service.log_level,
                VALID_LOG_LEVELS.join(", ")
            ),
        });
    }

    // Validate webhook host looks like a valid IP or hostname.
    let host = config.webhook.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "webhook.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("webhook.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.responder.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "responder.base_url must not be empty".to_string(),
        });
    }

    if config.responder.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "responder.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Once outbound platform calls are enabled, the auth secret and both
    // operator identities must be present: escalation and reverse transfer
    // both name an operator.
    if config.platform.api_base.is_some() {
        for (key, value) in [
            ("platform.api_key", &config.platform.api_key),
            ("platform.bot_operator_id", &config.platform.bot_operator_id),
            (
                "platform.fallback_operator_id",
                &config.platform.fallback_operator_id,
            ),
        ] {
            match value {
                None => errors.push(ConfigError::MissingKey {
                    key: key.to_string(),
                }),
                Some(v) if v.trim().is_empty() => errors.push(ConfigError::Validation {
                    message: format!("{key} must not be empty"),
                }),
                Some(_) => {}
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
