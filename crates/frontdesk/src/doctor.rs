// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `frontdesk doctor` command implementation.
//!
//! Runs each adapter's health check and prints a short report: session
//! store (open + query), responder service reachability, and platform API
//! reachability. Exits non-zero if any configured collaborator is down.

use frontdesk_config::FrontdeskConfig;
use frontdesk_core::types::HealthStatus;
use frontdesk_core::{FrontdeskError, PluginAdapter, SessionStore};
use frontdesk_platform::HttpPlatform;
use frontdesk_responder::HttpResponder;
use frontdesk_storage::SqliteSessionStore;

/// Runs the `frontdesk doctor` command.
pub async fn run_doctor(config: FrontdeskConfig) -> Result<(), FrontdeskError> {
    println!("frontdesk doctor");
    let mut failures = 0u32;

    // Session store: open and run a probe query.
    let store = SqliteSessionStore::new(config.storage.clone());
    match store.initialize().await {
        Ok(()) => {
            let status = store
                .health_check()
                .await
                .unwrap_or_else(|e| HealthStatus::Unhealthy(e.to_string()));
            failures += report("storage", &status);
            let _ = store.close().await;
        }
        Err(e) => {
            failures += report("storage", &HealthStatus::Unhealthy(e.to_string()));
        }
    }

    // Responder service.
    match HttpResponder::new(&config.responder) {
        Ok(responder) => {
            let status = responder
                .health_check()
                .await
                .unwrap_or_else(|e| HealthStatus::Unhealthy(e.to_string()));
            failures += report("responder", &status);
        }
        Err(e) => {
            failures += report("responder", &HealthStatus::Unhealthy(e.to_string()));
        }
    }

    // Platform API, only when outbound calls are configured.
    if config.platform.api_base.is_some() {
        match HttpPlatform::new(&config.platform) {
            Ok(platform) => {
                let status = platform
                    .health_check()
                    .await
                    .unwrap_or_else(|e| HealthStatus::Unhealthy(e.to_string()));
                failures += report("platform", &status);
            }
            Err(e) => {
                failures += report("platform", &HealthStatus::Unhealthy(e.to_string()));
            }
        }
    } else {
        println!("  platform:  skipped (platform.api_base not set)");
    }

    if failures > 0 {
        Err(FrontdeskError::Internal(format!(
            "{failures} health check(s) failed"
        )))
    } else {
        println!("all checks passed");
        Ok(())
    }
}

/// Print one report line; returns 1 for an unhealthy component.
fn report(name: &str, status: &HealthStatus) -> u32 {
    match status {
        HealthStatus::Healthy => {
            println!("  {name}:  ok");
            0
        }
        HealthStatus::Degraded(reason) => {
            println!("  {name}:  degraded ({reason})");
            0
        }
        HealthStatus::Unhealthy(reason) => {
            println!("  {name}:  UNHEALTHY ({reason})");
            1
        }
    }
}
