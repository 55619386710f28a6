// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory session store for tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use frontdesk_core::types::{AdapterType, HealthStatus, Session};
use frontdesk_core::{FrontdeskError, PluginAdapter, SessionStore};

/// A `SessionStore` backed by a concurrent in-memory map.
///
/// The `fail` switch turns every subsequent operation into a storage error,
/// for exercising the controller's fail-closed path.
pub struct MemorySessionStore {
    sessions: DashMap<String, Session>,
    fail: AtomicBool,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            fail: AtomicBool::new(false),
        }
    }

    /// Make all subsequent operations fail with a storage error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.fail.store(unavailable, Ordering::SeqCst);
    }

    /// Seed a session directly, bypassing the trait.
    pub fn insert(&self, session: Session) {
        self.sessions
            .insert(session.conversation_id.clone(), session);
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// True if no session has been stored.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn check_available(&self) -> Result<(), FrontdeskError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(FrontdeskError::Storage {
                source: "scripted store outage".into(),
            })
        } else {
            Ok(())
        }
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MemorySessionStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, FrontdeskError> {
        if self.fail.load(Ordering::SeqCst) {
            Ok(HealthStatus::Unhealthy("scripted store outage".into()))
        } else {
            Ok(HealthStatus::Healthy)
        }
    }

    async fn shutdown(&self) -> Result<(), FrontdeskError> {
        Ok(())
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn initialize(&self) -> Result<(), FrontdeskError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), FrontdeskError> {
        Ok(())
    }

    async fn get(&self, conversation_id: &str) -> Result<Option<Session>, FrontdeskError> {
        self.check_available()?;
        Ok(self.sessions.get(conversation_id).map(|s| s.clone()))
    }

    async fn put(&self, session: &Session) -> Result<(), FrontdeskError> {
        self.check_available()?;
        self.sessions
            .insert(session.conversation_id.clone(), session.clone());
        Ok(())
    }
}
