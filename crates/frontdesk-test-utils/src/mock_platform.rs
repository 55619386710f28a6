// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock platform adapter that records outbound calls for assertions.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use frontdesk_core::types::{AdapterType, HealthStatus};
use frontdesk_core::{FrontdeskError, PlatformAdapter, PluginAdapter};

/// One recorded outbound platform call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    Send {
        conversation_id: String,
        text: String,
    },
    Typing {
        conversation_id: String,
        on: bool,
    },
    Transfer {
        conversation_id: String,
        to_operator: String,
    },
}

/// A mock platform that records every call in order.
///
/// Individual call kinds can be toggled to fail, for exercising the
/// logged-and-dropped failure semantics.
pub struct MockPlatform {
    calls: Mutex<Vec<PlatformCall>>,
    fail_send: AtomicBool,
    fail_typing: AtomicBool,
    fail_transfer: AtomicBool,
}

impl MockPlatform {
    /// Create a mock platform where every call succeeds.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_send: AtomicBool::new(false),
            fail_typing: AtomicBool::new(false),
            fail_transfer: AtomicBool::new(false),
        }
    }

    /// Make subsequent `send_message` calls fail.
    pub fn fail_send(&self, fail: bool) {
        self.fail_send.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `set_typing` calls fail.
    pub fn fail_typing(&self, fail: bool) {
        self.fail_typing.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `transfer` calls fail.
    pub fn fail_transfer(&self, fail: bool) {
        self.fail_transfer.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of all recorded calls, in issue order.
    pub async fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().await.clone()
    }

    /// All message texts sent to one conversation, in order.
    pub async fn sent_texts(&self, conversation_id: &str) -> Vec<String> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|call| match call {
                PlatformCall::Send {
                    conversation_id: cid,
                    text,
                } if cid == conversation_id => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// All transfers issued for one conversation, in order.
    pub async fn transfers(&self, conversation_id: &str) -> Vec<String> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|call| match call {
                PlatformCall::Transfer {
                    conversation_id: cid,
                    to_operator,
                } if cid == conversation_id => Some(to_operator.clone()),
                _ => None,
            })
            .collect()
    }

    async fn record(&self, call: PlatformCall) {
        self.calls.lock().await.push(call);
    }
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockPlatform {
    fn name(&self) -> &str {
        "mock-platform"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Platform
    }

    async fn health_check(&self) -> Result<HealthStatus, FrontdeskError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FrontdeskError> {
        Ok(())
    }
}

#[async_trait]
impl PlatformAdapter for MockPlatform {
    async fn send_message(
        &self,
        conversation_id: &str,
        text: &str,
    ) -> Result<(), FrontdeskError> {
        self.record(PlatformCall::Send {
            conversation_id: conversation_id.to_string(),
            text: text.to_string(),
        })
        .await;
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(FrontdeskError::Platform {
                message: "scripted send failure".into(),
                source: None,
            });
        }
        Ok(())
    }

    async fn set_typing(
        &self,
        conversation_id: &str,
        typing: bool,
    ) -> Result<(), FrontdeskError> {
        self.record(PlatformCall::Typing {
            conversation_id: conversation_id.to_string(),
            on: typing,
        })
        .await;
        if self.fail_typing.load(Ordering::SeqCst) {
            return Err(FrontdeskError::Platform {
                message: "scripted typing failure".into(),
                source: None,
            });
        }
        Ok(())
    }

    async fn transfer(
        &self,
        conversation_id: &str,
        to_operator: &str,
    ) -> Result<(), FrontdeskError> {
        self.record(PlatformCall::Transfer {
            conversation_id: conversation_id.to_string(),
            to_operator: to_operator.to_string(),
        })
        .await;
        if self.fail_transfer.load(Ordering::SeqCst) {
            return Err(FrontdeskError::Platform {
                message: "scripted transfer failure".into(),
                source: None,
            });
        }
        Ok(())
    }
}
