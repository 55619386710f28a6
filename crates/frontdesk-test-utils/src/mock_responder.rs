// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock responder adapter for deterministic testing.
//!
//! `MockResponder` implements `ResponderAdapter` with a scripted verdict
//! queue, enabling fast, CI-runnable tests without the external service.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use frontdesk_core::types::{AdapterType, HealthStatus};
use frontdesk_core::{
    FrontdeskError, PluginAdapter, ResponderAdapter, ResponderVerdict,
};

/// One scripted outcome for a `respond()` call.
#[derive(Debug, Clone)]
pub enum ScriptedVerdict {
    /// Return a reply with this text.
    Reply(String),
    /// Signal that the service cannot help.
    Defer,
    /// Fail the call with a transport-style error.
    Fail,
}

/// A mock responder that pops verdicts from a FIFO script.
///
/// When the script is empty, a default reply echoing the utterance is
/// returned. An optional artificial delay simulates slow generation.
pub struct MockResponder {
    script: Mutex<VecDeque<ScriptedVerdict>>,
    utterances: Mutex<Vec<String>>,
    delay: Mutex<Option<Duration>>,
}

impl MockResponder {
    /// Create a mock responder with an empty script.
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            utterances: Mutex::new(Vec::new()),
            delay: Mutex::new(None),
        }
    }

    /// Create a mock responder pre-loaded with the given script.
    pub fn with_script(script: Vec<ScriptedVerdict>) -> Self {
        Self {
            script: Mutex::new(VecDeque::from(script)),
            utterances: Mutex::new(Vec::new()),
            delay: Mutex::new(None),
        }
    }

    /// Append a verdict to the end of the script.
    pub async fn push(&self, verdict: ScriptedVerdict) {
        self.script.lock().await.push_back(verdict);
    }

    /// Delay every `respond()` call by `duration` (simulates slow LLM calls).
    pub async fn set_delay(&self, duration: Duration) {
        *self.delay.lock().await = Some(duration);
    }

    /// All utterances seen so far, in call order.
    pub async fn utterances(&self) -> Vec<String> {
        self.utterances.lock().await.clone()
    }

    /// Number of `respond()` calls made.
    pub async fn call_count(&self) -> usize {
        self.utterances.lock().await.len()
    }
}

impl Default for MockResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockResponder {
    fn name(&self) -> &str {
        "mock-responder"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Responder
    }

    async fn health_check(&self) -> Result<HealthStatus, FrontdeskError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FrontdeskError> {
        Ok(())
    }
}

#[async_trait]
impl ResponderAdapter for MockResponder {
    async fn respond(&self, utterance: &str) -> Result<ResponderVerdict, FrontdeskError> {
        self.utterances.lock().await.push(utterance.to_string());

        let delay = *self.delay.lock().await;
        if let Some(duration) = delay {
            tokio::time::sleep(duration).await;
        }

        let scripted = self.script.lock().await.pop_front();
        match scripted {
            Some(ScriptedVerdict::Reply(text)) => Ok(ResponderVerdict::Reply(text)),
            Some(ScriptedVerdict::Defer) => Ok(ResponderVerdict::Defer),
            Some(ScriptedVerdict::Fail) => Err(FrontdeskError::Responder {
                message: "scripted failure".into(),
                source: None,
            }),
            None => Ok(ResponderVerdict::Reply(format!("echo: {utterance}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_verdicts_pop_in_order() {
        let responder = MockResponder::with_script(vec![
            ScriptedVerdict::Reply("first".into()),
            ScriptedVerdict::Defer,
            ScriptedVerdict::Fail,
        ]);

        assert_eq!(
            responder.respond("a").await.unwrap(),
            ResponderVerdict::Reply("first".into())
        );
        assert_eq!(
            responder.respond("b").await.unwrap(),
            ResponderVerdict::Defer
        );
        assert!(responder.respond("c").await.is_err());
        // Script exhausted, falls back to echo.
        assert_eq!(
            responder.respond("d").await.unwrap(),
            ResponderVerdict::Reply("echo: d".into())
        );
    }

    #[tokio::test]
    async fn utterances_are_recorded() {
        let responder = MockResponder::new();
        responder.respond("hello").await.unwrap();
        responder.respond("world").await.unwrap();
        assert_eq!(responder.utterances().await, vec!["hello", "world"]);
        assert_eq!(responder.call_count().await, 2);
    }
}
