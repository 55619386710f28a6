// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for controller-level and end-to-end tests.
//!
//! `TestHarness` assembles a complete handoff stack with in-memory storage
//! and mock adapters, and provides event constructors plus `deliver()` /
//! `drain()` to drive the controller deterministically.

use std::sync::Arc;
use std::time::Duration;

use frontdesk_core::types::{InboundEvent, Owner, SenderRole};
use frontdesk_handoff::{HandoffConfig, HandoffController};

use crate::memory_store::MemorySessionStore;
use crate::mock_platform::MockPlatform;
use crate::mock_responder::{MockResponder, ScriptedVerdict};

/// Default operator ids used by harness-built controllers.
pub const BOT_OPERATOR: &str = "op-bot";
pub const HUMAN_OPERATOR: &str = "op-human";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    script: Vec<ScriptedVerdict>,
    responder_delay: Option<Duration>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            script: Vec::new(),
            responder_delay: None,
        }
    }

    /// Set the mock responder's scripted verdicts.
    pub fn with_script(mut self, script: Vec<ScriptedVerdict>) -> Self {
        self.script = script;
        self
    }

    /// Delay every responder call (simulates slow generation).
    pub fn with_responder_delay(mut self, delay: Duration) -> Self {
        self.responder_delay = Some(delay);
        self
    }

    /// Build the harness, wiring mocks into a real controller.
    pub async fn build(self) -> TestHarness {
        let store = Arc::new(MemorySessionStore::new());
        let responder = Arc::new(MockResponder::with_script(self.script));
        if let Some(delay) = self.responder_delay {
            responder.set_delay(delay).await;
        }
        let platform = Arc::new(MockPlatform::new());

        let controller = Arc::new(HandoffController::new(
            store.clone(),
            responder.clone(),
            platform.clone(),
            HandoffConfig {
                bot_operator_id: BOT_OPERATOR.to_string(),
                fallback_operator_id: HUMAN_OPERATOR.to_string(),
            },
        ));

        TestHarness {
            controller,
            store,
            responder,
            platform,
        }
    }
}

/// A complete test environment with mock adapters and in-memory storage.
pub struct TestHarness {
    /// The controller under test.
    pub controller: Arc<HandoffController>,
    /// In-memory session store, inspectable and failable.
    pub store: Arc<MemorySessionStore>,
    /// The scripted responder.
    pub responder: Arc<MockResponder>,
    /// The recording platform.
    pub platform: Arc<MockPlatform>,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Deliver one event to the controller (quick local work only).
    pub async fn deliver(&self, event: InboundEvent) {
        self.controller.handle(event).await;
    }

    /// Deliver an event and wait for all detached work it spawned.
    pub async fn deliver_and_drain(&self, event: InboundEvent) {
        self.deliver(event).await;
        self.drain().await;
    }

    /// Wait for all detached background work to finish.
    pub async fn drain(&self) {
        self.controller.drain().await;
    }

    /// A text message from the visitor.
    pub fn user_message(conversation_id: &str, text: &str) -> InboundEvent {
        InboundEvent::NewMessage {
            conversation_id: conversation_id.to_string(),
            sender: SenderRole::User,
            content_type: "text".to_string(),
            content: text.to_string(),
            owner_hint: None,
        }
    }

    /// A visitor message carrying the platform's assignment record.
    pub fn user_message_with_hint(
        conversation_id: &str,
        text: &str,
        hint: Owner,
    ) -> InboundEvent {
        InboundEvent::NewMessage {
            conversation_id: conversation_id.to_string(),
            sender: SenderRole::User,
            content_type: "text".to_string(),
            content: text.to_string(),
            owner_hint: Some(hint),
        }
    }

    /// A chat-closed notification, as the platform sends it after a human
    /// operator ends the conversation.
    pub fn chat_closed(conversation_id: &str) -> InboundEvent {
        InboundEvent::ChatClosed {
            conversation_id: conversation_id.to_string(),
            closing_owner: Some(Owner::Human),
        }
    }
}
