// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Frontdesk service.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Current schema version written into every persisted [`Session`] record.
pub const SESSION_SCHEMA_VERSION: u32 = 1;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Store,
    Responder,
    Platform,
}

/// Which operator currently owns a conversation.
///
/// Exactly one value at any instant; the handoff controller is the only
/// writer. A conversation unknown to the store is bot-owned by definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Owner {
    Bot,
    Human,
}

/// One conversation's ownership record, keyed by the platform's chat id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Record layout version, for safe upgrades of persisted sessions.
    pub schema_version: u32,
    /// Platform-assigned conversation identifier (primary key).
    pub conversation_id: String,
    /// Current conversation owner.
    pub owner: Owner,
    /// Set when this controller initiated a transfer to a human that has
    /// not yet been confirmed closed; decides reverse transfer on close.
    pub pending_transfer: bool,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// RFC 3339 timestamp of the last mutation.
    pub updated_at: String,
}

impl Session {
    /// Create a fresh bot-owned session for an unseen conversation.
    pub fn new(conversation_id: impl Into<String>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            schema_version: SESSION_SCHEMA_VERSION,
            conversation_id: conversation_id.into(),
            owner: Owner::Bot,
            pending_transfer: false,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Refresh `updated_at` to the current instant.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

/// Who sent an inbound chat message, as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SenderRole {
    /// The visitor on the other end of the chat widget.
    User,
    /// A human operator typing into the same conversation.
    Operator,
    /// Anything the platform reports that we do not recognize.
    Unknown,
}

/// A webhook delivery, decoded from the platform's event envelope.
///
/// Parsing is tolerant: unrecognized event names and payload shapes land in
/// [`InboundEvent::Other`] and are acknowledged without processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// A new chat message in a conversation.
    NewMessage {
        conversation_id: String,
        sender: SenderRole,
        /// Platform content type tag ("text", "image", ...). Only text is processed.
        content_type: String,
        content: String,
        /// The platform's own record of who is assigned to this chat, when
        /// present. Authoritative over the locally cached owner when it says
        /// a human has the conversation.
        owner_hint: Option<Owner>,
    },
    /// The conversation was closed on the platform side.
    ChatClosed {
        conversation_id: String,
        /// Which operator closed the chat, when the platform reports it.
        /// Diagnostic only; the close handling does not branch on it.
        closing_owner: Option<Owner>,
    },
    /// Any other event; acknowledged and ignored.
    Other { event: String },
}

impl InboundEvent {
    /// The conversation this event refers to, if it refers to one.
    pub fn conversation_id(&self) -> Option<&str> {
        match self {
            InboundEvent::NewMessage {
                conversation_id, ..
            }
            | InboundEvent::ChatClosed {
                conversation_id, ..
            } => Some(conversation_id),
            InboundEvent::Other { .. } => None,
        }
    }
}

/// What the responder service concluded about one visitor utterance.
///
/// Either a reply the bot should deliver, or the distinguished signal that
/// the service cannot help and a human should take over. Transport failures
/// are *not* represented here; they surface as errors from the adapter and
/// degrade to a fixed apology without a handoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponderVerdict {
    /// Deliver this text to the visitor.
    Reply(String),
    /// The responder cannot help; hand the conversation to a human.
    Defer,
}
