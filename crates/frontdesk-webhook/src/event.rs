// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook envelope decoding.
//!
//! The platform delivers `{"event": "...", "data": {...}}`. Decoding is
//! tolerant by design: unrecognized event names, missing fields, and
//! unexpected payload shapes produce an ignorable event, never an error,
//! so the endpoint can acknowledge every delivery.

use std::str::FromStr;

use serde::Deserialize;

use frontdesk_core::types::{InboundEvent, Owner, SenderRole};

/// The platform's webhook envelope.
#[derive(Debug, Deserialize)]
pub struct WebhookEnvelope {
    /// Event name ("new_message", "close_chat", ...).
    pub event: String,
    /// Event payload; shape depends on the event name.
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Decode an envelope into a typed event.
pub fn parse_event(envelope: WebhookEnvelope) -> InboundEvent {
    let WebhookEnvelope { event, data } = envelope;
    if event == "new_message" {
        parse_new_message(&data).unwrap_or(InboundEvent::Other { event })
    } else if event == "close_chat" {
        match string_field(&data, "chat_id") {
            Some(conversation_id) => InboundEvent::ChatClosed {
                conversation_id,
                closing_owner: string_field(&data, "owner").and_then(|o| Owner::from_str(&o).ok()),
            },
            None => InboundEvent::Other { event },
        }
    } else {
        InboundEvent::Other { event }
    }
}

fn parse_new_message(data: &serde_json::Value) -> Option<InboundEvent> {
    let conversation_id = string_field(data, "chat_id")?;

    let sender = data
        .get("sender")
        .and_then(|s| s.get("type"))
        .and_then(|v| v.as_str())
        .map(|s| SenderRole::from_str(s).unwrap_or(SenderRole::Unknown))
        .unwrap_or(SenderRole::Unknown);

    // Content type defaults to text; the platform omits it on some
    // deliveries but never for media.
    let content_type = string_field(data, "type").unwrap_or_else(|| "text".to_string());
    let content = string_field(data, "content").unwrap_or_default();

    // The platform's assignment record; unparseable values are treated as
    // absent rather than guessed.
    let owner_hint = string_field(data, "owner").and_then(|o| Owner::from_str(&o).ok());

    Some(InboundEvent::NewMessage {
        conversation_id,
        sender,
        content_type,
        content,
        owner_hint,
    })
}

fn string_field(data: &serde_json::Value, field: &str) -> Option<String> {
    data.get(field)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}
