// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform trait for outbound calls to the chat platform.

use async_trait::async_trait;

use crate::error::FrontdeskError;
use crate::traits::adapter::PluginAdapter;

/// Adapter for the chat platform's REST API.
///
/// All three calls are one-way from the controller's point of view:
/// idempotent enough to retry (a duplicate message is visible but harmless)
/// and never allowed to fail the webhook acknowledgement. Ordering between
/// calls is the caller's responsibility; issue them sequentially from one
/// task when order matters.
#[async_trait]
pub trait PlatformAdapter: PluginAdapter {
    /// Deliver a message into a conversation.
    async fn send_message(
        &self,
        conversation_id: &str,
        text: &str,
    ) -> Result<(), FrontdeskError>;

    /// Turn the bot's typing indicator on or off for a conversation.
    async fn set_typing(&self, conversation_id: &str, typing: bool)
        -> Result<(), FrontdeskError>;

    /// Transfer ownership of a conversation to the named operator.
    async fn transfer(
        &self,
        conversation_id: &str,
        to_operator: &str,
    ) -> Result<(), FrontdeskError>;
}
