// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session store trait for durable conversation-ownership state.

use async_trait::async_trait;

use crate::error::FrontdeskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::Session;

/// Durable key-value mapping from conversation identifier to session state.
///
/// The single source of truth for who owns a conversation; it must survive
/// process restarts and be shared by every instance behind a load balancer.
/// `get`/`put` for *different* conversation identifiers must not interfere;
/// per-identifier write ordering is the handoff controller's job, not the
/// store's.
#[async_trait]
pub trait SessionStore: PluginAdapter {
    /// Initializes the backend (migrations, connection pool, etc.).
    async fn initialize(&self) -> Result<(), FrontdeskError>;

    /// Closes the backend, flushing pending writes and releasing connections.
    async fn close(&self) -> Result<(), FrontdeskError>;

    /// Look up the session for a conversation.
    ///
    /// `Ok(None)` means the conversation has never been seen (or its record
    /// expired); callers treat that as a fresh bot-owned session, never as
    /// an error.
    async fn get(&self, conversation_id: &str) -> Result<Option<Session>, FrontdeskError>;

    /// Persist a session record, replacing any previous record for the same
    /// conversation.
    async fn put(&self, session: &Session) -> Result<(), FrontdeskError>;
}
