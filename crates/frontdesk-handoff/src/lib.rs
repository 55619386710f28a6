// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session handoff controller.
//!
//! Receives webhook events, decides per event whether the bot or a human
//! operator owns the conversation, drives the bot's reply and typing
//! behavior, and performs the bot-to-human transfer exactly once per
//! handoff. Deliveries may arrive duplicated, out of order, or concurrently
//! for the same conversation; state mutations are serialized per
//! conversation identifier, and slow responder calls run outside the
//! per-conversation lock so they never block other deliveries.

pub mod locks;

use std::sync::Arc;

use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

use frontdesk_config::model::PlatformConfig;
use frontdesk_core::types::{InboundEvent, Owner, SenderRole, Session};
use frontdesk_core::{
    FrontdeskError, PlatformAdapter, ResponderAdapter, ResponderVerdict, SessionStore,
};

use crate::locks::LockRegistry;

/// Content type tag for plain text messages; everything else is ignored.
const TEXT_CONTENT: &str = "text";

/// Fixed wording sent to the visitor when the bot hands off to a human.
pub const HANDOFF_PREAMBLE: &str =
    "Let me connect you with one of our team members who can help with that. One moment, please.";

/// Fixed apology used when the responder service fails. Transport failures
/// never trigger a handoff; only an explicit defer classification does.
pub const RESPONDER_APOLOGY: &str =
    "Sorry, I'm having trouble answering right now. Please try again in a moment.";

/// Operator identities the controller transfers conversations to.
#[derive(Debug, Clone)]
pub struct HandoffConfig {
    /// Operator id the bot acts as; reverse-transfer target on chat close.
    pub bot_operator_id: String,
    /// Human operator escalated conversations are transferred to.
    pub fallback_operator_id: String,
}

impl HandoffConfig {
    /// Extract the operator identities from platform configuration.
    pub fn from_platform(config: &PlatformConfig) -> Result<Self, FrontdeskError> {
        let bot_operator_id = config
            .bot_operator_id
            .clone()
            .ok_or_else(|| FrontdeskError::Config("platform.bot_operator_id is required".into()))?;
        let fallback_operator_id = config.fallback_operator_id.clone().ok_or_else(|| {
            FrontdeskError::Config("platform.fallback_operator_id is required".into())
        })?;
        Ok(Self {
            bot_operator_id,
            fallback_operator_id,
        })
    }
}

/// The handoff controller.
///
/// `handle()` does only quick local work (lock, session load, decision,
/// session write) and detaches everything slow -- responder calls, message
/// sends, typing indicators, transfers -- onto tracked background tasks.
/// The webhook endpoint can therefore acknowledge a delivery immediately
/// after `handle()` returns.
pub struct HandoffController {
    inner: Arc<Inner>,
    tasks: TaskTracker,
}

/// Shared state the detached background tasks run against.
struct Inner {
    store: Arc<dyn SessionStore + Send + Sync>,
    responder: Arc<dyn ResponderAdapter + Send + Sync>,
    platform: Arc<dyn PlatformAdapter + Send + Sync>,
    config: HandoffConfig,
    locks: LockRegistry,
}

impl HandoffController {
    /// Creates a new controller over the given adapters.
    pub fn new(
        store: Arc<dyn SessionStore + Send + Sync>,
        responder: Arc<dyn ResponderAdapter + Send + Sync>,
        platform: Arc<dyn PlatformAdapter + Send + Sync>,
        config: HandoffConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                responder,
                platform,
                config,
                locks: LockRegistry::new(),
            }),
            tasks: TaskTracker::new(),
        }
    }

    /// Process one webhook delivery.
    ///
    /// Never returns an error: malformed or irrelevant events are ignored,
    /// and downstream failures are logged, so the webhook endpoint always
    /// acknowledges with an empty success response.
    pub async fn handle(&self, event: InboundEvent) {
        match event {
            InboundEvent::NewMessage {
                conversation_id,
                sender,
                content_type,
                content,
                owner_hint,
            } => {
                metrics::counter!("frontdesk_events_total", "event" => "new_message").increment(1);
                self.on_new_message(conversation_id, sender, content_type, content, owner_hint)
                    .await;
            }
            InboundEvent::ChatClosed {
                conversation_id,
                closing_owner,
            } => {
                metrics::counter!("frontdesk_events_total", "event" => "close_chat").increment(1);
                self.on_chat_closed(&conversation_id, closing_owner).await;
            }
            InboundEvent::Other { event } => {
                metrics::counter!("frontdesk_events_total", "event" => "other").increment(1);
                debug!(event = event.as_str(), "ignoring unrecognized event");
            }
        }
    }

    /// Wait for all detached background work (replies, transfers) to finish.
    ///
    /// Used on graceful shutdown and by tests that need determinism.
    pub async fn drain(&self) {
        self.tasks.close();
        self.tasks.wait().await;
        self.tasks.reopen();
    }

    async fn on_new_message(
        &self,
        conversation_id: String,
        sender: SenderRole,
        content_type: String,
        content: String,
        owner_hint: Option<Owner>,
    ) {
        // Empty or non-text content never reaches the responder.
        if content_type != TEXT_CONTENT || content.trim().is_empty() {
            debug!(
                conversation_id = conversation_id.as_str(),
                content_type = content_type.as_str(),
                "ignoring non-text or empty message"
            );
            return;
        }

        let guard = self.inner.locks.acquire(&conversation_id).await;

        let loaded = match self.inner.store.get(&conversation_id).await {
            Ok(session) => session,
            Err(e) => {
                // Fail closed: without the store we cannot know who owns the
                // conversation, and guessing risks the bot talking over a
                // human operator.
                error!(
                    conversation_id = conversation_id.as_str(),
                    error = %e,
                    "session store unavailable, dropping event"
                );
                return;
            }
        };
        let fresh = loaded.is_none();
        let mut session = loaded.unwrap_or_else(|| Session::new(conversation_id.as_str()));

        // The platform's own assignment record wins over the cached owner
        // when it says a human has the chat: an operator picking up a
        // conversation out-of-band must silence the bot immediately.
        if owner_hint == Some(Owner::Human) {
            if session.owner != Owner::Human {
                session.owner = Owner::Human;
                session.touch();
                if let Err(e) = self.inner.store.put(&session).await {
                    error!(
                        conversation_id = conversation_id.as_str(),
                        error = %e,
                        "failed to record out-of-band reassignment"
                    );
                    return;
                }
                info!(
                    conversation_id = conversation_id.as_str(),
                    "human operator assigned out-of-band, bot silenced"
                );
            }
            return;
        }

        if session.owner == Owner::Human {
            debug!(
                conversation_id = conversation_id.as_str(),
                "human owns conversation, staying silent"
            );
            return;
        }

        // Only end-user messages get replies; operator echoes are ignored.
        if sender != SenderRole::User {
            debug!(
                conversation_id = conversation_id.as_str(),
                sender = %sender,
                "ignoring message from non-user sender"
            );
            return;
        }

        // Record the conversation before replying so concurrent deliveries
        // observe a session that exists.
        if fresh {
            session.touch();
            if let Err(e) = self.inner.store.put(&session).await {
                error!(
                    conversation_id = conversation_id.as_str(),
                    error = %e,
                    "failed to create session, dropping event"
                );
                return;
            }
            debug!(conversation_id = conversation_id.as_str(), "session created");
        }

        drop(guard);

        // The responder call takes seconds; run it detached so this event
        // is acknowledged immediately and other deliveries proceed.
        let inner = Arc::clone(&self.inner);
        self.tasks.spawn(async move {
            inner.reply(&conversation_id, &content).await;
        });
    }

    async fn on_chat_closed(&self, conversation_id: &str, closing_owner: Option<Owner>) {
        let guard = self.inner.locks.acquire(conversation_id).await;

        let session = match self.inner.store.get(conversation_id).await {
            Ok(Some(session)) => session,
            Ok(None) => {
                debug!(conversation_id, "close for unseen conversation, ignoring");
                return;
            }
            Err(e) => {
                error!(
                    conversation_id,
                    error = %e,
                    "session store unavailable, dropping close event"
                );
                return;
            }
        };

        if session.owner == Owner::Bot && !session.pending_transfer {
            debug!(conversation_id, "close for bot-owned conversation, nothing to do");
            return;
        }

        let had_pending = session.pending_transfer;
        let mut session = session;
        session.owner = Owner::Bot;
        session.pending_transfer = false;
        session.touch();

        if let Err(e) = self.inner.store.put(&session).await {
            error!(
                conversation_id,
                error = %e,
                "failed to reset session on close"
            );
            return;
        }

        drop(guard);

        info!(
            conversation_id,
            closed_by = closing_owner.map(|o| o.to_string()).as_deref(),
            reverse_transfer = had_pending,
            "conversation closed, ownership returned to bot"
        );

        // Reverse transfer only when this controller initiated the handoff;
        // a close after an out-of-band reassignment resets state silently.
        if had_pending {
            let inner = Arc::clone(&self.inner);
            let conversation_id = conversation_id.to_string();
            self.tasks.spawn(async move {
                let bot_operator = inner.config.bot_operator_id.clone();
                if let Err(e) = inner.platform.transfer(&conversation_id, &bot_operator).await {
                    error!(
                        conversation_id = conversation_id.as_str(),
                        error = %e,
                        "reverse transfer failed"
                    );
                }
            });
        }
    }
}

impl Inner {
    /// The bot reply path: typing on -> responder -> typing off -> deliver
    /// or escalate. Runs without the per-conversation lock; escalation
    /// re-acquires it.
    async fn reply(&self, conversation_id: &str, utterance: &str) {
        if let Err(e) = self.platform.set_typing(conversation_id, true).await {
            debug!(
                conversation_id,
                error = %e,
                "failed to set typing indicator"
            );
        }

        let verdict = self.responder.respond(utterance).await;

        if let Err(e) = self.platform.set_typing(conversation_id, false).await {
            debug!(
                conversation_id,
                error = %e,
                "failed to clear typing indicator"
            );
        }

        match verdict {
            Ok(ResponderVerdict::Reply(text)) => {
                self.deliver(conversation_id, &text).await;
            }
            Ok(ResponderVerdict::Defer) => {
                self.escalate(conversation_id).await;
            }
            Err(e) => {
                metrics::counter!("frontdesk_responder_failures_total").increment(1);
                warn!(
                    conversation_id,
                    error = %e,
                    "responder failed, sending fallback apology"
                );
                self.deliver(conversation_id, RESPONDER_APOLOGY).await;
            }
        }
    }

    /// Send a bot message unless ownership changed while the responder was
    /// thinking. The bot must never speak while a human owns the chat.
    async fn deliver(&self, conversation_id: &str, text: &str) {
        match self.store.get(conversation_id).await {
            Ok(Some(session)) if session.owner == Owner::Human => {
                debug!(conversation_id, "suppressing reply, human owns conversation");
                return;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(
                    conversation_id,
                    error = %e,
                    "cannot confirm ownership, suppressing reply"
                );
                return;
            }
        }

        if let Err(e) = self.platform.send_message(conversation_id, text).await {
            error!(conversation_id, error = %e, "failed to send reply");
        }
    }

    /// Hand the conversation to the fallback human operator.
    ///
    /// The ownership write happens under the per-conversation lock and
    /// strictly before the transfer request goes out, closing the race
    /// where another delivery for the same conversation lands while the
    /// transfer call is in flight. A duplicate defer finds the session
    /// already human-owned and does nothing, so one handoff produces at
    /// most one transfer.
    async fn escalate(&self, conversation_id: &str) {
        {
            let _guard = self.locks.acquire(conversation_id).await;

            let mut session = match self.store.get(conversation_id).await {
                Ok(session) => session.unwrap_or_else(|| Session::new(conversation_id)),
                Err(e) => {
                    error!(
                        conversation_id,
                        error = %e,
                        "session store unavailable, abandoning handoff"
                    );
                    return;
                }
            };

            if session.owner == Owner::Human {
                debug!(conversation_id, "conversation already handed off");
                return;
            }

            session.owner = Owner::Human;
            session.pending_transfer = true;
            session.touch();

            if let Err(e) = self.store.put(&session).await {
                error!(
                    conversation_id,
                    error = %e,
                    "could not record handoff, aborting transfer"
                );
                return;
            }
        }

        metrics::counter!("frontdesk_escalations_total").increment(1);
        info!(conversation_id, "handing conversation to human operator");

        // Preamble and transfer issued sequentially from this task; their
        // order relative to each other is not load-bearing, but both come
        // after the ownership write above.
        if let Err(e) = self
            .platform
            .send_message(conversation_id, HANDOFF_PREAMBLE)
            .await
        {
            error!(conversation_id, error = %e, "failed to send handoff preamble");
        }
        if let Err(e) = self
            .platform
            .transfer(conversation_id, &self.config.fallback_operator_id)
            .await
        {
            error!(conversation_id, error = %e, "transfer request failed");
        }
    }
}
