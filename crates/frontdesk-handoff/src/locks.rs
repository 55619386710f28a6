// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-conversation mutual exclusion.
//!
//! One async mutex per conversation identifier, held across
//! load -> decide -> persist so concurrent webhook deliveries for the same
//! conversation serialize while different conversations proceed fully in
//! parallel. Entries are never removed; the registry is bounded by the
//! number of live conversations, which the session store treats as an
//! expirable cache anyway.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of per-conversation locks.
#[derive(Default)]
pub struct LockRegistry {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl LockRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Acquire the lock for one conversation, creating it on first use.
    ///
    /// The shard reference into the map is dropped before awaiting, so a
    /// blocked acquire never stalls lookups for other conversations.
    pub async fn acquire(&self, conversation_id: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(conversation_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    /// Number of conversations that have ever acquired a lock.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// True if no lock has been created yet.
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
