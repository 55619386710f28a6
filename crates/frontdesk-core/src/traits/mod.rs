// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for Frontdesk's external collaborators.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod platform;
pub mod responder;
pub mod store;

// Re-export all traits at the traits module level for convenience.
pub use adapter::PluginAdapter;
pub use platform::PlatformAdapter;
pub use responder::ResponderAdapter;
pub use store::SessionStore;
