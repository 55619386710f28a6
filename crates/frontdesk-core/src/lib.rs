// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Frontdesk service.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Frontdesk workspace. The session store,
//! responder client, and platform client all implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::FrontdeskError;
pub use types::{
    AdapterType, HealthStatus, InboundEvent, Owner, ResponderVerdict, SenderRole, Session,
};

// Re-export all adapter traits at crate root.
pub use traits::{PlatformAdapter, PluginAdapter, ResponderAdapter, SessionStore};
