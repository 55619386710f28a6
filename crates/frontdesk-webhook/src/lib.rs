// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound webhook endpoint for the Frontdesk service.
//!
//! One HTTP endpoint receives the chat platform's event envelopes, decodes
//! them tolerantly, hands them to the handoff controller, and always
//! acknowledges with an empty success response so the platform never
//! retries processed deliveries.

pub mod auth;
pub mod event;
pub mod handlers;
pub mod server;

pub use auth::{AuthConfig, SECRET_HEADER};
pub use event::{parse_event, WebhookEnvelope};
pub use server::{build_router, start_server, HealthState, ServerConfig, WebhookState};
