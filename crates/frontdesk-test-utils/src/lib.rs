// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Frontdesk integration tests.
//!
//! Provides mock adapters (responder, platform), an in-memory session
//! store, and a `TestHarness` that wires them into a real controller.

pub mod harness;
pub mod memory_store;
pub mod mock_platform;
pub mod mock_responder;

pub use harness::{TestHarness, TestHarnessBuilder, BOT_OPERATOR, HUMAN_OPERATOR};
pub use memory_store::MemorySessionStore;
pub use mock_platform::{MockPlatform, PlatformCall};
pub use mock_responder::{MockResponder, ScriptedVerdict};
