// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Frontdesk service.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a
//! single-writer concurrency model via `tokio-rusqlite`, and JSON session
//! records keyed under a fixed namespace prefix.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod sessions;

pub use adapter::{session_key, SqliteSessionStore, SESSION_KEY_PREFIX};
pub use database::Database;
