// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Frontdesk service.

use thiserror::Error;

/// The primary error type used across all Frontdesk adapter traits and core operations.
#[derive(Debug, Error)]
pub enum FrontdeskError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Session store errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Responder service errors (API failure, undecodable completion).
    #[error("responder error: {message}")]
    Responder {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Chat platform errors (send/typing/transfer call failure, bad payload).
    #[error("platform error: {message}")]
    Platform {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
