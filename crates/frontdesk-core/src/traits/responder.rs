// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Responder trait for the external classify-and-answer service.

use async_trait::async_trait;

use crate::error::FrontdeskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::ResponderVerdict;

/// Adapter for the intent-classification-and-answer service.
///
/// The service is opaque text-in/verdict-out: retrieval, prompting, and
/// generation all live behind it. Calls may take seconds and must carry a
/// bounded timeout inside the implementation; a timeout surfaces as an
/// error, never as silence.
#[async_trait]
pub trait ResponderAdapter: PluginAdapter {
    /// Classify one visitor utterance and produce a verdict.
    ///
    /// Errors cover transport and decoding failures only. "Cannot help" is
    /// not an error; it comes back as [`ResponderVerdict::Defer`].
    async fn respond(&self, utterance: &str) -> Result<ResponderVerdict, FrontdeskError>;
}
