// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Closed intent set and the intent-to-disposition lookup table.
//!
//! The classify-and-answer service labels each utterance with one intent;
//! the table below decides what the bot does with the label and the
//! generated reply. Adding an intent is a table entry, not a new branch.

use std::str::FromStr;

use strum::{Display, EnumString};

use frontdesk_core::ResponderVerdict;

/// The closed set of intents the responder service can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Intent {
    Greeting,
    Faq,
    Complaint,
    VisitorInfo,
    Chitchat,
    Unrelated,
    Unknown,
}

impl Intent {
    /// Parse a service-provided intent label, tolerating anything outside
    /// the closed set by mapping it to `Unknown`.
    pub fn parse_lenient(label: &str) -> Self {
        Intent::from_str(label.trim()).unwrap_or(Intent::Unknown)
    }
}

/// How the bot acts on one classified intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Fixed lead-in line, then the generated reply when present.
    Preface { lead: &'static str },
    /// Relay the generated reply; fall back to a canned line when absent.
    Relay { missing: &'static str },
    /// Relay the generated reply with a promotional tail appended.
    Promote {
        tail: &'static str,
        missing: &'static str,
    },
    /// The service cannot help; hand the conversation to a human.
    Escalate,
}

const GREETING_LEAD: &str =
    "Hello! Welcome. I can help with questions about our services, pricing, and support.";

const VISITOR_LEAD: &str =
    "Looks like it's your first time here! Feel free to ask about our services or pricing.";

const KB_UNAVAILABLE: &str =
    "I'm sorry, my knowledge base is currently unavailable. I can still help with general questions.";

const COMPLAINT_ACK: &str =
    "I am sorry to hear that. I've recorded your complaint and our support team will review it shortly.";

const CHITCHAT_TAIL: &str =
    "\n\nBy the way, you can also ask me anything about our services and pricing!";

const CHITCHAT_MISSING: &str =
    "I'd love to chat, but I'm better at questions about our services. What can I help you with?";

const UNKNOWN_FALLBACK: &str =
    "I'm not sure how to help with that. Could you rephrase, or ask about our services, pricing, or support?";

/// The intent dispatch table. Order is irrelevant; every intent appears
/// exactly once.
pub const DISPATCH: &[(Intent, Disposition)] = &[
    (Intent::Greeting, Disposition::Preface { lead: GREETING_LEAD }),
    (Intent::VisitorInfo, Disposition::Preface { lead: VISITOR_LEAD }),
    (Intent::Faq, Disposition::Relay { missing: KB_UNAVAILABLE }),
    (Intent::Complaint, Disposition::Relay { missing: COMPLAINT_ACK }),
    (
        Intent::Chitchat,
        Disposition::Promote {
            tail: CHITCHAT_TAIL,
            missing: CHITCHAT_MISSING,
        },
    ),
    (Intent::Unrelated, Disposition::Escalate),
    (Intent::Unknown, Disposition::Relay { missing: UNKNOWN_FALLBACK }),
];

/// Resolve a classified intent and optional generated reply into a verdict.
pub fn resolve(intent: Intent, reply: Option<String>) -> ResponderVerdict {
    let disposition = DISPATCH
        .iter()
        .find(|(i, _)| *i == intent)
        .map(|(_, d)| *d)
        // Unreachable while the table stays total over Intent; degrade to
        // the unknown fallback rather than panic if an entry goes missing.
        .unwrap_or(Disposition::Relay {
            missing: UNKNOWN_FALLBACK,
        });

    match disposition {
        Disposition::Preface { lead } => match reply {
            Some(text) if !text.trim().is_empty() => {
                ResponderVerdict::Reply(format!("{lead}\n{text}"))
            }
            _ => ResponderVerdict::Reply(lead.to_string()),
        },
        Disposition::Relay { missing } => match reply {
            Some(text) if !text.trim().is_empty() => ResponderVerdict::Reply(text),
            _ => ResponderVerdict::Reply(missing.to_string()),
        },
        Disposition::Promote { tail, missing } => match reply {
            Some(text) if !text.trim().is_empty() => {
                ResponderVerdict::Reply(format!("{text}{tail}"))
            }
            _ => ResponderVerdict::Reply(missing.to_string()),
        },
        Disposition::Escalate => ResponderVerdict::Defer,
    }
}
