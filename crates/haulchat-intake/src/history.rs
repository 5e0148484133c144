// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation history inspection.
//!
//! There is no server-side session: the caller may forward prior turns, and
//! the only thing read from them is the most recent bot turn, which tells us
//! which question the customer is answering.

use crate::rules::STAGE_MARKERS;
use crate::types::{Stage, Turn};

/// The most recent assistant/bot turn, if any.
pub fn last_bot_utterance(history: &[Turn]) -> Option<&str> {
    history
        .iter()
        .rev()
        .find(|turn| turn.role.is_bot())
        .map(|turn| turn.content.as_str())
}

/// Infer which stage a bot utterance was asking about.
///
/// Each prompt embeds a marker phrase; the first marker found wins.
pub fn infer_stage(utterance: &str) -> Option<Stage> {
    let lower = utterance.to_lowercase();
    STAGE_MARKERS
        .iter()
        .find(|(marker, _)| lower.contains(marker))
        .map(|(_, stage)| *stage)
}

/// The stage the customer is responding to, reconstructed from history.
pub fn prior_stage(history: &[Turn]) -> Option<Stage> {
    last_bot_utterance(history).and_then(infer_stage)
}
