// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flow stages, waste categories, and the annotations attached to replies.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// A point in the intake sequence: postcode → waste type → extras → photos → quote.
///
/// Used both as "what the bot last asked" (inferred from history) and as the
/// `next_step` annotation on a reply.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    AskPostcode,
    WasteType,
    Extras,
    Photos,
    Quote,
}

/// Closed set of waste categories the widget can book.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WasteType {
    Household,
    Business,
    Trade,
    Green,
    Bulky,
}

/// Extra items that carry a surcharge and are asked about separately.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExtraKind {
    Mattress,
    Fridge,
    Freezer,
    Tyres,
    Paint,
    Sofa,
    Armchair,
}

/// One extra item and how many of it the customer mentioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraItem {
    pub item: ExtraKind,
    pub quantity: u32,
}

/// Structured side-channel fields attached to a chat reply.
///
/// `local_area` is a routing signal for downstream systems and never
/// appears in reply text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_area: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waste_type: Option<WasteType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<Vec<ExtraItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_step: Option<Stage>,
}

impl Annotations {
    /// Annotations carrying only the next step.
    pub fn next(stage: Stage) -> Self {
        Self {
            next_step: Some(stage),
            ..Self::default()
        }
    }
}

/// Who produced a turn in the caller-supplied history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Bot,
}

impl Role {
    /// Whether the turn was spoken by the widget rather than the customer.
    pub fn is_bot(self) -> bool {
        matches!(self, Role::Assistant | Role::Bot)
    }
}

/// One prior turn of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}
