// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tolerant extraction of the chat message and history from request bodies.
//!
//! Widget versions and third-party embeds send the message in many shapes.
//! Anything that cannot be understood becomes "no message" rather than an
//! error.

use std::str::FromStr;

use serde_json::{Map, Value};

use crate::types::{Role, Turn};

/// Keys that may hold the message text directly.
pub const MESSAGE_KEYS: &[&str] = &[
    "message", "text", "input", "prompt", "query", "question", "content",
];

/// Keys that may hold a conversation array.
pub const CONVERSATION_KEYS: &[&str] = &["messages", "chat", "history", "conversation"];

/// Keys that may hold the text of a single conversation element.
const TURN_TEXT_KEYS: &[&str] = &["content", "text", "message"];

/// Key under which some clients nest the whole payload.
const NESTED_KEY: &str = "data";

/// How many `data` levels are followed before giving up.
const MAX_DEPTH: usize = 8;

/// The message and history found in a request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: Option<String>,
    /// Prior turns, oldest first, excluding the current message.
    pub history: Vec<Turn>,
}

impl ChatRequest {
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: (!message.trim().is_empty()).then_some(message),
            history: Vec::new(),
        }
    }
}

/// Extract the chat request from a parsed JSON body.
pub fn extract_request(body: &Value) -> ChatRequest {
    extract_at_depth(body, 0)
}

fn extract_at_depth(value: &Value, depth: usize) -> ChatRequest {
    if depth > MAX_DEPTH {
        return ChatRequest::default();
    }

    match value {
        Value::String(s) => ChatRequest::from_message(s.as_str()),
        Value::Array(items) => from_conversation(items, None),
        Value::Object(map) => from_object(map, depth),
        _ => ChatRequest::default(),
    }
}

fn from_object(map: &Map<String, Value>, depth: usize) -> ChatRequest {
    let direct = MESSAGE_KEYS
        .iter()
        .find_map(|key| map.get(*key).and_then(non_blank_str))
        .map(str::to_string);

    let conversation = CONVERSATION_KEYS
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_array));

    match (direct, conversation) {
        (Some(message), Some(items)) => from_conversation(items, Some(message)),
        (Some(message), None) => ChatRequest::from_message(message),
        (None, Some(items)) => from_conversation(items, None),
        (None, None) => match map.get(NESTED_KEY) {
            Some(nested) => extract_at_depth(nested, depth + 1),
            None => ChatRequest::default(),
        },
    }
}

/// Build a request from a conversation array.
///
/// With an explicit message the whole array is history; otherwise the last
/// element is the message and the rest is history.
fn from_conversation(items: &[Value], explicit: Option<String>) -> ChatRequest {
    match explicit {
        Some(message) => ChatRequest {
            message: Some(message),
            history: items.iter().filter_map(parse_turn).collect(),
        },
        None => {
            let Some((last, earlier)) = items.split_last() else {
                return ChatRequest::default();
            };
            ChatRequest {
                message: element_text(last).map(str::to_string),
                history: earlier.iter().filter_map(parse_turn).collect(),
            }
        }
    }
}

/// Text of a conversation element: the element itself if it is a string,
/// otherwise its first non-blank text field.
fn element_text(item: &Value) -> Option<&str> {
    match item {
        Value::String(_) => non_blank_str(item),
        Value::Object(map) => TURN_TEXT_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(non_blank_str)),
        _ => None,
    }
}

/// A history element with a recognised role. Bare strings count as user turns.
fn parse_turn(item: &Value) -> Option<Turn> {
    let content = element_text(item)?.to_string();
    let role = match item.get("role").and_then(Value::as_str) {
        Some(role) => Role::from_str(role.trim()).ok()?,
        None if item.is_string() => Role::User,
        None => return None,
    };
    Some(Turn { role, content })
}

fn non_blank_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.trim().is_empty())
}
