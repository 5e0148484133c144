// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply synthesis for the chat endpoint.
//!
//! The widget has read the reply text from `reply`, `text`, or `message`
//! depending on its version, so every reply carries all three.

use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::classifier::{IntakeClassifier, Transition};
use crate::extract::ChatRequest;
use crate::types::Annotations;

pub const TRY_AGAIN_TEXT: &str = "Sorry, something went wrong on our side. Please try again.";

pub const METHOD_NOT_ALLOWED_TEXT: &str = "Method not allowed";

/// Body of every chat endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub ok: bool,
    pub reply: String,
    pub text: String,
    pub message: String,
    #[serde(flatten)]
    pub annotations: Annotations,
}

impl ChatReply {
    /// A reply with the same text under every field name and no annotations.
    pub fn plain(ok: bool, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            ok,
            reply: text.clone(),
            text: text.clone(),
            message: text,
            annotations: Annotations::default(),
        }
    }

    pub fn from_transition(ok: bool, transition: Transition) -> Self {
        Self {
            annotations: transition.annotations,
            ..Self::plain(ok, transition.prompt)
        }
    }

    /// Generic reply used when classification fails unexpectedly.
    pub fn try_again() -> Self {
        Self::plain(false, TRY_AGAIN_TEXT)
    }

    pub fn method_not_allowed() -> Self {
        Self::plain(false, METHOD_NOT_ALLOWED_TEXT)
    }
}

/// Classify a chat request and build its reply. Never panics.
///
/// A missing or blank message still gets the default postcode prompt, with
/// `ok: false` so the widget can tell nothing was understood.
pub fn synthesize(classifier: &IntakeClassifier, request: &ChatRequest) -> ChatReply {
    let message = request.message.as_deref().unwrap_or("");
    let ok = !message.trim().is_empty();

    reply_or_try_again(ok, || classifier.classify(message, &request.history))
}

/// Run `classify`, turning a panic into the try-again reply. Relies on the
/// unwinding panic strategy.
fn reply_or_try_again(ok: bool, classify: impl FnOnce() -> Transition) -> ChatReply {
    match panic::catch_unwind(AssertUnwindSafe(classify)) {
        Ok(transition) => ChatReply::from_transition(ok, transition),
        Err(_) => {
            error!("intake classification panicked; sending try-again reply");
            ChatReply::try_again()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ASK_POSTCODE_PROMPT;
    use crate::types::{Stage, Turn};

    fn request(message: Option<&str>) -> ChatRequest {
        ChatRequest {
            message: message.map(str::to_string),
            history: Vec::new(),
        }
    }

    #[test]
    fn text_is_duplicated_under_every_field() {
        let reply = synthesize(&IntakeClassifier::new(), &request(Some("hello")));
        assert!(reply.ok);
        assert_eq!(reply.reply, reply.text);
        assert_eq!(reply.text, reply.message);
    }

    #[test]
    fn annotations_are_flattened_into_the_body() {
        let reply = synthesize(&IntakeClassifier::new(), &request(Some("LS10 1AB")));
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["postcode"], "LS101AB");
        assert_eq!(json["local_area"], true);
        assert_eq!(json["next_step"], "waste_type");
        assert!(json.get("waste_type").is_none());
        assert!(json.get("annotations").is_none());
    }

    #[test]
    fn missing_message_gets_default_prompt() {
        let reply = synthesize(&IntakeClassifier::new(), &request(None));
        assert!(!reply.ok);
        assert_eq!(reply.reply, ASK_POSTCODE_PROMPT);
        assert_eq!(reply.annotations.next_step, Some(Stage::AskPostcode));
    }

    #[test]
    fn history_is_forwarded_to_the_classifier() {
        let req = ChatRequest {
            message: Some("household".into()),
            history: vec![Turn::bot("What type of rubbish is it?")],
        };
        let json = serde_json::to_value(synthesize(&IntakeClassifier::new(), &req)).unwrap();
        assert_eq!(json["waste_type"], "household");
        assert_eq!(json["next_step"], "extras");
    }

    #[test]
    fn identical_requests_serialize_identically() {
        let c = IntakeClassifier::new();
        let req = request(Some("My postcode is LS10 1AB"));
        let a = serde_json::to_string(&synthesize(&c, &req)).unwrap();
        let b = serde_json::to_string(&synthesize(&c, &req)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn panicking_classification_becomes_try_again() {
        let reply = reply_or_try_again(true, || panic!("rule table bug"));
        assert!(!reply.ok);
        assert_eq!(reply.reply, TRY_AGAIN_TEXT);
        assert_eq!(reply.annotations, Annotations::default());
    }

    #[test]
    fn method_not_allowed_reply() {
        let reply = ChatReply::method_not_allowed();
        assert!(!reply.ok);
        assert_eq!(reply.text, "Method not allowed");
    }
}
