// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stateless intake classification.
//!
//! Each request is classified from the current message plus, when the
//! caller forwards it, the last bot turn. The transition function works the
//! same with or without that prior stage; history only adds signal.

use tracing::debug;

use crate::history;
use crate::postcode::{LocalityPolicy, Postcode};
use crate::rules::{RULES, TurnInput};
use crate::types::{Annotations, Stage, Turn};

/// Result of one classification: the prompt to show and the annotations
/// for the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Name of the rule that fired.
    pub rule: &'static str,
    /// User-facing reply text.
    pub prompt: &'static str,
    pub annotations: Annotations,
}

impl Transition {
    pub fn next_step(&self) -> Option<Stage> {
        self.annotations.next_step
    }
}

/// Keyword-driven intake classifier.
#[derive(Debug, Clone, Default)]
pub struct IntakeClassifier {
    locality: LocalityPolicy,
}

impl IntakeClassifier {
    /// Create a classifier with the default locality policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with a custom locality policy.
    pub fn with_locality(locality: LocalityPolicy) -> Self {
        Self { locality }
    }

    pub fn locality(&self) -> &LocalityPolicy {
        &self.locality
    }

    /// Classify a message in the context of the caller-supplied history.
    pub fn classify(&self, message: &str, history: &[Turn]) -> Transition {
        self.transition(history::prior_stage(history), message)
    }

    /// Evaluate the rule table for `message`, given the stage the bot last
    /// asked about (if known). First matching rule wins.
    pub fn transition(&self, prior: Option<Stage>, message: &str) -> Transition {
        let input = self.prepare(prior, message);

        let rule = RULES
            .iter()
            .find(|rule| (rule.applies)(&input))
            .unwrap_or_else(|| &RULES[RULES.len() - 1]);
        let (prompt, annotations) = (rule.respond)(&input);

        debug!(
            rule = rule.name,
            prior = ?prior,
            next_step = ?annotations.next_step,
            postcode = annotations.postcode.as_deref(),
            "intake message classified"
        );

        Transition {
            rule: rule.name,
            prompt,
            annotations,
        }
    }

    fn prepare(&self, prior: Option<Stage>, message: &str) -> TurnInput {
        let postcode = Postcode::find(message);
        let local_area = postcode.as_ref().map(|p| self.locality.is_local(p));
        TurnInput {
            lower: message.trim().to_lowercase(),
            postcode,
            local_area,
            prior,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{
        ASK_POSTCODE_PROMPT, BOOKING_PROMPT, EXTRAS_PROMPT, GREETING_PROMPT,
        INVALID_POSTCODE_PROMPT, PHOTOS_PROMPT, PRICE_PROMPT, QUOTE_PROMPT, WASTE_TYPE_PROMPT,
    };
    use crate::types::{ExtraItem, ExtraKind, WasteType};

    fn classifier() -> IntakeClassifier {
        IntakeClassifier::new()
    }

    #[test]
    fn postcode_in_sentence_asks_for_waste_type() {
        let t = classifier().classify("My postcode is LS10 1AB", &[]);
        assert_eq!(t.rule, "postcode");
        assert_eq!(t.prompt, WASTE_TYPE_PROMPT);
        assert_eq!(t.annotations.postcode.as_deref(), Some("LS101AB"));
        assert_eq!(t.annotations.local_area, Some(true));
        assert_eq!(t.next_step(), Some(Stage::WasteType));
    }

    #[test]
    fn non_local_postcode_is_accepted_without_saying_so() {
        let t = classifier().classify("WF99 9ZZ", &[]);
        assert_eq!(t.next_step(), Some(Stage::WasteType));
        assert_eq!(t.annotations.local_area, Some(false));
        let lower = t.prompt.to_lowercase();
        for word in ["local", "area", "outside", "cover"] {
            assert!(!lower.contains(word), "reply mentions {word}: {}", t.prompt);
        }
    }

    #[test]
    fn waste_type_after_waste_question() {
        let history = vec![Turn::bot("Thanks! what type of rubbish is it?")];
        let t = classifier().classify("household", &history);
        assert_eq!(t.annotations.waste_type, Some(WasteType::Household));
        assert_eq!(t.next_step(), Some(Stage::Extras));
        assert_eq!(t.prompt, EXTRAS_PROMPT);
    }

    #[test]
    fn waste_keyword_advances_without_history() {
        let t = classifier().classify("It's mostly garden waste", &[]);
        assert_eq!(t.rule, "waste_type");
        assert_eq!(t.annotations.waste_type, Some(WasteType::Green));
    }

    #[test]
    fn none_after_extras_prompt_moves_to_photos() {
        let history = vec![Turn::bot(EXTRAS_PROMPT)];
        let t = classifier().classify("none", &history);
        assert_eq!(t.next_step(), Some(Stage::Photos));
        assert_eq!(t.prompt, PHOTOS_PROMPT);
        assert_eq!(t.annotations.extras, Some(vec![]));
    }

    #[test]
    fn extras_items_after_extras_prompt() {
        let history = vec![Turn::bot(EXTRAS_PROMPT)];
        let t = classifier().classify("4 tyres and two tins of paint", &history);
        assert_eq!(t.rule, "extras_answer");
        assert_eq!(t.next_step(), Some(Stage::Photos));
        assert_eq!(
            t.annotations.extras,
            Some(vec![
                ExtraItem {
                    item: ExtraKind::Tyres,
                    quantity: 4
                },
                ExtraItem {
                    item: ExtraKind::Paint,
                    quantity: 1
                },
            ])
        );
    }

    #[test]
    fn waste_keyword_after_extras_prompt_still_sets_waste_type() {
        let history = vec![Turn::bot(EXTRAS_PROMPT)];
        for msg in ["just a sofa", "2 mattresses and a sofa"] {
            let t = classifier().classify(msg, &history);
            assert_eq!(t.rule, "waste_type", "{msg}");
            assert_eq!(t.annotations.waste_type, Some(WasteType::Bulky));
            assert_eq!(t.next_step(), Some(Stage::Extras));
            assert_eq!(t.annotations.extras, None);
        }
    }

    #[test]
    fn without_history_waste_keywords_win_over_extras() {
        let t = classifier().classify("2 mattresses", &[]);
        assert_eq!(t.rule, "waste_type");
        assert_eq!(t.annotations.waste_type, Some(WasteType::Bulky));
    }

    #[test]
    fn extras_keywords_without_waste_keywords() {
        let t = classifier().classify("4 tyres and some paint", &[]);
        assert_eq!(t.rule, "extras_answer");
        assert_eq!(t.next_step(), Some(Stage::Photos));
    }

    #[test]
    fn bare_no_is_an_extras_answer() {
        let t = classifier().classify("No", &[]);
        assert_eq!(t.next_step(), Some(Stage::Photos));
    }

    #[test]
    fn description_after_photos_prompt_moves_to_quote() {
        let history = vec![Turn::bot(PHOTOS_PROMPT)];
        let t = classifier().classify("about ten bin bags and an old desk", &history);
        assert_eq!(t.rule, "photo_description");
        assert_eq!(t.prompt, QUOTE_PROMPT);
        assert_eq!(t.next_step(), Some(Stage::Quote));
    }

    #[test]
    fn keyword_rules_win_after_photos_prompt() {
        let history = vec![Turn::bot(PHOTOS_PROMPT)];
        let cases = [
            ("how much will it cost?", "price", Some(Stage::AskPostcode)),
            ("I want to book", "booking", None),
            ("household", "waste_type", Some(Stage::Extras)),
            ("none", "extras_answer", Some(Stage::Photos)),
        ];
        for (msg, rule, next) in cases {
            let t = classifier().classify(msg, &history);
            assert_eq!(t.rule, rule, "{msg}");
            assert_eq!(t.next_step(), next, "{msg}");
        }
    }

    #[test]
    fn greeting_after_photos_prompt_is_a_description() {
        let history = vec![Turn::bot(PHOTOS_PROMPT)];
        let t = classifier().classify("hello", &history);
        assert_eq!(t.rule, "photo_description");
        assert_eq!(t.next_step(), Some(Stage::Quote));
    }

    #[test]
    fn price_intent_asks_for_postcode() {
        for msg in ["How much do you charge?", "can I get a QUOTE", "what's the cost"] {
            let t = classifier().classify(msg, &[]);
            assert_eq!(t.rule, "price", "{msg}");
            assert_eq!(t.prompt, PRICE_PROMPT);
            assert_eq!(t.next_step(), Some(Stage::AskPostcode));
        }
    }

    #[test]
    fn booking_intent_points_at_booking_action() {
        let t = classifier().classify("I want to book a collection", &[]);
        assert_eq!(t.rule, "booking");
        assert_eq!(t.prompt, BOOKING_PROMPT);
        assert_eq!(t.next_step(), None);
    }

    #[test]
    fn unmatched_message_gets_greeting() {
        let t = classifier().classify("hello there", &[]);
        assert_eq!(t.rule, "greeting");
        assert_eq!(t.prompt, GREETING_PROMPT);
        assert_eq!(t.next_step(), Some(Stage::AskPostcode));
    }

    #[test]
    fn empty_message_gets_postcode_prompt() {
        for msg in ["", "   ", "\n"] {
            let t = classifier().classify(msg, &[]);
            assert_eq!(t.rule, "empty");
            assert_eq!(t.prompt, ASK_POSTCODE_PROMPT);
        }
    }

    #[test]
    fn malformed_postcode_at_postcode_step_is_reprompted() {
        let history = vec![Turn::bot(ASK_POSTCODE_PROMPT)];
        let t = classifier().classify("LS10", &history);
        assert_eq!(t.rule, "invalid_postcode");
        assert_eq!(t.prompt, INVALID_POSTCODE_PROMPT);
        assert_eq!(t.next_step(), Some(Stage::AskPostcode));
    }

    #[test]
    fn malformed_postcode_without_history_falls_through() {
        let t = classifier().classify("LS10", &[]);
        assert_eq!(t.rule, "greeting");
    }

    #[test]
    fn postcode_wins_regardless_of_prior_stage() {
        let t = classifier().transition(Some(Stage::Photos), "actually it's WF1 1AA");
        assert_eq!(t.rule, "postcode");
        assert_eq!(t.annotations.postcode.as_deref(), Some("WF11AA"));
        assert_eq!(t.annotations.local_area, Some(true));
    }

    #[test]
    fn custom_locality_policy_is_used() {
        let c = IntakeClassifier::with_locality(LocalityPolicy::new("WF", ["LS1"]));
        assert_eq!(
            c.classify("WF99 9ZZ", &[]).annotations.local_area,
            Some(true)
        );
        assert_eq!(
            c.classify("LS10 1AB", &[]).annotations.local_area,
            Some(false)
        );
    }

    #[test]
    fn classification_is_idempotent() {
        let c = classifier();
        let history = vec![Turn::bot(EXTRAS_PROMPT)];
        for msg in ["LS10 1AB", "household", "none", "how much", "", "book"] {
            assert_eq!(c.classify(msg, &history), c.classify(msg, &history));
        }
    }
}
