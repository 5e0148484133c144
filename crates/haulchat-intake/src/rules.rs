// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The intake rule table: keyword lists, prompt wording, and the ordered
//! (predicate, response) pairs evaluated by the classifier.
//!
//! Rule order is the only control flow. Rewording a prompt or adding a
//! keyword means editing data here, not the classifier.

use std::sync::LazyLock;

use regex::Regex;

use crate::postcode::Postcode;
use crate::types::{Annotations, ExtraItem, ExtraKind, Stage, WasteType};

pub const ASK_POSTCODE_PROMPT: &str = "What's your postcode? We'll use it to work out your quote.";

pub const GREETING_PROMPT: &str = "Hi! I can help you get your rubbish collected. \
     Send me your postcode for a quick quote, or tap Book Now if you already know what you need.";

pub const INVALID_POSTCODE_PROMPT: &str = "That doesn't look like a valid UK postcode. \
     What's your postcode? For example: LS10 1AB.";

pub const WASTE_TYPE_PROMPT: &str = "Thanks! What type of rubbish is it: household, business, \
     trade, green waste, or single bulky items?";

pub const EXTRAS_PROMPT: &str = "Got it. Do you have any of these extra items: mattress, fridge, \
     freezer, tyres, paint, sofa or armchair? Tell me how many of each, or say \"none\".";

pub const PHOTOS_PROMPT: &str = "Great. Please upload 1-3 photos of the waste, \
     or send a short description of what needs collecting.";

pub const QUOTE_PROMPT: &str =
    "Thanks, that's everything we need. We'll prepare your fixed-price quote now.";

pub const PRICE_PROMPT: &str = "Prices depend on how much rubbish there is. \
     What's your postcode? I'll walk you through a quick quote.";

pub const BOOKING_PROMPT: &str = "You can book straight away with the Book Now button. \
     If you'd like an estimate first, just send me your postcode.";

pub const GARDEN_PROMPT: &str = "We clear garden waste too. What's your postcode?";

/// Marker phrases embedded in the prompts above, checked in order against
/// the last bot utterance to reconstruct the current stage.
pub const STAGE_MARKERS: &[(&str, Stage)] = &[
    ("what type of rubbish", Stage::WasteType),
    ("extra items", Stage::Extras),
    ("photo", Stage::Photos),
    ("fixed-price quote", Stage::Quote),
    ("postcode", Stage::AskPostcode),
];

/// Waste-type keywords, first match wins.
pub const WASTE_KEYWORDS: &[(&str, WasteType)] = &[
    ("household", WasteType::Household),
    ("business", WasteType::Business),
    ("commercial", WasteType::Business),
    ("trade", WasteType::Trade),
    ("green", WasteType::Green),
    ("garden", WasteType::Green),
    ("bulky", WasteType::Bulky),
    ("single", WasteType::Bulky),
    ("sofa", WasteType::Bulky),
    ("fridge", WasteType::Bulky),
    ("mattress", WasteType::Bulky),
];

/// Extra-item stems; a word starting with the stem counts as the item.
pub const EXTRA_KEYWORDS: &[(&str, ExtraKind)] = &[
    ("mattress", ExtraKind::Mattress),
    ("fridge", ExtraKind::Fridge),
    ("freezer", ExtraKind::Freezer),
    ("tyre", ExtraKind::Tyres),
    ("paint", ExtraKind::Paint),
    ("sofa", ExtraKind::Sofa),
    ("armchair", ExtraKind::Armchair),
];

/// Whole-message answers meaning "no extras".
pub const NO_EXTRAS_EXACT: &[&str] = &["no", "none"];

/// Phrases meaning "no extras" anywhere in the message.
pub const NO_EXTRAS_PHRASES: &[&str] = &["no extras", "nothing extra"];

pub const PRICE_KEYWORDS: &[&str] = &["how much", "price", "quote", "cost", "charge"];

pub const BOOKING_KEYWORDS: &[&str] = &["book"];

pub const GARDEN_KEYWORDS: &[&str] = &["garden"];

const NUMBER_WORDS: &[(&str, u32)] = &[
    ("a", 1),
    ("an", 1),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
];

/// Compact text that starts the way a postcode does (`LS10`, `WF1 1A`).
static POSTCODE_ATTEMPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{1,2}[0-9][a-z0-9]{0,5}$").unwrap());

/// Everything a rule may look at for one turn, computed once up front.
#[derive(Debug, Clone)]
pub struct TurnInput {
    /// The message, trimmed and lowercased.
    pub lower: String,
    /// First postcode found in the message.
    pub postcode: Option<Postcode>,
    /// Locality of `postcode`, when there is one.
    pub local_area: Option<bool>,
    /// Stage the last bot turn asked about, when history was supplied.
    pub prior: Option<Stage>,
}

/// One entry of the ordered rule table.
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&TurnInput) -> bool,
    pub respond: fn(&TurnInput) -> (&'static str, Annotations),
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// The intake rules in evaluation order. The final rule always applies.
pub static RULES: &[Rule] = &[
    Rule {
        name: "empty",
        applies: |t| t.lower.is_empty(),
        respond: |_| (ASK_POSTCODE_PROMPT, Annotations::next(Stage::AskPostcode)),
    },
    Rule {
        name: "postcode",
        applies: |t| t.postcode.is_some(),
        respond: |t| {
            (
                WASTE_TYPE_PROMPT,
                Annotations {
                    postcode: t.postcode.as_ref().map(|p| p.as_str().to_string()),
                    local_area: t.local_area,
                    next_step: Some(Stage::WasteType),
                    ..Annotations::default()
                },
            )
        },
    },
    Rule {
        name: "invalid_postcode",
        applies: |t| t.prior == Some(Stage::AskPostcode) && looks_like_postcode_attempt(&t.lower),
        respond: |_| (INVALID_POSTCODE_PROMPT, Annotations::next(Stage::AskPostcode)),
    },
    Rule {
        name: "waste_type",
        applies: |t| classify_waste(&t.lower).is_some(),
        respond: |t| {
            (
                EXTRAS_PROMPT,
                Annotations {
                    waste_type: classify_waste(&t.lower),
                    next_step: Some(Stage::Extras),
                    ..Annotations::default()
                },
            )
        },
    },
    Rule {
        name: "extras_answer",
        applies: |t| is_extras_answer(&t.lower),
        respond: respond_photos,
    },
    Rule {
        name: "price",
        applies: |t| contains_any(&t.lower, PRICE_KEYWORDS),
        respond: |_| (PRICE_PROMPT, Annotations::next(Stage::AskPostcode)),
    },
    Rule {
        name: "booking",
        applies: |t| contains_any(&t.lower, BOOKING_KEYWORDS),
        respond: |_| (BOOKING_PROMPT, Annotations::default()),
    },
    // Shadowed by "waste_type" while "garden" is a waste keyword; kept so
    // the table reads in the documented order.
    Rule {
        name: "garden",
        applies: |t| contains_any(&t.lower, GARDEN_KEYWORDS),
        respond: |_| (GARDEN_PROMPT, Annotations::next(Stage::AskPostcode)),
    },
    // Only takes over from the catch-all, after every keyword rule.
    Rule {
        name: "photo_description",
        applies: |t| t.prior == Some(Stage::Photos),
        respond: |_| (QUOTE_PROMPT, Annotations::next(Stage::Quote)),
    },
    Rule {
        name: "greeting",
        applies: |_| true,
        respond: |_| (GREETING_PROMPT, Annotations::next(Stage::AskPostcode)),
    },
];

fn respond_photos(t: &TurnInput) -> (&'static str, Annotations) {
    (
        PHOTOS_PROMPT,
        Annotations {
            extras: Some(parse_extras(&t.lower)),
            next_step: Some(Stage::Photos),
            ..Annotations::default()
        },
    )
}

/// The prompt the bot uses when asking about `stage`.
pub fn prompt_for(stage: Stage) -> &'static str {
    match stage {
        Stage::AskPostcode => ASK_POSTCODE_PROMPT,
        Stage::WasteType => WASTE_TYPE_PROMPT,
        Stage::Extras => EXTRAS_PROMPT,
        Stage::Photos => PHOTOS_PROMPT,
        Stage::Quote => QUOTE_PROMPT,
    }
}

pub fn contains_any(lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| lower.contains(k))
}

/// Map a lowercased message to a waste type by substring match.
pub fn classify_waste(lower: &str) -> Option<WasteType> {
    WASTE_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, waste)| *waste)
}

/// Whether a lowercased message answers the extras question.
pub fn is_extras_answer(lower: &str) -> bool {
    let bare = lower.trim_matches(|c: char| !c.is_alphanumeric());
    NO_EXTRAS_EXACT.contains(&bare)
        || contains_any(lower, NO_EXTRAS_PHRASES)
        || EXTRA_KEYWORDS.iter().any(|(stem, _)| lower.contains(stem))
}

/// Read extra items and quantities from a lowercased message.
///
/// A quantity is a number or number word directly before the item word;
/// otherwise it is 1. Repeated mentions add up.
pub fn parse_extras(lower: &str) -> Vec<ExtraItem> {
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let mut items: Vec<ExtraItem> = Vec::new();
    for (i, word) in words.iter().enumerate() {
        let Some(kind) = EXTRA_KEYWORDS
            .iter()
            .find(|(stem, _)| word.starts_with(stem))
            .map(|(_, kind)| *kind)
        else {
            continue;
        };

        let quantity = i
            .checked_sub(1)
            .and_then(|prev| parse_quantity(words[prev]))
            .unwrap_or(1);
        if quantity == 0 {
            continue;
        }

        match items.iter_mut().find(|item| item.item == kind) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
            None => items.push(ExtraItem {
                item: kind,
                quantity,
            }),
        }
    }
    items
}

fn parse_quantity(word: &str) -> Option<u32> {
    word.parse::<u32>().ok().or_else(|| {
        NUMBER_WORDS
            .iter()
            .find(|(w, _)| *w == word)
            .map(|(_, n)| *n)
    })
}

/// A short token that starts like a postcode but may not be one.
fn looks_like_postcode_attempt(lower: &str) -> bool {
    if lower.split_whitespace().count() > 2 {
        return false;
    }
    let compact: String = lower.chars().filter(|c| !c.is_whitespace()).collect();
    POSTCODE_ATTEMPT.is_match(&compact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_rule_always_applies() {
        let last = RULES.last().unwrap();
        let input = TurnInput {
            lower: "anything at all".into(),
            postcode: None,
            local_area: None,
            prior: None,
        };
        assert_eq!(last.name, "greeting");
        assert!((last.applies)(&input));
    }

    #[test]
    fn rule_names_are_unique() {
        let mut names: Vec<&str> = RULES.iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RULES.len());
    }

    #[test]
    fn waste_keywords_map_to_tags() {
        assert_eq!(classify_waste("household stuff"), Some(WasteType::Household));
        assert_eq!(classify_waste("commercial unit"), Some(WasteType::Business));
        assert_eq!(classify_waste("trade waste"), Some(WasteType::Trade));
        assert_eq!(classify_waste("garden clearance"), Some(WasteType::Green));
        assert_eq!(classify_waste("just an old sofa"), Some(WasteType::Bulky));
        assert_eq!(classify_waste("hello"), None);
    }

    #[test]
    fn extras_answers() {
        assert!(is_extras_answer("none"));
        assert!(is_extras_answer("no."));
        assert!(is_extras_answer("no extras thanks"));
        assert!(is_extras_answer("nothing extra"));
        assert!(is_extras_answer("2 tyres"));
        assert!(!is_extras_answer("nope, not sure"));
        assert!(!is_extras_answer("hello"));
    }

    #[test]
    fn parses_quantities() {
        let items = parse_extras("2 mattresses, a fridge and three tyres");
        assert_eq!(
            items,
            vec![
                ExtraItem {
                    item: ExtraKind::Mattress,
                    quantity: 2
                },
                ExtraItem {
                    item: ExtraKind::Fridge,
                    quantity: 1
                },
                ExtraItem {
                    item: ExtraKind::Tyres,
                    quantity: 3
                },
            ]
        );
    }

    #[test]
    fn repeated_mentions_add_up() {
        let items = parse_extras("1 sofa, another sofa, 0 paint");
        assert_eq!(
            items,
            vec![ExtraItem {
                item: ExtraKind::Sofa,
                quantity: 2
            }]
        );
    }

    #[test]
    fn none_parses_to_no_items() {
        assert!(parse_extras("none").is_empty());
    }

    #[test]
    fn postcode_attempts() {
        assert!(looks_like_postcode_attempt("ls10"));
        assert!(looks_like_postcode_attempt("wf1 1a"));
        assert!(!looks_like_postcode_attempt("2 sofas"));
        assert!(!looks_like_postcode_attempt("household"));
        assert!(!looks_like_postcode_attempt("it is ls10 maybe"));
    }
}
