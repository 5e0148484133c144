// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! UK postcode recognition, normalization, and locality.
//!
//! A postcode is one or two letters, a digit, an optional letter or digit,
//! a digit, and two letters. Canonical form is uppercase with all whitespace
//! removed (`LS10 1AB` → `LS101AB`). The outward code is everything before
//! the final three characters.

use std::sync::LazyLock;

use regex::Regex;

/// Postcode shape anywhere in free text, bounded by word breaks so that
/// quantities and partial tokens never match.
static POSTCODE_IN_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b[a-z]{1,2}[0-9][a-z0-9]?\s*[0-9][a-z]{2}\b").unwrap());

/// Whole-string postcode shape, applied to already-normalized candidates.
static POSTCODE_EXACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{1,2}[0-9][A-Z0-9]?[0-9][A-Z]{2}$").unwrap());

/// Length of the inward code (`1AB`), which is always the final three characters.
const INWARD_LEN: usize = 3;

/// A validated postcode in canonical compact form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Postcode(String);

impl Postcode {
    /// Validate an isolated candidate as a whole-string postcode.
    ///
    /// Casing and whitespace are ignored; anything else around the postcode
    /// makes the candidate invalid.
    pub fn parse(candidate: &str) -> Option<Self> {
        let normalized = normalize(candidate);
        POSTCODE_EXACT
            .is_match(&normalized)
            .then_some(Postcode(normalized))
    }

    /// Find the first postcode-shaped substring in free text.
    pub fn find(text: &str) -> Option<Self> {
        POSTCODE_IN_TEXT
            .find_iter(text)
            .find_map(|found| Self::parse(found.as_str()))
    }

    /// The canonical compact form, e.g. `LS101AB`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The postal district, e.g. `LS10` for `LS101AB`.
    pub fn outward(&self) -> &str {
        &self.0[..self.0.len() - INWARD_LEN]
    }

    /// The final three characters, e.g. `1AB`.
    pub fn inward(&self) -> &str {
        &self.0[self.0.len() - INWARD_LEN..]
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Postcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Uppercase and strip all whitespace.
pub fn normalize(candidate: &str) -> String {
    candidate
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Find and normalize the first postcode in `text`.
pub fn find_postcode(text: &str) -> Option<String> {
    Postcode::find(text).map(Postcode::into_string)
}

/// Strictly validate an isolated candidate, returning its canonical form.
pub fn validate_postcode(candidate: &str) -> Option<String> {
    Postcode::parse(candidate).map(Postcode::into_string)
}

/// Decides whether a postcode falls inside the service's local area.
///
/// A postcode is local when its outward code starts with the regional
/// prefix, or equals one of the enumerated inner-city outward codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalityPolicy {
    regional_prefix: String,
    inner_city: Vec<String>,
}

impl LocalityPolicy {
    /// Build a policy; codes are normalized the same way postcodes are.
    pub fn new<I, S>(regional_prefix: &str, inner_city: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            regional_prefix: normalize(regional_prefix),
            inner_city: inner_city
                .into_iter()
                .map(|code| normalize(code.as_ref()))
                .filter(|code| !code.is_empty())
                .collect(),
        }
    }

    pub fn is_local(&self, postcode: &Postcode) -> bool {
        let outward = postcode.outward();
        (!self.regional_prefix.is_empty() && outward.starts_with(&self.regional_prefix))
            || self.inner_city.iter().any(|code| code == outward)
    }
}

impl Default for LocalityPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_REGIONAL_PREFIX,
            DEFAULT_INNER_CITY_OUTWARD_CODES.iter().copied(),
        )
    }
}

/// Regional prefix used when no configuration overrides it.
pub const DEFAULT_REGIONAL_PREFIX: &str = "LS";

/// Inner-city outward codes outside the regional prefix that are still served locally.
pub const DEFAULT_INNER_CITY_OUTWARD_CODES: &[&str] =
    &["WF1", "WF2", "BD1", "BD3", "HD1", "HX1"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn casing_and_spacing_normalize_to_one_form() {
        for input in ["wf1 1aa", "WF11AA", "Wf1 1AA", "  wf1   1aa  "] {
            assert_eq!(find_postcode(input).as_deref(), Some("WF11AA"), "{input}");
        }
    }

    #[test]
    fn finds_postcode_inside_a_sentence() {
        assert_eq!(
            find_postcode("My postcode is LS10 1AB thanks").as_deref(),
            Some("LS101AB")
        );
        assert_eq!(
            find_postcode("collection from sw1a 1aa please").as_deref(),
            Some("SW1A1AA")
        );
    }

    #[test]
    fn first_postcode_wins() {
        assert_eq!(
            find_postcode("from LS1 4AP to WF2 8QR").as_deref(),
            Some("LS14AP")
        );
    }

    #[test]
    fn near_misses_are_not_postcodes() {
        for input in [
            "12345",
            "a 12",
            "I have 2 sofas and 3 fridges",
            "A12",
            "ABC12 3DE",
            "LS10 1A",
            "room 101 ab",
            "",
        ] {
            assert_eq!(find_postcode(input), None, "{input}");
        }
    }

    #[test]
    fn strict_validation_rejects_surrounding_text() {
        assert_eq!(validate_postcode("ls10 1ab").as_deref(), Some("LS101AB"));
        assert_eq!(validate_postcode("my postcode is LS10 1AB"), None);
        assert_eq!(validate_postcode("LS10 1AB!"), None);
        assert_eq!(validate_postcode("LS1"), None);
    }

    #[test]
    fn outward_and_inward_split() {
        let postcode = Postcode::parse("LS10 1AB").unwrap();
        assert_eq!(postcode.outward(), "LS10");
        assert_eq!(postcode.inward(), "1AB");

        let short = Postcode::parse("M1 1AE").unwrap();
        assert_eq!(short.outward(), "M1");
    }

    #[test]
    fn regional_prefix_is_local() {
        let policy = LocalityPolicy::default();
        assert!(policy.is_local(&Postcode::parse("LS10 1AB").unwrap()));
        assert!(policy.is_local(&Postcode::parse("LS1 4AP").unwrap()));
    }

    #[test]
    fn inner_city_codes_match_exactly() {
        let policy = LocalityPolicy::default();
        assert!(policy.is_local(&Postcode::parse("WF1 1AA").unwrap()));
        assert!(!policy.is_local(&Postcode::parse("WF10 1AA").unwrap()));
        assert!(!policy.is_local(&Postcode::parse("WF99 9ZZ").unwrap()));
    }

    #[test]
    fn custom_policy_normalizes_codes() {
        let policy = LocalityPolicy::new("m", ["sw1a"]);
        assert!(policy.is_local(&Postcode::parse("M4 5AB").unwrap()));
        assert!(policy.is_local(&Postcode::parse("SW1A 1AA").unwrap()));
        assert!(!policy.is_local(&Postcode::parse("LS10 1AB").unwrap()));
    }

    #[test]
    fn empty_prefix_matches_nothing() {
        let policy = LocalityPolicy::new("", Vec::<String>::new());
        assert!(!policy.is_local(&Postcode::parse("LS10 1AB").unwrap()));
    }
}
