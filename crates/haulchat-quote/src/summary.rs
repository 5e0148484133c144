// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The summary returned to the widget once a quote is finalized.

use serde::{Deserialize, Serialize};

use haulchat_core::RecommendedLoads;

/// Shown with every fixed-price quote.
pub const QUOTE_DISCLAIMER: &str =
    "Final price subject to on-site verification if waste differs from photos provided.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub loads_to_book: Vec<u32>,
    pub fixed_price_total: f64,
    pub disclaimer: String,
}

impl QuoteSummary {
    pub fn new(loads: &RecommendedLoads, fixed_price_total: f64) -> Self {
        Self {
            loads_to_book: loads.loads.clone(),
            fixed_price_total,
            disclaimer: QUOTE_DISCLAIMER.to_string(),
        }
    }
}
