// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Load banding and quote summaries.
//!
//! Waste volume is booked as a sequence of fixed container sizes ("loads").
//! This crate decomposes an estimated volume into those sizes and builds the
//! summary returned to the widget when a quote is finalized.

pub mod bands;
pub mod summary;

pub use bands::{LOAD_BANDS, MAX_ESTIMATED_YARDS, calculate_loads, is_quotable, total_yards};
pub use summary::{QUOTE_DISCLAIMER, QuoteSummary};
