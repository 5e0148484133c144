// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intake state machine for the haulchat chat widget.
//!
//! Classifies each customer message into the next step of the
//! postcode → waste type → extras → photos → quote flow and builds the
//! reply the widget renders. No state is kept between requests.

pub mod classifier;
pub mod extract;
pub mod history;
pub mod postcode;
pub mod reply;
pub mod rules;
pub mod types;

pub use classifier::{IntakeClassifier, Transition};
pub use extract::{ChatRequest, extract_request};
pub use postcode::{LocalityPolicy, Postcode, find_postcode, normalize, validate_postcode};
pub use reply::{ChatReply, synthesize};
pub use types::{Annotations, ExtraItem, ExtraKind, Role, Stage, Turn, WasteType};
