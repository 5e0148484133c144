// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits behind the gateway endpoints.
//!
//! Every collaborator extends [`PluginAdapter`] and uses `#[async_trait]`
//! so the gateway can hold them as trait objects.

pub mod adapter;
pub mod jobs;
pub mod photos;

pub use adapter::PluginAdapter;
pub use jobs::JobStore;
pub use photos::PhotoStore;
