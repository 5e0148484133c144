// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait shared by all collaborators.

use async_trait::async_trait;

use crate::error::HaulError;
use crate::types::{AdapterType, HealthStatus};

/// Identity and health reporting for a collaborator.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this collaborator instance.
    fn name(&self) -> &str;

    /// Returns what kind of collaborator this is.
    fn adapter_type(&self) -> AdapterType;

    /// Performs a health check and returns the current status.
    async fn health_check(&self) -> Result<HealthStatus, HaulError>;
}
