// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Job record persistence.

use async_trait::async_trait;

use crate::error::HaulError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Job, JobId, NewJob, QuoteUpdate};

/// Record store for booking jobs.
#[async_trait]
pub trait JobStore: PluginAdapter {
    /// Inserts a new job in the `created` state and returns its id.
    async fn create_job(&self, job: NewJob) -> Result<JobId, HaulError>;

    /// Writes the quote fields onto an existing job.
    ///
    /// Returns [`HaulError::NotFound`] when no job has the given id.
    async fn update_quote(&self, id: &JobId, update: QuoteUpdate) -> Result<(), HaulError>;

    /// Fetches a job by id.
    async fn get_job(&self, id: &JobId) -> Result<Option<Job>, HaulError>;
}
