// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the `JobStore` trait.

use async_trait::async_trait;
use tracing::{debug, info};

use haulchat_core::{
    AdapterType, HaulError, HealthStatus, Job, JobId, JobStore, NewJob, PluginAdapter,
    QuoteUpdate,
};

use crate::database::{Database, map_tr_err};
use crate::queries;

/// SQLite-backed job store.
///
/// Wraps a [`Database`] handle and delegates to the typed query modules.
#[derive(Clone)]
pub struct SqliteJobStore {
    db: Database,
}

impl SqliteJobStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open the database at `path`, run migrations, and wrap it.
    pub async fn open(path: &str) -> Result<Self, HaulError> {
        let db = Database::open(path).await?;
        info!(path, "job store ready");
        Ok(Self { db })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Checkpoint the WAL before shutdown.
    pub async fn close(&self) -> Result<(), HaulError> {
        self.db.checkpoint().await
    }
}

#[async_trait]
impl PluginAdapter for SqliteJobStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::JobStore
    }

    async fn health_check(&self) -> Result<HealthStatus, HaulError> {
        self.db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl JobStore for SqliteJobStore {
    async fn create_job(&self, job: NewJob) -> Result<JobId, HaulError> {
        let id = queries::jobs::insert_job(&self.db, job).await?;
        debug!(job_id = %id, "job created");
        Ok(id)
    }

    async fn update_quote(&self, id: &JobId, update: QuoteUpdate) -> Result<(), HaulError> {
        let status = update.status;
        match queries::jobs::update_quote(&self.db, id, update).await? {
            0 => Err(HaulError::NotFound {
                kind: "job",
                id: id.to_string(),
            }),
            _ => {
                debug!(job_id = %id, %status, "job quote updated");
                Ok(())
            }
        }
    }

    async fn get_job(&self, id: &JobId) -> Result<Option<Job>, HaulError> {
        queries::jobs::get_job(&self.db, id).await
    }
}
