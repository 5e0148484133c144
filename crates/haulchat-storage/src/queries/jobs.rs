// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Job CRUD operations.
//!
//! JSON-shaped columns (`extras`, `recommended_loads`, `photo_paths`) are
//! stored as serialized text.

use haulchat_core::{HaulError, Job, JobId, JobStatus, NewJob, QuoteUpdate};
use rusqlite::{OptionalExtension, params};

use crate::database::{Database, map_tr_err};

fn now() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, HaulError> {
    serde_json::to_string(value).map_err(|e| HaulError::Storage {
        source: Box::new(e),
    })
}

/// Row-level decode failure surfaced through rusqlite.
fn decode_err(
    column: usize,
    e: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
}

/// Insert a job in the `created` state and return its id.
pub async fn insert_job(db: &Database, job: NewJob) -> Result<JobId, HaulError> {
    let id = uuid::Uuid::new_v4().to_string();
    let extras = job.extras.as_ref().map(to_json).transpose()?;
    let created_at = now();
    let row_id = id.clone();

    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO jobs (id, postcode, waste_type, access_notes, service_used, extras,
                                   status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
                params![
                    row_id,
                    job.postcode,
                    job.waste_type,
                    job.access_notes,
                    job.service_used,
                    extras,
                    JobStatus::Created.to_string(),
                    created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

    Ok(JobId(id))
}

/// Write quote fields onto a job. Returns the number of rows changed.
pub async fn update_quote(
    db: &Database,
    id: &JobId,
    update: QuoteUpdate,
) -> Result<usize, HaulError> {
    let id = id.as_str().to_string();
    let loads = to_json(&update.recommended_loads)?;
    let photo_paths = to_json(&update.photo_paths)?;
    let updated_at = now();

    db.connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            conn.execute(
                "UPDATE jobs
                 SET estimated_yards = ?1, recommended_loads = ?2, fixed_price_total = ?3,
                     photo_paths = ?4, status = ?5, updated_at = ?6
                 WHERE id = ?7",
                params![
                    update.estimated_yards,
                    loads,
                    update.fixed_price_total,
                    photo_paths,
                    update.status.to_string(),
                    updated_at,
                    id,
                ],
            )
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch a job by id.
pub async fn get_job(db: &Database, id: &JobId) -> Result<Option<Job>, HaulError> {
    let id = id.as_str().to_string();
    db.connection()
        .call(move |conn| -> Result<Option<Job>, rusqlite::Error> {
            conn.query_row(
                "SELECT id, postcode, waste_type, access_notes, service_used, extras,
                        estimated_yards, recommended_loads, fixed_price_total, photo_paths,
                        status, created_at, updated_at
                 FROM jobs WHERE id = ?1",
                params![id],
                row_to_job,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Count jobs, optionally filtered by status.
pub async fn count_jobs(db: &Database, status: Option<JobStatus>) -> Result<i64, HaulError> {
    let status = status.map(|s| s.to_string());
    db.connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            match &status {
                Some(status) => conn.query_row(
                    "SELECT COUNT(*) FROM jobs WHERE status = ?1",
                    params![status],
                    |row| row.get(0),
                ),
                None => conn.query_row("SELECT COUNT(*) FROM jobs", [], |row| row.get(0)),
            }
        })
        .await
        .map_err(map_tr_err)
}

fn row_to_job(row: &rusqlite::Row<'_>) -> Result<Job, rusqlite::Error> {
    let extras: Option<String> = row.get(5)?;
    let loads: Option<String> = row.get(7)?;
    let photo_paths: String = row.get(9)?;
    let status: String = row.get(10)?;

    Ok(Job {
        id: JobId(row.get(0)?),
        details: NewJob {
            postcode: row.get(1)?,
            waste_type: row.get(2)?,
            access_notes: row.get(3)?,
            service_used: row.get(4)?,
            extras: extras
                .map(|s| serde_json::from_str(&s))
                .transpose()
                .map_err(|e| decode_err(5, e))?,
        },
        estimated_yards: row.get(6)?,
        recommended_loads: loads
            .map(|s| serde_json::from_str(&s))
            .transpose()
            .map_err(|e| decode_err(7, e))?,
        fixed_price_total: row.get(8)?,
        photo_paths: serde_json::from_str(&photo_paths).map_err(|e| decode_err(9, e))?,
        status: status.parse().map_err(|e| decode_err(10, e))?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}
