// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authenticated quote endpoints: job creation, signed upload slots, and
//! quote finalization.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use haulchat_core::{
    HaulError, JobId, JobStatus, MAX_PHOTOS_PER_REQUEST, NewJob, QuoteUpdate, SignedUpload,
};
use haulchat_intake::validate_postcode;
use haulchat_quote::{QuoteSummary, calculate_loads, is_quotable};

use crate::error::ApiError;
use crate::server::GatewayState;

pub const MISSING_DATA: &str = "Missing required data";

pub const INVALID_REQUEST: &str = "Invalid request";

#[derive(Debug, Serialize)]
pub struct QuoteStartResponse {
    pub job_id: JobId,
}

#[derive(Debug, Default, Deserialize)]
pub struct SignedUrlsRequest {
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub count: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SignedUrlsResponse {
    pub uploads: Vec<SignedUpload>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuoteFinishRequest {
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub estimated_yards: Option<f64>,
    #[serde(default)]
    pub fixed_price_total: Option<f64>,
    #[serde(default)]
    pub photo_paths: Option<Vec<String>>,
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| HaulError::InvalidRequest(rejection.body_text()).into())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// POST /api/quote-start
pub async fn quote_start(
    State(state): State<GatewayState>,
    body: Result<Json<NewJob>, JsonRejection>,
) -> Result<Json<QuoteStartResponse>, ApiError> {
    let mut job = json_body(body)?;
    job.postcode = job
        .postcode
        .map(|raw| validate_postcode(&raw).unwrap_or(raw));

    let job_id = state.jobs.create_job(job).await?;
    info!(job_id = %job_id, "quote started");
    Ok(Json(QuoteStartResponse { job_id }))
}

/// POST /api/quote-photos-signed-urls
pub async fn quote_photos_signed_urls(
    State(state): State<GatewayState>,
    body: Result<Json<SignedUrlsRequest>, JsonRejection>,
) -> Result<Json<SignedUrlsResponse>, ApiError> {
    let request = json_body(body)?;

    let Some(job_id) = non_blank(request.job_id).map(JobId) else {
        return Err(HaulError::InvalidRequest(INVALID_REQUEST.to_string()).into());
    };
    let count = request
        .count
        .and_then(|c| usize::try_from(c).ok())
        .filter(|c| (1..=MAX_PHOTOS_PER_REQUEST).contains(c))
        .ok_or_else(|| HaulError::InvalidRequest(INVALID_REQUEST.to_string()))?;

    if state.jobs.get_job(&job_id).await?.is_none() {
        return Err(HaulError::NotFound {
            kind: "job",
            id: job_id.to_string(),
        }
        .into());
    }

    let uploads = state.photos.issue_signed_uploads(&job_id, count).await?;
    Ok(Json(SignedUrlsResponse { uploads }))
}

/// POST /api/quote-finish
pub async fn quote_finish(
    State(state): State<GatewayState>,
    body: Result<Json<QuoteFinishRequest>, JsonRejection>,
) -> Result<Json<QuoteSummary>, ApiError> {
    let request = json_body(body)?;

    let positive = |v: Option<f64>| v.filter(|v| v.is_finite() && *v > 0.0);
    let (Some(job_id), Some(estimated_yards), Some(fixed_price_total)) = (
        non_blank(request.job_id).map(JobId),
        positive(request.estimated_yards),
        positive(request.fixed_price_total),
    ) else {
        return Err(HaulError::InvalidRequest(MISSING_DATA.to_string()).into());
    };
    if !is_quotable(estimated_yards) {
        return Err(HaulError::InvalidRequest(INVALID_REQUEST.to_string()).into());
    }

    let loads = calculate_loads(estimated_yards);
    let summary = QuoteSummary::new(&loads, fixed_price_total);

    state
        .jobs
        .update_quote(
            &job_id,
            QuoteUpdate {
                estimated_yards,
                recommended_loads: loads,
                fixed_price_total,
                photo_paths: request.photo_paths.unwrap_or_default(),
                status: JobStatus::Quoted,
            },
        )
        .await?;

    info!(
        job_id = %job_id,
        loads = summary.loads_to_book.len(),
        fixed_price_total,
        "quote finished"
    );
    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_request_tolerates_missing_fields() {
        let req: QuoteFinishRequest = serde_json::from_str("{}").unwrap();
        assert!(req.job_id.is_none());
        assert!(req.photo_paths.is_none());
    }

    #[test]
    fn quote_start_response_shape() {
        let json = serde_json::to_value(QuoteStartResponse {
            job_id: JobId("abc".into()),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"job_id": "abc"}));
    }
}
