// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Photo upload endpoints.
//!
//! Both answer HTTP 200 with `ok: false` on failure so the widget can show
//! the message inline.

use axum::{
    Json,
    body::Bytes,
    extract::{
        Multipart, Path, Query, State,
        multipart::MultipartRejection,
        rejection::{BytesRejection, QueryRejection},
    },
};
use serde::Serialize;
use tracing::{info, warn};

use haulchat_core::{HaulError, JobId, MAX_PHOTOS_PER_REQUEST, StoredPhoto, UploadGrant};

use crate::server::GatewayState;

/// Form field carrying the job id in multipart uploads.
const JOB_ID_FIELD: &str = "job_id";

/// Response body of both upload endpoints.
#[derive(Debug, Default, Serialize)]
pub struct UploadReply {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadReply {
    fn failed(err: &HaulError) -> Self {
        warn!(error = %err, "upload failed");
        Self {
            ok: false,
            error: Some(err.to_string()),
            ..Self::default()
        }
    }

    fn stored_one(photo: StoredPhoto) -> Self {
        Self {
            ok: true,
            path: Some(photo.path),
            url: Some(photo.url),
            ..Self::default()
        }
    }

    fn stored_many(photos: Vec<StoredPhoto>) -> Self {
        let (paths, urls): (Vec<_>, Vec<_>) = photos.into_iter().map(|p| (p.path, p.url)).unzip();
        Self {
            ok: true,
            paths,
            urls,
            ..Self::default()
        }
    }
}

/// PUT /api/uploads/{*path}
pub async fn put_signed_upload(
    State(state): State<GatewayState>,
    Path(path): Path<String>,
    grant: Result<Query<UploadGrant>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Json<UploadReply> {
    let result = async {
        let Query(grant) =
            grant.map_err(|_| HaulError::upload("missing or malformed upload signature"))?;
        let bytes = body.map_err(|e| HaulError::upload(format!("could not read upload: {e}")))?;
        state
            .photos
            .accept_signed_upload(&path, &grant, bytes.to_vec())
            .await
    }
    .await;

    Json(match result {
        Ok(photo) => {
            info!(path = %photo.path, "signed upload stored");
            UploadReply::stored_one(photo)
        }
        Err(err) => UploadReply::failed(&err),
    })
}

/// POST /api/upload (multipart)
pub async fn post_upload(
    State(state): State<GatewayState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Json<UploadReply> {
    Json(match store_multipart(&state, multipart).await {
        Ok(photos) => UploadReply::stored_many(photos),
        Err(err) => UploadReply::failed(&err),
    })
}

async fn store_multipart(
    state: &GatewayState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Vec<StoredPhoto>, HaulError> {
    let mut multipart =
        multipart.map_err(|e| HaulError::upload(format!("expected a multipart form: {e}")))?;

    let mut job_id: Option<String> = None;
    let mut files: Vec<(Option<String>, Bytes)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HaulError::upload(format!("malformed multipart body: {e}")))?
    {
        if field.name() == Some(JOB_ID_FIELD) {
            let text = field
                .text()
                .await
                .map_err(|e| HaulError::upload(format!("could not read job_id: {e}")))?;
            job_id = Some(text.trim().to_string());
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        if file_name.is_none() {
            continue;
        }
        if files.len() == MAX_PHOTOS_PER_REQUEST {
            return Err(HaulError::upload(format!(
                "at most {MAX_PHOTOS_PER_REQUEST} photos per upload"
            )));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| HaulError::upload(format!("could not read photo: {e}")))?;
        files.push((file_name, bytes));
    }

    let Some(job_id) = job_id.filter(|id| !id.is_empty()).map(JobId) else {
        return Err(HaulError::upload("job_id is required"));
    };
    if files.is_empty() {
        return Err(HaulError::upload("no photos in upload"));
    }
    if state.jobs.get_job(&job_id).await?.is_none() {
        return Err(HaulError::NotFound {
            kind: "job",
            id: job_id.to_string(),
        });
    }

    let mut stored = Vec::with_capacity(files.len());
    for (file_name, bytes) in files {
        stored.push(
            state
                .photos
                .store_photo(&job_id, file_name.as_deref(), bytes.to_vec())
                .await?,
        );
    }
    info!(job_id = %job_id, count = stored.len(), "photos uploaded");
    Ok(stored)
}
