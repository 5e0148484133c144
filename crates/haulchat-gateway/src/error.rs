// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping from `HaulError` to HTTP responses on the quote endpoints.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use haulchat_core::HaulError;
use serde::Serialize;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A `HaulError` on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub HaulError);

impl From<HaulError> for ApiError {
    fn from(err: HaulError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            HaulError::Unauthorized => StatusCode::UNAUTHORIZED,
            HaulError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HaulError::InvalidRequest(_)
            | HaulError::NotFound { .. }
            | HaulError::Storage { .. }
            | HaulError::Upload { .. }
            | HaulError::Config(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status != StatusCode::UNAUTHORIZED {
            tracing::warn!(status = status.as_u16(), error = %self.0, "request failed");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert_eq!(
            ApiError(HaulError::Unauthorized).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError(HaulError::InvalidRequest("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(HaulError::NotFound {
                kind: "job",
                id: "1".into()
            })
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(HaulError::Internal("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_response_serializes() {
        let json = serde_json::to_string(&ErrorResponse {
            error: "Missing required data".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"error":"Missing required data"}"#);
    }
}
