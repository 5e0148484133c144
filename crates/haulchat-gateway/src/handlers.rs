// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat and health handlers.
//!
//! The chat endpoint always answers HTTP 200 (204 for `OPTIONS`) so the
//! widget never has to handle transport errors.

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, warn};

use haulchat_core::HealthStatus;
use haulchat_intake::{ChatReply, ChatRequest, extract_request, synthesize};

use crate::server::GatewayState;

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub job_store: String,
    pub photo_store: String,
}

/// `/api/chat`, any method.
pub async fn chat(
    State(state): State<GatewayState>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }
    if method != Method::POST {
        return Json(ChatReply::method_not_allowed()).into_response();
    }

    let request = match body {
        Ok(bytes) => parse_chat_body(&headers, &bytes),
        Err(rejection) => {
            warn!(error = %rejection, "chat body could not be read");
            ChatRequest::default()
        }
    };

    let reply = synthesize(&state.classifier, &request);
    debug!(
        ok = reply.ok,
        history = request.history.len(),
        next_step = ?reply.annotations.next_step,
        "chat reply sent"
    );
    Json(reply).into_response()
}

/// Turn a raw chat body into a request.
///
/// JSON is tried first whatever the content type, since some embeds send JSON
/// as `text/plain` to avoid a preflight. A non-JSON body that was not declared
/// as JSON is taken as the message text itself.
pub fn parse_chat_body(headers: &HeaderMap, bytes: &[u8]) -> ChatRequest {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return ChatRequest::default();
    }

    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(bytes) {
        return extract_request(&value);
    }

    let declared_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("json"));
    if declared_json {
        debug!("malformed JSON chat body");
        return ChatRequest::default();
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => ChatRequest::from_message(text.trim()),
        Err(_) => ChatRequest::default(),
    }
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let job_store = describe(state.jobs.health_check().await);
    let photo_store = describe(state.photos.health_check().await);
    let status = if job_store == "healthy" { "ok" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
        job_store,
        photo_store,
    })
}

fn describe(result: Result<HealthStatus, haulchat_core::HaulError>) -> String {
    match result {
        Ok(HealthStatus::Healthy) => "healthy".to_string(),
        Ok(HealthStatus::Degraded(reason)) => format!("degraded: {reason}"),
        Ok(HealthStatus::Unhealthy(reason)) => format!("unhealthy: {reason}"),
        Err(e) => format!("unhealthy: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[test]
    fn json_body_is_extracted() {
        let req = parse_chat_body(&headers("application/json"), br#"{"text":"hello"}"#);
        assert_eq!(req.message.as_deref(), Some("hello"));
    }

    #[test]
    fn json_sent_as_text_plain_is_still_json() {
        let req = parse_chat_body(&headers("text/plain"), br#"{"message":"LS10 1AB"}"#);
        assert_eq!(req.message.as_deref(), Some("LS10 1AB"));
    }

    #[test]
    fn raw_text_body_is_the_message() {
        let req = parse_chat_body(&headers("text/plain"), b"  how much?  ");
        assert_eq!(req.message.as_deref(), Some("how much?"));
        let req = parse_chat_body(&HeaderMap::new(), b"book");
        assert_eq!(req.message.as_deref(), Some("book"));
    }

    #[test]
    fn malformed_json_is_no_message() {
        let req = parse_chat_body(&headers("application/json"), b"{\"message\": ");
        assert_eq!(req, ChatRequest::default());
    }

    #[test]
    fn empty_and_binary_bodies_are_no_message() {
        assert_eq!(parse_chat_body(&HeaderMap::new(), b""), ChatRequest::default());
        assert_eq!(parse_chat_body(&HeaderMap::new(), b" \n"), ChatRequest::default());
        assert_eq!(
            parse_chat_body(&HeaderMap::new(), &[0xff, 0xfe, 0x00]),
            ChatRequest::default()
        );
    }

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            uptime_secs: 42,
            job_store: "healthy".to_string(),
            photo_store: "healthy".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"uptime_secs\":42"));
    }
}
