// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    body::Body,
    extract::{DefaultBodyLimit, Request},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::{self as axum_middleware, Next},
    response::Response,
    routing::{any, get, post, put},
};
use haulchat_core::{HaulError, JobStore, PhotoStore};
use haulchat_intake::IntakeClassifier;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::auth::{AuthConfig, auth_middleware};
use crate::{handlers, quote, upload};

/// Health state for the unauthenticated health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub classifier: Arc<IntakeClassifier>,
    pub jobs: Arc<dyn JobStore>,
    pub photos: Arc<dyn PhotoStore>,
    /// Authentication configuration for the quote endpoints.
    pub auth: AuthConfig,
    pub health: HealthState,
}

/// Gateway server configuration (mirrors `[server]` from haulchat-config).
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed to call the browser-facing endpoints.
    pub allowed_origins: Vec<String>,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
    /// Directory served read-only under `/photos`.
    pub photo_root: PathBuf,
}

/// Build the gateway router.
///
/// Routes:
/// - `/api/chat` (any method, public)
/// - POST `/api/quote-start`, `/api/quote-photos-signed-urls`, `/api/quote-finish` (bearer auth)
/// - PUT `/api/uploads/{*path}` (signed URL)
/// - POST `/api/upload` (multipart, public)
/// - GET `/photos/{*path}`, GET `/health`
pub fn build_router(config: &GatewayConfig, state: GatewayState) -> Router {
    let auth_state = state.auth.clone();

    let chat_routes = Router::new()
        .route("/api/chat", any(handlers::chat))
        .route("/api/upload", post(upload::post_upload))
        .layer(cors_layer(&config.allowed_origins, Method::POST))
        .with_state(state.clone());

    let quote_routes = Router::new()
        .route("/api/quote-start", post(quote::quote_start))
        .route(
            "/api/quote-photos-signed-urls",
            post(quote::quote_photos_signed_urls),
        )
        .route("/api/quote-finish", post(quote::quote_finish))
        .route_layer(axum_middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ))
        .with_state(state.clone());

    let upload_routes = Router::new()
        .route("/api/uploads/{*path}", put(upload::put_signed_upload))
        .layer(cors_layer(&config.allowed_origins, Method::PUT))
        .with_state(state.clone());

    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state)
        .nest_service("/photos", ServeDir::new(&config.photo_root));

    Router::new()
        .merge(chat_routes)
        .merge(quote_routes)
        .merge(upload_routes)
        .merge(public_routes)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(preflight_no_content))
}

/// CORS policy for one route group: the configured origins, `method` plus
/// `OPTIONS`, and the headers the widget sends.
fn cors_layer(origins: &[String], method: Method) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring unusable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([method, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Preflight answers are 204 with an empty body.
async fn preflight_no_content(request: Request, next: Next) -> Response {
    let is_options = request.method() == Method::OPTIONS;
    let response = next.run(request).await;
    if !is_options || response.status() != StatusCode::OK {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    parts.status = StatusCode::NO_CONTENT;
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.remove(header::CONTENT_TYPE);
    Response::from_parts(parts, Body::empty())
}

/// Start the gateway server and run it until `shutdown` resolves.
pub async fn start_server(
    config: &GatewayConfig,
    state: GatewayState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), HaulError> {
    let app = build_router(config, state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| HaulError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| HaulError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("Gateway server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_config_debug() {
        let config = GatewayConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            allowed_origins: vec!["https://haulchat.co.uk".to_string()],
            max_upload_bytes: 1024,
            photo_root: PathBuf::from("/tmp/photos"),
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
        assert!(debug.contains("haulchat.co.uk"));
    }

    #[test]
    fn unusable_origins_are_skipped() {
        let _layer = cors_layer(
            &["https://ok.example".to_string(), "bad\norigin".to_string()],
            Method::POST,
        );
    }
}
