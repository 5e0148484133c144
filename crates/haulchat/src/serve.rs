// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `haulchat serve` command implementation.
//!
//! Opens the job database and photo directory, builds the intake classifier
//! from configuration, and runs the HTTP gateway until SIGINT or SIGTERM.

use std::path::PathBuf;
use std::sync::Arc;

use haulchat_config::model::{HaulchatConfig, IntakeConfig};
use haulchat_core::HaulError;
use haulchat_gateway::{AuthConfig, GatewayConfig, GatewayState, HealthState, start_server};
use haulchat_intake::{IntakeClassifier, LocalityPolicy};
use haulchat_storage::{FsPhotoStore, SqliteJobStore};
use tracing::{info, warn};

/// Runs the `haulchat serve` command.
pub async fn run_serve(config: HaulchatConfig) -> Result<(), HaulError> {
    init_tracing(&config.server.log_level);

    info!("starting haulchat serve");

    let jobs = Arc::new(SqliteJobStore::open(&config.storage.database_path).await?);
    info!(path = %config.storage.database_path, "job store opened");

    let photos = Arc::new(FsPhotoStore::from_config(&config.storage, &config.server));
    info!(root = %photos.root().display(), "photo store ready");

    if config.auth.backend_token.is_none() {
        warn!("auth.backend_token is not set; quote endpoints will reject every request");
    }

    let state = GatewayState {
        classifier: Arc::new(build_classifier(&config.intake)),
        jobs: jobs.clone(),
        photos,
        auth: AuthConfig::new(config.auth.backend_token.clone()),
        health: HealthState::default(),
    };

    let gateway_config = GatewayConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        allowed_origins: config.server.allowed_origins.clone(),
        max_upload_bytes: config.server.max_upload_bytes,
        photo_root: PathBuf::from(&config.storage.upload_dir),
    };

    start_server(&gateway_config, state, shutdown_signal()).await?;

    if let Err(e) = jobs.close().await {
        warn!(error = %e, "WAL checkpoint on shutdown failed");
    }
    info!("haulchat serve shutdown complete");
    Ok(())
}

pub(crate) fn build_classifier(intake: &IntakeConfig) -> IntakeClassifier {
    IntakeClassifier::with_locality(LocalityPolicy::new(
        &intake.regional_prefix,
        &intake.inner_city_outward_codes,
    ))
}

/// Resolves on SIGINT (Ctrl+C) or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let terminate = async {
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(e) => {
                    warn!(error = %e, "failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        tokio::select! {
            _ = ctrl_c => info!("received SIGINT (Ctrl+C), initiating shutdown"),
            _ = terminate => info!("received SIGTERM, initiating shutdown"),
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await;
        info!("received Ctrl+C, initiating shutdown");
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` takes precedence over the
/// configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("haulchat={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifier_follows_intake_config() {
        let intake = IntakeConfig {
            regional_prefix: "WF".to_string(),
            inner_city_outward_codes: vec!["LS1".to_string()],
        };
        let classifier = build_classifier(&intake);
        let t = classifier.classify("WF99 9ZZ", &[]);
        assert_eq!(t.annotations.local_area, Some(true));
        let t = classifier.classify("LS10 1AB", &[]);
        assert_eq!(t.annotations.local_area, Some(false));
    }
}
