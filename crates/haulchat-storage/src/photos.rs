// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filesystem photo store.
//!
//! Photos live under `{root}/{job_id}/{uuid}.{ext}` and are served publicly
//! from `{public_base_url}/photos/{path}`. Pre-signed uploads go through
//! `PUT {public_base_url}/api/uploads/{path}?expires=..&signature=..`.

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use haulchat_config::model::{ServerConfig, StorageConfig};
use haulchat_core::{
    AdapterType, HaulError, HealthStatus, JobId, MAX_PHOTOS_PER_REQUEST, PhotoStore,
    PluginAdapter, SignedUpload, StoredPhoto, UploadGrant,
};

use crate::signing::UrlSigner;

/// Extensions kept from client file names; anything else is stored as `.jpg`.
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "heic", "gif"];

const DEFAULT_EXTENSION: &str = "jpg";

/// Photos stored as plain files on local disk.
#[derive(Debug)]
pub struct FsPhotoStore {
    root: PathBuf,
    public_base_url: String,
    signer: UrlSigner,
    ttl: Duration,
}

impl FsPhotoStore {
    pub fn new(
        root: impl Into<PathBuf>,
        public_base_url: &str,
        signer: UrlSigner,
        ttl: Duration,
    ) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            signer,
            ttl,
        }
    }

    /// Build the store from configuration, generating a signing key when
    /// none is configured.
    pub fn from_config(storage: &StorageConfig, server: &ServerConfig) -> Self {
        let signer = match &storage.signing_secret {
            Some(secret) => UrlSigner::new(secret.as_bytes().to_vec()),
            None => {
                info!("no storage.signing_secret configured; using a per-process key");
                UrlSigner::random()
            }
        };
        Self::new(
            &storage.upload_dir,
            &server.public_base_url,
            signer,
            Duration::from_secs(storage.signed_url_ttl_secs),
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Public URL for a stored path.
    pub fn public_url(&self, path: &str) -> String {
        format!("{}/photos/{path}", self.public_base_url)
    }

    fn upload_url(&self, path: &str, grant: &UploadGrant) -> String {
        format!(
            "{}/api/uploads/{path}?expires={}&signature={}",
            self.public_base_url, grant.expires, grant.signature
        )
    }

    async fn write(&self, path: &str, bytes: Vec<u8>) -> Result<StoredPhoto, HaulError> {
        if bytes.is_empty() {
            return Err(HaulError::upload("empty upload"));
        }
        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| upload_io_err("could not create photo folder", e))?;
        }
        let size = bytes.len();
        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| upload_io_err("could not store photo", e))?;
        debug!(path, size, "photo stored");
        Ok(StoredPhoto {
            path: path.to_string(),
            url: self.public_url(path),
        })
    }
}

fn upload_io_err(message: &str, e: std::io::Error) -> HaulError {
    HaulError::Upload {
        message: message.to_string(),
        source: Some(Box::new(e)),
    }
}

/// Whether `segment` is safe as a single path component.
fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Validate a stored-photo path: exactly `{job_id}/{file}` with safe segments.
pub fn validate_photo_path(path: &str) -> Result<(), HaulError> {
    let mut segments = path.split('/');
    let valid = matches!(
        (segments.next(), segments.next(), segments.next()),
        (Some(job), Some(file), None) if is_safe_segment(job) && is_safe_segment(file)
    ) && Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));

    if valid {
        Ok(())
    } else {
        Err(HaulError::upload(format!("invalid photo path: {path}")))
    }
}

fn validate_job_folder(job: &JobId) -> Result<(), HaulError> {
    if is_safe_segment(job.as_str()) {
        Ok(())
    } else {
        Err(HaulError::InvalidRequest(format!("invalid job id: {job}")))
    }
}

/// Extension to store a client file under.
fn extension_for(file_name: Option<&str>) -> &'static str {
    let ext = file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    ext.and_then(|ext| ALLOWED_EXTENSIONS.iter().copied().find(|allowed| *allowed == ext))
        .unwrap_or(DEFAULT_EXTENSION)
}

#[async_trait]
impl PluginAdapter for FsPhotoStore {
    fn name(&self) -> &str {
        "filesystem"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::PhotoStore
    }

    async fn health_check(&self) -> Result<HealthStatus, HaulError> {
        match tokio::fs::metadata(&self.root).await {
            Ok(meta) if meta.is_dir() => Ok(HealthStatus::Healthy),
            Ok(_) => Ok(HealthStatus::Unhealthy(format!(
                "{} is not a directory",
                self.root.display()
            ))),
            // Created lazily on first upload.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HealthStatus::Degraded(
                format!("{} does not exist yet", self.root.display()),
            )),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}

#[async_trait]
impl PhotoStore for FsPhotoStore {
    async fn issue_signed_uploads(
        &self,
        job: &JobId,
        count: usize,
    ) -> Result<Vec<SignedUpload>, HaulError> {
        if !(1..=MAX_PHOTOS_PER_REQUEST).contains(&count) {
            return Err(HaulError::InvalidRequest(format!(
                "count must be between 1 and {MAX_PHOTOS_PER_REQUEST}"
            )));
        }
        validate_job_folder(job)?;

        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let expires = chrono::Utc::now().timestamp().saturating_add(ttl);

        let uploads = (0..count)
            .map(|_| -> Result<SignedUpload, HaulError> {
                let path = format!("{job}/{}.{DEFAULT_EXTENSION}", uuid::Uuid::new_v4());
                let grant = self.signer.sign(&path, expires)?;
                Ok(SignedUpload {
                    upload_url: self.upload_url(&path, &grant),
                    path,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(job_id = %job, count, "signed upload URLs issued");
        Ok(uploads)
    }

    async fn accept_signed_upload(
        &self,
        path: &str,
        grant: &UploadGrant,
        bytes: Vec<u8>,
    ) -> Result<StoredPhoto, HaulError> {
        validate_photo_path(path)?;
        self.signer
            .verify(path, grant, chrono::Utc::now().timestamp())?;
        self.write(path, bytes).await
    }

    async fn store_photo(
        &self,
        job: &JobId,
        file_name: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<StoredPhoto, HaulError> {
        validate_job_folder(job)?;
        let path = format!(
            "{job}/{}.{}",
            uuid::Uuid::new_v4(),
            extension_for(file_name)
        );
        self.write(&path, bytes).await
    }
}
