// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Job records and upload descriptors shared by the store and the gateway.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a job record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Health status reported by collaborator health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Collaborator is fully operational.
    Healthy,
    /// Collaborator is operational but experiencing issues.
    Degraded(String),
    /// Collaborator is not operational.
    Unhealthy(String),
}

/// Identifies the kind of collaborator behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AdapterType {
    JobStore,
    PhotoStore,
}

/// Job lifecycle: a job is created by quote-start and becomes quoted on finish.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Created,
    Quoted,
}

/// Fields submitted when a job is first created.
///
/// Every field is optional: the widget submits whatever the intake flow
/// managed to collect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewJob {
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub waste_type: Option<String>,
    #[serde(default)]
    pub access_notes: Option<String>,
    #[serde(default)]
    pub service_used: Option<String>,
    /// Free-form extras payload as sent by the widget.
    #[serde(default)]
    pub extras: Option<serde_json::Value>,
}

/// Load bands chosen for a job and their combined volume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedLoads {
    pub loads: Vec<u32>,
    pub total_yards: u32,
}

/// Fields written when a job is quoted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteUpdate {
    pub estimated_yards: f64,
    pub recommended_loads: RecommendedLoads,
    pub fixed_price_total: f64,
    pub photo_paths: Vec<String>,
    pub status: JobStatus,
}

/// A stored job record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    #[serde(flatten)]
    pub details: NewJob,
    pub estimated_yards: Option<f64>,
    pub recommended_loads: Option<RecommendedLoads>,
    pub fixed_price_total: Option<f64>,
    pub photo_paths: Vec<String>,
    pub status: JobStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Most photos accepted for a job in one request.
pub const MAX_PHOTOS_PER_REQUEST: usize = 6;

/// A pre-authorized upload slot handed to the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedUpload {
    /// Storage path relative to the photo root (`{job_id}/{uuid}.jpg`).
    pub path: String,
    /// URL the widget PUTs the file body to.
    #[serde(rename = "uploadUrl")]
    pub upload_url: String,
}

/// Expiry and signature presented with a signed upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadGrant {
    /// Unix timestamp (seconds) after which the grant is rejected.
    pub expires: i64,
    /// Hex-encoded HMAC over the path and expiry.
    pub signature: String,
}

/// A persisted photo and where it can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPhoto {
    pub path: String,
    pub url: String,
}
