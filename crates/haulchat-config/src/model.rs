// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelt key is an
//! error at startup rather than a silently ignored setting.

use serde::{Deserialize, Serialize};

/// Top-level haulchat configuration.
///
/// Every section is optional and defaults to values suitable for local
/// development.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HaulchatConfig {
    /// HTTP listener and widget-facing settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Backend credential for the quote endpoints.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Job database and photo storage.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Intake classifier tuning.
    #[serde(default)]
    pub intake: IntakeConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins the chat widget may be embedded on.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Base URL used when building signed upload and public photo URLs.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Largest accepted request body, including multipart uploads.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: default_allowed_origins(),
            public_base_url: default_public_base_url(),
            log_level: default_log_level(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ServerConfig {
    /// The `host:port` pair to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "https://haulchat.co.uk".to_string(),
        "https://www.haulchat.co.uk".to_string(),
    ]
}

fn default_public_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}

/// Bearer credential for the quote endpoints.
///
/// With no token configured every authenticated request is rejected.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    #[serde(default)]
    pub backend_token: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "backend_token",
                &self.backend_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Job database and photo storage configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite job database.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Directory photos are written under, one folder per job.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,

    /// HMAC key for signed upload URLs. A random key is generated per
    /// process when unset, so URLs do not survive a restart.
    #[serde(default)]
    pub signing_secret: Option<String>,

    /// How long a signed upload URL stays valid.
    #[serde(default = "default_signed_url_ttl_secs")]
    pub signed_url_ttl_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            upload_dir: default_upload_dir(),
            signing_secret: None,
            signed_url_ttl_secs: default_signed_url_ttl_secs(),
        }
    }
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("database_path", &self.database_path)
            .field("upload_dir", &self.upload_dir)
            .field(
                "signing_secret",
                &self.signing_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("signed_url_ttl_secs", &self.signed_url_ttl_secs)
            .finish()
    }
}

fn default_database_path() -> String {
    dirs::data_local_dir()
        .map(|d| d.join("haulchat/haulchat.db").display().to_string())
        .unwrap_or_else(|| "haulchat.db".to_string())
}

fn default_upload_dir() -> String {
    dirs::data_local_dir()
        .map(|d| d.join("haulchat/photos").display().to_string())
        .unwrap_or_else(|| "photos".to_string())
}

fn default_signed_url_ttl_secs() -> u64 {
    15 * 60
}

/// Intake classifier configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IntakeConfig {
    /// Outward-code prefix of the home region. Empty disables prefix matching.
    #[serde(default = "default_regional_prefix")]
    pub regional_prefix: String,

    /// Further outward codes served as local.
    #[serde(default = "default_inner_city_outward_codes")]
    pub inner_city_outward_codes: Vec<String>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            regional_prefix: default_regional_prefix(),
            inner_city_outward_codes: default_inner_city_outward_codes(),
        }
    }
}

fn default_regional_prefix() -> String {
    "LS".to_string()
}

fn default_inner_city_outward_codes() -> Vec<String> {
    ["WF1", "WF2", "BD1", "BD3", "HD1", "HX1"]
        .into_iter()
        .map(String::from)
        .collect()
}
