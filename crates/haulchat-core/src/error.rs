// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by every haulchat crate.

use thiserror::Error;

/// The primary error type used across collaborator traits and endpoints.
#[derive(Debug, Error)]
pub enum HaulError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Job store errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Photo store errors (filesystem writes, bad signatures, expired grants).
    #[error("upload error: {message}")]
    Upload {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The bearer credential was missing or did not match.
    #[error("Unauthorized")]
    Unauthorized,

    /// The caller sent a request the collaborator cannot act on.
    #[error("{0}")]
    InvalidRequest(String),

    /// A referenced record does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HaulError {
    /// Shorthand for an upload failure without an underlying source.
    pub fn upload(message: impl Into<String>) -> Self {
        HaulError::Upload {
            message: message.into(),
            source: None,
        }
    }
}
