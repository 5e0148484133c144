// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Photo upload storage.

use async_trait::async_trait;

use crate::error::HaulError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{JobId, SignedUpload, StoredPhoto, UploadGrant};

/// Storage for job photos, with pre-signed upload slots and public URLs.
#[async_trait]
pub trait PhotoStore: PluginAdapter {
    /// Issues `count` signed upload slots under the job's folder.
    async fn issue_signed_uploads(
        &self,
        job: &JobId,
        count: usize,
    ) -> Result<Vec<SignedUpload>, HaulError>;

    /// Verifies a grant for `path` and stores `bytes` there.
    async fn accept_signed_upload(
        &self,
        path: &str,
        grant: &UploadGrant,
        bytes: Vec<u8>,
    ) -> Result<StoredPhoto, HaulError>;

    /// Stores a file received directly (multipart) under the job's folder.
    async fn store_photo(
        &self,
        job: &JobId,
        file_name: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<StoredPhoto, HaulError>;
}
