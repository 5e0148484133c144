// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HMAC-SHA256 signing of upload grants.
//!
//! A grant covers one storage path until an expiry timestamp. The signature
//! is the hex-encoded MAC of `"{path}\n{expires}"`.

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

use haulchat_core::{HaulError, UploadGrant};

type HmacSha256 = Hmac<Sha256>;

/// Length of a generated signing key.
const GENERATED_KEY_LEN: usize = 32;

/// Longest hex signature accepted before decoding.
const MAX_SIGNATURE_HEX_LEN: usize = 128;

/// Issues and verifies upload grants.
#[derive(Clone)]
pub struct UrlSigner {
    key: Vec<u8>,
}

impl std::fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlSigner")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl UrlSigner {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }

    /// A signer with a random key. Grants do not survive a restart.
    pub fn random() -> Self {
        let mut key = vec![0u8; GENERATED_KEY_LEN];
        rand::thread_rng().fill_bytes(&mut key);
        Self { key }
    }

    fn mac(&self, path: &str, expires: i64) -> Result<HmacSha256, HaulError> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| HaulError::Internal(format!("invalid signing key: {e}")))?;
        mac.update(path.as_bytes());
        mac.update(b"\n");
        mac.update(expires.to_string().as_bytes());
        Ok(mac)
    }

    /// Sign `path` until `expires` (unix seconds).
    pub fn sign(&self, path: &str, expires: i64) -> Result<UploadGrant, HaulError> {
        let signature = hex::encode(self.mac(path, expires)?.finalize().into_bytes());
        Ok(UploadGrant { expires, signature })
    }

    /// Check a grant for `path` at time `now` (unix seconds).
    pub fn verify(&self, path: &str, grant: &UploadGrant, now: i64) -> Result<(), HaulError> {
        if grant.expires < now {
            return Err(HaulError::upload("upload URL has expired"));
        }
        if grant.signature.len() > MAX_SIGNATURE_HEX_LEN {
            return Err(HaulError::upload("invalid upload signature"));
        }
        let expected = hex::decode(&grant.signature)
            .map_err(|_| HaulError::upload("invalid upload signature"))?;
        self.mac(path, grant.expires)?
            .verify_slice(&expected)
            .map_err(|_| HaulError::upload("invalid upload signature"))
    }
}
