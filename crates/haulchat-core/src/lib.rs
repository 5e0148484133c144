// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for haulchat.
//!
//! Holds the shared error type, the job and upload records exchanged with
//! the backing stores, and the collaborator traits the gateway calls at
//! flow boundaries (job creation, photo URL issuance, quote finalization).

pub mod error;
pub mod traits;
pub mod types;

pub use error::HaulError;
pub use traits::{JobStore, PhotoStore, PluginAdapter};
pub use types::{
    AdapterType, HealthStatus, Job, JobId, JobStatus, MAX_PHOTOS_PER_REQUEST, NewJob, QuoteUpdate,
    RecommendedLoads, SignedUpload, StoredPhoto, UploadGrant,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haul_error_messages() {
        assert_eq!(HaulError::Unauthorized.to_string(), "Unauthorized");
        assert_eq!(
            HaulError::InvalidRequest("Invalid request".into()).to_string(),
            "Invalid request"
        );
        let not_found = HaulError::NotFound {
            kind: "job",
            id: "abc".into(),
        };
        assert_eq!(not_found.to_string(), "job not found: abc");
        assert_eq!(
            HaulError::upload("disk full").to_string(),
            "upload error: disk full"
        );
    }

    #[test]
    fn job_status_round_trips_through_strings() {
        use std::str::FromStr;

        for status in [JobStatus::Created, JobStatus::Quoted] {
            let s = status.to_string();
            assert_eq!(JobStatus::from_str(&s).unwrap(), status);
        }
        assert_eq!(JobStatus::Quoted.to_string(), "quoted");
    }

    #[test]
    fn new_job_accepts_partial_payloads() {
        let job: NewJob = serde_json::from_str(r#"{"postcode": "LS10 1AB"}"#).unwrap();
        assert_eq!(job.postcode.as_deref(), Some("LS10 1AB"));
        assert!(job.waste_type.is_none());
        assert!(job.extras.is_none());
    }

    #[test]
    fn signed_upload_uses_widget_field_name() {
        let upload = SignedUpload {
            path: "job-1/photo.jpg".into(),
            upload_url: "http://localhost/api/uploads/job-1/photo.jpg".into(),
        };
        let json = serde_json::to_value(&upload).unwrap();
        assert!(json.get("uploadUrl").is_some());
        assert!(json.get("upload_url").is_none());
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_job_store<T: JobStore>() {}
        fn _assert_photo_store<T: PhotoStore>() {}
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
    }
}
