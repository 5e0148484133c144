// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence for haulchat.
//!
//! Jobs live in a WAL-mode SQLite database with embedded migrations, accessed
//! through `tokio-rusqlite`'s single background thread. Photos are plain files
//! under a configurable directory, uploaded either directly or through
//! HMAC-signed, expiring upload URLs.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod photos;
pub mod queries;
pub mod signing;

pub use adapter::SqliteJobStore;
pub use database::Database;
pub use photos::FsPhotoStore;
pub use signing::UrlSigner;
