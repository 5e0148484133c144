// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All access is serialized through tokio-rusqlite's single background
//! thread. Do not open further connections for writes.

use std::path::Path;

use haulchat_core::HaulError;
use tracing::debug;

use crate::migrations;

/// PRAGMAs applied to every new connection.
const CONNECTION_PRAGMAS: &str = "
    PRAGMA journal_mode = WAL;
    PRAGMA synchronous = NORMAL;
    PRAGMA foreign_keys = ON;
    PRAGMA busy_timeout = 5000;
";

/// Handle to the job database.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (creating if needed) the database at `path` and run migrations.
    ///
    /// The parent directory is created when missing.
    pub async fn open(path: &str) -> Result<Self, HaulError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| HaulError::Storage {
                    source: Box::new(e),
                })?;
            }
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| HaulError::Storage {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.initialize().await?;
        debug!(path, "job database opened");
        Ok(db)
    }

    /// Open a private in-memory database with migrations applied.
    pub async fn open_in_memory() -> Result<Self, HaulError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(|e| HaulError::Storage {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.initialize().await?;
        Ok(db)
    }

    async fn initialize(&self) -> Result<(), HaulError> {
        self.conn
            .call(|conn| -> Result<Result<(), HaulError>, rusqlite::Error> {
                conn.execute_batch(CONNECTION_PRAGMAS)?;
                Ok(migrations::run_migrations(conn))
            })
            .await
            .map_err(map_tr_err)?
    }

    /// The underlying async connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL so the main database file is self-contained.
    pub async fn checkpoint(&self) -> Result<(), HaulError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Convert a tokio-rusqlite error into `HaulError::Storage`.
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> HaulError {
    HaulError::Storage {
        source: Box::new(e),
    }
}
