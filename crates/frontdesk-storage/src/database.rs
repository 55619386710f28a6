// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use frontdesk_core::FrontdeskError;
use tracing::debug;

/// Handle to the SQLite database used for session records.
pub struct Database {
    connection: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database at `path`, apply PRAGMAs, and run
    /// embedded migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, FrontdeskError> {
        let connection = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(map_storage_err)?;

        connection
            .call(move |conn| -> Result<(), FrontdeskError> {
                if wal_mode {
                    conn.execute_batch("PRAGMA journal_mode=WAL;")
                        .map_err(map_storage_err)?;
                }
                conn.execute_batch(
                    "PRAGMA synchronous=NORMAL;
                     PRAGMA busy_timeout=5000;
                     PRAGMA foreign_keys=ON;",
                )
                .map_err(map_storage_err)?;
                crate::migrations::run_migrations(conn).map_err(map_storage_err)?;
                Ok(())
            })
            .await
            .map_err(|e| match e {
                tokio_rusqlite::Error::Error(inner) => inner,
                other => map_storage_err(other),
            })?;

        debug!(path = %path, wal_mode, "database opened");
        Ok(Self { connection })
    }

    /// Returns the underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.connection
    }

    /// Checkpoint the WAL and flush pending writes.
    pub async fn close(&self) -> Result<(), FrontdeskError> {
        self.connection
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Map a tokio-rusqlite error into the crate-wide storage error.
pub fn map_tr_err(err: tokio_rusqlite::Error) -> FrontdeskError {
    FrontdeskError::Storage {
        source: Box::new(err),
    }
}

/// Map any storage-layer error (rusqlite, refinery, or a wrapped
/// tokio-rusqlite error) into the crate-wide storage error.
pub fn map_storage_err<E: std::error::Error + Send + Sync + 'static>(err: E) -> FrontdeskError {
    FrontdeskError::Storage {
        source: Box::new(err),
    }
}
