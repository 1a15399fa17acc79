//! Persistence layer: the detections table and local documents.
//!
//! [`DetectionRepository`] selects between the PostgreSQL table and an
//! in-memory stand-in. [`local::LocalStore`] keeps the `user` and
//! `outburstEvents` documents.

pub mod local;
pub mod memory;
pub mod models;
pub mod postgres;

use memory::MemoryDetections;
use models::{DetectionRecord, NewDetection};
use postgres::PostgresDetections;

use crate::error::GlacierError;

/// Storage backend for detection records.
#[derive(Debug)]
pub enum DetectionRepository {
    /// Rows in the PostgreSQL `detections` table.
    Postgres(PostgresDetections),
    /// Rows kept in process memory.
    Memory(MemoryDetections),
}

impl DetectionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::Memory(MemoryDetections::new())
    }

    /// Inserts a row and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns a [`GlacierError::PersistenceError`] on database failure.
    pub async fn insert(&self, detection: &NewDetection) -> Result<i64, GlacierError> {
        match self {
            Self::Postgres(pg) => pg.insert(detection).await,
            Self::Memory(mem) => Ok(mem.insert(detection).await),
        }
    }

    /// Returns the newest `limit` rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`GlacierError::PersistenceError`] on database failure.
    pub async fn latest(&self, limit: i64) -> Result<Vec<DetectionRecord>, GlacierError> {
        match self {
            Self::Postgres(pg) => pg.latest(limit).await,
            Self::Memory(mem) => Ok(mem.latest(limit).await),
        }
    }
}
