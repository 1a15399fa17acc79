//! PostgreSQL implementation of the detections table.

use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::models::{DetectionRecord, NewDetection};
use crate::config::GlacierConfig;
use crate::error::GlacierError;

/// PostgreSQL-backed detection storage using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresDetections {
    pool: PgPool,
}

impl PostgresDetections {
    /// Creates the store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool from the configuration and applies the
    /// embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns a [`GlacierError::PersistenceError`] if the database is
    /// unreachable or a migration fails.
    pub async fn connect(config: &GlacierConfig) -> Result<Self, GlacierError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(|e| GlacierError::PersistenceError(format!("Error connecting: {e}")))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| GlacierError::PersistenceError(format!("Error migrating: {e}")))?;

        tracing::info!("detections table ready");
        Ok(Self::new(pool))
    }

    /// Inserts one detection row and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns a [`GlacierError::PersistenceError`] on database failure.
    pub async fn insert(&self, detection: &NewDetection) -> Result<i64, GlacierError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO detections (timestamp, detection_type, confidence, coordinates) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(Utc::now())
        .bind(&detection.detection_type)
        .bind(detection.confidence)
        .bind(detection.coordinates_text())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| GlacierError::PersistenceError(format!("Error saving detection: {e}")))?;

        Ok(id)
    }

    /// Loads the newest `limit` rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`GlacierError::PersistenceError`] on database failure.
    pub async fn latest(&self, limit: i64) -> Result<Vec<DetectionRecord>, GlacierError> {
        let rows = sqlx::query_as::<_, (i64, DateTime<Utc>, String, f64, String)>(
            "SELECT id, timestamp, detection_type, confidence, coordinates FROM detections \
             ORDER BY timestamp DESC, id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            GlacierError::PersistenceError(format!("Error retrieving detections: {e}"))
        })?;

        Ok(rows
            .into_iter()
            .map(
                |(id, timestamp, detection_type, confidence, coordinates)| DetectionRecord {
                    id,
                    timestamp,
                    detection_type,
                    confidence,
                    coordinates,
                },
            )
            .collect())
    }
}
