//! The track store seam used by the HTTP layer.
//!
//! Handlers hold an `Arc<dyn TrackStore>` so the backing engine can be
//! swapped (Postgres in production, in-memory for development and tests).

use async_trait::async_trait;

use crate::models::track::{TrackRecord, UpsertedTrack};
use crate::repositories::TrackRepo;
use crate::DbPool;

/// Failure of the backing storage. Never leaves a partial write behind.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Track content must not be empty")]
    EmptyContent,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Identifier-keyed track storage.
///
/// `upsert` and `delete` are atomic per identifier; reads never observe a
/// partially written record.
#[async_trait]
pub trait TrackStore: Send + Sync {
    /// Create the track, or replace its content and refresh `updated_at`.
    async fn upsert(&self, identifier: &str, content: &str) -> Result<UpsertedTrack, StoreError>;

    /// Fetch a track, `None` if the identifier is unknown.
    async fn get(&self, identifier: &str) -> Result<Option<TrackRecord>, StoreError>;

    /// Delete a track, returning whether it existed.
    async fn delete(&self, identifier: &str) -> Result<bool, StoreError>;
}

/// Postgres-backed store delegating to [`TrackRepo`].
#[derive(Clone)]
pub struct PgTrackStore {
    pool: DbPool,
}

impl PgTrackStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrackStore for PgTrackStore {
    async fn upsert(&self, identifier: &str, content: &str) -> Result<UpsertedTrack, StoreError> {
        if content.is_empty() {
            return Err(StoreError::EmptyContent);
        }
        let upserted = TrackRepo::upsert(&self.pool, identifier, content).await?;
        tracing::debug!(
            identifier,
            created = upserted.created,
            "Track upserted in postgres",
        );
        Ok(upserted)
    }

    async fn get(&self, identifier: &str) -> Result<Option<TrackRecord>, StoreError> {
        Ok(TrackRepo::find_by_identifier(&self.pool, identifier).await?)
    }

    async fn delete(&self, identifier: &str) -> Result<bool, StoreError> {
        Ok(TrackRepo::delete_by_identifier(&self.pool, identifier).await?)
    }
}
