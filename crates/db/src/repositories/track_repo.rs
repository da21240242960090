//! Repository for the `tracks` table.

use sqlx::PgPool;

use crate::models::track::{TrackRecord, UpsertedTrack};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, identifier, content, uploaded_at, updated_at";

/// Provides identifier-keyed access to stored tracks.
pub struct TrackRepo;

impl TrackRepo {
    /// Insert a track, or replace the content of the existing one.
    ///
    /// A single `INSERT .. ON CONFLICT (identifier) DO UPDATE` statement, so
    /// concurrent uploads of the same identifier never produce two rows and
    /// the last writer's content wins. `uploaded_at` is only set on insert.
    /// `xmax = 0` holds exactly for a row version created by this insert.
    pub async fn upsert(
        pool: &PgPool,
        identifier: &str,
        content: &str,
    ) -> Result<UpsertedTrack, sqlx::Error> {
        let query = format!(
            "INSERT INTO tracks (identifier, content) \
             VALUES ($1, $2) \
             ON CONFLICT (identifier) DO UPDATE SET \
                 content = EXCLUDED.content, \
                 updated_at = NOW() \
             RETURNING {COLUMNS}, (xmax = 0) AS created"
        );
        sqlx::query_as::<_, UpsertedTrack>(&query)
            .bind(identifier)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// Find a track by its client-chosen identifier.
    pub async fn find_by_identifier(
        pool: &PgPool,
        identifier: &str,
    ) -> Result<Option<TrackRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks WHERE identifier = $1");
        sqlx::query_as::<_, TrackRecord>(&query)
            .bind(identifier)
            .fetch_optional(pool)
            .await
    }

    /// Delete a track. Returns `true` if a row was removed.
    pub async fn delete_by_identifier(pool: &PgPool, identifier: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tracks WHERE identifier = $1")
            .bind(identifier)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
