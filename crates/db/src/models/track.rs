//! Track record model.

use serde::Serialize;
use sqlx::FromRow;
use trackshare_core::types::{DbId, Timestamp};

/// A row from the `tracks` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct TrackRecord {
    #[serde(skip_serializing)]
    pub id: DbId,
    pub identifier: String,
    pub content: String,
    pub uploaded_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Result of an upsert: the stored record and whether it was newly inserted.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct UpsertedTrack {
    #[sqlx(flatten)]
    pub record: TrackRecord,
    pub created: bool,
}
