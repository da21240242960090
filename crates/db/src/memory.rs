//! In-memory track store.
//!
//! Writers take the map's write lock for the whole operation, which
//! serializes upserts and deletes per identifier exactly like the unique
//! constraint does in Postgres.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use trackshare_core::types::DbId;

use crate::models::track::{TrackRecord, UpsertedTrack};
use crate::store::{StoreError, TrackStore};

#[derive(Default)]
struct Inner {
    tracks: HashMap<String, TrackRecord>,
    next_id: DbId,
}

/// A [`TrackStore`] that keeps records in process memory.
#[derive(Default)]
pub struct MemoryTrackStore {
    inner: RwLock<Inner>,
}

impl MemoryTrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tracks.
    pub async fn len(&self) -> usize {
        self.inner.read().await.tracks.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TrackStore for MemoryTrackStore {
    async fn upsert(&self, identifier: &str, content: &str) -> Result<UpsertedTrack, StoreError> {
        if content.is_empty() {
            return Err(StoreError::EmptyContent);
        }

        let mut inner = self.inner.write().await;
        let now = Utc::now();

        if let Some(existing) = inner.tracks.get_mut(identifier) {
            existing.content = content.to_string();
            existing.updated_at = now.max(existing.updated_at);
            return Ok(UpsertedTrack {
                record: existing.clone(),
                created: false,
            });
        }

        inner.next_id += 1;
        let record = TrackRecord {
            id: inner.next_id,
            identifier: identifier.to_string(),
            content: content.to_string(),
            uploaded_at: now,
            updated_at: now,
        };
        inner.tracks.insert(identifier.to_string(), record.clone());

        Ok(UpsertedTrack {
            record,
            created: true,
        })
    }

    async fn get(&self, identifier: &str) -> Result<Option<TrackRecord>, StoreError> {
        Ok(self.inner.read().await.tracks.get(identifier).cloned())
    }

    async fn delete(&self, identifier: &str) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.tracks.remove(identifier).is_some())
    }
}
