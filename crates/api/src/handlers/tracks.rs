//! Handlers for track upload, retrieval, deletion and the summary read path.
//!
//! Writes are gated by [`RequireApiKey`]; reads are public. The summary
//! handler is the only place the decoder and statistics engine run: the
//! store never decodes anything itself.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use trackshare_core::display::StatisticsDisplay;
use trackshare_core::error::CoreError;
use trackshare_core::gpx;
use trackshare_core::statistics::{self, TrackBounds, TrackStatistics};
use trackshare_core::track::TrackPoint;
use trackshare_core::upload::validate_upload;
use trackshare_db::models::track::TrackRecord;

use crate::error::AppResult;
use crate::middleware::api_key::RequireApiKey;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "Track";

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Request body for `POST /tracks`.
#[derive(Debug, Deserialize)]
pub struct UploadTrackRequest {
    pub identifier: String,
    #[serde(alias = "gpx_content")]
    pub content: String,
}

/// Response body for a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadTrackResponse {
    pub created: bool,
    pub identifier: String,
    pub message: &'static str,
}

/// Decoded track with derived statistics.
#[derive(Debug, Serialize)]
pub struct TrackSummary {
    pub identifier: String,
    pub name: String,
    pub point_count: usize,
    pub statistics: TrackStatistics,
    pub display: StatisticsDisplay,
    pub bounds: Option<TrackBounds>,
    pub start: Option<TrackPoint>,
    pub end: Option<TrackPoint>,
}

// ---------------------------------------------------------------------------
// Write endpoints
// ---------------------------------------------------------------------------

/// POST /api/v1/tracks
///
/// Create a track or replace the content of an existing one.
/// Returns 201 when created and 200 when updated.
pub async fn upload_track(
    _key: RequireApiKey,
    State(state): State<AppState>,
    Json(input): Json<UploadTrackRequest>,
) -> AppResult<impl IntoResponse> {
    validate_upload(&input.identifier, &input.content)?;

    let upserted = state.store.upsert(&input.identifier, &input.content).await?;

    tracing::info!(
        identifier = %upserted.record.identifier,
        created = upserted.created,
        content_bytes = upserted.record.content.len(),
        "Track uploaded",
    );

    let (status, message) = if upserted.created {
        (StatusCode::CREATED, "Track uploaded successfully")
    } else {
        (StatusCode::OK, "Track updated successfully")
    };

    Ok((
        status,
        Json(DataResponse {
            data: UploadTrackResponse {
                created: upserted.created,
                identifier: upserted.record.identifier,
                message,
            },
        }),
    ))
}

/// DELETE /api/v1/tracks/{identifier}
///
/// Returns 204 when the track existed, 404 otherwise.
pub async fn delete_track(
    _key: RequireApiKey,
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> AppResult<StatusCode> {
    if !state.store.delete(&identifier).await? {
        return Err(not_found(identifier).into());
    }

    tracing::info!(%identifier, "Track deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Read endpoints
// ---------------------------------------------------------------------------

/// GET /api/v1/tracks/{identifier}
///
/// Return the stored document with its timestamps.
pub async fn get_track(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> AppResult<Json<DataResponse<TrackRecord>>> {
    let record = fetch(&state, identifier).await?;
    Ok(Json(DataResponse { data: record }))
}

/// GET /api/v1/tracks/{identifier}/summary
///
/// Decode the stored document and compute trip statistics. A document that
/// cannot be decoded yields 422, never 404.
pub async fn get_track_summary(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> AppResult<Json<DataResponse<TrackSummary>>> {
    let record = fetch(&state, identifier).await?;

    let track = gpx::decode(&record.content).inspect_err(|e| {
        tracing::warn!(identifier = %record.identifier, error = %e, "Stored track failed to decode");
    })?;

    let stats = statistics::compute(&track.points);

    Ok(Json(DataResponse {
        data: TrackSummary {
            name: track.display_name().to_string(),
            point_count: track.points.len(),
            display: StatisticsDisplay::from(&stats),
            statistics: stats,
            bounds: statistics::bounds(&track.points),
            start: track.points.first().cloned(),
            end: track.points.last().cloned(),
            identifier: record.identifier,
        },
    }))
}

async fn fetch(state: &AppState, identifier: String) -> AppResult<TrackRecord> {
    match state.store.get(&identifier).await? {
        Some(record) => Ok(record),
        None => Err(not_found(identifier).into()),
    }
}

fn not_found(identifier: String) -> CoreError {
    CoreError::NotFound {
        entity: ENTITY,
        id: identifier,
    }
}
