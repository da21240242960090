use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tracks;
use crate::state::AppState;

/// Track routes.
///
/// ```text
/// POST   /tracks                           -> upload_track
/// GET    /tracks/{identifier}              -> get_track
/// DELETE /tracks/{identifier}              -> delete_track
/// GET    /tracks/{identifier}/summary      -> get_track_summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tracks", post(tracks::upload_track))
        .route(
            "/tracks/{identifier}",
            get(tracks::get_track).delete(tracks::delete_track),
        )
        .route("/tracks/{identifier}/summary", get(tracks::get_track_summary))
}
