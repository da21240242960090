pub mod tracks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tracks                                  upload (POST, API key)
/// /tracks/{identifier}                     fetch (GET), delete (DELETE, API key)
/// /tracks/{identifier}/summary             decoded track + statistics (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(tracks::router())
}
