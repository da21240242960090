use std::sync::Arc;

use trackshare_db::TrackStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Track storage backend.
    pub store: Arc<dyn TrackStore>,
    /// Server configuration (API key, timeouts).
    pub config: Arc<ServerConfig>,
}
