//! Shared-secret extractor guarding write operations.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sha2::{Digest, Sha256};
use trackshare_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Proof that the request carried the configured API key.
///
/// Add it as the first parameter of any handler that writes:
///
/// ```ignore
/// async fn upload(_key: RequireApiKey, State(state): State<AppState>) -> AppResult<()> {
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireApiKey;

impl FromRequestParts<AppState> for RequireApiKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing X-API-Key header".into()))
            })?;

        let expected = state.config.api_key.as_deref().ok_or_else(|| {
            AppError::Core(CoreError::Internal("API key is not configured".into()))
        })?;

        if !keys_match(provided, expected) {
            tracing::warn!("Rejected write request with invalid API key");
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid API key".into(),
            )));
        }

        Ok(RequireApiKey)
    }
}

/// Compare digests rather than raw strings so the comparison does not stop
/// at the first differing byte of the secret.
fn keys_match(provided: &str, expected: &str) -> bool {
    Sha256::digest(provided.as_bytes()) == Sha256::digest(expected.as_bytes())
}
