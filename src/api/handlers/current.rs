//! Handler for the current redirect state read.

use axum::{Json, extract::State};

use crate::api::dto::current::CurrentResponse;
use crate::state::AppState;

/// Returns the current redirect state with expiry resolved.
///
/// # Endpoint
///
/// `GET /api/current`
///
/// # Response
///
/// ```json
/// {
///   "current_url": "https://b.example/",
///   "default_url": "https://a.example/",
///   "expires_at": "2026-08-06T12:00:00Z",
///   "is_temporary": true
/// }
/// ```
///
/// The API key is never part of this response.
pub async fn current_handler(State(state): State<AppState>) -> Json<CurrentResponse> {
    Json(state.redirect_service.info().await.into())
}
