//! Handler for the redirect endpoint itself.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
};
use tracing::debug;

use crate::state::AppState;

/// Redirects the caller to the current effective target.
///
/// # Endpoint
///
/// `GET /redirect`
///
/// This is the URL NFC tags and printed QR codes point at. Reading the
/// target also resolves a pending expiry: when the temporary override's
/// deadline has passed, the engine reverts to the default URL as part of
/// answering this request, so no background timer is involved.
///
/// Always responds with `307 Temporary Redirect` so clients re-request the
/// endpoint next time instead of caching the destination.
pub async fn redirect_handler(State(state): State<AppState>) -> impl IntoResponse {
    let effective = state.redirect_service.effective().await;

    debug!(target_url = %effective.url, "Serving redirect");

    Redirect::temporary(&effective.url)
}
