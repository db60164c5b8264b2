//! Handlers for setting the redirect target.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::set::{
    SetCurrentResponse, SetDefaultResponse, SetTemporaryRequest, SetTemporaryResponse,
    SetUrlRequest,
};
use crate::error::AppError;
use crate::state::AppState;

/// Permanently sets the current redirect target.
///
/// # Endpoint
///
/// `POST /api/set`
///
/// Clears any pending temporary override; the new target stays active until
/// the next mutation.
///
/// # Errors
///
/// Returns 400 for a malformed URL, 500 when the write-through fails.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(payload): Json<SetUrlRequest>,
) -> Result<Json<SetCurrentResponse>, AppError> {
    payload.validate()?;

    state.redirect_service.set_current(&payload.url).await?;

    Ok(Json(SetCurrentResponse {
        status: "ok",
        current_url: payload.url,
    }))
}

/// Sets a temporary redirect that reverts after `seconds`.
///
/// # Endpoint
///
/// `POST /api/temp`
///
/// Supersedes any previously pending override - last writer wins, there is
/// no stacking of timers.
///
/// # Errors
///
/// Returns 400 for a malformed URL or non-positive duration.
pub async fn temp_handler(
    State(state): State<AppState>,
    Json(payload): Json<SetTemporaryRequest>,
) -> Result<Json<SetTemporaryResponse>, AppError> {
    payload.validate()?;

    let effective = state
        .redirect_service
        .set_temporary(&payload.url, payload.seconds)
        .await?;

    Ok(Json(SetTemporaryResponse {
        status: "ok",
        current_url: effective.url,
        expires_at: effective
            .expires_at
            .expect("temporary set always carries an expiry"),
    }))
}

/// Sets the default (fallback) URL.
///
/// # Endpoint
///
/// `POST /api/set-default`
///
/// Leaves the current target and any pending override untouched; the new
/// default takes over once the override expires or is cleared.
pub async fn set_default_handler(
    State(state): State<AppState>,
    Json(payload): Json<SetUrlRequest>,
) -> Result<Json<SetDefaultResponse>, AppError> {
    payload.validate()?;

    state.redirect_service.set_default(&payload.url).await?;

    Ok(Json(SetDefaultResponse {
        status: "ok",
        default_url: payload.url,
    }))
}
