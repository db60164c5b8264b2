//! Handlers for API-key security management.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::security::{
    RegeneratedKeyResponse, SecurityStatusResponse, SetApiKeyRequest, ToggleSecurityRequest,
};
use crate::error::AppError;
use crate::state::AppState;

/// Returns whether API-key security is enabled.
///
/// # Endpoint
///
/// `GET /api/security/status`
///
/// The stored key is never returned; a lost key is replaced via
/// `POST /api/security/regenerate`.
pub async fn security_status_handler(State(state): State<AppState>) -> Json<SecurityStatusResponse> {
    let status = state.redirect_service.security_status().await;
    Json(SecurityStatusResponse {
        enabled: status.enabled,
    })
}

/// Enables or disables API-key enforcement.
///
/// # Endpoint
///
/// `POST /api/security/toggle`
///
/// Enabling requires a key - either supplied in `api_key` or previously
/// stored via `set-key`/`regenerate`. Disabling clears the stored key.
///
/// # Errors
///
/// Returns 400 (`missing_api_key`) when enabling with no key available.
pub async fn toggle_security_handler(
    State(state): State<AppState>,
    Json(payload): Json<ToggleSecurityRequest>,
) -> Result<Json<SecurityStatusResponse>, AppError> {
    payload.validate()?;

    let status = state
        .redirect_service
        .set_api_key_enabled(payload.enabled, payload.api_key)
        .await?;

    Ok(Json(SecurityStatusResponse {
        enabled: status.enabled,
    }))
}

/// Stores a caller-chosen API key without toggling enforcement.
///
/// # Endpoint
///
/// `POST /api/security/set-key`
pub async fn set_key_handler(
    State(state): State<AppState>,
    Json(payload): Json<SetApiKeyRequest>,
) -> Result<Json<SecurityStatusResponse>, AppError> {
    payload.validate()?;

    state.redirect_service.set_api_key(&payload.api_key).await?;

    let status = state.redirect_service.security_status().await;
    Ok(Json(SecurityStatusResponse {
        enabled: status.enabled,
    }))
}

/// Replaces the stored key with a freshly generated one.
///
/// # Endpoint
///
/// `POST /api/security/regenerate`
///
/// The response is the only place the new key is ever readable - record it
/// before closing the response.
pub async fn regenerate_key_handler(
    State(state): State<AppState>,
) -> Result<Json<RegeneratedKeyResponse>, AppError> {
    let api_key = state.redirect_service.regenerate_api_key().await?;

    Ok(Json(RegeneratedKeyResponse {
        status: "ok",
        api_key,
    }))
}
