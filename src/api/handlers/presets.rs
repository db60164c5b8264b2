//! Handlers for preset management and activation.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::presets::{
    ActivateByUrlQuery, ActivatePresetRequest, ActivatePresetTemporaryRequest, ActivateResponse,
    AddPresetRequest, DeletePresetRequest, PresetMutationResponse, RenamePresetRequest,
};
use crate::domain::entities::PresetCollection;
use crate::error::AppError;
use crate::state::AppState;

/// Lists all presets in display order.
///
/// # Endpoint
///
/// `GET /api/presets`
///
/// # Response
///
/// A JSON object mapping preset names to URLs, in the order the presets
/// were created:
///
/// ```json
/// {
///   "giving": "https://give.example/",
///   "main": "https://main.example/"
/// }
/// ```
pub async fn list_presets_handler(State(state): State<AppState>) -> Json<PresetCollection> {
    Json(state.redirect_service.presets().await)
}

/// Creates a preset or overwrites an existing one.
///
/// # Endpoint
///
/// `POST /api/presets/add`
///
/// Idempotent: updating an existing name keeps its display position.
pub async fn add_preset_handler(
    State(state): State<AppState>,
    Json(payload): Json<AddPresetRequest>,
) -> Result<Json<PresetMutationResponse>, AppError> {
    payload.validate()?;

    state
        .redirect_service
        .add_or_update_preset(&payload.name, &payload.url)
        .await?;

    Ok(Json(PresetMutationResponse { status: "ok" }))
}

/// Deletes a preset by name.
///
/// # Endpoint
///
/// `POST /api/presets/delete`
///
/// Deleting the preset whose URL is currently active does NOT change the
/// active redirect.
///
/// # Errors
///
/// Returns 404 for an unknown preset name.
pub async fn delete_preset_handler(
    State(state): State<AppState>,
    Json(payload): Json<DeletePresetRequest>,
) -> Result<Json<PresetMutationResponse>, AppError> {
    payload.validate()?;

    state.redirect_service.delete_preset(&payload.name).await?;

    Ok(Json(PresetMutationResponse { status: "ok" }))
}

/// Renames a preset, keeping its display position.
///
/// # Endpoint
///
/// `POST /api/presets/rename`
///
/// # Errors
///
/// Returns 404 for an unknown `old` name, 409 when `new` already names
/// another preset.
pub async fn rename_preset_handler(
    State(state): State<AppState>,
    Json(payload): Json<RenamePresetRequest>,
) -> Result<Json<PresetMutationResponse>, AppError> {
    payload.validate()?;

    state
        .redirect_service
        .rename_preset(&payload.old, &payload.new)
        .await?;

    Ok(Json(PresetMutationResponse { status: "ok" }))
}

/// Permanently activates a preset.
///
/// # Endpoint
///
/// `POST /api/preset/activate`
///
/// Equivalent to `POST /api/set` with the preset's URL: the redirect
/// becomes permanent and any pending expiry is cleared.
///
/// # Errors
///
/// Returns 404 for an unknown preset name.
pub async fn activate_preset_handler(
    State(state): State<AppState>,
    Json(payload): Json<ActivatePresetRequest>,
) -> Result<Json<ActivateResponse>, AppError> {
    payload.validate()?;

    let activated = state.redirect_service.activate_preset(&payload.name).await?;

    Ok(Json(activated.into()))
}

/// Activates a preset temporarily.
///
/// # Endpoint
///
/// `POST /api/preset/activate-temp`
///
/// The preset's URL becomes the redirect target for `seconds`, then the
/// engine reverts to the default URL.
pub async fn activate_preset_temporary_handler(
    State(state): State<AppState>,
    Json(payload): Json<ActivatePresetTemporaryRequest>,
) -> Result<Json<ActivateResponse>, AppError> {
    payload.validate()?;

    let activated = state
        .redirect_service
        .activate_preset_temporary(&payload.name, payload.seconds)
        .await?;

    Ok(Json(activated.into()))
}

/// Activates a preset via a plain GET, for NFC tags and bookmarks.
///
/// # Endpoint
///
/// `GET /preset/{name}?key=YOUR_API_KEY`
///
/// Lives outside `/api` so a tag can trigger it with nothing but a URL.
/// While API-key security is enabled the `key` query parameter must match;
/// the activation is always permanent.
///
/// # Errors
///
/// Returns 401 for a missing or wrong key while security is enabled and
/// 404 for an unknown preset name.
pub async fn activate_preset_by_url_handler(
    Path(name): Path<String>,
    Query(query): Query<ActivateByUrlQuery>,
    State(state): State<AppState>,
) -> Result<Json<ActivateResponse>, AppError> {
    if !state.redirect_service.authorize(query.key.as_deref()).await {
        return Err(AppError::unauthorized(
            "Invalid or missing API key",
            json!({ "hint": "append ?key=YOUR_API_KEY" }),
        ));
    }

    let activated = state.redirect_service.activate_preset(&name).await?;

    Ok(Json(activated.into()))
}
