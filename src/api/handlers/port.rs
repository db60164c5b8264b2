//! Handlers for listening-port management.

use axum::{Json, extract::State};

use crate::api::dto::port::{PortResponse, SetPortRequest, SetPortResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the configured listening port.
///
/// # Endpoint
///
/// `GET /api/port`
pub async fn get_port_handler(State(state): State<AppState>) -> Json<PortResponse> {
    Json(PortResponse {
        port: state.redirect_service.port().await,
    })
}

/// Persists a new listening port.
///
/// # Endpoint
///
/// `POST /api/port`
///
/// The running server does not rebind; restart the service to pick up the
/// new port. The response carries `requires_restart: true` to make that
/// explicit.
///
/// # Errors
///
/// Returns 400 for port 0.
pub async fn set_port_handler(
    State(state): State<AppState>,
    Json(payload): Json<SetPortRequest>,
) -> Result<Json<SetPortResponse>, AppError> {
    state.redirect_service.set_port(payload.port).await?;

    Ok(Json(SetPortResponse {
        status: "ok",
        port: payload.port,
        requires_restart: true,
    }))
}
