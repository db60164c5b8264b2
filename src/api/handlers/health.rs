//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: all components healthy
/// - **503 Service Unavailable**: storage degraded
///
/// Storage is the only external dependency; the check verifies the data
/// directory is present and writable, since every mutation writes through
/// to it.
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage_check = check_storage(&state).await;

    let all_healthy = storage_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        service: "ez-redirect",
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            storage: storage_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks that the state directory is usable for write-through persistence.
async fn check_storage(state: &AppState) -> CheckStatus {
    if state.redirect_service.storage_healthy().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some("Data directory writable".to_string()),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Data directory missing or not writable".to_string()),
        }
    }
}
