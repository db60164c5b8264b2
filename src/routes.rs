//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /redirect`       - The redirect itself (public, unthrottled)
//! - `GET /preset/{name}`  - URL-triggered preset activation (key in query)
//! - `GET /health`         - Health check (public)
//! - `/api/*`              - Management API (API key required for writes)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the management API
//! - **Authorization** - API-key check on mutating API calls
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{activate_preset_by_url_handler, health_handler, redirect_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// The `/redirect` hot path carries no auth or rate limiting; tags must
/// always resolve. `/preset/{name}` performs its own key check inside the
/// handler because the key arrives as a query parameter on a GET.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = api::routes::api_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .layer(rate_limit::layer());

    let router = Router::new()
        .route("/redirect", get(redirect_handler))
        .route("/preset/{name}", get(activate_preset_by_url_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
