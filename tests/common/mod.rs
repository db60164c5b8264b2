#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use axum_test::TestServer;
use tempfile::TempDir;

use ez_redirect::api::handlers::{
    activate_preset_by_url_handler, health_handler, redirect_handler,
};
use ez_redirect::api::middleware::auth;
use ez_redirect::api::routes::api_routes;
use ez_redirect::application::services::RedirectService;
use ez_redirect::infrastructure::persistence::JsonStateStore;
use ez_redirect::state::AppState;

/// Builds an engine-backed state over a JSON store rooted at `data_dir`.
pub async fn create_test_state(data_dir: &Path) -> AppState {
    let store = Arc::new(JsonStateStore::new(data_dir));
    let service = RedirectService::load(store).await.unwrap();
    AppState::new(Arc::new(service))
}

/// Full application router minus rate limiting (which needs a real socket
/// peer address the mock transport does not provide).
pub fn test_router(state: AppState) -> Router {
    let api = api_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::layer,
    ));

    Router::new()
        .route("/redirect", get(redirect_handler))
        .route("/preset/{name}", get(activate_preset_by_url_handler))
        .route("/health", get(health_handler))
        .nest("/api", api)
        .with_state(state)
}

/// Spins up a test server over a fresh tempdir-backed store.
///
/// Returns the tempdir so the caller keeps the state files alive (and can
/// inspect or reuse them to simulate a restart).
pub async fn create_test_server() -> (TestServer, TempDir) {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(dir.path()).await;
    let server = TestServer::new(test_router(state)).unwrap();
    (server, dir)
}

/// Seeds `config.json` before the engine loads, to simulate state left by
/// a previous run.
pub fn write_config_file(data_dir: &Path, contents: &str) {
    std::fs::create_dir_all(data_dir).unwrap();
    std::fs::write(data_dir.join("config.json"), contents).unwrap();
}

/// Seeds `presets.json` before the engine loads.
pub fn write_presets_file(data_dir: &Path, contents: &str) {
    std::fs::create_dir_all(data_dir).unwrap();
    std::fs::write(data_dir.join("presets.json"), contents).unwrap();
}
