//! API route configuration.
//!
//! Mutating endpoints are authorized by [`crate::api::middleware::auth`]
//! when API-key security is enabled; reads stay public.

use crate::api::handlers::{
    activate_preset_handler, activate_preset_temporary_handler, add_preset_handler,
    current_handler, delete_preset_handler, get_port_handler, list_presets_handler,
    regenerate_key_handler, rename_preset_handler, security_status_handler, set_default_handler,
    set_handler, set_key_handler, set_port_handler, temp_handler, toggle_security_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All management API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `GET  /current`              - Current redirect state (expiry resolved)
/// - `POST /set`                  - Permanently set the current URL
/// - `POST /temp`                 - Set a temporary redirect with expiry
/// - `POST /set-default`          - Set the fallback URL
/// - `GET  /presets`              - List presets in display order
/// - `POST /presets/add`          - Create or overwrite a preset
/// - `POST /presets/delete`       - Delete a preset
/// - `POST /presets/rename`       - Rename a preset in place
/// - `POST /preset/activate`      - Permanently activate a preset
/// - `POST /preset/activate-temp` - Activate a preset with expiry
/// - `GET  /port`                 - Read the listening port
/// - `POST /port`                 - Persist a new port (restart required)
/// - `GET  /security/status`      - Whether API-key security is enabled
/// - `POST /security/toggle`      - Enable/disable API-key security
/// - `POST /security/set-key`     - Store a caller-chosen key
/// - `POST /security/regenerate`  - Rotate to a freshly generated key
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/current", get(current_handler))
        .route("/set", post(set_handler))
        .route("/temp", post(temp_handler))
        .route("/set-default", post(set_default_handler))
        .route("/presets", get(list_presets_handler))
        .route("/presets/add", post(add_preset_handler))
        .route("/presets/delete", post(delete_preset_handler))
        .route("/presets/rename", post(rename_preset_handler))
        .route("/preset/activate", post(activate_preset_handler))
        .route(
            "/preset/activate-temp",
            post(activate_preset_temporary_handler),
        )
        .route("/port", get(get_port_handler).post(set_port_handler))
        .route("/security/status", get(security_status_handler))
        .route("/security/toggle", post(toggle_security_handler))
        .route("/security/set-key", post(set_key_handler))
        .route("/security/regenerate", post(regenerate_key_handler))
}
