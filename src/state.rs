//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::RedirectService;
use crate::infrastructure::persistence::JsonStateStore;

/// Handler state: the redirect engine behind an `Arc`.
///
/// Constructed once at startup from the loaded store; there is no global
/// singleton, the engine instance is explicitly injected into the router.
#[derive(Clone)]
pub struct AppState {
    pub redirect_service: Arc<RedirectService<JsonStateStore>>,
}

impl AppState {
    pub fn new(redirect_service: Arc<RedirectService<JsonStateStore>>) -> Self {
        Self { redirect_service }
    }
}
