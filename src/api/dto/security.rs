//! DTOs for API-key security endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to enable or disable API-key enforcement.
#[derive(Debug, Deserialize, Validate)]
pub struct ToggleSecurityRequest {
    pub enabled: bool,

    /// Key to store when enabling; optional when a key is already stored.
    #[validate(length(min = 1, max = 256))]
    pub api_key: Option<String>,
}

/// Request to store a caller-chosen API key.
#[derive(Debug, Deserialize, Validate)]
pub struct SetApiKeyRequest {
    #[validate(length(min = 1, max = 256))]
    pub api_key: String,
}

/// Externally visible security settings.
///
/// The stored key itself is never included.
#[derive(Debug, Serialize)]
pub struct SecurityStatusResponse {
    pub enabled: bool,
}

/// Response carrying a freshly generated key.
///
/// This is the only read of the key the API offers; the caller must record
/// it.
#[derive(Debug, Serialize)]
pub struct RegeneratedKeyResponse {
    pub status: &'static str,
    pub api_key: String,
}
