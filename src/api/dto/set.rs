//! DTOs for the redirect target endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to permanently set the current or default URL.
#[derive(Debug, Deserialize, Validate)]
pub struct SetUrlRequest {
    /// The redirect target (must be an absolute HTTP/HTTPS URL).
    #[validate(length(min = 1, max = 2048))]
    pub url: String,
}

/// Request to set a temporary redirect with an expiry.
#[derive(Debug, Deserialize, Validate)]
pub struct SetTemporaryRequest {
    #[validate(length(min = 1, max = 2048))]
    pub url: String,

    /// Seconds until the redirect reverts to the default URL.
    #[validate(range(min = 1))]
    pub seconds: u32,
}

/// Response after permanently setting the current URL.
#[derive(Debug, Serialize)]
pub struct SetCurrentResponse {
    pub status: &'static str,
    pub current_url: String,
}

/// Response after setting a temporary redirect.
#[derive(Debug, Serialize)]
pub struct SetTemporaryResponse {
    pub status: &'static str,
    pub current_url: String,
    pub expires_at: DateTime<Utc>,
}

/// Response after changing the default URL.
#[derive(Debug, Serialize)]
pub struct SetDefaultResponse {
    pub status: &'static str,
    pub default_url: String,
}
