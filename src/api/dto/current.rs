//! DTO for the current redirect state read.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::CurrentInfo;

/// Current redirect state as returned by `GET /api/current`.
///
/// Deliberately omits the API key; only `GET /api/security/status` exposes
/// whether security is enabled.
#[derive(Debug, Serialize)]
pub struct CurrentResponse {
    pub current_url: String,
    pub default_url: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_temporary: bool,
}

impl From<CurrentInfo> for CurrentResponse {
    fn from(info: CurrentInfo) -> Self {
        Self {
            current_url: info.current_url,
            default_url: info.default_url,
            expires_at: info.expires_at,
            is_temporary: info.is_temporary,
        }
    }
}
