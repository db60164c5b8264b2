//! DTOs for preset management and activation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::ActivatedPreset;

/// Request to create a preset or overwrite an existing one.
#[derive(Debug, Deserialize, Validate)]
pub struct AddPresetRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 2048))]
    pub url: String,
}

/// Request to delete a preset by name.
#[derive(Debug, Deserialize, Validate)]
pub struct DeletePresetRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Request to rename a preset, keeping its display position.
#[derive(Debug, Deserialize, Validate)]
pub struct RenamePresetRequest {
    #[validate(length(min = 1, max = 100))]
    pub old: String,

    #[validate(length(min = 1, max = 100))]
    pub new: String,
}

/// Request to permanently activate a preset.
#[derive(Debug, Deserialize, Validate)]
pub struct ActivatePresetRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Request to activate a preset temporarily.
#[derive(Debug, Deserialize, Validate)]
pub struct ActivatePresetTemporaryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// Seconds until the redirect reverts to the default URL.
    #[validate(range(min = 1))]
    pub seconds: u32,
}

/// Query parameters for URL-triggered preset activation.
#[derive(Debug, Deserialize)]
pub struct ActivateByUrlQuery {
    /// API key; required only while security is enabled.
    pub key: Option<String>,
}

/// Generic acknowledgement for preset mutations.
#[derive(Debug, Serialize)]
pub struct PresetMutationResponse {
    pub status: &'static str,
}

/// Response after activating a preset.
#[derive(Debug, Serialize)]
pub struct ActivateResponse {
    pub status: &'static str,
    pub active_preset: String,
    pub active_url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<ActivatedPreset> for ActivateResponse {
    fn from(activated: ActivatedPreset) -> Self {
        Self {
            status: "ok",
            active_preset: activated.name,
            active_url: activated.url,
            expires_at: activated.expires_at,
        }
    }
}
