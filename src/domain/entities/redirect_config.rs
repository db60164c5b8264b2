//! Redirect configuration entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fallback target used when no configuration has ever been persisted.
pub const FALLBACK_URL: &str = "https://example.com";

fn default_url() -> String {
    FALLBACK_URL.to_string()
}

fn default_port() -> u16 {
    8000
}

/// The authoritative redirect configuration, persisted as `config.json`.
///
/// `current_url` is the URL the redirect endpoint serves absent expiration
/// logic. While `expires_at` is set, the target is a temporary override that
/// reverts to `default_url` once the deadline passes; the revert is applied
/// lazily, on access, by the engine.
///
/// Fields missing from an older on-disk config fall back to serde defaults,
/// so configs written before the port/security settings existed still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedirectConfig {
    #[serde(default = "default_url")]
    pub default_url: String,
    #[serde(default = "default_url")]
    pub current_url: String,
    /// Deadline of the active temporary override; `None` means permanent.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Listening port for the HTTP layer. Changing it requires a restart.
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub api_key_enabled: bool,
    /// Must be `Some` and non-empty whenever `api_key_enabled` is true.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            default_url: default_url(),
            current_url: default_url(),
            expires_at: None,
            port: default_port(),
            api_key_enabled: false,
            api_key: None,
        }
    }
}

impl RedirectConfig {
    /// Returns true while a temporary override is pending.
    pub fn is_temporary(&self) -> bool {
        self.expires_at.is_some()
    }

    /// Returns true if the temporary override deadline has passed at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }

    /// Reverts the current target to the default and clears the override.
    pub fn revert_to_default(&mut self) {
        self.current_url = self.default_url.clone();
        self.expires_at = None;
    }
}
