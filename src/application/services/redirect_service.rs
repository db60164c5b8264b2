//! The redirect-state engine.
//!
//! Single authoritative owner of the redirect configuration and presets.
//! Answers "what is the current redirect target right now" with expiration
//! already resolved, and exposes mutation operations that keep the in-memory
//! state and the backing store in agreement.
//!
//! # Concurrency
//!
//! One `tokio::sync::Mutex` guards the whole `(config, presets)` pair.
//! Reads with lazy expiry resolution and all mutations acquire it, so a
//! reader can never observe `current_url` from one logical state paired
//! with `expires_at` from another. Persistence happens inside the critical
//! section; when a write fails the pre-operation snapshot is restored and
//! the operation reports a persistence error instead of letting memory and
//! disk diverge.
//!
//! # Expiration
//!
//! Expiration is evaluated lazily on access against the wall clock; there
//! is no background timer. A redirect therefore reverts at the first access
//! after its deadline rather than at the deadline itself, which is the
//! accepted staleness window for a low-traffic local deployment.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::domain::entities::{PresetCollection, RedirectConfig};
use crate::domain::repositories::StateStore;
use crate::error::AppError;
use crate::utils::key_generator::generate_api_key;
use crate::utils::url_check::validate_redirect_url;

/// The effective redirect target, with any pending expiration resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveRedirect {
    pub url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Snapshot of the redirect state for the `/api/current` read.
///
/// Never carries the API key.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentInfo {
    pub current_url: String,
    pub default_url: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_temporary: bool,
}

/// Result of a preset activation.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivatedPreset {
    pub name: String,
    pub url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Externally visible security settings (the key itself is never exposed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityStatus {
    pub enabled: bool,
}

struct EngineState {
    config: RedirectConfig,
    presets: PresetCollection,
}

/// The redirect-state engine.
///
/// Constructed once at startup via [`RedirectService::load`] and shared
/// behind an `Arc` by the HTTP layer. All operations are all-or-nothing:
/// validation failures are detected before any mutation, and persistence
/// failures roll the mutation back.
pub struct RedirectService<S: StateStore> {
    store: Arc<S>,
    state: Mutex<EngineState>,
}

impl<S: StateStore> RedirectService<S> {
    /// Loads persisted state from the store, falling back to defaults for
    /// anything not persisted yet.
    ///
    /// A persisted `expires_at` in the past is intentionally NOT resolved
    /// here; the first [`Self::effective`] call after start performs the
    /// revert, exactly as it would for an expiry observed mid-run.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] when the store cannot be read.
    pub async fn load(store: Arc<S>) -> Result<Self, AppError> {
        let config = store.load_config().await?.unwrap_or_default();
        let presets = store.load_presets().await?.unwrap_or_default();

        tracing::info!(
            current_url = %config.current_url,
            default_url = %config.default_url,
            temporary = config.is_temporary(),
            presets = presets.len(),
            "Redirect state loaded"
        );

        Ok(Self {
            store,
            state: Mutex::new(EngineState { config, presets }),
        })
    }

    // ── reads ───────────────────────────────────────────────────────────

    /// Returns the effective redirect target right now.
    ///
    /// If a temporary override has expired, the revert to the default URL
    /// is performed (and persisted) as part of answering this read. Always
    /// succeeds: even when persisting the revert fails, the answer is
    /// computed from the wall clock and the persist is retried on the next
    /// access.
    pub async fn effective(&self) -> EffectiveRedirect {
        let mut state = self.state.lock().await;
        let (url, expires_at) = self.resolve_expiry(&mut state).await;
        EffectiveRedirect { url, expires_at }
    }

    /// Returns the full redirect state for display, expiry resolved.
    pub async fn info(&self) -> CurrentInfo {
        let mut state = self.state.lock().await;
        let (current_url, expires_at) = self.resolve_expiry(&mut state).await;
        CurrentInfo {
            current_url,
            default_url: state.config.default_url.clone(),
            is_temporary: expires_at.is_some(),
            expires_at,
        }
    }

    /// Returns a copy of the preset collection in display order.
    pub async fn presets(&self) -> PresetCollection {
        self.state.lock().await.presets.clone()
    }

    /// Returns the configured listening port.
    pub async fn port(&self) -> u16 {
        self.state.lock().await.config.port
    }

    /// Returns the externally visible security settings.
    pub async fn security_status(&self) -> SecurityStatus {
        SecurityStatus {
            enabled: self.state.lock().await.config.api_key_enabled,
        }
    }

    // ── redirect target mutations ───────────────────────────────────────

    /// Permanently sets the current redirect target.
    ///
    /// Clears any pending temporary override.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] for a malformed target and
    /// [`AppError::Persistence`] when the write-through fails (state rolled
    /// back).
    pub async fn set_current(&self, url: &str) -> Result<(), AppError> {
        check_url(url)?;

        let mut state = self.state.lock().await;
        self.apply_config(&mut state, |config| {
            config.current_url = url.to_string();
            config.expires_at = None;
        })
        .await
    }

    /// Sets a temporary redirect that reverts to the default URL once
    /// `seconds` have elapsed.
    ///
    /// Supersedes any previously pending override; there is no stacking.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] / [`AppError::InvalidDuration`] on
    /// bad input, [`AppError::Persistence`] on write-through failure.
    pub async fn set_temporary(&self, url: &str, seconds: u32) -> Result<EffectiveRedirect, AppError> {
        check_url(url)?;
        check_duration(seconds)?;

        let expires_at = Utc::now() + Duration::seconds(i64::from(seconds));

        let mut state = self.state.lock().await;
        self.apply_config(&mut state, |config| {
            config.current_url = url.to_string();
            config.expires_at = Some(expires_at);
        })
        .await?;

        Ok(EffectiveRedirect {
            url: url.to_string(),
            expires_at: Some(expires_at),
        })
    }

    /// Sets the permanent fallback target.
    ///
    /// Does NOT touch `current_url` or a pending override; default and
    /// current stay independent until the override expires or is cleared.
    pub async fn set_default(&self, url: &str) -> Result<(), AppError> {
        check_url(url)?;

        let mut state = self.state.lock().await;
        self.apply_config(&mut state, |config| {
            config.default_url = url.to_string();
        })
        .await
    }

    // ── preset operations ───────────────────────────────────────────────

    /// Permanently activates a preset by name.
    ///
    /// Equivalent to [`Self::set_current`] with the preset's URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::PresetNotFound`] for an unknown name.
    pub async fn activate_preset(&self, name: &str) -> Result<ActivatedPreset, AppError> {
        let mut state = self.state.lock().await;

        let url = lookup_preset(&state.presets, name)?;

        self.apply_config(&mut state, |config| {
            config.current_url = url.clone();
            config.expires_at = None;
        })
        .await?;

        Ok(ActivatedPreset {
            name: name.to_string(),
            url,
            expires_at: None,
        })
    }

    /// Activates a preset as a temporary redirect for `seconds`.
    ///
    /// Distinct from [`Self::activate_preset`] on purpose: temporary
    /// activation is an explicit operation, not an optional parameter.
    pub async fn activate_preset_temporary(
        &self,
        name: &str,
        seconds: u32,
    ) -> Result<ActivatedPreset, AppError> {
        check_duration(seconds)?;

        let mut state = self.state.lock().await;

        let url = lookup_preset(&state.presets, name)?;
        let expires_at = Utc::now() + Duration::seconds(i64::from(seconds));

        self.apply_config(&mut state, |config| {
            config.current_url = url.clone();
            config.expires_at = Some(expires_at);
        })
        .await?;

        Ok(ActivatedPreset {
            name: name.to_string(),
            url,
            expires_at: Some(expires_at),
        })
    }

    /// Creates a preset or overwrites the URL of an existing one.
    ///
    /// Idempotent; an update keeps the preset's display position.
    pub async fn add_or_update_preset(&self, name: &str, url: &str) -> Result<(), AppError> {
        check_preset_name(name)?;
        check_url(url)?;

        let mut state = self.state.lock().await;
        self.apply_presets(&mut state, |presets| {
            presets.upsert(name, url);
        })
        .await
    }

    /// Deletes a preset by name.
    ///
    /// Never touches the current redirect target, even when the deleted
    /// preset's URL is the active one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::PresetNotFound`] for an unknown name.
    pub async fn delete_preset(&self, name: &str) -> Result<(), AppError> {
        let mut state = self.state.lock().await;

        if !state.presets.contains(name) {
            return Err(preset_not_found(name));
        }

        self.apply_presets(&mut state, |presets| {
            presets.remove(name);
        })
        .await
    }

    /// Renames a preset, keeping its display position.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::PresetNotFound`] for an unknown `old` name and
    /// [`AppError::Conflict`] when `new` already names another preset.
    pub async fn rename_preset(&self, old: &str, new: &str) -> Result<(), AppError> {
        check_preset_name(new)?;

        let mut state = self.state.lock().await;

        if !state.presets.contains(old) {
            return Err(preset_not_found(old));
        }
        if old != new && state.presets.contains(new) {
            return Err(AppError::conflict(
                "A preset with this name already exists",
                json!({ "name": new }),
            ));
        }

        self.apply_presets(&mut state, |presets| {
            presets.rename(old, new);
        })
        .await
    }

    // ── port & security ─────────────────────────────────────────────────

    /// Persists a new listening port.
    ///
    /// Does not rebind the running server; the operator must restart the
    /// service for the new port to take effect.
    pub async fn set_port(&self, port: u16) -> Result<(), AppError> {
        if port == 0 {
            return Err(AppError::bad_request(
                "Port must be between 1 and 65535",
                json!({ "port": port }),
            ));
        }

        let mut state = self.state.lock().await;
        self.apply_config(&mut state, |config| {
            config.port = port;
        })
        .await
    }

    /// Enables or disables API key security.
    ///
    /// Enabling uses the supplied key, or falls back to a previously stored
    /// one; disabling clears the stored key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingApiKey`] when enabling with no key
    /// available at all.
    pub async fn set_api_key_enabled(
        &self,
        enabled: bool,
        key: Option<String>,
    ) -> Result<SecurityStatus, AppError> {
        let mut state = self.state.lock().await;

        if enabled {
            let key = key
                .filter(|k| !k.is_empty())
                .or_else(|| state.config.api_key.clone().filter(|k| !k.is_empty()))
                .ok_or_else(|| {
                    AppError::missing_api_key(
                        "Enabling API key security requires a key",
                        json!({}),
                    )
                })?;

            self.apply_config(&mut state, |config| {
                config.api_key_enabled = true;
                config.api_key = Some(key);
            })
            .await?;
        } else {
            self.apply_config(&mut state, |config| {
                config.api_key_enabled = false;
                config.api_key = None;
            })
            .await?;
        }

        Ok(SecurityStatus { enabled })
    }

    /// Stores a caller-chosen API key without toggling enforcement.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingApiKey`] for an empty key.
    pub async fn set_api_key(&self, key: &str) -> Result<(), AppError> {
        if key.is_empty() {
            return Err(AppError::missing_api_key(
                "API key must not be empty",
                json!({}),
            ));
        }

        let mut state = self.state.lock().await;
        self.apply_config(&mut state, |config| {
            config.api_key = Some(key.to_string());
        })
        .await
    }

    /// Replaces the stored API key with a freshly generated one.
    ///
    /// Returns the new key so the caller can record it; this is the only
    /// place the key leaves the engine.
    pub async fn regenerate_api_key(&self) -> Result<String, AppError> {
        let key = generate_api_key();

        let mut state = self.state.lock().await;
        self.apply_config(&mut state, |config| {
            config.api_key = Some(key.clone());
        })
        .await?;

        Ok(key)
    }

    /// Authorization decision for a caller-supplied key.
    ///
    /// Unconditionally true while security is disabled. When enabled, true
    /// iff `provided` exactly equals the stored key. Both sides are hashed
    /// before comparison so the check does not leak prefix or length timing.
    pub async fn authorize(&self, provided: Option<&str>) -> bool {
        let state = self.state.lock().await;

        if !state.config.api_key_enabled {
            return true;
        }

        let Some(expected) = state.config.api_key.as_deref().filter(|k| !k.is_empty()) else {
            return false;
        };
        let Some(provided) = provided else {
            return false;
        };

        keys_match(provided, expected)
    }

    // ── internals ───────────────────────────────────────────────────────

    /// Resolves a pending expiry and returns the effective `(url,
    /// expires_at)` pair.
    ///
    /// When the deadline has passed, the config reverts to the default and
    /// the revert is persisted. If that persist fails, the in-memory state
    /// rolls back so memory and disk stay in agreement, a warning is
    /// logged, and the revert is retried on the next access; the returned
    /// pair is computed from the wall clock either way.
    async fn resolve_expiry(&self, state: &mut EngineState) -> (String, Option<DateTime<Utc>>) {
        if !state.config.is_expired_at(Utc::now()) {
            return (state.config.current_url.clone(), state.config.expires_at);
        }

        let snapshot = state.config.clone();
        state.config.revert_to_default();

        if let Err(e) = self.store.save_config(&state.config).await {
            tracing::warn!(error = %e, "Failed to persist expiry revert, retrying on next access");
            state.config = snapshot;
        }

        (state.config.default_url.clone(), None)
    }

    /// Mutates the config and writes it through, rolling back on failure.
    async fn apply_config<F>(&self, state: &mut EngineState, mutate: F) -> Result<(), AppError>
    where
        F: FnOnce(&mut RedirectConfig),
    {
        let snapshot = state.config.clone();
        mutate(&mut state.config);

        match self.store.save_config(&state.config).await {
            Ok(()) => Ok(()),
            Err(e) => {
                state.config = snapshot;
                Err(e)
            }
        }
    }

    /// Mutates the presets and writes them through, rolling back on failure.
    async fn apply_presets<F>(&self, state: &mut EngineState, mutate: F) -> Result<(), AppError>
    where
        F: FnOnce(&mut PresetCollection),
    {
        let snapshot = state.presets.clone();
        mutate(&mut state.presets);

        match self.store.save_presets(&state.presets).await {
            Ok(()) => Ok(()),
            Err(e) => {
                state.presets = snapshot;
                Err(e)
            }
        }
    }

    /// Reports whether the backing store is usable, for health checks.
    pub async fn storage_healthy(&self) -> bool {
        self.store.health_check().await
    }
}

fn check_url(url: &str) -> Result<(), AppError> {
    validate_redirect_url(url).map_err(|e| {
        AppError::invalid_url(
            "Invalid redirect URL",
            json!({ "url": url, "reason": e.to_string() }),
        )
    })
}

fn check_duration(seconds: u32) -> Result<(), AppError> {
    if seconds == 0 {
        return Err(AppError::invalid_duration(
            "Duration must be a positive number of seconds",
            json!({ "seconds": seconds }),
        ));
    }
    Ok(())
}

fn check_preset_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::bad_request(
            "Preset name must not be empty",
            json!({ "name": name }),
        ));
    }
    Ok(())
}

fn lookup_preset(presets: &PresetCollection, name: &str) -> Result<String, AppError> {
    presets
        .get(name)
        .map(str::to_string)
        .ok_or_else(|| preset_not_found(name))
}

fn preset_not_found(name: &str) -> AppError {
    AppError::preset_not_found("Preset not found", json!({ "name": name }))
}

fn keys_match(provided: &str, expected: &str) -> bool {
    // Digesting both sides equalizes length before the comparison.
    Sha256::digest(provided.as_bytes()) == Sha256::digest(expected.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockStateStore;

    fn service_with(
        config: RedirectConfig,
        presets: PresetCollection,
        store: MockStateStore,
    ) -> RedirectService<MockStateStore> {
        RedirectService {
            store: Arc::new(store),
            state: Mutex::new(EngineState { config, presets }),
        }
    }

    fn config_with_urls(default_url: &str, current_url: &str) -> RedirectConfig {
        RedirectConfig {
            default_url: default_url.to_string(),
            current_url: current_url.to_string(),
            ..Default::default()
        }
    }

    fn sample_presets() -> PresetCollection {
        let mut presets = PresetCollection::default();
        presets.upsert("giving", "https://give.example/");
        presets.upsert("main", "https://main.example/");
        presets
    }

    #[tokio::test]
    async fn test_load_defaults_when_store_empty() {
        let mut store = MockStateStore::new();
        store.expect_load_config().times(1).returning(|| Ok(None));
        store.expect_load_presets().times(1).returning(|| Ok(None));

        let service = RedirectService::load(Arc::new(store)).await.unwrap();

        assert_eq!(service.port().await, 8000);
        let effective = service.effective().await;
        assert_eq!(effective.url, "https://example.com");
        assert!(effective.expires_at.is_none());
    }

    #[tokio::test]
    async fn test_set_current_clears_override_and_persists() {
        let mut store = MockStateStore::new();
        store
            .expect_save_config()
            .withf(|c| c.current_url == "https://b.example/" && c.expires_at.is_none())
            .times(1)
            .returning(|_| Ok(()));

        let mut config = config_with_urls("https://a.example/", "https://tmp.example/");
        config.expires_at = Some(Utc::now() + Duration::seconds(600));

        let service = service_with(config, PresetCollection::default(), store);

        service.set_current("https://b.example/").await.unwrap();

        let effective = service.effective().await;
        assert_eq!(effective.url, "https://b.example/");
        assert!(effective.expires_at.is_none());
    }

    #[tokio::test]
    async fn test_set_current_returns_url_exactly_as_given() {
        let mut store = MockStateStore::new();
        store.expect_save_config().times(1).returning(|_| Ok(()));

        let service = service_with(
            RedirectConfig::default(),
            PresetCollection::default(),
            store,
        );

        // No normalization: port, casing, and query survive untouched.
        let url = "https://Example.com:8443/Live?week=32";
        service.set_current(url).await.unwrap();

        assert_eq!(service.effective().await.url, url);
    }

    #[tokio::test]
    async fn test_set_current_rejects_invalid_url_without_mutation() {
        let store = MockStateStore::new();
        let service = service_with(
            config_with_urls("https://a.example/", "https://a.example/"),
            PresetCollection::default(),
            store,
        );

        let result = service.set_current("not-a-url").await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidUrl { .. }));
        assert_eq!(service.effective().await.url, "https://a.example/");
    }

    #[tokio::test]
    async fn test_set_temporary_sets_deadline() {
        let mut store = MockStateStore::new();
        store
            .expect_save_config()
            .withf(|c| c.current_url == "https://b.example/" && c.expires_at.is_some())
            .times(1)
            .returning(|_| Ok(()));

        let service = service_with(
            config_with_urls("https://a.example/", "https://a.example/"),
            PresetCollection::default(),
            store,
        );

        let before = Utc::now();
        let result = service
            .set_temporary("https://b.example/", 300)
            .await
            .unwrap();
        let after = Utc::now();

        assert_eq!(result.url, "https://b.example/");
        let deadline = result.expires_at.unwrap();
        assert!(deadline >= before + Duration::seconds(300));
        assert!(deadline <= after + Duration::seconds(300));

        let effective = service.effective().await;
        assert_eq!(effective.url, "https://b.example/");
        assert_eq!(effective.expires_at, Some(deadline));
    }

    #[tokio::test]
    async fn test_set_temporary_rejects_zero_duration() {
        let store = MockStateStore::new();
        let service = service_with(
            RedirectConfig::default(),
            PresetCollection::default(),
            store,
        );

        let result = service.set_temporary("https://b.example/", 0).await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::InvalidDuration { .. }
        ));
    }

    #[tokio::test]
    async fn test_set_temporary_supersedes_previous_override() {
        let mut store = MockStateStore::new();
        store.expect_save_config().times(1).returning(|_| Ok(()));

        let mut config = config_with_urls("https://a.example/", "https://old.example/");
        config.expires_at = Some(Utc::now() + Duration::seconds(1000));

        let service = service_with(config, PresetCollection::default(), store);

        let result = service.set_temporary("https://new.example/", 5).await.unwrap();

        let effective = service.effective().await;
        assert_eq!(effective.url, "https://new.example/");
        assert_eq!(effective.expires_at, result.expires_at);
    }

    #[tokio::test]
    async fn test_expiry_reverts_on_access_and_is_stable() {
        let mut store = MockStateStore::new();
        store
            .expect_save_config()
            .withf(|c| c.current_url == "https://a.example/" && c.expires_at.is_none())
            .times(1)
            .returning(|_| Ok(()));

        let mut config = config_with_urls("https://a.example/", "https://b.example/");
        config.expires_at = Some(Utc::now() - Duration::seconds(1));

        let service = service_with(config, PresetCollection::default(), store);

        let first = service.effective().await;
        assert_eq!(first.url, "https://a.example/");
        assert!(first.expires_at.is_none());

        // Idempotent post-expiry: second read is stable and does not
        // persist again (times(1) above).
        let second = service.effective().await;
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_expiry_revert_answers_default_even_when_persist_fails() {
        let mut store = MockStateStore::new();
        store
            .expect_save_config()
            .times(2)
            .returning(|_| Err(AppError::persistence("disk full", json!({}))));

        let mut config = config_with_urls("https://a.example/", "https://b.example/");
        config.expires_at = Some(Utc::now() - Duration::seconds(1));

        let service = service_with(config, PresetCollection::default(), store);

        // The read still answers the default, and the revert is retried on
        // the next access because the in-memory state rolled back.
        let first = service.effective().await;
        assert_eq!(first.url, "https://a.example/");
        assert!(first.expires_at.is_none());

        let second = service.effective().await;
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_set_default_keeps_active_override() {
        let mut store = MockStateStore::new();
        let deadline = Utc::now() + Duration::seconds(600);
        store
            .expect_save_config()
            .withf(move |c| {
                c.default_url == "https://new-default.example/"
                    && c.current_url == "https://tmp.example/"
                    && c.expires_at == Some(deadline)
            })
            .times(1)
            .returning(|_| Ok(()));

        let mut config = config_with_urls("https://a.example/", "https://tmp.example/");
        config.expires_at = Some(deadline);

        let service = service_with(config, PresetCollection::default(), store);

        service.set_default("https://new-default.example/").await.unwrap();

        let effective = service.effective().await;
        assert_eq!(effective.url, "https://tmp.example/");
        assert_eq!(effective.expires_at, Some(deadline));
    }

    #[tokio::test]
    async fn test_activate_preset_success() {
        let mut store = MockStateStore::new();
        store
            .expect_save_config()
            .withf(|c| c.current_url == "https://give.example/" && c.expires_at.is_none())
            .times(1)
            .returning(|_| Ok(()));

        let mut config = config_with_urls("https://a.example/", "https://a.example/");
        config.expires_at = Some(Utc::now() + Duration::seconds(600));

        let service = service_with(config, sample_presets(), store);

        let activated = service.activate_preset("giving").await.unwrap();

        assert_eq!(activated.name, "giving");
        assert_eq!(activated.url, "https://give.example/");
        assert!(activated.expires_at.is_none());
    }

    #[tokio::test]
    async fn test_activate_preset_not_found_leaves_state_unchanged() {
        let store = MockStateStore::new();
        let service = service_with(
            config_with_urls("https://a.example/", "https://a.example/"),
            sample_presets(),
            store,
        );

        let result = service.activate_preset("nonexistent").await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::PresetNotFound { .. }
        ));
        assert_eq!(service.effective().await.url, "https://a.example/");
    }

    #[tokio::test]
    async fn test_activate_preset_temporary_sets_deadline() {
        let mut store = MockStateStore::new();
        store
            .expect_save_config()
            .withf(|c| c.current_url == "https://main.example/" && c.expires_at.is_some())
            .times(1)
            .returning(|_| Ok(()));

        let service = service_with(RedirectConfig::default(), sample_presets(), store);

        let activated = service
            .activate_preset_temporary("main", 120)
            .await
            .unwrap();

        assert_eq!(activated.url, "https://main.example/");
        assert!(activated.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_add_or_update_preset_persists() {
        let mut store = MockStateStore::new();
        store
            .expect_save_presets()
            .withf(|p| p.get("giving") == Some("https://give.example/"))
            .times(1)
            .returning(|_| Ok(()));

        let service = service_with(
            RedirectConfig::default(),
            PresetCollection::default(),
            store,
        );

        service
            .add_or_update_preset("giving", "https://give.example/")
            .await
            .unwrap();

        assert_eq!(
            service.presets().await.get("giving"),
            Some("https://give.example/")
        );
    }

    #[tokio::test]
    async fn test_add_preset_rejects_empty_name_and_bad_url() {
        let store = MockStateStore::new();
        let service = service_with(
            RedirectConfig::default(),
            PresetCollection::default(),
            store,
        );

        let result = service.add_or_update_preset("  ", "https://give.example/").await;
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));

        let result = service.add_or_update_preset("giving", "ftp://x").await;
        assert!(matches!(result.unwrap_err(), AppError::InvalidUrl { .. }));

        assert!(service.presets().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_preset_never_reverts_active_redirect() {
        let mut store = MockStateStore::new();
        store
            .expect_save_presets()
            .withf(|p| !p.contains("giving"))
            .times(1)
            .returning(|_| Ok(()));

        // Current target IS the preset being deleted.
        let config = config_with_urls("https://a.example/", "https://give.example/");
        let service = service_with(config, sample_presets(), store);

        service.delete_preset("giving").await.unwrap();

        assert_eq!(service.effective().await.url, "https://give.example/");
    }

    #[tokio::test]
    async fn test_delete_preset_not_found() {
        let store = MockStateStore::new();
        let service = service_with(RedirectConfig::default(), sample_presets(), store);

        let result = service.delete_preset("nonexistent").await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::PresetNotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_rename_preset() {
        let mut store = MockStateStore::new();
        store
            .expect_save_presets()
            .withf(|p| p.get("sunday") == Some("https://give.example/") && !p.contains("giving"))
            .times(1)
            .returning(|_| Ok(()));

        let service = service_with(RedirectConfig::default(), sample_presets(), store);

        service.rename_preset("giving", "sunday").await.unwrap();
    }

    #[tokio::test]
    async fn test_rename_preset_unknown_and_conflict() {
        let store = MockStateStore::new();
        let service = service_with(RedirectConfig::default(), sample_presets(), store);

        let result = service.rename_preset("nonexistent", "x").await;
        assert!(matches!(
            result.unwrap_err(),
            AppError::PresetNotFound { .. }
        ));

        let result = service.rename_preset("giving", "main").await;
        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_persistence_failure_rolls_back_config() {
        let mut store = MockStateStore::new();
        store
            .expect_save_config()
            .times(1)
            .returning(|_| Err(AppError::persistence("disk full", json!({}))));

        let service = service_with(
            config_with_urls("https://a.example/", "https://a.example/"),
            PresetCollection::default(),
            store,
        );

        let result = service.set_current("https://b.example/").await;

        assert!(matches!(result.unwrap_err(), AppError::Persistence { .. }));
        assert_eq!(service.effective().await.url, "https://a.example/");
    }

    #[tokio::test]
    async fn test_persistence_failure_rolls_back_presets() {
        let mut store = MockStateStore::new();
        store
            .expect_save_presets()
            .times(1)
            .returning(|_| Err(AppError::persistence("disk full", json!({}))));

        let service = service_with(
            RedirectConfig::default(),
            PresetCollection::default(),
            store,
        );

        let result = service
            .add_or_update_preset("giving", "https://give.example/")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Persistence { .. }));
        assert!(service.presets().await.is_empty());
    }

    #[tokio::test]
    async fn test_set_port() {
        let mut store = MockStateStore::new();
        store
            .expect_save_config()
            .withf(|c| c.port == 8080)
            .times(1)
            .returning(|_| Ok(()));

        let service = service_with(
            RedirectConfig::default(),
            PresetCollection::default(),
            store,
        );

        service.set_port(8080).await.unwrap();
        assert_eq!(service.port().await, 8080);

        let result = service.set_port(0).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_enable_security_without_key_fails_and_state_unchanged() {
        let store = MockStateStore::new();
        let service = service_with(
            RedirectConfig::default(),
            PresetCollection::default(),
            store,
        );

        let result = service.set_api_key_enabled(true, None).await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::MissingApiKey { .. }
        ));
        assert!(!service.security_status().await.enabled);
    }

    #[tokio::test]
    async fn test_enable_security_with_supplied_key() {
        let mut store = MockStateStore::new();
        store
            .expect_save_config()
            .withf(|c| c.api_key_enabled && c.api_key.as_deref() == Some("secret123"))
            .times(1)
            .returning(|_| Ok(()));

        let service = service_with(
            RedirectConfig::default(),
            PresetCollection::default(),
            store,
        );

        let status = service
            .set_api_key_enabled(true, Some("secret123".to_string()))
            .await
            .unwrap();

        assert!(status.enabled);
    }

    #[tokio::test]
    async fn test_enable_security_reuses_stored_key() {
        let mut store = MockStateStore::new();
        store
            .expect_save_config()
            .withf(|c| c.api_key_enabled && c.api_key.as_deref() == Some("stored-key"))
            .times(1)
            .returning(|_| Ok(()));

        let config = RedirectConfig {
            api_key: Some("stored-key".to_string()),
            ..Default::default()
        };
        let service = service_with(config, PresetCollection::default(), store);

        let status = service.set_api_key_enabled(true, None).await.unwrap();

        assert!(status.enabled);
        assert!(service.authorize(Some("stored-key")).await);
    }

    #[tokio::test]
    async fn test_disable_security_clears_key() {
        let mut store = MockStateStore::new();
        store
            .expect_save_config()
            .withf(|c| !c.api_key_enabled && c.api_key.is_none())
            .times(1)
            .returning(|_| Ok(()));

        let config = RedirectConfig {
            api_key_enabled: true,
            api_key: Some("secret123".to_string()),
            ..Default::default()
        };
        let service = service_with(config, PresetCollection::default(), store);

        let status = service.set_api_key_enabled(false, None).await.unwrap();

        assert!(!status.enabled);
        assert!(service.authorize(None).await);
    }

    #[tokio::test]
    async fn test_authorize_disabled_allows_anything() {
        let store = MockStateStore::new();
        let service = service_with(
            RedirectConfig::default(),
            PresetCollection::default(),
            store,
        );

        assert!(service.authorize(None).await);
        assert!(service.authorize(Some("")).await);
        assert!(service.authorize(Some("whatever")).await);
    }

    #[tokio::test]
    async fn test_authorize_enabled_exact_match_only() {
        let store = MockStateStore::new();
        let config = RedirectConfig {
            api_key_enabled: true,
            api_key: Some("SECRET123".to_string()),
            ..Default::default()
        };
        let service = service_with(config, PresetCollection::default(), store);

        assert!(service.authorize(Some("SECRET123")).await);
        assert!(!service.authorize(Some("SECRET12")).await);
        assert!(!service.authorize(Some("SECRET1234")).await);
        assert!(!service.authorize(Some("secret123")).await);
        assert!(!service.authorize(Some("")).await);
        assert!(!service.authorize(None).await);
    }

    #[tokio::test]
    async fn test_regenerate_api_key_rotates_the_accepted_key() {
        let mut store = MockStateStore::new();
        store.expect_save_config().times(1).returning(|_| Ok(()));

        let config = RedirectConfig {
            api_key_enabled: true,
            api_key: Some("old-key".to_string()),
            ..Default::default()
        };
        let service = service_with(config, PresetCollection::default(), store);

        let new_key = service.regenerate_api_key().await.unwrap();

        assert_eq!(new_key.len(), 32);
        assert!(service.authorize(Some(&new_key)).await);
        assert!(!service.authorize(Some("old-key")).await);
    }

    #[tokio::test]
    async fn test_info_never_carries_api_key() {
        let store = MockStateStore::new();
        let config = RedirectConfig {
            api_key_enabled: true,
            api_key: Some("secret123".to_string()),
            ..Default::default()
        };
        let service = service_with(config, PresetCollection::default(), store);

        let info = service.info().await;

        // CurrentInfo has no key field by construction.
        assert_eq!(info.current_url, "https://example.com");
        assert!(!info.is_temporary);
    }
}
