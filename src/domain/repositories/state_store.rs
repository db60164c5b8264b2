//! Storage trait for redirect configuration and presets.

use async_trait::async_trait;

use crate::domain::entities::{PresetCollection, RedirectConfig};
use crate::error::AppError;

/// Storage interface for the engine's persisted state.
///
/// The engine calls `save_*` synchronously inside its critical section after
/// every mutation (write-through, no batching), and `load_*` exactly once at
/// process start.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::JsonStateStore`] - JSON files on disk
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Loads the persisted redirect configuration.
    ///
    /// Returns `Ok(None)` when nothing has been persisted yet; the engine
    /// then starts from defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage read errors.
    async fn load_config(&self) -> Result<Option<RedirectConfig>, AppError>;

    /// Persists the redirect configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage write errors. The engine
    /// rolls back its in-memory mutation when this fails.
    async fn save_config(&self, config: &RedirectConfig) -> Result<(), AppError>;

    /// Loads the persisted preset collection.
    ///
    /// Returns `Ok(None)` when nothing has been persisted yet.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage read errors.
    async fn load_presets(&self) -> Result<Option<PresetCollection>, AppError>;

    /// Persists the preset collection.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage write errors.
    async fn save_presets(&self, presets: &PresetCollection) -> Result<(), AppError>;

    /// Reports whether the backing storage is currently usable.
    async fn health_check(&self) -> bool;
}
