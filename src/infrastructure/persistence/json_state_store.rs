//! JSON-file implementation of the state store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::fs;

use crate::domain::entities::{PresetCollection, RedirectConfig};
use crate::domain::repositories::StateStore;
use crate::error::AppError;

/// Stores the engine state as two JSON files inside a data directory:
///
/// - `config.json` - the [`RedirectConfig`]
/// - `presets.json` - the [`PresetCollection`] as a name → URL object
///
/// Writes go to a temporary sibling file which is then renamed over the
/// target, so a crash mid-write never leaves a truncated state file behind.
pub struct JsonStateStore {
    config_path: PathBuf,
    presets_path: PathBuf,
}

impl JsonStateStore {
    /// Creates a store rooted at `data_dir`.
    ///
    /// The directory is created on the first write; it does not have to
    /// exist up front.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            config_path: data_dir.join("config.json"),
            presets_path: data_dir.join("presets.json"),
        }
    }

    async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, AppError> {
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::persistence(
                    "Failed to read state file",
                    json!({ "path": path.display().to_string(), "reason": e.to_string() }),
                ));
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                // An unreadable file is treated like a missing one; the
                // next write-through replaces it with a valid document.
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Ignoring unparseable state file, starting from defaults"
                );
                Ok(None)
            }
        }
    }

    async fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::persistence(
                    "Failed to create data directory",
                    json!({ "path": parent.display().to_string(), "reason": e.to_string() }),
                )
            })?;
        }

        let bytes = serde_json::to_vec_pretty(value).map_err(|e| {
            AppError::internal(
                "Failed to serialize state",
                json!({ "reason": e.to_string() }),
            )
        })?;

        let tmp_path = path.with_extension("json.tmp");

        fs::write(&tmp_path, &bytes).await.map_err(|e| {
            AppError::persistence(
                "Failed to write state file",
                json!({ "path": tmp_path.display().to_string(), "reason": e.to_string() }),
            )
        })?;

        fs::rename(&tmp_path, path).await.map_err(|e| {
            AppError::persistence(
                "Failed to replace state file",
                json!({ "path": path.display().to_string(), "reason": e.to_string() }),
            )
        })?;

        Ok(())
    }
}

#[async_trait]
impl StateStore for JsonStateStore {
    async fn load_config(&self) -> Result<Option<RedirectConfig>, AppError> {
        Self::load_json(&self.config_path).await
    }

    async fn save_config(&self, config: &RedirectConfig) -> Result<(), AppError> {
        Self::save_json(&self.config_path, config).await
    }

    async fn load_presets(&self) -> Result<Option<PresetCollection>, AppError> {
        Self::load_json(&self.presets_path).await
    }

    async fn save_presets(&self, presets: &PresetCollection) -> Result<(), AppError> {
        Self::save_json(&self.presets_path, presets).await
    }

    async fn health_check(&self) -> bool {
        let Some(data_dir) = self.config_path.parent() else {
            return false;
        };

        if fs::create_dir_all(data_dir).await.is_err() {
            return false;
        }

        match fs::metadata(data_dir).await {
            Ok(metadata) => metadata.is_dir() && !metadata.permissions().readonly(),
            Err(_) => false,
        }
    }
}
