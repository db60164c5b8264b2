//! Process configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. The listening *port* is not here: it lives in the persisted
//! redirect state (`config.json`) so the web UI can manage it; `PORT` only
//! overrides it for one run.
//!
//! ## Variables
//!
//! - `DATA_DIR` - Directory holding `config.json` / `presets.json`
//!   (default: `./data`)
//! - `LISTEN_HOST` - Bind address (default: `0.0.0.0`)
//! - `PORT` - One-off override of the persisted listening port
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::Result;
use std::env;
use std::path::PathBuf;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the JSON state files live in.
    pub data_dir: PathBuf,
    /// Host/interface the HTTP server binds to.
    pub listen_host: String,
    /// When set, overrides the persisted listening port for this run.
    pub port_override: Option<u16>,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but not a valid port number.
    pub fn from_env() -> Result<Self> {
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        let listen_host = env::var("LISTEN_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_override = match env::var("PORT") {
            Ok(raw) => Some(
                raw.parse::<u16>()
                    .map_err(|_| anyhow::anyhow!("PORT must be a number 1-65535, got '{raw}'"))?,
            ),
            Err(_) => None,
        };

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            data_dir,
            listen_host,
            port_override,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `LISTEN_HOST` is empty
    /// - `PORT` is 0
    /// - `LOG_FORMAT` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if self.listen_host.is_empty() {
            anyhow::bail!("LISTEN_HOST must not be empty");
        }

        if self.port_override == Some(0) {
            anyhow::bail!("PORT must be between 1 and 65535");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Data directory: {}", self.data_dir.display());
        tracing::info!("  Listen host: {}", self.listen_host);

        match self.port_override {
            Some(port) => tracing::info!("  Port: {} (overridden by PORT)", port),
            None => tracing::info!("  Port: from persisted config"),
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
