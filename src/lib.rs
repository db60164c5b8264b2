//! # EZ Redirect
//!
//! A small self-hosted HTTP redirect service: one stable `/redirect` URL
//! whose destination you can change on the fly, point at named presets, or
//! override temporarily with an automatic revert to a default.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer
//! separation:
//!
//! - **Domain Layer** ([`domain`]) - Redirect config, presets, and the
//!   storage trait
//! - **Application Layer** ([`application`]) - The redirect-state engine
//! - **Infrastructure Layer** ([`infrastructure`]) - JSON-file persistence
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Temporary redirects with lazy, access-time expiration (no background
//!   timers)
//! - Ordered named presets, activatable by API call or plain GET URL
//! - Optional API-key protection for mutating calls
//! - Write-through JSON persistence with rollback on write failure
//!
//! ## Quick Start
//!
//! ```bash
//! # Optional: pick where state lives
//! export DATA_DIR="./data"
//!
//! # Start the service (listens on the persisted port, default 8000)
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        ActivatedPreset, CurrentInfo, EffectiveRedirect, RedirectService, SecurityStatus,
    };
    pub use crate::domain::entities::{Preset, PresetCollection, RedirectConfig};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::JsonStateStore;
    pub use crate::state::AppState;
}
