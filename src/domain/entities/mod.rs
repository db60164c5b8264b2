//! Core entities owned by the redirect engine.

pub mod preset;
pub mod redirect_config;

pub use preset::{Preset, PresetCollection};
pub use redirect_config::RedirectConfig;
