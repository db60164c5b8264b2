//! Engine services.

pub mod redirect_service;

pub use redirect_service::{
    ActivatedPreset, CurrentInfo, EffectiveRedirect, RedirectService, SecurityStatus,
};
