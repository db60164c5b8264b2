//! Request-processing middleware.

pub mod auth;
pub mod rate_limit;
pub mod tracing;
