//! DTOs for the listening-port endpoints.

use serde::{Deserialize, Serialize};

/// Current listening port as returned by `GET /api/port`.
#[derive(Debug, Serialize)]
pub struct PortResponse {
    pub port: u16,
}

/// Request to persist a new listening port.
#[derive(Debug, Deserialize)]
pub struct SetPortRequest {
    pub port: u16,
}

/// Response after persisting a new port.
#[derive(Debug, Serialize)]
pub struct SetPortResponse {
    pub status: &'static str,
    pub port: u16,
    /// The running server keeps its socket; a restart picks up the change.
    pub requires_restart: bool,
}
