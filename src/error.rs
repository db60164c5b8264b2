//! Application error type and HTTP response mapping.
//!
//! Every engine failure is represented as a distinct [`AppError`] variant so
//! the HTTP layer can translate it to the right status code and a stable
//! machine-readable error code in the JSON body.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload embedded in error responses.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Application-level error with an HTTP mapping.
///
/// Variants correspond to the engine's failure kinds:
///
/// | variant          | HTTP | code                  |
/// |------------------|------|-----------------------|
/// | `InvalidUrl`     | 400  | `invalid_url`         |
/// | `InvalidDuration`| 400  | `invalid_duration`    |
/// | `MissingApiKey`  | 400  | `missing_api_key`     |
/// | `Validation`     | 400  | `validation_error`    |
/// | `Unauthorized`   | 401  | `unauthorized`        |
/// | `PresetNotFound` | 404  | `preset_not_found`    |
/// | `Conflict`       | 409  | `conflict`            |
/// | `Persistence`    | 500  | `persistence_failure` |
/// | `Internal`       | 500  | `internal_error`      |
#[derive(Debug)]
pub enum AppError {
    InvalidUrl { message: String, details: Value },
    InvalidDuration { message: String, details: Value },
    MissingApiKey { message: String, details: Value },
    Validation { message: String, details: Value },
    Unauthorized { message: String, details: Value },
    PresetNotFound { message: String, details: Value },
    Conflict { message: String, details: Value },
    Persistence { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_duration(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidDuration {
            message: message.into(),
            details,
        }
    }
    pub fn missing_api_key(message: impl Into<String>, details: Value) -> Self {
        Self::MissingApiKey {
            message: message.into(),
            details,
        }
    }
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn preset_not_found(message: impl Into<String>, details: Value) -> Self {
        Self::PresetNotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn persistence(message: impl Into<String>, details: Value) -> Self {
        Self::Persistence {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    fn parts(self) -> (StatusCode, &'static str, String, Value) {
        match self {
            AppError::InvalidUrl { message, details } => {
                (StatusCode::BAD_REQUEST, "invalid_url", message, details)
            }
            AppError::InvalidDuration { message, details } => (
                StatusCode::BAD_REQUEST,
                "invalid_duration",
                message,
                details,
            ),
            AppError::MissingApiKey { message, details } => {
                (StatusCode::BAD_REQUEST, "missing_api_key", message, details)
            }
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::Unauthorized { message, details } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", message, details)
            }
            AppError::PresetNotFound { message, details } => {
                (StatusCode::NOT_FOUND, "preset_not_found", message, details)
            }
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::Persistence { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "persistence_failure",
                message,
                details,
            ),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        }
    }

    /// Converts the error into its JSON payload without the HTTP envelope.
    pub fn to_error_info(self) -> ErrorInfo {
        let (_, code, message, details) = self.parts();
        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            AppError::InvalidUrl { message, .. }
            | AppError::InvalidDuration { message, .. }
            | AppError::MissingApiKey { message, .. }
            | AppError::Validation { message, .. }
            | AppError::Unauthorized { message, .. }
            | AppError::PresetNotFound { message, .. }
            | AppError::Conflict { message, .. }
            | AppError::Persistence { message, .. }
            | AppError::Internal { message, .. } => message,
        };
        f.write_str(message)
    }
}

impl std::error::Error for AppError {}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(&errors).unwrap_or_else(|_| json!({})),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = self.parts();

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        let mut response = (status, Json(body)).into_response();

        // RFC 6750: 401 responses advertise the expected auth scheme.
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, "Bearer".parse().unwrap());
        }

        response
    }
}
