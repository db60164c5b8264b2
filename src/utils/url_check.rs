//! Redirect target validation.
//!
//! Targets are stored exactly as supplied; validation only rejects inputs
//! that cannot serve as an absolute redirect destination.

use url::Url;

/// Errors that can occur while validating a redirect target.
#[derive(Debug, thiserror::Error)]
pub enum UrlCheckError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Validates that `input` is an absolute HTTP(S) URL with a host.
///
/// # Rules
///
/// 1. Must parse as an absolute URL (scheme + host at minimum)
/// 2. Scheme must be `http` or `https` - rejects `javascript:`, `data:`,
///    `file:` and other non-navigable schemes
/// 3. The input is NOT rewritten: query, fragment, casing, and ports are
///    stored as given, so a stored target reads back byte-for-byte
///
/// # Errors
///
/// Returns [`UrlCheckError::InvalidFormat`] for malformed or empty input.
/// Returns [`UrlCheckError::UnsupportedProtocol`] for non-HTTP(S) schemes.
/// Returns [`UrlCheckError::MissingHost`] when the URL has no host part.
pub fn validate_redirect_url(input: &str) -> Result<(), UrlCheckError> {
    let url = Url::parse(input).map_err(|e| UrlCheckError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlCheckError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlCheckError::MissingHost);
    }

    Ok(())
}
