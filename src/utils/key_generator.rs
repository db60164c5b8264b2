//! API key generation.

use base64::Engine as _;

/// Length of random bytes before base64 encoding.
const KEY_LENGTH_BYTES: usize = 24;

/// Generates a cryptographically secure random API key.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a 32-character key that is safe to embed in a
/// `?key=` query parameter.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_api_key() -> String {
    let mut buffer = [0u8; KEY_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}
