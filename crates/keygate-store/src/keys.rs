//! Key encoding for the external store.
//!
//! All refresh-token entries live under a single namespace prefix so they
//! can be distinguished from any other keys sharing the store.

use keygate_core::RefreshToken;

/// Namespace prefix for refresh-token entries.
pub const REFRESH_TOKEN_PREFIX: &str = "refreshToken:";

/// Encode the store key for a refresh token: `refreshToken:<opaque>`.
#[must_use]
pub fn refresh_token_key(token: &RefreshToken) -> String {
    format!("{REFRESH_TOKEN_PREFIX}{}", token.as_str())
}
