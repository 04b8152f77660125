//! Session configuration and result types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use keygate_core::RefreshToken;

/// The credentials handed to a caller after login or refresh.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    /// Signed, short-lived access token.
    pub access_token: String,
    /// Opaque, store-backed refresh token.
    pub refresh_token: RefreshToken,
}

/// Configuration for the session service.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Access-token lifetime in seconds.
    #[serde(default = "SessionConfig::default_access_ttl")]
    pub access_ttl_seconds: u64,

    /// Value of the `role` claim stamped into every access token.
    #[serde(default = "SessionConfig::default_role")]
    pub role: String,

    /// Replace the refresh token on every refresh call.
    ///
    /// Off by default: a session keeps one refresh token for its whole
    /// lifetime. Turning this on shrinks the window in which a leaked
    /// refresh token stays usable.
    #[serde(default)]
    pub rotate_refresh_on_use: bool,
}

impl SessionConfig {
    const fn default_access_ttl() -> u64 {
        300 // 5 minutes
    }

    fn default_role() -> String {
        "ADMIN".to_string()
    }

    /// Get the access-token lifetime as a `Duration`.
    #[must_use]
    pub const fn access_ttl(&self) -> Duration {
        Duration::from_secs(self.access_ttl_seconds)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            access_ttl_seconds: Self::default_access_ttl(),
            role: Self::default_role(),
            rotate_refresh_on_use: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.access_ttl_seconds, 300);
        assert_eq!(config.role, "ADMIN");
        assert!(!config.rotate_refresh_on_use);
    }

    #[test]
    fn ttl_duration() {
        let config = SessionConfig::default();
        assert_eq!(config.access_ttl(), Duration::from_secs(300));
    }
}
