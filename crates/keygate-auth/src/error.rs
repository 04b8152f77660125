//! Authentication error types.

use thiserror::Error;

/// A result type using `AuthError`.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur during token issuance and verification.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The access token has expired.
    #[error("token expired")]
    TokenExpired,

    /// The access token's issued-at timestamp lies in the future.
    #[error("token not yet valid")]
    TokenNotYetValid,

    /// The access token signature is invalid.
    #[error("invalid signature")]
    InvalidSignature,

    /// A required claim is missing from the token.
    #[error("missing required claim: {0}")]
    MissingClaim(String),

    /// The key ID specified in the token header is not known.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// The `sub` claim is not a well-formed subject.
    #[error("invalid subject claim")]
    InvalidSubject,

    /// The token format is invalid.
    #[error("invalid token format: {0}")]
    InvalidToken(String),

    /// A caller-supplied claim collides with a registered claim name.
    #[error("reserved claim name: {0}")]
    ReservedClaim(String),

    /// A published key is not an Ed25519 signing key.
    #[error("unsupported key type: {0}")]
    UnsupportedKey(String),

    /// Secure key-pair generation failed. Fatal at startup.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// Signing the claim set failed.
    #[error("signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    /// Returns `true` if this error indicates the client should retry with
    /// a freshly refreshed token.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::TokenExpired)
    }

    /// Returns the appropriate HTTP status code for this error.
    ///
    /// Verification failures are all 401 and deliberately indistinguishable
    /// on the wire; only process-side faults map to 500.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::TokenExpired
            | Self::TokenNotYetValid
            | Self::InvalidSignature
            | Self::MissingClaim(_)
            | Self::KeyNotFound(_)
            | Self::InvalidSubject
            | Self::InvalidToken(_) => 401,
            Self::ReservedClaim(_)
            | Self::UnsupportedKey(_)
            | Self::KeyGeneration(_)
            | Self::Signing(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_failures_are_401() {
        assert_eq!(AuthError::TokenExpired.http_status_code(), 401);
        assert_eq!(AuthError::TokenNotYetValid.http_status_code(), 401);
        assert_eq!(AuthError::InvalidSignature.http_status_code(), 401);
        assert_eq!(AuthError::KeyNotFound("kid".into()).http_status_code(), 401);
        assert_eq!(
            AuthError::InvalidToken("garbage".into()).http_status_code(),
            401
        );
    }

    #[test]
    fn process_faults_are_500() {
        assert_eq!(AuthError::KeyGeneration("rng".into()).http_status_code(), 500);
        assert_eq!(AuthError::Signing("oops".into()).http_status_code(), 500);
    }

    #[test]
    fn only_expiry_is_retriable() {
        assert!(AuthError::TokenExpired.is_retriable());
        assert!(!AuthError::InvalidSignature.is_retriable());
        assert!(!AuthError::KeyGeneration("rng".into()).is_retriable());
    }
}
