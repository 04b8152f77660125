//! Error types for the storage layer.

use thiserror::Error;

/// A result type using `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during storage operations.
///
/// `Unavailable` is deliberately distinct from "key absent": a store
/// outage is a dependency failure and must never be reported to callers
/// as an invalid or expired credential.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The external store is unreachable or timed out.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A freshly generated token key already existed in the store.
    ///
    /// With 256 bits of token entropy this is astronomically unlikely;
    /// observing it means the random source or the store is compromised.
    #[error("refresh token collision")]
    TokenCollision,

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::Unavailable(_) => 503,
            Self::TokenCollision | Self::Internal(_) => 500,
        }
    }

    /// Returns `true` if this error might be resolved by retrying.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outage_is_503_and_retriable() {
        let err = StoreError::Unavailable("connection refused".into());
        assert_eq!(err.http_status_code(), 503);
        assert!(err.is_retriable());
    }

    #[test]
    fn collision_is_500_and_fatal() {
        assert_eq!(StoreError::TokenCollision.http_status_code(), 500);
        assert!(!StoreError::TokenCollision.is_retriable());
    }
}
