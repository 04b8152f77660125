//! Error types for session orchestration.

use thiserror::Error;

use keygate_auth::AuthError;
use keygate_store::StoreError;

/// A result type using `SessionError`.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors that can occur during login, refresh, and logout.
///
/// Credential failures (`IdentityRejected`, `RefreshTokenInvalid`) map to
/// 401 and are indistinguishable on the wire. Store outages keep their own
/// identity so they can map to 503 — conflating the two would let a store
/// outage read as "log in again".
#[derive(Debug, Error)]
pub enum SessionError {
    /// The identity predicate rejected the supplied credentials.
    #[error("identity rejected")]
    IdentityRejected,

    /// The refresh token is unknown, revoked, or expired.
    #[error("refresh token invalid")]
    RefreshTokenInvalid,

    /// Token issuance or verification error.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Storage layer error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl SessionError {
    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::IdentityRejected | Self::RefreshTokenInvalid => 401,
            Self::Auth(err) => err.http_status_code(),
            Self::Store(err) => err.http_status_code(),
        }
    }

    /// Returns `true` if this error might be resolved by retrying.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        match self {
            Self::IdentityRejected | Self::RefreshTokenInvalid => false,
            Self::Auth(err) => err.is_retriable(),
            Self::Store(err) => err.is_retriable(),
        }
    }
}
