//! API error types and responses.
//!
//! This module defines the standard error format for all API responses.
//! Every credential failure collapses into a bare `unauthorized` so the
//! wire never reveals whether a token was expired, forged, or never
//! issued; store outages map to 503 so clients do not treat them as a
//! reason to log in again.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use keygate_auth::AuthError;
use keygate_session::SessionError;
use keygate_store::StoreError;

/// API error type that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// Invalid request body or parameters.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A backing dependency is unreachable.
    #[error("service unavailable")]
    ServiceUnavailable,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

/// Error details.
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::BadRequest(_) => "bad_request",
            Self::ServiceUnavailable => "service_unavailable",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        if err.http_status_code() == 401 {
            Self::Unauthorized
        } else {
            tracing::error!(error = %err, "Auth internal error");
            Self::Internal("authentication service error".to_string())
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::IdentityRejected | SessionError::RefreshTokenInvalid => {
                Self::Unauthorized
            }
            SessionError::Auth(auth_err) => Self::from(auth_err),
            SessionError::Store(StoreError::Unavailable(msg)) => {
                tracing::error!(error = %msg, "Store unavailable");
                Self::ServiceUnavailable
            }
            SessionError::Store(store_err) => {
                tracing::error!(error = %store_err, "Store error");
                Self::Internal("storage error".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_codes() {
        assert_eq!(
            ApiError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::BadRequest("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::ServiceUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::Internal("test".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_codes() {
        assert_eq!(ApiError::Unauthorized.code(), "unauthorized");
        assert_eq!(ApiError::ServiceUnavailable.code(), "service_unavailable");
    }

    #[test]
    fn credential_failures_collapse_to_unauthorized() {
        let expired = ApiError::from(SessionError::Auth(AuthError::TokenExpired));
        let forged = ApiError::from(SessionError::Auth(AuthError::InvalidSignature));
        let rejected = ApiError::from(SessionError::IdentityRejected);

        assert!(matches!(expired, ApiError::Unauthorized));
        assert!(matches!(forged, ApiError::Unauthorized));
        assert!(matches!(rejected, ApiError::Unauthorized));
    }

    #[test]
    fn store_outage_maps_to_503() {
        let err = ApiError::from(SessionError::Store(StoreError::Unavailable(
            "timeout".into(),
        )));
        assert!(matches!(err, ApiError::ServiceUnavailable));
    }

    #[test]
    fn unauthorized_body_has_no_diagnostic_detail() {
        let err = ApiError::from(SessionError::Auth(AuthError::InvalidToken(
            "kid mismatch at offset 7".into(),
        )));
        assert_eq!(err.to_string(), "unauthorized");
    }
}
