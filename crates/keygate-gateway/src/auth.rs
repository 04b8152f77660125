//! Authentication extractor — the per-request verification gate.
//!
//! This module provides the `AuthUser` extractor that verifies the bearer
//! access token and hands the resolved subject to protected handlers.
//! Verification is pure in-memory signature/timestamp checking: the gate
//! never touches the refresh-token store, so protected routes stay up
//! even when the store is down.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use keygate_auth::VerifiedClaims;
use keygate_core::Subject;
use keygate_session::AuthFlow;

use crate::error::ApiError;
use crate::state::GatewayState;

/// An authenticated caller extracted from a bearer access token.
///
/// Routes that take this extractor reject unauthenticated requests before
/// the handler body runs; routes that omit it form the public allow-list.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The authenticated principal.
    pub subject: Subject,
    /// The `role` claim, if present.
    pub role: Option<String>,
    /// All caller-visible claims carried by the token.
    pub claims: BTreeMap<String, String>,
}

impl AuthUser {
    /// Create an `AuthUser` from verified claims.
    #[must_use]
    pub fn from_claims(claims: &VerifiedClaims) -> Self {
        Self {
            subject: claims.subject.clone(),
            role: claims.claims.get("role").cloned(),
            claims: claims.claims.clone(),
        }
    }
}

impl<F> FromRequestParts<Arc<GatewayState<F>>> for AuthUser
where
    F: AuthFlow + 'static,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<GatewayState<F>>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Self, Self::Rejection>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            // Extract the Authorization header
            let auth_header = parts
                .headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or(ApiError::Unauthorized)?;

            // Extract the Bearer token
            let token = auth_header
                .strip_prefix("Bearer ")
                .ok_or(ApiError::Unauthorized)?;

            // Verify signature and timestamps; no store access
            let claims = state.verifier.verify(token)?;

            Ok(AuthUser::from_claims(&claims))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keygate_auth::{SigningKeyPair, TokenIssuer, TokenVerifier};
    use std::time::Duration;

    #[test]
    fn auth_user_from_claims() {
        let keys = Arc::new(SigningKeyPair::generate().unwrap());
        let issuer = TokenIssuer::new(Arc::clone(&keys));
        let verifier = TokenVerifier::for_key_pair(&keys);

        let claims = BTreeMap::from([("role".to_string(), "ADMIN".to_string())]);
        let token = issuer
            .issue(&"admin".parse().unwrap(), &claims, Duration::from_secs(60))
            .unwrap();
        let verified = verifier.verify(&token).unwrap();

        let user = AuthUser::from_claims(&verified);
        assert_eq!(user.subject.as_str(), "admin");
        assert_eq!(user.role.as_deref(), Some("ADMIN"));
        assert_eq!(user.claims.len(), 1);
    }
}
