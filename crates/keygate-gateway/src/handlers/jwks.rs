//! Published key-set endpoint.
//!
//! Serves the verification half of the signing key pair so downstream
//! resource servers can verify access tokens without calling back here.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use keygate_session::AuthFlow;

use crate::state::GatewayState;

/// Return the JWK set for this process's signing keys.
pub async fn jwk_set<F>(State(state): State<Arc<GatewayState<F>>>) -> impl IntoResponse
where
    F: AuthFlow + 'static,
{
    Json(state.jwks.clone())
}
