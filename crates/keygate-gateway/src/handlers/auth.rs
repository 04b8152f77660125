//! Session lifecycle endpoints: login, refresh, logout.
//!
//! These routes form the public allow-list together with the health and
//! key-set endpoints; none of them requires an access token.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use keygate_core::RefreshToken;
use keygate_session::{AuthFlow, TokenPair};

use crate::error::ApiError;
use crate::state::GatewayState;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Login password.
    pub password: String,
}

/// Request body for refresh and logout.
#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    /// The opaque refresh token.
    pub refresh_token: RefreshToken,
}

/// Response carrying a freshly minted credential pair.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// Signed, short-lived access token.
    pub access_token: String,
    /// Opaque refresh token.
    pub refresh_token: RefreshToken,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

/// Response confirming logout.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    /// Confirmation message.
    pub message: &'static str,
}

// =============================================================================
// Handlers
// =============================================================================

/// Log in with a username and password.
///
/// On success returns an access token and a refresh token together.
///
/// # Errors
///
/// Returns 401 for rejected credentials, with no further detail.
pub async fn login<F>(
    State(state): State<Arc<GatewayState<F>>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    F: AuthFlow + 'static,
{
    let pair = state
        .flow
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(TokenResponse::from(pair)))
}

/// Exchange a refresh token for a new access token.
///
/// The refresh token is echoed back unchanged unless rotation is enabled.
///
/// # Errors
///
/// Returns 401 for unknown/expired tokens and 503 if the store is
/// unreachable — the two are never conflated.
pub async fn refresh<F>(
    State(state): State<Arc<GatewayState<F>>>,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    F: AuthFlow + 'static,
{
    let pair = state.flow.refresh(&request.refresh_token).await?;

    Ok(Json(TokenResponse::from(pair)))
}

/// Revoke a refresh token.
///
/// Always reports success, whether or not the token existed, so callers
/// cannot probe for live tokens.
///
/// # Errors
///
/// Returns 503 only if the store cannot be reached to perform the delete.
pub async fn logout<F>(
    State(state): State<Arc<GatewayState<F>>>,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    F: AuthFlow + 'static,
{
    state.flow.logout(&request.refresh_token).await?;

    Ok(Json(LogoutResponse {
        message: "Logged out successfully",
    }))
}
