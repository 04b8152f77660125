//! Authenticated user endpoints.

use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::auth::AuthUser;

/// Response for the profile endpoint.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// Greeting for the authenticated subject.
    pub message: String,
}

/// Return the authenticated caller's profile.
///
/// Protected: the `AuthUser` extractor rejects the request before this
/// body runs if the bearer token is missing or invalid.
pub async fn profile(user: AuthUser) -> impl IntoResponse {
    Json(ProfileResponse {
        message: format!("Welcome {}", user.subject),
    })
}
