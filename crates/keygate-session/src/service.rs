//! Session service implementation.
//!
//! This module provides the `AuthFlow` trait and the `AuthService`
//! implementation orchestrating login, refresh, and logout. The service
//! holds no session state of its own: all state lives in the signing key
//! material and the refresh-token store.

use std::collections::BTreeMap;

use async_trait::async_trait;

use keygate_auth::TokenIssuer;
use keygate_core::{RefreshToken, Subject};
use keygate_store::{KeyValueStore, RefreshTokenStore};

use crate::error::{Result, SessionError};
use crate::identity::IdentityVerifier;
use crate::types::{SessionConfig, TokenPair};

/// The three session lifecycle operations.
#[async_trait]
pub trait AuthFlow: Send + Sync {
    /// Check credentials and, on success, mint an access token and a
    /// refresh token.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::IdentityRejected` if the credentials fail.
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair>;

    /// Exchange a live refresh token for a new access token.
    ///
    /// Unless rotation is enabled, the same refresh token is echoed back.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::RefreshTokenInvalid` for unknown, revoked,
    /// or expired tokens, and `SessionError::Store` if the store cannot
    /// be reached.
    async fn refresh(&self, refresh_token: &RefreshToken) -> Result<TokenPair>;

    /// Revoke a refresh token.
    ///
    /// Succeeds whether or not the token existed, so callers cannot probe
    /// for live tokens. Outstanding access tokens stay valid until their
    /// own expiry.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if the store cannot be reached.
    async fn logout(&self, refresh_token: &RefreshToken) -> Result<()>;
}

/// The session service.
pub struct AuthService<I, S> {
    identity: I,
    issuer: TokenIssuer,
    refresh_tokens: RefreshTokenStore<S>,
    config: SessionConfig,
}

impl<I, S> AuthService<I, S>
where
    I: IdentityVerifier,
    S: KeyValueStore,
{
    /// Create a new session service.
    #[must_use]
    pub fn new(
        identity: I,
        issuer: TokenIssuer,
        refresh_tokens: RefreshTokenStore<S>,
        config: SessionConfig,
    ) -> Self {
        Self {
            identity,
            issuer,
            refresh_tokens,
            config,
        }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn issue_access(&self, subject: &Subject) -> Result<String> {
        let claims = BTreeMap::from([("role".to_string(), self.config.role.clone())]);
        let token = self
            .issuer
            .issue(subject, &claims, self.config.access_ttl())?;
        Ok(token)
    }
}

#[async_trait]
impl<I, S> AuthFlow for AuthService<I, S>
where
    I: IdentityVerifier,
    S: KeyValueStore,
{
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair> {
        let Some(subject) = self.identity.check(username, password).await else {
            tracing::info!(username = %username, "Login rejected");
            return Err(SessionError::IdentityRejected);
        };

        let access_token = self.issue_access(&subject)?;
        let refresh_token = self.refresh_tokens.create(&subject).await?;

        tracing::info!(subject = %subject, "Login succeeded");
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn refresh(&self, refresh_token: &RefreshToken) -> Result<TokenPair> {
        let Some(subject) = self.refresh_tokens.validate(refresh_token).await? else {
            tracing::info!("Refresh rejected: unknown or expired token");
            return Err(SessionError::RefreshTokenInvalid);
        };

        let access_token = self.issue_access(&subject)?;

        let refresh_token = if self.config.rotate_refresh_on_use {
            let rotated = self.refresh_tokens.create(&subject).await?;
            self.refresh_tokens.revoke(refresh_token).await?;
            rotated
        } else {
            refresh_token.clone()
        };

        tracing::debug!(subject = %subject, "Access token refreshed");
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn logout(&self, refresh_token: &RefreshToken) -> Result<()> {
        self.refresh_tokens.revoke(refresh_token).await?;
        tracing::info!("Logout processed");
        Ok(())
    }
}
