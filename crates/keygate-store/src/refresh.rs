//! Refresh-token creation, validation, and revocation.
//!
//! Refresh tokens are opaque random strings mapped 1:1 to a subject in the
//! external store. The store's TTL eviction is the sole expiry mechanism;
//! this layer never records timestamps of its own.

use std::sync::Arc;
use std::time::Duration;

use keygate_core::{RefreshToken, Subject};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::KeyValueStore;

/// Default refresh-token lifetime: 7 days.
pub const DEFAULT_REFRESH_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Store-backed refresh-token lifecycle operations.
///
/// A subject may hold any number of live tokens concurrently; nothing here
/// enforces a per-subject session limit. Listing or capping sessions per
/// subject would be an additive change behind this type.
pub struct RefreshTokenStore<S> {
    kv: Arc<S>,
    ttl: Duration,
}

impl<S: KeyValueStore> RefreshTokenStore<S> {
    /// Create a refresh-token store writing entries with the given TTL.
    #[must_use]
    pub fn new(kv: Arc<S>, ttl: Duration) -> Self {
        Self { kv, ttl }
    }

    /// The TTL applied to newly created tokens.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Generate a fresh opaque token for `subject` and persist the
    /// `token -> subject` binding.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TokenCollision` if the generated token already
    /// existed (an integrity violation, not a retriable condition), or
    /// `StoreError::Unavailable` if the store cannot be reached.
    pub async fn create(&self, subject: &Subject) -> Result<RefreshToken> {
        let token = RefreshToken::generate().map_err(|e| StoreError::Internal(e.to_string()))?;
        let key = keys::refresh_token_key(&token);

        let inserted = self
            .kv
            .put_if_absent(&key, subject.as_str(), self.ttl)
            .await?;
        if !inserted {
            return Err(StoreError::TokenCollision);
        }

        tracing::debug!(subject = %subject, "Created refresh token");
        Ok(token)
    }

    /// Resolve a token to its subject.
    ///
    /// Returns `None` for tokens that were never issued, were revoked, or
    /// have been evicted by the store's TTL. A store outage is an `Err`,
    /// never `None`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store cannot be reached.
    pub async fn validate(&self, token: &RefreshToken) -> Result<Option<Subject>> {
        let key = keys::refresh_token_key(token);

        match self.kv.get(&key).await? {
            Some(value) => {
                let subject = value
                    .parse()
                    .map_err(|_| StoreError::Internal("corrupt subject entry".to_string()))?;
                Ok(Some(subject))
            }
            None => Ok(None),
        }
    }

    /// Delete a token's binding. Revoking an absent or already-revoked
    /// token is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store cannot be reached.
    pub async fn revoke(&self, token: &RefreshToken) -> Result<()> {
        self.kv.delete(&keys::refresh_token_key(token)).await?;
        tracing::debug!("Revoked refresh token");
        Ok(())
    }
}
