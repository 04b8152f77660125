//! Refresh-credential storage layer for keygate.
//!
//! This crate persists refresh-token-to-subject bindings in an external
//! TTL-capable key-value store. The store is trusted for atomic per-key
//! reads/writes/deletes and for expiring entries on its own; no
//! client-side locking is performed.
//!
//! # Layout
//!
//! One entry per live refresh token:
//!
//! - key: `refreshToken:<opaque token>`
//! - value: subject identifier
//! - TTL: fixed duration, default 7 days
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use keygate_store::{RedisStore, RefreshTokenStore, DEFAULT_REFRESH_TTL};
//!
//! # async fn example() -> keygate_store::Result<()> {
//! let kv = Arc::new(RedisStore::connect("redis://127.0.0.1/").await?);
//! let tokens = RefreshTokenStore::new(kv, DEFAULT_REFRESH_TTL);
//!
//! let subject = "admin".parse().expect("valid subject");
//! let token = tokens.create(&subject).await?;
//! assert_eq!(tokens.validate(&token).await?, Some(subject));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod redis;
pub mod refresh;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use error::{Result, StoreError};
pub use refresh::{RefreshTokenStore, DEFAULT_REFRESH_TTL};
pub use self::redis::RedisStore;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryStore;

use async_trait::async_trait;
use std::time::Duration;

/// The external key-value store contract.
///
/// Implementations must provide atomic per-key operations and enforce the
/// supplied TTL themselves; callers never re-check expiry. Transport
/// failures surface as `StoreError::Unavailable`, never as an absent key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Write `key -> value` with the given TTL, only if `key` is absent.
    ///
    /// Returns `true` if the entry was written, `false` if the key
    /// already held a live value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    async fn put_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool>;

    /// Read the live value for `key`, if any.
    ///
    /// An expired or never-written key reads as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Delete `key` unconditionally. Deleting an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    async fn delete(&self, key: &str) -> Result<()>;
}
