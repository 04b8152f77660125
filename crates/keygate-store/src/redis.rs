//! Redis implementation of the key-value store contract.
//!
//! Uses a multiplexed connection manager, so the handle is cheap to clone
//! and safe to share across request tasks. TTLs are enforced by Redis
//! itself via `SET ... EX` / key expiry.

use std::time::Duration;

use ::redis::aio::ConnectionManager;
use ::redis::AsyncCommands;
use async_trait::async_trait;

use crate::error::{Result, StoreError};
use crate::KeyValueStore;

/// Redis-backed key-value store.
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
}

impl RedisStore {
    /// Connect to Redis at `url` (e.g. `redis://127.0.0.1/`).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the URL is malformed or the
    /// initial connection cannot be established.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = ::redis::Client::open(url).map_err(from_redis)?;
        let manager = client.get_connection_manager().await.map_err(from_redis)?;

        tracing::info!(url = %url, "Connected to Redis");
        Ok(Self { manager })
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn put_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool> {
        // Redis rejects EX 0; clamp sub-second TTLs up to one second.
        let ttl_secs = ttl.as_secs().max(1);

        let mut conn = self.manager.clone();
        let reply: Option<String> = ::redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("EX")
            .arg(ttl_secs)
            .query_async(&mut conn)
            .await
            .map_err(from_redis)?;

        Ok(reply.is_some())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(key).await.map_err(from_redis)?;
        Ok(value)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.manager.clone();
        // DEL returns the number of keys removed; zero is still success.
        let _removed: u64 = conn.del(key).await.map_err(from_redis)?;
        Ok(())
    }
}

fn from_redis(err: ::redis::RedisError) -> StoreError {
    StoreError::Unavailable(err.to_string())
}
