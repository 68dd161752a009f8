//! Redis cache client.
//!
//! Thin wrapper over a `redis` connection manager. The manager is cheaply
//! cloneable and designed for concurrent use, so callers clone the client
//! per operation instead of sharing it behind a lock. Reconnection after a
//! dropped connection is handled by the manager; the initial connection is
//! retried under [`RetryPolicy`].

pub mod retry;

pub use retry::{RetryDecision, RetryPolicy};

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError};
use std::time::Instant;
use tracing::{error, warn};

/// Cache client backed by a multiplexed, auto-reconnecting connection.
#[derive(Clone)]
pub struct CacheClient {
    connection: ConnectionManager,
}

impl CacheClient {
    /// Connect to Redis, retrying under the given policy.
    ///
    /// Returns the last connection error once the policy gives up.
    pub async fn connect(redis_url: &str, policy: &RetryPolicy) -> Result<Self, RedisError> {
        // Do NOT log redis_url: it may embed credentials
        // (e.g. redis://:password@host:port).
        let client = Client::open(redis_url).map_err(|e| {
            error!(target: "web.cache", error = %e, "Failed to open Redis client");
            e
        })?;

        let started = Instant::now();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            match ConnectionManager::new(client.clone()).await {
                Ok(connection) => return Ok(Self { connection }),
                Err(e) => match policy.decide(attempt, started.elapsed()) {
                    RetryDecision::RetryAfter(delay) => {
                        warn!(
                            target: "web.cache",
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            "Redis connection failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                    }
                    RetryDecision::GiveUp => {
                        error!(
                            target: "web.cache",
                            attempt,
                            error = %e,
                            "Redis connection failed, giving up"
                        );
                        return Err(e);
                    }
                },
            }
        }
    }

    /// Liveness probe.
    pub async fn ping(&self) -> Result<(), RedisError> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    /// Set a key with a time-to-live in seconds.
    pub async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), RedisError> {
        let mut conn = self.connection.clone();
        let _: () = conn.set_ex(key, value, ttl_seconds).await?;
        Ok(())
    }

    /// Get a key. Returns `None` if the key does not exist.
    pub async fn get(&self, key: &str) -> Result<Option<String>, RedisError> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    /// Delete a key.
    pub async fn del(&self, key: &str) -> Result<(), RedisError> {
        let mut conn = self.connection.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }
}
