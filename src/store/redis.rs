use crate::store::source::{FeatureStore, StoreError};
use async_trait::async_trait;
use bb8::{Pool, RunError};
use bb8_redis::redis::{AsyncCommands, RedisError};
use bb8_redis::RedisConnectionManager;
use std::collections::HashSet;

/// Connection pool type accepted by [`RedisStore`].
pub type RedisPool = Pool<RedisConnectionManager>;

/// [`FeatureStore`] backed by a Redis connection pool owned by the host application.
///
/// Each operation checks out one connection for a single command; the connection
/// goes back to the pool when the guard drops, on success and on error alike.
///
/// # Examples
///
/// ```no_run
/// use bb8_redis::RedisConnectionManager;
/// use curtain::{FeatureGate, RedisStore};
///
/// #[tokio::main]
/// async fn main() {
///     let manager = RedisConnectionManager::new("redis://:p4ssw0rd@10.0.1.1:6380/15").unwrap();
///     let pool = bb8::Pool::builder().build(manager).await.unwrap();
///
///     let gate = FeatureGate::new(RedisStore::from_pool(pool));
///     let open = gate.is_open("new-checkout").await;
/// }
/// ```
#[derive(Clone)]
pub struct RedisStore {
    pool: RedisPool,
}

impl RedisStore {
    /// Creates a new [`RedisStore`] sharing the given pool.
    pub fn from_pool(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &RedisPool {
        &self.pool
    }
}

#[async_trait]
impl FeatureStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.pool.get().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_add(&self, key: &str, member: &str) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await?;
        let _: () = conn.sadd(key, member).await?;
        Ok(())
    }

    async fn set_is_member(&self, key: &str, member: &str) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await?;
        let found: bool = conn.sismember(key, member).await?;
        Ok(found)
    }

    async fn set_members(&self, key: &str) -> Result<HashSet<String>, StoreError> {
        let mut conn = self.pool.get().await?;
        let members: HashSet<String> = conn.smembers(key).await?;
        Ok(members)
    }
}

impl From<RedisError> for StoreError {
    fn from(err: RedisError) -> Self {
        if err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() {
            StoreError::Connection(err.to_string())
        } else {
            StoreError::Command(err.to_string())
        }
    }
}

impl From<RunError<RedisError>> for StoreError {
    fn from(err: RunError<RedisError>) -> Self {
        match err {
            RunError::User(err) => err.into(),
            RunError::TimedOut => {
                StoreError::Pool("timed out waiting for a connection".to_owned())
            }
        }
    }
}
