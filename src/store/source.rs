use async_trait::async_trait;
use std::collections::HashSet;
use thiserror::Error;

/// Failure reported by a [`FeatureStore`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No connection could be checked out of the pool.
    #[error("Pool error: {0}")]
    Pool(String),
    /// The connection was refused, dropped or failed with an I/O error.
    #[error("Connection error: {0}")]
    Connection(String),
    /// The store rejected the command or answered with an unexpected response.
    #[error("Command error: {0}")]
    Command(String),
}

/// Key-value store API the [`crate::FeatureGate`] reads feature data from.
///
/// Every method returns `Ok(..)` on success (with `None` marking an absent key
/// where applicable) and `Err(..)` when the store could not serve the request.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashSet;
/// use async_trait::async_trait;
/// use curtain::{FeatureStore, StoreError};
///
/// struct ClosedStore;
///
/// #[async_trait]
/// impl FeatureStore for ClosedStore {
///     async fn get(&self, _: &str) -> Result<Option<String>, StoreError> {
///         Ok(None)
///     }
///     async fn set_add(&self, _: &str, _: &str) -> Result<(), StoreError> {
///         Ok(())
///     }
///     async fn set_is_member(&self, _: &str, _: &str) -> Result<bool, StoreError> {
///         Ok(false)
///     }
///     async fn set_members(&self, _: &str) -> Result<HashSet<String>, StoreError> {
///         Ok(HashSet::new())
///     }
/// }
/// ```
#[async_trait]
pub trait FeatureStore: Send + Sync {
    /// Reads the string value stored at `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Adds `member` to the set stored at `key`. Adding an existing member is a no-op.
    async fn set_add(&self, key: &str, member: &str) -> Result<(), StoreError>;

    /// Tests whether `member` belongs to the set stored at `key`.
    async fn set_is_member(&self, key: &str, member: &str) -> Result<bool, StoreError>;

    /// Returns every member of the set stored at `key`.
    async fn set_members(&self, key: &str) -> Result<HashSet<String>, StoreError>;
}
