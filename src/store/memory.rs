use crate::store::source::{FeatureStore, StoreError};
use crate::store::{percentage_key, users_key};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

/// In-process [`FeatureStore`] for tests and local development.
///
/// # Examples
///
/// ```rust
/// use curtain::{FeatureGate, MemoryStore};
///
/// let store = MemoryStore::new()
///     .with_percentage("new-checkout", 100)
///     .with_members("beta", ["alice", "bob"]);
///
/// let gate = FeatureGate::new(store);
/// ```
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
    sets: RwLock<HashMap<String, HashSet<String>>>,
}

impl MemoryStore {
    /// Creates an empty [`MemoryStore`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the raw `value` at `key`.
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values
            .get_mut()
            .insert(key.to_owned(), value.to_owned());
        self
    }

    /// Sets the rollout percentage of `feature`.
    pub fn with_percentage(self, feature: &str, percentage: u8) -> Self {
        self.with_value(&percentage_key(feature), &percentage.to_string())
    }

    /// Adds `members` to the allow-list of `feature`.
    pub fn with_members<I, S>(mut self, feature: &str, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sets
            .get_mut()
            .entry(users_key(feature))
            .or_default()
            .extend(members.into_iter().map(Into::into));
        self
    }

    /// Overwrites the raw `value` stored at `key`.
    pub async fn set(&self, key: &str, value: &str) {
        self.values
            .write()
            .await
            .insert(key.to_owned(), value.to_owned());
    }
}

#[async_trait]
impl FeatureStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set_add(&self, key: &str, member: &str) -> Result<(), StoreError> {
        self.sets
            .write()
            .await
            .entry(key.to_owned())
            .or_default()
            .insert(member.to_owned());
        Ok(())
    }

    async fn set_is_member(&self, key: &str, member: &str) -> Result<bool, StoreError> {
        Ok(self
            .sets
            .read()
            .await
            .get(key)
            .is_some_and(|set| set.contains(member)))
    }

    async fn set_members(&self, key: &str) -> Result<HashSet<String>, StoreError> {
        Ok(self.sets.read().await.get(key).cloned().unwrap_or_default())
    }
}
