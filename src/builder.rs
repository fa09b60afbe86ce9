use crate::errors::{ClientError, ErrorKind};
use crate::roll::{RandomRoll, Roll};
use crate::store::redis::{RedisPool, RedisStore};
use crate::store::FeatureStore;
use crate::FeatureGate;
use std::sync::Arc;

pub(crate) struct Options {
    store: Arc<dyn FeatureStore>,
    roll: Box<dyn Roll>,
}

impl Options {
    pub(crate) fn new(store: Arc<dyn FeatureStore>, roll: Box<dyn Roll>) -> Self {
        Self { store, roll }
    }

    pub(crate) fn store(&self) -> &dyn FeatureStore {
        self.store.as_ref()
    }

    pub(crate) fn roll(&self) -> &dyn Roll {
        self.roll.as_ref()
    }
}

/// Builder to create a [`FeatureGate`].
///
/// # Examples
///
/// ```rust
/// use curtain::{FeatureGate, MemoryStore};
///
/// let gate = FeatureGate::builder()
///     .store(MemoryStore::new().with_percentage("new-checkout", 25))
///     .build()
///     .unwrap();
/// ```
#[derive(Default)]
pub struct FeatureGateBuilder {
    store: Option<Arc<dyn FeatureStore>>,
    roll: Option<Box<dyn Roll>>,
}

impl FeatureGateBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Sets the [`FeatureStore`] the feature data is read from.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use curtain::{FeatureGate, MemoryStore};
    ///
    /// let builder = FeatureGate::builder()
    ///     .store(MemoryStore::new());
    /// ```
    pub fn store(mut self, store: impl FeatureStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Sets a [`FeatureStore`] that is shared with other parts of the host application.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use curtain::{FeatureGate, FeatureStore, MemoryStore};
    ///
    /// let store: Arc<dyn FeatureStore> = Arc::new(MemoryStore::new());
    /// let builder = FeatureGate::builder()
    ///     .shared_store(Arc::clone(&store));
    /// ```
    pub fn shared_store(mut self, store: Arc<dyn FeatureStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Uses a [`RedisStore`] over the given connection pool.
    ///
    /// The pool stays owned by the host application; the [`FeatureGate`] only
    /// checks connections out of it for single commands.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bb8_redis::RedisConnectionManager;
    /// use curtain::FeatureGate;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let manager = RedisConnectionManager::new("redis://127.0.0.1:6379/0").unwrap();
    ///     let pool = bb8::Pool::builder().build(manager).await.unwrap();
    ///
    ///     let gate = FeatureGate::builder()
    ///         .redis_pool(pool.clone())
    ///         .build()
    ///         .unwrap();
    /// }
    /// ```
    pub fn redis_pool(self, pool: RedisPool) -> Self {
        self.store(RedisStore::from_pool(pool))
    }

    /// Sets the [`Roll`] used for percentage rollouts.
    /// Default value is [`RandomRoll`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use curtain::{FeatureGate, MemoryStore};
    ///
    /// let builder = FeatureGate::builder()
    ///     .store(MemoryStore::new())
    ///     .roll(|| 50);
    /// ```
    pub fn roll(mut self, roll: impl Roll + 'static) -> Self {
        self.roll = Some(Box::new(roll));
        self
    }

    /// Creates a [`FeatureGate`] from the configuration made on the builder.
    ///
    /// # Errors
    ///
    /// This method fails if no store was configured.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use curtain::{FeatureGate, MemoryStore};
    ///
    /// let gate = FeatureGate::builder()
    ///     .store(MemoryStore::new())
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn build(self) -> Result<FeatureGate, ClientError> {
        let Some(store) = self.store else {
            return Err(ClientError::new(
                ErrorKind::StoreNotConfigured,
                "A store must be configured before building the FeatureGate.".to_owned(),
            ));
        };
        Ok(FeatureGate::with_options(Options::new(
            store,
            self.roll.unwrap_or(Box::new(RandomRoll)),
        )))
    }
}
