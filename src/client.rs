use crate::builder::{FeatureGateBuilder, Options};
use crate::eval::details::EvaluationDetails;
use crate::eval::evaluator::{eval, percentage};
use crate::roll::RandomRoll;
use crate::store::{users_key, FeatureStore};
use crate::{ClientError, ErrorKind, Feature};
use chrono::Utc;
use log::error;
use std::sync::Arc;

/// The main component for evaluating feature flags.
///
/// A feature is described by two store keys:
/// - `feature:<name>:percentage` holds the rollout percentage (`0` to `100`, absent means `0`).
/// - `feature:<name>:users` holds the set of users the feature is always open for.
///
/// None of the methods surface errors: store failures and malformed data are
/// logged and the feature is treated as closed.
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
///     let gate = FeatureGate::builder().redis_pool(pool).build().unwrap();
///
///     let is_open = gate.is_open_for_user("new-checkout", "user@example.com").await;
/// }
/// ```
pub struct FeatureGate {
    options: Options,
}

impl FeatureGate {
    pub(crate) fn with_options(options: Options) -> Self {
        Self { options }
    }

    /// Creates a new [`FeatureGateBuilder`] used to build a [`FeatureGate`].
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
    pub fn builder() -> FeatureGateBuilder {
        FeatureGateBuilder::new()
    }

    /// Creates a new [`FeatureGate`] reading from `store` with the default random source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use curtain::{FeatureGate, MemoryStore};
    ///
    /// let gate = FeatureGate::new(MemoryStore::new());
    /// ```
    pub fn new(store: impl FeatureStore + 'static) -> Self {
        Self::with_options(Options::new(Arc::new(store), Box::new(RandomRoll)))
    }

    /// Checks whether `feature` is open for this call.
    ///
    /// A random number between `1` and `100` is drawn and compared against the
    /// feature's rollout percentage: `0` never opens, `100` always opens, and `30`
    /// opens roughly three calls out of ten. Every call draws again, so
    /// subsequent calls can return different results.
    ///
    /// Returns `false` if the store can't be reached or the stored percentage is malformed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use curtain::{FeatureGate, MemoryStore};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let gate = FeatureGate::new(MemoryStore::new().with_percentage("new-checkout", 100));
    ///
    ///     assert!(gate.is_open("new-checkout").await);
    /// }
    /// ```
    pub async fn is_open(&self, feature: &str) -> bool {
        self.is_open_details(feature, None).await.value
    }

    /// Checks whether `feature` is open for `user`.
    ///
    /// Users on the feature's allow-list always get `true`. For everyone else
    /// this behaves like [`FeatureGate::is_open`]. A feature with `0` percentage
    /// is therefore open only for its allow-listed users.
    ///
    /// Returns `false` if the store can't be reached or the stored percentage is malformed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use curtain::{FeatureGate, MemoryStore};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let gate = FeatureGate::new(MemoryStore::new().with_members("beta", ["alice"]));
    ///
    ///     assert!(gate.is_open_for_user("beta", "alice").await);
    ///     assert!(!gate.is_open_for_user("beta", "bob").await);
    /// }
    /// ```
    pub async fn is_open_for_user(&self, feature: &str, user: &str) -> bool {
        self.is_open_details(feature, Some(user)).await.value
    }

    /// The same as [`FeatureGate::is_open`] and [`FeatureGate::is_open_for_user`] but
    /// returns an [`EvaluationDetails`] describing how the result was reached.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use curtain::{EvaluationReason, FeatureGate, MemoryStore};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let gate = FeatureGate::new(MemoryStore::new().with_members("beta", ["alice"]));
    ///
    ///     let details = gate.is_open_details("beta", Some("alice")).await;
    ///     assert_eq!(details.reason, EvaluationReason::Member);
    /// }
    /// ```
    pub async fn is_open_details(&self, feature: &str, user: Option<&str>) -> EvaluationDetails {
        match eval(self.options.store(), self.options.roll(), feature, user).await {
            Ok(result) => EvaluationDetails::from_result(result, feature, user),
            Err(err) => {
                match user {
                    Some(user) => {
                        error!(event_id = err.kind.as_u16(); "Evaluating feature '{feature}' for user '{user}' failed. Returning the default value 'false'. {err}")
                    }
                    None => {
                        error!(event_id = err.kind.as_u16(); "Evaluating feature '{feature}' failed. Returning the default value 'false'. {err}")
                    }
                }
                EvaluationDetails::from_err(feature, user, err)
            }
        }
    }

    /// Adds `user` to the allow-list of `feature`.
    ///
    /// Adding a user that is already on the list has no effect. Failures are
    /// logged and otherwise ignored; the write is not retried.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use curtain::{FeatureGate, MemoryStore};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let gate = FeatureGate::new(MemoryStore::new());
    ///
    ///     gate.open_feature_for_user("beta", "alice").await;
    ///     assert!(gate.is_open_for_user("beta", "alice").await);
    /// }
    /// ```
    pub async fn open_feature_for_user(&self, feature: &str, user: &str) {
        if let Err(err) = self
            .options
            .store()
            .set_add(&users_key(feature), user)
            .await
        {
            let err = ClientError::from(err);
            error!(event_id = err.kind.as_u16(); "Opening feature '{feature}' for user '{user}' failed. {err}");
        }
    }

    /// Returns a [`Feature`] snapshot with the rollout percentage and allow-list of `name`.
    ///
    /// Returns `None` if the store can't be reached or the stored percentage is malformed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use curtain::{FeatureGate, MemoryStore};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let gate = FeatureGate::new(
    ///         MemoryStore::new()
    ///             .with_percentage("beta", 30)
    ///             .with_members("beta", ["alice", "bob"]),
    ///     );
    ///
    ///     let feature = gate.get_feature("beta").await.unwrap();
    ///     assert_eq!(feature.percentage, 30);
    ///     assert!(feature.has_member("alice"));
    /// }
    /// ```
    pub async fn get_feature(&self, name: &str) -> Option<Feature> {
        match self.fetch_feature(name).await {
            Ok(feature) => Some(feature),
            Err(err) => {
                error!(event_id = err.kind.as_u16(); "Fetching feature '{name}' failed. Returning no feature. {err}");
                None
            }
        }
    }

    async fn fetch_feature(&self, name: &str) -> Result<Feature, ClientError> {
        let store = self.options.store();
        let percentage = percentage(store, name).await?;
        let members = store.set_members(&users_key(name)).await.map_err(|err| {
            ClientError::new(
                ErrorKind::StoreFailure,
                format!("Failed to read the allow-list of feature '{name}' ({err})."),
            )
        })?;
        Ok(Feature {
            name: name.to_owned(),
            percentage,
            members,
            fetched_at: Utc::now(),
        })
    }
}
