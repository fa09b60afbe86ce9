use crate::constants::{ROLL_MAX, ROLL_MIN};
use crate::errors::{ClientError, ErrorKind};
use crate::eval::details::EvaluationReason;
use crate::roll::Roll;
use crate::store::{percentage_key, users_key, FeatureStore};
use crate::utils::{parse_percentage, StoredPercentage};
use log::warn;

pub struct EvalResult {
    pub value: bool,
    pub reason: EvaluationReason,
}

/// Allow-list membership first, then one rollout draw for everyone else.
pub async fn eval(
    store: &dyn FeatureStore,
    roll: &dyn Roll,
    feature: &str,
    user: Option<&str>,
) -> Result<EvalResult, ClientError> {
    if let Some(user) = user {
        if is_member(store, feature, user).await? {
            return Ok(EvalResult {
                value: true,
                reason: EvaluationReason::Member,
            });
        }
    }
    eval_rollout(store, roll, feature).await
}

pub async fn eval_rollout(
    store: &dyn FeatureStore,
    roll: &dyn Roll,
    feature: &str,
) -> Result<EvalResult, ClientError> {
    let percentage = percentage(store, feature).await?;
    let roll = roll.roll().clamp(ROLL_MIN, ROLL_MAX);
    Ok(EvalResult {
        value: roll <= percentage,
        reason: EvaluationReason::Rollout { percentage, roll },
    })
}

pub async fn is_member(
    store: &dyn FeatureStore,
    feature: &str,
    user: &str,
) -> Result<bool, ClientError> {
    store
        .set_is_member(&users_key(feature), user)
        .await
        .map_err(|err| {
            ClientError::new(
                ErrorKind::StoreFailure,
                format!("Failed to check the allow-list of feature '{feature}' ({err})."),
            )
        })
}

/// Reads the rollout percentage of `feature`; an absent key means `0`.
pub async fn percentage(store: &dyn FeatureStore, feature: &str) -> Result<u8, ClientError> {
    let raw = store.get(&percentage_key(feature)).await.map_err(|err| {
        ClientError::new(
            ErrorKind::StoreFailure,
            format!("Failed to read the rollout percentage of feature '{feature}' ({err})."),
        )
    })?;
    let Some(raw) = raw else {
        return Ok(0);
    };
    match parse_percentage(&raw) {
        Ok(StoredPercentage::InRange(value)) => Ok(value),
        Ok(StoredPercentage::Clamped { raw, value }) => {
            warn!(event_id = ErrorKind::PercentageOutOfRange.as_u16(); "The rollout percentage of feature '{feature}' is out of range ({raw}), using {value} instead.");
            Ok(value)
        }
        Err(err) => Err(ClientError::new(
            ErrorKind::InvalidPercentage,
            format!("The rollout percentage of feature '{feature}' is not an integer: '{raw}' ({err})."),
        )),
    }
}

#[cfg(test)]
mod evaluator_tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::store::StoreError;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRoll {
        value: u8,
        calls: AtomicUsize,
    }

    impl CountingRoll {
        fn new(value: u8) -> Self {
            Self {
                value,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Roll for CountingRoll {
        fn roll(&self) -> u8 {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.value
        }
    }

    struct BrokenSetStore;

    #[async_trait]
    impl FeatureStore for BrokenSetStore {
        async fn get(&self, _: &str) -> Result<Option<String>, StoreError> {
            Ok(Some("100".to_owned()))
        }
        async fn set_add(&self, _: &str, _: &str) -> Result<(), StoreError> {
            Err(StoreError::Command("WRONGTYPE".to_owned()))
        }
        async fn set_is_member(&self, _: &str, _: &str) -> Result<bool, StoreError> {
            Err(StoreError::Command("WRONGTYPE".to_owned()))
        }
        async fn set_members(&self, _: &str) -> Result<HashSet<String>, StoreError> {
            Err(StoreError::Command("WRONGTYPE".to_owned()))
        }
    }

    #[tokio::test]
    async fn absent_percentage_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(percentage(&store, "f").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn malformed_percentage() {
        let store = MemoryStore::new().with_value("feature:f:percentage", "ten");
        let err = percentage(&store, "f").await.err().unwrap();
        assert_eq!(err.kind, ErrorKind::InvalidPercentage);
        assert!(err.message.contains("'f'"));
        assert!(err.message.contains("'ten'"));
    }

    #[tokio::test]
    async fn clamped_percentage() {
        let store = MemoryStore::new()
            .with_value("feature:high:percentage", "150")
            .with_value("feature:low:percentage", "-3");
        assert_eq!(percentage(&store, "high").await.unwrap(), 100);
        assert_eq!(percentage(&store, "low").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn rollout_boundaries() {
        let store = MemoryStore::new().with_percentage("f", 30);

        let at = eval_rollout(&store, &CountingRoll::new(30), "f").await.unwrap();
        assert!(at.value);
        assert_eq!(
            at.reason,
            EvaluationReason::Rollout {
                percentage: 30,
                roll: 30
            }
        );

        let above = eval_rollout(&store, &CountingRoll::new(31), "f").await.unwrap();
        assert!(!above.value);
    }

    #[tokio::test]
    async fn rollout_clamps_roll() {
        let store = MemoryStore::new();
        let result = eval_rollout(&store, &CountingRoll::new(0), "f").await.unwrap();
        assert!(!result.value);
        assert_eq!(
            result.reason,
            EvaluationReason::Rollout {
                percentage: 0,
                roll: 1
            }
        );
    }

    #[tokio::test]
    async fn member_skips_roll() {
        let store = MemoryStore::new().with_members("f", ["alice"]);
        let roll = CountingRoll::new(1);

        let result = eval(&store, &roll, "f", Some("alice")).await.unwrap();
        assert!(result.value);
        assert_eq!(result.reason, EvaluationReason::Member);
        assert_eq!(roll.calls.load(Ordering::SeqCst), 0);

        let result = eval(&store, &roll, "f", Some("bob")).await.unwrap();
        assert!(!result.value);
        assert_eq!(roll.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn membership_failure_is_not_masked_by_rollout() {
        let roll = CountingRoll::new(1);
        let err = eval(&BrokenSetStore, &roll, "f", Some("alice"))
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind, ErrorKind::StoreFailure);
        assert!(err.message.contains("WRONGTYPE"));
        assert_eq!(roll.calls.load(Ordering::SeqCst), 0);
    }
}
