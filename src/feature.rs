use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Snapshot of a feature's rollout percentage and allow-list, taken by
/// [`crate::FeatureGate::get_feature`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Name of the feature.
    pub name: String,
    /// Rollout percentage in `0..=100`.
    pub percentage: u8,
    /// Users explicitly granted access to the feature.
    pub members: HashSet<String>,
    /// Time the snapshot was read from the store.
    pub fetched_at: DateTime<Utc>,
}

impl Feature {
    /// Returns `true` when `user` is on the feature's allow-list.
    pub fn has_member(&self, user: &str) -> bool {
        self.members.contains(user)
    }
}
