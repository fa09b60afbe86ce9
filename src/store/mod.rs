use crate::constants::KEY_PREFIX;

pub mod memory;
pub mod redis;
pub mod source;

pub use source::{FeatureStore, StoreError};

/// Returns the store key holding the rollout percentage of `feature`.
///
/// # Examples
///
/// ```rust
/// assert_eq!(curtain::percentage_key("checkout"), "feature:checkout:percentage");
/// ```
pub fn percentage_key(feature: &str) -> String {
    format!("{KEY_PREFIX}:{feature}:percentage")
}

/// Returns the store key holding the allow-listed users of `feature`.
///
/// # Examples
///
/// ```rust
/// assert_eq!(curtain::users_key("checkout"), "feature:checkout:users");
/// ```
pub fn users_key(feature: &str) -> String {
    format!("{KEY_PREFIX}:{feature}:users")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names() {
        assert_eq!(percentage_key("new-ui"), "feature:new-ui:percentage");
        assert_eq!(users_key("new-ui"), "feature:new-ui:users");
        assert_eq!(percentage_key("a:b"), "feature:a:b:percentage");
    }
}
