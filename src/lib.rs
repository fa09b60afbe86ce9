//! Feature flags backed by a key-value store, with percentage rollouts and user allow-lists.
//!
//! # Examples
//!
//! ```rust
//! use curtain::{FeatureGate, MemoryStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let gate = FeatureGate::new(
//!         MemoryStore::new()
//!             .with_percentage("new-checkout", 0)
//!             .with_members("new-checkout", ["alice"]),
//!     );
//!
//!     assert!(gate.is_open_for_user("new-checkout", "alice").await);
//!     assert!(!gate.is_open("new-checkout").await);
//! }
//! ```

#![warn(missing_docs)]

mod builder;
mod client;
mod constants;
mod errors;
mod eval;
mod feature;
mod roll;
mod store;
mod utils;

pub use builder::FeatureGateBuilder;
pub use client::FeatureGate;
pub use constants::PKG_VERSION;
pub use errors::{ClientError, ErrorKind};
pub use eval::details::{EvaluationDetails, EvaluationReason};
pub use feature::Feature;
pub use roll::{RandomRoll, Roll};

pub use store::{
    memory::MemoryStore,
    percentage_key,
    redis::{RedisPool, RedisStore},
    source::{FeatureStore, StoreError},
    users_key,
};
