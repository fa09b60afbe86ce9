use crate::constants::{ROLL_MAX, ROLL_MIN};
use rand::Rng;

/// Source of the random draw used by percentage rollouts.
///
/// Implementations must return a uniformly distributed value in `1..=100`.
/// A feature is open for a call when the drawn value is less than or equal
/// to its rollout percentage.
///
/// Closures returning `u8` implement this trait, which makes the draw easy to
/// pin in tests:
///
/// ```rust
/// use curtain::{FeatureGate, MemoryStore};
///
/// let gate = FeatureGate::builder()
///     .store(MemoryStore::new().with_percentage("f", 30))
///     .roll(|| 30)
///     .build()
///     .unwrap();
/// ```
pub trait Roll: Send + Sync {
    /// Draws a value in `1..=100`.
    fn roll(&self) -> u8;
}

/// Default [`Roll`] drawing from the thread-local generator of [`rand`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomRoll;

impl Roll for RandomRoll {
    fn roll(&self) -> u8 {
        rand::rng().random_range(ROLL_MIN..=ROLL_MAX)
    }
}

impl<F> Roll for F
where
    F: Fn() -> u8 + Send + Sync,
{
    fn roll(&self) -> u8 {
        self()
    }
}
