/// Version of this crate.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const KEY_PREFIX: &str = "feature";

pub const ROLL_MIN: u8 = 1;
pub const ROLL_MAX: u8 = 100;
