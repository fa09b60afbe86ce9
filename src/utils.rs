use crate::constants::ROLL_MAX;
use std::num::ParseIntError;

/// Stored rollout percentage after range normalization.
#[derive(Debug, PartialEq)]
pub enum StoredPercentage {
    InRange(u8),
    Clamped { raw: i64, value: u8 },
}

pub fn parse_percentage(raw: &str) -> Result<StoredPercentage, ParseIntError> {
    let parsed = raw.parse::<i64>()?;
    let clamped = parsed.clamp(0, ROLL_MAX as i64);
    if clamped == parsed {
        Ok(StoredPercentage::InRange(clamped as u8))
    } else {
        Ok(StoredPercentage::Clamped {
            raw: parsed,
            value: clamped as u8,
        })
    }
}
