use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error kind that represents failures reported by the [`crate::FeatureGate`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ErrorKind {
    /// No error occurred.
    NoError,
    /// The backing store could not be reached or answered with an error.
    StoreFailure = 1100,
    /// The stored rollout percentage is not an integer.
    InvalidPercentage = 1101,
    /// [`crate::FeatureGateBuilder::build`] was called without a store.
    StoreNotConfigured = 2000,
    /// The stored rollout percentage is an integer outside `0..=100` and was clamped.
    PercentageOutOfRange = 3100,
}

impl ErrorKind {
    pub(crate) fn as_u16(&self) -> u16 {
        *self as u16
    }
}

/// Error struct that holds the [`ErrorKind`] and message of the reported failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientError {
    /// Error kind that represents failures reported by the [`crate::FeatureGate`].
    pub kind: ErrorKind,
    /// The text representation of the failure.
    pub message: String,
}

impl ClientError {
    pub(crate) fn new(kind: ErrorKind, message: String) -> Self {
        Self { message, kind }
    }
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message.as_str())
    }
}

impl Error for ClientError {}

impl From<StoreError> for ClientError {
    fn from(err: StoreError) -> Self {
        Self::new(ErrorKind::StoreFailure, err.to_string())
    }
}
