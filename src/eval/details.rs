use crate::eval::evaluator::EvalResult;
use crate::ClientError;
use chrono::{DateTime, Utc};

/// Describes how an evaluation reached its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationReason {
    /// The user is on the feature's allow-list.
    Member,
    /// The result comes from comparing a random draw against the rollout percentage.
    Rollout {
        /// The stored rollout percentage.
        percentage: u8,
        /// The drawn value in `1..=100`.
        roll: u8,
    },
    /// The evaluation failed and the safe default was returned.
    Failure,
}

/// Details of the feature evaluation's result.
#[derive(Debug, Clone)]
pub struct EvaluationDetails {
    /// Whether the feature is open.
    pub value: bool,
    /// Name of the evaluated feature.
    pub feature: String,
    /// The user identifier used for the evaluation (if any).
    pub user: Option<String>,
    /// How the result was reached.
    pub reason: EvaluationReason,
    /// Indicates whether the safe default (`false`) was returned because the evaluation failed.
    pub is_default_value: bool,
    /// Error in case evaluation failed.
    pub error: Option<ClientError>,
    /// Time of the evaluation.
    pub evaluated_at: DateTime<Utc>,
}

impl EvaluationDetails {
    pub(crate) fn from_result(result: EvalResult, feature: &str, user: Option<&str>) -> Self {
        Self {
            value: result.value,
            feature: feature.to_owned(),
            user: user.map(str::to_owned),
            reason: result.reason,
            is_default_value: false,
            error: None,
            evaluated_at: Utc::now(),
        }
    }

    pub(crate) fn from_err(feature: &str, user: Option<&str>, err: ClientError) -> Self {
        Self {
            value: false,
            feature: feature.to_owned(),
            user: user.map(str::to_owned),
            reason: EvaluationReason::Failure,
            is_default_value: true,
            error: Some(err),
            evaluated_at: Utc::now(),
        }
    }
}
