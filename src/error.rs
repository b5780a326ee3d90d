//! Error types for the moving-average pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, MovAvgError>;

/// Errors raised while configuring or running a moving-average pipeline.
///
/// Gaps and Holt-Winters warm-up are not errors; they surface as absent
/// bucket values instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MovAvgError {
    /// Window size is zero or negative.
    #[error("[window] must be a positive, non-zero integer; value supplied was [{0}]")]
    InvalidWindow(i64),

    /// Prediction count is zero or negative.
    #[error("[predict] must be a positive, non-zero integer no greater than 10000; value supplied was [{0}]")]
    InvalidPrediction(i64),

    /// Invalid model parameter value or combination.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Model name is not one of the supported models.
    #[error("unknown model [{0}]")]
    UnknownModel(String),

    /// Parent aggregation cannot feed a moving average.
    #[error("parent aggregation [{name}] cannot be used for a moving average: {reason}")]
    UnsupportedParent { name: String, reason: String },

    /// Configuration document could not be parsed.
    #[error("could not parse pipeline configuration: {0}")]
    ConfigParse(String),

    /// Bucket keys are not strictly ascending.
    #[error("buckets are not in strictly ascending key order at index {index}")]
    UnorderedBuckets { index: usize },

    /// Key kinds or key spacing do not agree.
    #[error("key mismatch: {0}")]
    KeyMismatch(String),

    /// Runner driven outside its state machine.
    #[error("invalid pipeline state: {0}")]
    InvalidState(String),
}

impl MovAvgError {
    /// Whether the error stems from configuration and must abort the request.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            MovAvgError::InvalidWindow(_)
                | MovAvgError::InvalidPrediction(_)
                | MovAvgError::InvalidParameter(_)
                | MovAvgError::UnknownModel(_)
                | MovAvgError::UnsupportedParent { .. }
                | MovAvgError::ConfigParse(_)
        )
    }
}

impl From<serde_json::Error> for MovAvgError {
    fn from(err: serde_json::Error) -> Self {
        MovAvgError::ConfigParse(err.to_string())
    }
}
