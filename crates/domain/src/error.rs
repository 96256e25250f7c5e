//! Errors raised while computing position metrics.

use thiserror::Error;

/// Failure modes of a metrics computation.
///
/// Degenerate numeric inputs (zero weights, zero hold value) are not errors;
/// they resolve to zero values in the metric records. Arithmetic that leaves
/// the decimal range is reported as [`MetricsError::Overflow`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// The user has no liquidity events for the pool.
    #[error("No position data found for this user and pool")]
    NoPositionData,
    /// Retrieving the inputs failed. Carries the underlying cause's message.
    #[error("Failed to calculate position metrics: {0}")]
    Computation(String),
    /// An intermediate value exceeded the decimal range.
    #[error("Numeric overflow while computing {0}")]
    Overflow(&'static str),
}

impl MetricsError {
    /// Wraps any displayable cause into a [`MetricsError::Computation`].
    pub fn computation(cause: impl std::fmt::Display) -> Self {
        Self::Computation(cause.to_string())
    }
}
