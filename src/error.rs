//! Error types for validating training inputs.

use thiserror::Error;

/// Raised when training inputs are rejected.
///
/// Validation always happens before any weight is touched, so an error never
/// leaves a partially trained weight set behind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A sample or weight set has no vectors.
    #[error("{0} must contain at least one vector")]
    EmptyInput(String),

    /// Rows of a single matrix have different lengths.
    #[error("{matrix}: row {row} has {found} values, expected {expected}")]
    RaggedRows {
        /// Name of the offending matrix.
        matrix: String,
        /// 1-based row number.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },

    /// Samples and weights have different widths.
    #[error(
        "training data and weights must have the same number of dimensions \
         (samples: {samples}, weights: {weights})"
    )]
    DimensionMismatch {
        /// Width of the sample vectors.
        samples: usize,
        /// Width of the weight vectors.
        weights: usize,
    },

    /// Text in a numeric field is not a finite real number.
    #[error("{field}: {value:?} is not a number")]
    NotANumber {
        /// Name of the field being parsed.
        field: String,
        /// The rejected text.
        value: String,
    },

    /// The learning rate is NaN or infinite.
    #[error("learning rate must be finite, got {0}")]
    NonFiniteLearningRate(f64),

    /// The iteration count is not a non-negative integer.
    #[error("iterations: {0:?} is not a non-negative integer")]
    InvalidIterations(String),
}

/// Result type alias for validated operations.
pub type Result<T> = std::result::Result<T, ValidationError>;
