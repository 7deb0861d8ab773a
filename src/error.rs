//! Error types for the apex-rotations library
//!
//! Every conversion validates its input before computing anything, so a failure
//! never leaves a partial result behind. Numerical edge cases (zero angle,
//! antipodal quaternions) are branch-selected, not reported as errors.

use thiserror::Error;

/// Main result type used throughout the apex-rotations library
pub type RotationResult<T> = Result<T, RotationError>;

/// Main error type for the apex-rotations library
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RotationError {
    /// The array variant is not accepted by this operation
    #[error("{operation}: unsupported input type {received}")]
    UnsupportedType {
        operation: &'static str,
        received: &'static str,
    },

    /// Wrong rank or trailing dimension
    #[error("{operation}: expected shape {expected}, got {actual:?}")]
    InvalidShape {
        operation: &'static str,
        expected: &'static str,
        actual: Vec<usize>,
    },

    /// Two batched inputs disagree on the batch size
    #[error("{operation}: batch sizes differ ({left} vs {right})")]
    BatchSizeMismatch {
        operation: &'static str,
        left: usize,
        right: usize,
    },

    /// A stacked batch whose matrices do not share one shape
    #[error("{operation}: batch element {index} has shape {actual:?}, expected {expected:?}")]
    RaggedBatch {
        operation: &'static str,
        index: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },
}
