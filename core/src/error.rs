//! Error types for the algebra and camera operations.
//!
//! Every error is raised synchronously by the call that detects it and is
//! never recovered from internally.

use thiserror::Error;

/// Result type for fallible operations in this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors that can occur in vector, matrix, quaternion, and camera
/// operations.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// A flat slice did not have the number of elements the target
    /// vector or matrix type requires.
    #[error("expected {expected} elements, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// A vector of length zero was normalized or otherwise required
    /// to have a direction.
    #[error("vector has zero length")]
    ZeroLengthVector,

    /// A quaternion of length zero was normalized or inverted.
    #[error("quaternion has zero length")]
    ZeroLengthQuaternion,

    /// A matrix with determinant exactly zero was inverted.
    #[error("matrix is singular")]
    SingularMatrix,

    /// A rotation was constructed from a zero-length axis.
    #[error("rotation axis has zero length")]
    DegenerateAxis,

    /// Projection parameters do not describe a valid view volume.
    #[error("invalid projection parameters: {0}")]
    InvalidProjectionParams(&'static str),

    /// An interpolation parameter was outside its valid range [0, 1].
    #[error("interpolation parameter {0} is outside [0, 1]")]
    OutOfRange(f64),

    /// A look-at direction was parallel to the up vector.
    #[error("look direction is parallel to the up vector")]
    DegenerateCameraOrientation,
}
