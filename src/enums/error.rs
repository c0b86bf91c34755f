//! # Error Module - Custom *ndvek* Error Type
//!
//! Defines the unified error type for ndvek.
//!
//! ## Features
//! - Covers construction-time shape checks, broadcast failures, dtype
//! incompatibility, out of bounds access, and reshape failures.
//! - Implements `Display` for readable output and `Error` for integration
//! with standard Rust error handling.

use std::error::Error;
use std::fmt;

use crate::enums::dtype::DType;

/// Catch all error type for `ndvek`
#[derive(Debug, Clone, PartialEq)]
pub enum NdError {
    /// Data does not match the declared or required shape.
    ///
    /// At construction `found` is the flat length of the supplied buffer.
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
        message: Option<String>,
    },
    /// No broadcast shape exists for the two operands.
    IncompatibleShape { lhs: Vec<usize>, rhs: Vec<usize> },
    /// Comparison and logical operators only accept identical shapes.
    BroadcastUnsupported {
        op: &'static str,
        lhs: Vec<usize>,
        rhs: Vec<usize>,
    },
    /// Invalid dtype combination.
    ///
    /// For single operand checks `rhs` is the kind the operation requires.
    TypeMismatch {
        lhs: DType,
        rhs: DType,
        message: Option<String>,
    },
    /// Multi-index or axis position outside the array bounds.
    IndexOutOfBounds { index: Vec<isize>, shape: Vec<usize> },
    /// Source rank exceeds the broadcast target rank.
    ///
    /// Unreachable from valid public calls. Seeing this is a bug in
    /// broadcast shape computation, not bad input.
    RankMismatch { source: Vec<usize>, target: Vec<usize> },
    /// Reshape target does not hold the same number of elements.
    InvalidReshape { from: Vec<usize>, to: Vec<usize> },
}

impl fmt::Display for NdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NdError::ShapeMismatch { expected, found, message } => {
                if let Some(msg) = message {
                    write!(f, "Shape mismatch: expected {:?}, found {:?}: {}", expected, found, msg)
                } else {
                    write!(f, "Shape mismatch: expected {:?}, found {:?}.", expected, found)
                }
            }
            NdError::IncompatibleShape { lhs, rhs } => {
                write!(f, "Incompatible shapes for broadcasting: {:?} and {:?}.", lhs, rhs)
            }
            NdError::BroadcastUnsupported { op, lhs, rhs } => {
                write!(
                    f,
                    "Broadcasting is not supported for '{}': shapes {:?} and {:?} must be equal.",
                    op, lhs, rhs
                )
            }
            NdError::TypeMismatch { lhs, rhs, message } => {
                if let Some(msg) = message {
                    write!(f, "Type mismatch between '{}' and '{}': {}", lhs, rhs, msg)
                } else {
                    write!(f, "Type mismatch between '{}' and '{}'.", lhs, rhs)
                }
            }
            NdError::IndexOutOfBounds { index, shape } => {
                write!(f, "Index {:?} out of bounds for shape {:?}.", index, shape)
            }
            NdError::RankMismatch { source, target } => {
                write!(
                    f,
                    "Rank mismatch: source shape {:?} has more dimensions than broadcast shape {:?}.",
                    source, target
                )
            }
            NdError::InvalidReshape { from, to } => {
                write!(f, "Cannot reshape {:?} into {:?}: element counts differ.", from, to)
            }
        }
    }
}

impl Error for NdError {}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_shapes() {
        let err = NdError::IncompatibleShape { lhs: vec![2, 3], rhs: vec![4, 3] };
        assert_eq!(
            err.to_string(),
            "Incompatible shapes for broadcasting: [2, 3] and [4, 3]."
        );
    }

    #[test]
    fn test_display_type_mismatch_with_message() {
        let err = NdError::TypeMismatch {
            lhs: DType::Float32,
            rhs: DType::Float64,
            message: Some("in-place operations require identical dtypes".into()),
        };
        assert!(err.to_string().contains("'Float32' and 'Float64'"));
        assert!(err.to_string().ends_with("identical dtypes"));
    }
}
