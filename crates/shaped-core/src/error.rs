//! Error types for shaped array operations
//!
//! Every fallible operation in this crate returns [`Result<T>`], whose error is a
//! [`ShapeError`]. All variants describe contract violations detected before any
//! output is produced: no partial results are ever returned alongside an error.
//!
//! # Examples
//!
//! ```
//! use shaped_core::{ShapeError, ShapedArray};
//!
//! let array = ShapedArray::new(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]);
//! match array.sum_axes(&[2], false) {
//!     Err(ShapeError::Axis { axes, rank }) => {
//!         assert_eq!(axes, vec![2]);
//!         assert_eq!(rank, 2);
//!     }
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! ```

use thiserror::Error;

/// Top-level error type for all shaped array operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Scalar count does not match the product of the declared shape
    #[error("Shape {shape:?} requires {expected} scalars, but got {actual}")]
    Construction {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    /// The product of a shape does not fit in `usize`
    #[error("Shape {shape:?} describes more scalars than fit in memory")]
    Overflow { shape: Vec<usize> },

    /// An operation that needs at least one input array received none
    #[error("Cannot {operation} an empty list of arrays")]
    EmptyInput { operation: &'static str },

    /// Coordinate or linear index out of bounds for a shape
    #[error("Index {index:?} is out of bounds for shape {shape:?}")]
    Index {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    /// Axis outside `[-rank, rank)` or duplicated after normalization
    #[error("Invalid axes {axes:?} for rank {rank}")]
    Axis { axes: Vec<isize>, rank: usize },

    /// Operand shapes are incompatible
    #[error("Shape mismatch: {lhs:?} vs {rhs:?}")]
    ShapeMismatch { lhs: Vec<usize>, rhs: Vec<usize> },

    /// Split count does not evenly divide the axis size
    #[error("Axis {axis} of size {size} cannot be split evenly into {count} parts")]
    UnevenSplit {
        size: usize,
        count: usize,
        axis: usize,
    },

    /// Malformed target shape passed to reshape
    #[error("Cannot reshape into {shape:?}: {reason}")]
    InvalidReshape { shape: Vec<isize>, reason: String },

    /// Squeezing an axis whose size is not exactly 1
    #[error("Cannot squeeze axis {axis} with size {size}")]
    InvalidSqueeze { axis: usize, size: usize },

    /// A count could not be represented in the scalar type
    #[error("Value {value} cannot be represented in the scalar type")]
    ScalarConversion { value: usize },
}

/// Result type alias for shaped array operations
pub type Result<T> = std::result::Result<T, ShapeError>;

impl ShapeError {
    /// Create an index out of bounds error
    pub fn index_out_of_bounds(index: &[usize], shape: &[usize]) -> Self {
        ShapeError::Index {
            index: index.to_vec(),
            shape: shape.to_vec(),
        }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(lhs: &[usize], rhs: &[usize]) -> Self {
        ShapeError::ShapeMismatch {
            lhs: lhs.to_vec(),
            rhs: rhs.to_vec(),
        }
    }

    /// Create an axis error for a single axis
    pub fn invalid_axis(axis: isize, rank: usize) -> Self {
        ShapeError::Axis {
            axes: vec![axis],
            rank,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_error_message() {
        let err = ShapeError::index_out_of_bounds(&[2], &[1]);
        assert_eq!(
            err.to_string(),
            "Index [2] is out of bounds for shape [1]"
        );
    }

    #[test]
    fn test_construction_error_message() {
        let err = ShapeError::Construction {
            shape: vec![2, 3],
            expected: 6,
            actual: 5,
        };
        assert_eq!(
            err.to_string(),
            "Shape [2, 3] requires 6 scalars, but got 5"
        );
    }

    #[test]
    fn test_overflow_error_message() {
        let err = ShapeError::Overflow {
            shape: vec![1 << 62, 4],
        };
        assert_eq!(
            err.to_string(),
            "Shape [4611686018427387904, 4] describes more scalars than fit in memory"
        );
    }

    #[test]
    fn test_axis_error_message() {
        let err = ShapeError::Axis {
            axes: vec![0, -3],
            rank: 3,
        };
        assert_eq!(err.to_string(), "Invalid axes [0, -3] for rank 3");
    }

    #[test]
    fn test_uneven_split_message() {
        let err = ShapeError::UnevenSplit {
            size: 5,
            count: 2,
            axis: 1,
        };
        assert_eq!(
            err.to_string(),
            "Axis 1 of size 5 cannot be split evenly into 2 parts"
        );
    }

    #[test]
    fn test_shape_mismatch_constructor() {
        let err = ShapeError::shape_mismatch(&[4, 1], &[2, 3]);
        assert!(matches!(err, ShapeError::ShapeMismatch { .. }));
        assert_eq!(err.to_string(), "Shape mismatch: [4, 1] vs [2, 3]");
    }
}
