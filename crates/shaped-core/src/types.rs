//! Core type aliases shared across the crate.
//!
//! - [`Shape`] and [`Strides`] are small vectors, so arrays of rank six or less
//!   never allocate for their metadata.
//! - [`Axis`] is signed: negative axes count from the back (`-1` is the last
//!   dimension) and are normalized with [`normalize_axis`](crate::shape::normalize_axis).
//!
//! # Examples
//!
//! ```
//! use shaped_core::{Axis, Shape, ShapedArray};
//!
//! let array = ShapedArray::<f64>::zeros(&[2, 3, 4]);
//! let last: Axis = -1;
//! let summed = array.sum_squeezing_axes(&[last]).unwrap();
//!
//! let expected: Shape = Shape::from_slice(&[2, 3]);
//! assert_eq!(summed.shape(), expected.as_slice());
//! ```

use smallvec::SmallVec;

/// Axis index. Negative values count from the last dimension.
pub type Axis = isize;

/// Number of dimensions of an array.
pub type Rank = usize;

/// Dimension sizes, optimized for up to 6 dimensions.
pub type Shape = SmallVec<[usize; 6]>;

/// Row-major strides, one per dimension.
pub type Strides = SmallVec<[usize; 6]>;
