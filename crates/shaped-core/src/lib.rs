//! # shaped-core
//!
//! Dense, row-major, N-dimensional arrays with shape-aware indexing, borrowed
//! slice views, reshaping, stacking and splitting, broadcasting arithmetic and
//! axis-wise reductions.
//!
//! This crate provides:
//!
//! - **Shape math** ([`shape`]): strides, ravel/unravel, axis normalization and
//!   broadcast shape resolution
//! - **Dense arrays** ([`ShapedArray`]) owning a contiguous buffer
//! - **Views** ([`ArraySlice`], [`ArraySliceMut`]) borrowing a contiguous part
//!   of an array without copying
//! - **Reductions** (sum, product, mean) over any set of axes
//! - **Broadcasting** binary operations following the NumPy alignment rule
//! - **Vector math** ([`VectorMath`]) as a pluggable flat-buffer backend
//! - **Text rendering** ([`describe`]) with configurable [`PrintOptions`]
//!
//! ## Core Principles
//!
//! ### Memory Layout
//!
//! Arrays are always C-contiguous (row-major). Strides are derived from the
//! shape and never stored. Reshapes reuse the buffer as is.
//!
//! ### Safety
//!
//! All indexing is bounds-checked. No unsafe code. A view borrows its base
//! array, so the base cannot change shape or be dropped while the view lives.
//!
//! ## Quick Start
//!
//! ```
//! use shaped_core::ShapedArray;
//!
//! let array = ShapedArray::new((0..18).map(f64::from).collect(), &[3, 2, 3]);
//! assert_eq!(array.shape(), &[3, 2, 3]);
//! assert_eq!(array.rank(), 3);
//!
//! assert_eq!(array.sum(), 153.0);
//! assert_eq!(array.mean()?, 8.5);
//!
//! let means = array.mean_squeezing_axes(&[0])?;
//! assert_eq!(means.scalars(), &[6.0, 7.0, 8.0, 9.0, 10.0, 11.0]);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Views
//!
//! Integer indexing strips the leading dimension; range indexing narrows it:
//!
//! ```
//! use shaped_core::ShapedArray;
//!
//! let mut array = ShapedArray::new((0..60).collect::<Vec<i32>>(), &[3, 4, 5]);
//!
//! let plane = array.element(2)?;
//! assert_eq!(plane.shape(), &[4, 5]);
//! assert_eq!(plane.element(0)?.element(3)?.scalars(), &[43]);
//!
//! let mut rows = array.subarray_mut(0..2)?;
//! rows.fill(0);
//! assert_eq!(array.sum(), (40..60).sum::<i32>());
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Shape Operations
//!
//! ```
//! use shaped_core::ShapedArray;
//!
//! let array = ShapedArray::<f64>::zeros(&[2, 3, 4]);
//!
//! assert_eq!(array.reshape(&[-1, 4])?.shape(), &[6, 4]);
//! assert_eq!(array.flatten().shape(), &[24]);
//! assert_eq!(array.expand_dims(&[0])?.shape(), &[1, 2, 3, 4]);
//!
//! let parts = array.unstack(1)?;
//! assert_eq!(parts.len(), 3);
//! assert_eq!(ShapedArray::stack(&parts, 1)?, array);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Broadcasting
//!
//! ```
//! use shaped_core::ShapedArray;
//!
//! let column = ShapedArray::new(vec![1, 2, 3, 4], &[4, 1]);
//! let row = ShapedArray::new(vec![10, 20, 30], &[3]);
//!
//! let table = column.broadcast_add(&row)?;
//! assert_eq!(table.shape(), &[4, 3]);
//!
//! // Operators panic on incompatible shapes, like slice indexing
//! let same = &column + &row;
//! assert_eq!(same, table);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`Result`], whose error type is [`ShapeError`]:
//!
//! ```
//! use shaped_core::{ShapeError, ShapedArray};
//!
//! let array = ShapedArray::<f64>::zeros(&[2, 3]);
//! assert!(matches!(array.reshape(&[7]), Err(ShapeError::ShapeMismatch { .. })));
//! assert!(matches!(array.split(4, 1), Err(ShapeError::UnevenSplit { .. })));
//! ```
//!
//! ## Logging
//!
//! The reduction, reshape, stack, split and broadcast paths emit `tracing`
//! events at `trace`/`debug` level. Nothing is printed unless the application
//! installs a subscriber.
//!
//! ## Features
//!
//! - `serde`: Enable serialization/deserialization support

pub mod dense;
pub mod describe;
pub mod error;
pub mod math;
pub mod shape;
pub mod types;


pub use dense::{ArraySlice, ArraySliceMut, Elements, ShapedArray};
pub use describe::PrintOptions;
pub use error::{Result, ShapeError};
pub use math::{BinaryOp, ScalarMath, UnaryOp, VectorMath};
pub use types::{Axis, Rank, Shape, Strides};
