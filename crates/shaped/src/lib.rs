//! # shaped
//!
//! Dense N-dimensional arrays for Rust: shape-aware indexing, borrowed slice
//! views, reshaping, stacking and splitting, NumPy-style broadcasting and
//! axis-wise reductions.
//!
//! This is the **meta crate** that re-exports the `shaped-core` engine and a
//! prelude for convenient imports.
//!
//! ## Quick Start
//!
//! ```
//! use shaped::prelude::*;
//!
//! let array = ShapedArray::new((0..18).map(f64::from).collect(), &[3, 2, 3]);
//! assert_eq!(array.sum(), 153.0);
//!
//! let columns = array.sum_squeezing_axes(&[0])?;
//! assert_eq!(columns.shape(), &[2, 3]);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Shape math ([`core::shape`])
//!
//! ```
//! use shaped::core::shape::{ravel, unravel};
//!
//! assert_eq!(unravel(1621, &[6, 7, 8, 9]).unwrap(), vec![3, 1, 4, 1]);
//! assert_eq!(ravel(&[3, 1, 4, 1], &[6, 7, 8, 9]).unwrap(), 1621);
//! ```
//!
//! ### Arrays and views ([`core::dense`])
//!
//! ```
//! use shaped::prelude::*;
//!
//! let array = ShapedArray::new((0..60).collect::<Vec<i32>>(), &[3, 4, 5]);
//! let row = array.element(2)?.element(0)?;
//! assert_eq!(row.scalars(), &[40, 41, 42, 43, 44]);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ### Vector math ([`core::math`])
//!
//! ```
//! use shaped::prelude::*;
//!
//! let array = ShapedArray::new(vec![1.0, 4.0, 9.0], &[3]);
//! let roots = array.map_unary_with(&ScalarMath, UnaryOp::Sqrt)?;
//! assert_eq!(roots.scalars(), &[1.0, 2.0, 3.0]);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Features
//!
//! - `serde`: Enable serialization/deserialization support

pub use shaped_core as core;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```
    //! use shaped::prelude::*;
    //!
    //! let zeros = ShapedArray::<f64>::zeros(&[2, 3]);
    //! assert_eq!(zeros.rank(), 2);
    //! ```

    // Arrays and views
    pub use crate::core::{ArraySlice, ArraySliceMut, ShapedArray};

    // Errors and shape types
    pub use crate::core::{Axis, Result, Shape, ShapeError};

    // Vector math and rendering
    pub use crate::core::{BinaryOp, PrintOptions, ScalarMath, UnaryOp, VectorMath};
}
