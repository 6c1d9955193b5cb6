//! Dense shaped array implementation
//!
//! [`ShapedArray`] owns a contiguous row-major buffer; [`ArraySlice`] and
//! [`ArraySliceMut`] borrow a contiguous part of it. The operations are spread
//! over submodules by concern:
//!
//! - `indexing` - coordinate access, element and subarray views
//! - `reduction` - sum, product and mean along axes
//! - `shape_ops` - reshape, flatten, expand/squeeze, permute
//! - `combining` - stack, concatenate, split, unstack
//! - `broadcast` - broadcasting arithmetic and operator overloads
//! - `elementwise` - unary math functions

mod broadcast;
mod combining;
mod elementwise;
mod indexing;
mod reduction;
#[cfg(feature = "serde")]
mod serialization;
mod shape_ops;
mod traits;
mod types;
mod view;

pub use types::ShapedArray;
pub use view::{ArraySlice, ArraySliceMut, Elements};
