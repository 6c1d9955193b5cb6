//! Axis-wise reductions: the generic fold plus sum, product and mean
//!
//! Every reduction goes through [`ShapedArray::reduce`], which folds the input
//! in row-major order into an output buffer addressed by the *remaining*
//! (non-reduced) dimensions. Three output layouts are offered for each
//! operation:
//!
//! | Method | Reduced axes in output |
//! |--------|------------------------|
//! | `*_axes(axes, keep_dims)` | chosen by the flag |
//! | `*_squeezing_axes(axes)` | removed |
//! | `*_along_axes(axes)` | kept with size 1 |
//!
//! Reducing over no axes, or over every axis, folds the whole buffer into a
//! single value: rank 0 when squeezing, `[1]` when keeping dimensions.
//!
//! # Examples
//!
//! ```
//! use shaped_core::ShapedArray;
//!
//! let array = ShapedArray::new((0..18).collect::<Vec<i64>>(), &[3, 2, 3]);
//! assert_eq!(array.sum(), 153);
//!
//! let columns = array.sum_squeezing_axes(&[0])?;
//! assert_eq!(columns.shape(), &[2, 3]);
//! assert_eq!(columns.scalars(), &[18, 21, 24, 27, 30, 33]);
//!
//! let kept = array.sum_along_axes(&[0])?;
//! assert_eq!(kept.shape(), &[1, 2, 3]);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::types::ShapedArray;
use super::view::ArraySlice;
use crate::error::{Result, ShapeError};
use crate::shape::{increment_index, normalize_axes, numel, strides_for_shape};
use crate::types::{Axis, Shape};
use scirs2_core::numeric::{Num, NumCast};
use smallvec::smallvec;

impl<T: Clone> ShapedArray<T> {
    /// Fold the array along `axes` with a binary operator.
    ///
    /// Each output cell starts at `identity`; every input scalar is combined
    /// into the cell its coordinate maps to once the reduced components are
    /// dropped, as `cell = op(input, cell)`.
    ///
    /// # Arguments
    ///
    /// * `axes` - Axes to reduce, possibly negative; empty means all
    /// * `keep_dims` - Keep reduced axes as size 1 instead of removing them
    /// * `identity` - Starting value of every output cell
    /// * `op` - Combining function, called as `op(input, accumulator)`
    ///
    /// # Errors
    ///
    /// [`ShapeError::Axis`] if an axis is out of range or repeated.
    ///
    /// # Complexity
    ///
    /// O(n · rank) for n input scalars
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let array = ShapedArray::new(vec![3, 9, 4, 1], &[2, 2]);
    /// let row_max = array.reduce(&[1], false, i32::MIN, |x, acc| *x.max(acc))?;
    /// assert_eq!(row_max.scalars(), &[9, 4]);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn reduce<F>(
        &self,
        axes: &[Axis],
        keep_dims: bool,
        identity: T,
        mut op: F,
    ) -> Result<ShapedArray<T>>
    where
        F: FnMut(&T, &T) -> T,
    {
        let rank = self.rank();
        let normalized = normalize_axes(axes, rank)?;
        tracing::trace!(shape = ?self.shape(), axes = ?normalized, keep_dims, "reduce");

        if normalized.is_empty() || normalized.len() == rank {
            let value = self
                .buffer
                .iter()
                .fold(identity, |acc, scalar| op(scalar, &acc));
            let shape: Shape = if keep_dims { smallvec![1] } else { Shape::new() };
            return Ok(ShapedArray::from_parts(vec![value], shape));
        }

        let mut reduced = vec![false; rank];
        for &axis in &normalized {
            reduced[axis] = true;
        }
        let remaining_shape: Shape = self
            .shape
            .iter()
            .zip(&reduced)
            .filter(|&(_, &is_reduced)| !is_reduced)
            .map(|(&dim, _)| dim)
            .collect();
        let output_shape: Shape = if keep_dims {
            self.shape
                .iter()
                .zip(&reduced)
                .map(|(&dim, &is_reduced)| if is_reduced { 1 } else { dim })
                .collect()
        } else {
            remaining_shape.clone()
        };

        let remaining_strides = strides_for_shape(&remaining_shape);
        let mut output = vec![identity; numel(&remaining_shape)];
        let mut index = vec![0; rank];
        for scalar in &self.buffer {
            let dest: usize = index
                .iter()
                .zip(&reduced)
                .filter(|&(_, &is_reduced)| !is_reduced)
                .zip(&remaining_strides)
                .map(|((&component, _), &stride)| component * stride)
                .sum();
            output[dest] = op(scalar, &output[dest]);
            increment_index(&mut index, &self.shape);
        }

        Ok(ShapedArray::from_parts(output, output_shape))
    }
}

impl<T> ShapedArray<T>
where
    T: Clone + Num,
{
    /// Sum of all scalars
    ///
    /// An empty array sums to zero.
    pub fn sum(&self) -> T {
        self.buffer
            .iter()
            .fold(T::zero(), |acc, scalar| scalar.clone() + acc)
    }

    /// Sum along `axes`, keeping them as size 1 when `keep_dims` is set.
    ///
    /// # Errors
    ///
    /// [`ShapeError::Axis`] if an axis is out of range or repeated.
    pub fn sum_axes(&self, axes: &[Axis], keep_dims: bool) -> Result<Self> {
        self.reduce(axes, keep_dims, T::zero(), |x, acc| x.clone() + acc.clone())
    }

    /// Sum along `axes`, removing them from the output shape.
    pub fn sum_squeezing_axes(&self, axes: &[Axis]) -> Result<Self> {
        self.sum_axes(axes, false)
    }

    /// Sum along `axes`, keeping them as size-1 dimensions.
    pub fn sum_along_axes(&self, axes: &[Axis]) -> Result<Self> {
        self.sum_axes(axes, true)
    }

    /// Product of all scalars
    ///
    /// An empty array has product one.
    pub fn product(&self) -> T {
        self.buffer
            .iter()
            .fold(T::one(), |acc, scalar| scalar.clone() * acc)
    }

    /// Product along `axes`, keeping them as size 1 when `keep_dims` is set.
    ///
    /// # Errors
    ///
    /// [`ShapeError::Axis`] if an axis is out of range or repeated.
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let array = ShapedArray::new(vec![1, 2, 3, 4, 5, 6], &[2, 3]);
    /// let rows = array.product_axes(&[-1], true)?;
    /// assert_eq!(rows.shape(), &[2, 1]);
    /// assert_eq!(rows.scalars(), &[6, 120]);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn product_axes(&self, axes: &[Axis], keep_dims: bool) -> Result<Self> {
        self.reduce(axes, keep_dims, T::one(), |x, acc| x.clone() * acc.clone())
    }

    /// Product along `axes`, removing them from the output shape.
    pub fn product_squeezing_axes(&self, axes: &[Axis]) -> Result<Self> {
        self.product_axes(axes, false)
    }

    /// Product along `axes`, keeping them as size-1 dimensions.
    pub fn product_along_axes(&self, axes: &[Axis]) -> Result<Self> {
        self.product_axes(axes, true)
    }
}

impl<T> ShapedArray<T>
where
    T: Clone + Num + NumCast,
{
    /// Arithmetic mean of all scalars
    ///
    /// # Errors
    ///
    /// [`ShapeError::ScalarConversion`] if the scalar count is not
    /// representable in `T`.
    ///
    /// # Panics
    ///
    /// For integer scalars, an empty array divides by zero. Floating-point
    /// scalars yield NaN instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let array = ShapedArray::new((0..18).map(f64::from).collect(), &[3, 2, 3]);
    /// assert_eq!(array.mean()?, 8.5);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn mean(&self) -> Result<T> {
        let divisor = scalar_count_as::<T>(self.scalar_count())?;
        Ok(self.sum() / divisor)
    }

    /// Mean along `axes`, keeping them as size 1 when `keep_dims` is set.
    ///
    /// The divisor is the number of scalars folded into each output cell: the
    /// product of the reduced axes' sizes, or every scalar when all axes (or
    /// none) are reduced.
    ///
    /// # Errors
    ///
    /// - [`ShapeError::Axis`] if an axis is out of range or repeated
    /// - [`ShapeError::ScalarConversion`] if the divisor is not representable in `T`
    pub fn mean_axes(&self, axes: &[Axis], keep_dims: bool) -> Result<Self> {
        let normalized = normalize_axes(axes, self.rank())?;
        let count = if normalized.is_empty() || normalized.len() == self.rank() {
            self.scalar_count()
        } else {
            normalized.iter().map(|&axis| self.shape[axis]).product()
        };
        let divisor = scalar_count_as::<T>(count)?;
        let mut sums = self.sum_axes(axes, keep_dims)?;
        sums.map_inplace(|x| *x = x.clone() / divisor.clone());
        Ok(sums)
    }

    /// Mean along `axes`, removing them from the output shape.
    pub fn mean_squeezing_axes(&self, axes: &[Axis]) -> Result<Self> {
        self.mean_axes(axes, false)
    }

    /// Mean along `axes`, keeping them as size-1 dimensions.
    pub fn mean_along_axes(&self, axes: &[Axis]) -> Result<Self> {
        self.mean_axes(axes, true)
    }
}

fn scalar_count_as<T: NumCast>(count: usize) -> Result<T> {
    <T as NumCast>::from(count).ok_or(ShapeError::ScalarConversion { value: count })
}

/// Reductions on views copy the viewed scalars into a fresh array first.
impl<T> ArraySlice<'_, T>
where
    T: Clone + Num,
{
    /// Sum of all scalars in the view
    pub fn sum(&self) -> T {
        self.scalars()
            .iter()
            .fold(T::zero(), |acc, scalar| scalar.clone() + acc)
    }

    /// Product of all scalars in the view
    pub fn product(&self) -> T {
        self.scalars()
            .iter()
            .fold(T::one(), |acc, scalar| scalar.clone() * acc)
    }

    /// [`ShapedArray::sum_axes`] over a copy of the view
    pub fn sum_axes(&self, axes: &[Axis], keep_dims: bool) -> Result<ShapedArray<T>> {
        self.to_owned_array().sum_axes(axes, keep_dims)
    }

    /// [`ShapedArray::product_axes`] over a copy of the view
    pub fn product_axes(&self, axes: &[Axis], keep_dims: bool) -> Result<ShapedArray<T>> {
        self.to_owned_array().product_axes(axes, keep_dims)
    }
}

impl<T> ArraySlice<'_, T>
where
    T: Clone + Num + NumCast,
{
    /// Arithmetic mean of all scalars in the view
    pub fn mean(&self) -> Result<T> {
        let divisor = scalar_count_as::<T>(self.scalar_count())?;
        Ok(self.sum() / divisor)
    }

    /// [`ShapedArray::mean_axes`] over a copy of the view
    pub fn mean_axes(&self, axes: &[Axis], keep_dims: bool) -> Result<ShapedArray<T>> {
        self.to_owned_array().mean_axes(axes, keep_dims)
    }
}
