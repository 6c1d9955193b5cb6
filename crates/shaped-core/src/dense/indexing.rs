//! Coordinate access and slice selection on shaped arrays
//!
//! This module provides direct scalar access by coordinate, element-array and
//! subarray views along the leading dimension, and in-place assignment through
//! those views.

use super::types::ShapedArray;
use super::view::{ArraySlice, ArraySliceMut, Elements, SliceSpec};
use crate::error::Result;
use crate::shape::ravel;
use std::ops::Range;

impl<T> ShapedArray<T> {
    /// Get a scalar by coordinate without panicking
    ///
    /// # Arguments
    ///
    /// * `index` - One component per dimension
    ///
    /// # Returns
    ///
    /// Some reference to the scalar if the coordinate is valid, None otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let array = ShapedArray::new(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]);
    /// assert_eq!(array.get(&[0, 1]), Some(&2.0));
    /// assert_eq!(array.get(&[5, 5]), None);
    /// ```
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        let offset = ravel(index, &self.shape).ok()?;
        self.buffer.get(offset)
    }

    /// Get a mutable reference to a scalar by coordinate without panicking
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let mut array = ShapedArray::new(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]);
    /// if let Some(scalar) = array.get_mut(&[0, 1]) {
    ///     *scalar = 10.0;
    /// }
    /// assert_eq!(array[&[0, 1]], 10.0);
    /// ```
    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut T> {
        let offset = ravel(index, &self.shape).ok()?;
        self.buffer.get_mut(offset)
    }

    /// Get a scalar by coordinate, reporting why the coordinate is invalid.
    ///
    /// # Errors
    ///
    /// [`ShapeError::Index`](crate::ShapeError::Index) carrying the coordinate and the array's shape.
    pub fn get_checked(&self, index: &[usize]) -> Result<&T> {
        let offset = ravel(index, &self.shape)?;
        Ok(&self.buffer[offset])
    }

    /// Mutable form of [`get_checked`](Self::get_checked).
    pub fn get_checked_mut(&mut self, index: &[usize]) -> Result<&mut T> {
        let offset = ravel(index, &self.shape)?;
        Ok(&mut self.buffer[offset])
    }

    /// Borrow the whole array as a view
    pub fn view(&self) -> ArraySlice<'_, T> {
        ArraySlice::from_spec(self, SliceSpec::whole(&self.shape))
    }

    /// Borrow the whole array as a mutable view
    pub fn view_mut(&mut self) -> ArraySliceMut<'_, T> {
        let spec = SliceSpec::whole(&self.shape);
        ArraySliceMut::from_spec(self, spec)
    }

    /// Element-array view at `index` along the leading dimension.
    ///
    /// The view has rank `rank - 1`; indexing a rank-1 array yields a rank-0
    /// view over a single scalar.
    ///
    /// # Errors
    ///
    /// [`ShapeError::Index`](crate::ShapeError::Index) if the array is rank 0 or `index >= shape[0]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let array = ShapedArray::new((0..6).collect::<Vec<i32>>(), &[3, 2]);
    /// let row = array.element(1)?;
    /// assert_eq!(row.shape(), &[2]);
    /// assert_eq!(row.scalars(), &[2, 3]);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn element(&self, index: usize) -> Result<ArraySlice<'_, T>> {
        self.view().element(index)
    }

    /// Mutable element-array view at `index` along the leading dimension.
    ///
    /// # Errors
    ///
    /// [`ShapeError::Index`](crate::ShapeError::Index) if the array is rank 0 or `index >= shape[0]`.
    pub fn element_mut(&mut self, index: usize) -> Result<ArraySliceMut<'_, T>> {
        self.view_mut().into_element(index)
    }

    /// Subarray view narrowing the leading dimension to `range`.
    ///
    /// The view keeps the array's rank.
    ///
    /// # Errors
    ///
    /// [`ShapeError::Index`](crate::ShapeError::Index) if the array is rank 0, the range is reversed or
    /// `range.end > shape[0]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let array = ShapedArray::new((0..8).collect::<Vec<i32>>(), &[4, 2]);
    /// let middle = array.subarray(1..3)?;
    /// assert_eq!(middle.shape(), &[2, 2]);
    /// assert_eq!(middle.scalars(), &[2, 3, 4, 5]);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn subarray(&self, range: Range<usize>) -> Result<ArraySlice<'_, T>> {
        self.view().subarray(range)
    }

    /// Mutable subarray view narrowing the leading dimension to `range`.
    pub fn subarray_mut(&mut self, range: Range<usize>) -> Result<ArraySliceMut<'_, T>> {
        self.view_mut().into_subarray(range)
    }

    /// Iterate over the element-array views along the leading dimension.
    ///
    /// A rank-0 array has no elements.
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let array = ShapedArray::new(vec![1, 2, 3, 4], &[2, 2]);
    /// let sums: Vec<i32> = array.elements().map(|row| row.scalars().iter().sum()).collect();
    /// assert_eq!(sums, vec![3, 7]);
    /// ```
    pub fn elements(&self) -> Elements<'_, T> {
        Elements::new(self)
    }
}

impl<T: Clone> ShapedArray<T> {
    /// Overwrite the element at `index` along the leading dimension.
    ///
    /// # Errors
    ///
    /// - [`ShapeError::Index`](crate::ShapeError::Index) if `index` is out of range
    /// - [`ShapeError::ShapeMismatch`](crate::ShapeError::ShapeMismatch) unless `value.shape() == shape[1..]`
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let mut grid = ShapedArray::<i32>::zeros(&[2, 3]);
    /// grid.assign_element(1, &ShapedArray::new(vec![7, 8, 9], &[3]))?;
    /// assert_eq!(grid.scalars(), &[0, 0, 0, 7, 8, 9]);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn assign_element(&mut self, index: usize, value: &ShapedArray<T>) -> Result<()> {
        self.element_mut(index)?.assign(value)
    }

    /// Overwrite the subarray over `range` along the leading dimension.
    ///
    /// # Errors
    ///
    /// - [`ShapeError::Index`](crate::ShapeError::Index) if `range` does not fit the leading dimension
    /// - [`ShapeError::ShapeMismatch`](crate::ShapeError::ShapeMismatch) unless `value` has the subarray's shape
    pub fn assign_subarray(&mut self, range: Range<usize>, value: &ShapedArray<T>) -> Result<()> {
        self.subarray_mut(range)?.assign(value)
    }
}
