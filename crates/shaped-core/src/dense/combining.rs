//! Array combining and splitting operations
//!
//! This module provides operations for combining several arrays (stack,
//! concatenate) and for taking one array apart (split, unstack). Stacking and
//! unstacking along the same axis are inverse operations.

use super::types::ShapedArray;
use crate::error::{Result, ShapeError};
use crate::shape::{
    normalize_axis, normalize_insertion_axis, numel, ravel_with_strides, strides_for_shape,
    Indices,
};
use crate::types::{Axis, Shape};

impl<T: Clone> ShapedArray<T> {
    /// Stack arrays of identical shape along a new axis.
    ///
    /// The result has rank `rank + 1` with `arrays.len()` entries along `axis`.
    /// Scalars are laid out by interleaving, from each input in turn, blocks of
    /// `product(shape[axis..])` scalars.
    ///
    /// # Arguments
    ///
    /// * `arrays` - Arrays to stack, all with the same shape
    /// * `axis` - Position of the new axis, in `[-(rank + 1), rank]`
    ///
    /// # Complexity
    ///
    /// O(n) where n is the total number of scalars across all arrays
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The array list is empty
    /// - Shapes differ
    /// - Axis is out of bounds
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let a = ShapedArray::new(vec![1, 2], &[2]);
    /// let b = ShapedArray::new(vec![3, 4], &[2]);
    ///
    /// let rows = ShapedArray::stack(&[a.clone(), b.clone()], 0)?;
    /// assert_eq!(rows.shape(), &[2, 2]);
    /// assert_eq!(rows.scalars(), &[1, 2, 3, 4]);
    ///
    /// let columns = ShapedArray::stack(&[a, b], -1)?;
    /// assert_eq!(columns.scalars(), &[1, 3, 2, 4]);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn stack(arrays: &[Self], axis: Axis) -> Result<Self> {
        let first = arrays
            .first()
            .ok_or(ShapeError::EmptyInput { operation: "stack" })?;
        if let Some(other) = arrays.iter().find(|array| array.shape() != first.shape()) {
            return Err(ShapeError::shape_mismatch(first.shape(), other.shape()));
        }
        let position = normalize_insertion_axis(axis, first.rank())?;
        tracing::debug!(
            count = arrays.len(),
            shape = ?first.shape(),
            axis = position,
            "stack"
        );

        let block = numel(&first.shape[position..]);
        let outer = numel(&first.shape[..position]);
        let mut buffer = Vec::with_capacity(first.scalar_count() * arrays.len());
        for chunk in 0..outer {
            for array in arrays {
                buffer.extend_from_slice(&array.buffer[chunk * block..(chunk + 1) * block]);
            }
        }

        let mut shape = first.shape.clone();
        shape.insert(position, arrays.len());
        Ok(ShapedArray::from_parts(buffer, shape))
    }

    /// Join arrays along an existing axis.
    ///
    /// All arrays must have the same rank and agree on every dimension except
    /// `axis`.
    ///
    /// # Errors
    ///
    /// - [`ShapeError::EmptyInput`] for an empty list
    /// - [`ShapeError::Axis`] if `axis` is out of range (rank-0 inputs have none)
    /// - [`ShapeError::ShapeMismatch`] for incompatible shapes
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let a = ShapedArray::<f64>::ones(&[2, 3]);
    /// let b = ShapedArray::<f64>::zeros(&[2, 1]);
    ///
    /// let joined = ShapedArray::concatenate(&[a, b], 1)?;
    /// assert_eq!(joined.shape(), &[2, 4]);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn concatenate(arrays: &[Self], axis: Axis) -> Result<Self> {
        let first = arrays.first().ok_or(ShapeError::EmptyInput {
            operation: "concatenate",
        })?;
        let position = normalize_axis(axis, first.rank())?;
        let compatible = |array: &Self| {
            array.rank() == first.rank()
                && array
                    .shape
                    .iter()
                    .zip(&first.shape)
                    .enumerate()
                    .all(|(dim, (a, b))| dim == position || a == b)
        };
        if let Some(other) = arrays.iter().find(|array| !compatible(array)) {
            return Err(ShapeError::shape_mismatch(first.shape(), other.shape()));
        }

        let outer = numel(&first.shape[..position]);
        let total = arrays.iter().map(|array| array.scalar_count()).sum();
        let mut buffer = Vec::with_capacity(total);
        for chunk in 0..outer {
            for array in arrays {
                let block = numel(&array.shape[position..]);
                buffer.extend_from_slice(&array.buffer[chunk * block..(chunk + 1) * block]);
            }
        }

        let mut shape = first.shape.clone();
        shape[position] = arrays.iter().map(|array| array.shape[position]).sum();
        Ok(ShapedArray::from_parts(buffer, shape))
    }

    /// Split into `count` equal parts along `axis`.
    ///
    /// Parts keep the array's rank and appear in order along the axis.
    ///
    /// # Errors
    ///
    /// - [`ShapeError::Axis`] if `axis` is out of range
    /// - [`ShapeError::UnevenSplit`] if `count` is zero or does not divide the
    ///   axis size
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let array = ShapedArray::new((0..12).collect::<Vec<i32>>(), &[2, 6]);
    /// let parts = array.split(3, 1)?;
    /// assert_eq!(parts.len(), 3);
    /// assert_eq!(parts[1].shape(), &[2, 2]);
    /// assert_eq!(parts[1].scalars(), &[2, 3, 8, 9]);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn split(&self, count: usize, axis: Axis) -> Result<Vec<Self>> {
        let axis = normalize_axis(axis, self.rank())?;
        let size = self.shape[axis];
        if count == 0 || size % count != 0 {
            return Err(ShapeError::UnevenSplit { size, count, axis });
        }
        tracing::debug!(shape = ?self.shape(), count, axis, "split");

        let part_size = size / count;
        let mut part_shape = self.shape.clone();
        part_shape[axis] = part_size;
        let strides = strides_for_shape(&self.shape);

        let parts = (0..count)
            .map(|part| {
                let buffer = Indices::new(&part_shape)
                    .map(|mut index| {
                        index[axis] += part * part_size;
                        self.buffer[ravel_with_strides(&index, &strides)].clone()
                    })
                    .collect();
                ShapedArray::from_parts(buffer, part_shape.clone())
            })
            .collect();
        Ok(parts)
    }

    /// Take the array apart along `axis` into `shape[axis]` arrays of rank `rank - 1`.
    ///
    /// Part `i` is the array indexed at position `i` along `axis`.
    ///
    /// # Errors
    ///
    /// [`ShapeError::Axis`] if `axis` is out of range, which includes every
    /// axis of a rank-0 array.
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let matrix = ShapedArray::new(vec![1, 2, 3, 4, 5, 6], &[2, 3]);
    /// let columns = matrix.unstack(1)?;
    /// assert_eq!(columns.len(), 3);
    /// assert_eq!(columns[0].scalars(), &[1, 4]);
    ///
    /// let restacked = ShapedArray::stack(&columns, 1)?;
    /// assert_eq!(restacked, matrix);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn unstack(&self, axis: Axis) -> Result<Vec<Self>> {
        let axis = normalize_axis(axis, self.rank())?;
        let size = self.shape[axis];
        let outer = numel(&self.shape[..axis]);
        let block = numel(&self.shape[axis + 1..]);
        let shape: Shape = self
            .shape
            .iter()
            .enumerate()
            .filter(|&(dim, _)| dim != axis)
            .map(|(_, &extent)| extent)
            .collect();

        Ok((0..size)
            .map(|position| {
                let mut buffer = Vec::with_capacity(outer * block);
                for chunk in 0..outer {
                    let start = (chunk * size + position) * block;
                    buffer.extend_from_slice(&self.buffer[start..start + block]);
                }
                ShapedArray::from_parts(buffer, shape.clone())
            })
            .collect())
    }
}
