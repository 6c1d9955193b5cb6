//! Shape manipulation operations on shaped arrays
//!
//! This module provides reshape (with an inferred `-1` dimension), flatten,
//! insertion and removal of size-1 axes, and axis permutation. Reshapes never
//! reorder scalars: the row-major buffer is reused as is.

use super::types::ShapedArray;
use crate::error::{Result, ShapeError};
use crate::shape::{
    checked_numel, increment_index, normalize_axes, normalize_insertion_axis, numel,
    ravel_with_strides, strides_for_shape,
};
use crate::types::{Axis, Shape};

/// Resolve a target shape that may contain one `-1` placeholder.
fn resolve_reshape(target: &[isize], scalar_count: usize) -> Result<Shape> {
    let invalid = |reason: &str| ShapeError::InvalidReshape {
        shape: target.to_vec(),
        reason: reason.to_string(),
    };

    let placeholders = target.iter().filter(|&&dim| dim == -1).count();
    if placeholders > 1 {
        return Err(invalid("only one dimension can be inferred"));
    }
    if target.iter().any(|&dim| dim < -1) {
        return Err(invalid("dimensions must be non-negative or -1"));
    }

    let explicit: Shape = target
        .iter()
        .filter(|&&dim| dim >= 0)
        .map(|&dim| dim as usize)
        .collect();
    let known = checked_numel(&explicit)
        .ok_or_else(|| invalid("shape has more scalars than fit in memory"))?;
    if placeholders == 0 {
        return Ok(explicit);
    }
    if known == 0 {
        return Err(invalid("cannot infer a dimension next to a zero-sized one"));
    }
    if scalar_count % known != 0 {
        return Err(invalid(&format!(
            "{} scalars cannot be divided evenly by {}",
            scalar_count, known
        )));
    }
    let inferred = scalar_count / known;
    Ok(target
        .iter()
        .map(|&dim| if dim == -1 { inferred } else { dim as usize })
        .collect())
}

impl<T> ShapedArray<T> {
    /// Reshape in place of `self`, reusing the buffer without copying.
    ///
    /// Accepts the same targets as [`reshape`](Self::reshape).
    pub fn into_reshaped(self, new_shape: &[isize]) -> Result<Self> {
        let shape = resolve_reshape(new_shape, self.scalar_count())?;
        if checked_numel(&shape) != Some(self.scalar_count()) {
            return Err(ShapeError::shape_mismatch(&self.shape, &shape));
        }
        tracing::trace!(from = ?self.shape(), to = ?shape, "reshape");
        Ok(ShapedArray::from_parts(self.buffer, shape))
    }

    /// Insert size-1 dimensions at the given positions.
    ///
    /// Positions are applied in order, each normalized against the rank the
    /// array has at that point; a position equal to the current rank appends.
    ///
    /// # Errors
    ///
    /// [`ShapeError::Axis`] if a position is outside `[-(rank + 1), rank]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let array = ShapedArray::<f32>::zeros(&[2, 3]);
    /// assert_eq!(array.expand_dims(&[0])?.shape(), &[1, 2, 3]);
    /// assert_eq!(array.expand_dims(&[2])?.shape(), &[2, 3, 1]);
    /// assert_eq!(array.expand_dims(&[-1, 0])?.shape(), &[1, 2, 3, 1]);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn expand_dims(&self, axes: &[Axis]) -> Result<Self>
    where
        T: Clone,
    {
        let mut shape = self.shape.clone();
        for &axis in axes {
            let position = normalize_insertion_axis(axis, shape.len())?;
            shape.insert(position, 1);
        }
        Ok(ShapedArray::from_parts(self.buffer.clone(), shape))
    }

    /// Remove size-1 dimensions.
    ///
    /// With an empty `axes` every size-1 dimension is removed; otherwise only the
    /// named ones, each of which must have size 1.
    ///
    /// # Errors
    ///
    /// - [`ShapeError::Axis`] if an axis is out of range or repeated
    /// - [`ShapeError::InvalidSqueeze`] if a named axis is not size 1
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let array = ShapedArray::<f32>::zeros(&[1, 3, 1]);
    /// assert_eq!(array.squeeze_dims(&[])?.shape(), &[3]);
    /// assert_eq!(array.squeeze_dims(&[-1])?.shape(), &[1, 3]);
    /// assert!(array.squeeze_dims(&[1]).is_err());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn squeeze_dims(&self, axes: &[Axis]) -> Result<Self>
    where
        T: Clone,
    {
        let squeezed: Vec<usize> = if axes.is_empty() {
            (0..self.rank()).filter(|&axis| self.shape[axis] == 1).collect()
        } else {
            let normalized = normalize_axes(axes, self.rank())?;
            if let Some(&axis) = normalized.iter().find(|&&axis| self.shape[axis] != 1) {
                return Err(ShapeError::InvalidSqueeze {
                    axis,
                    size: self.shape[axis],
                });
            }
            normalized
        };
        let shape: Shape = self
            .shape
            .iter()
            .enumerate()
            .filter(|(axis, _)| !squeezed.contains(axis))
            .map(|(_, &dim)| dim)
            .collect();
        Ok(ShapedArray::from_parts(self.buffer.clone(), shape))
    }
}

impl<T: Clone> ShapedArray<T> {
    /// Reshape the array, inferring at most one `-1` dimension.
    ///
    /// Scalars keep their row-major order.
    ///
    /// # Arguments
    ///
    /// * `new_shape` - The target shape; a single `-1` is inferred from the
    ///   scalar count
    ///
    /// # Errors
    ///
    /// - [`ShapeError::InvalidReshape`] for more than one `-1`, another negative
    ///   size, or a count the known dimensions do not divide
    /// - [`ShapeError::ShapeMismatch`] if the target holds a different count
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let array = ShapedArray::<f64>::zeros(&[2, 3, 4]);
    /// assert_eq!(array.reshape(&[6, 4])?.shape(), &[6, 4]);
    /// assert_eq!(array.reshape(&[-1, 12])?.shape(), &[2, 12]);
    /// assert!(array.reshape(&[-1, -1]).is_err());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn reshape(&self, new_shape: &[isize]) -> Result<Self> {
        self.clone().into_reshaped(new_shape)
    }

    /// Reshape to an explicit shape with no placeholder.
    ///
    /// # Errors
    ///
    /// [`ShapeError::ShapeMismatch`] if the scalar counts differ.
    pub fn reshape_to(&self, new_shape: &[usize]) -> Result<Self> {
        if checked_numel(new_shape) != Some(self.scalar_count()) {
            return Err(ShapeError::shape_mismatch(&self.shape, new_shape));
        }
        Ok(ShapedArray::from_parts(
            self.buffer.clone(),
            Shape::from_slice(new_shape),
        ))
    }

    /// Collapse to rank 1.
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let scalar = ShapedArray::scalar(1.5);
    /// assert_eq!(scalar.flatten().shape(), &[1]);
    /// ```
    pub fn flatten(&self) -> Self {
        let shape: Shape = std::iter::once(self.scalar_count()).collect();
        ShapedArray::from_parts(self.buffer.clone(), shape)
    }

    /// Permute the axes of the array.
    ///
    /// Output axis `i` is input axis `axes[i]`; the scalars are rearranged
    /// into the new row-major order.
    ///
    /// # Errors
    ///
    /// [`ShapeError::Axis`] unless `axes` names every axis exactly once.
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let matrix = ShapedArray::new(vec![1, 2, 3, 4, 5, 6], &[2, 3]);
    /// let transposed = matrix.permute(&[1, 0])?;
    /// assert_eq!(transposed.shape(), &[3, 2]);
    /// assert_eq!(transposed.scalars(), &[1, 4, 2, 5, 3, 6]);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn permute(&self, axes: &[Axis]) -> Result<Self> {
        let normalized = normalize_axes(axes, self.rank())?;
        if normalized.len() != self.rank() {
            return Err(ShapeError::Axis {
                axes: axes.to_vec(),
                rank: self.rank(),
            });
        }
        Ok(self.permuted(&normalized))
    }

    /// Reverse the order of the axes.
    pub fn transpose(&self) -> Self {
        let axes: Vec<usize> = (0..self.rank()).rev().collect();
        self.permuted(&axes)
    }

    fn permuted(&self, axes: &[usize]) -> Self {
        let shape: Shape = axes.iter().map(|&axis| self.shape[axis]).collect();
        let source_strides = strides_for_shape(&self.shape);
        let permuted_strides: Vec<usize> = axes.iter().map(|&axis| source_strides[axis]).collect();

        let mut buffer = Vec::with_capacity(self.scalar_count());
        let mut index = vec![0; shape.len()];
        for _ in 0..self.scalar_count() {
            buffer.push(self.buffer[ravel_with_strides(&index, &permuted_strides)].clone());
            increment_index(&mut index, &shape);
        }
        ShapedArray::from_parts(buffer, shape)
    }
}
