//! Borrowed slice views over a shaped array's buffer
//!
//! A view never owns or allocates scalars. It is described by the base array's
//! shape, a list of *base indices* (one per leading dimension already indexed
//! away) and optional *bounds*, a contiguous range over the view's own leading
//! dimension:
//!
//! - an **element-array** view comes from an integer index and has one
//!   dimension fewer than its parent;
//! - a **subarray** view comes from a range and keeps the parent's rank with a
//!   narrower leading dimension.
//!
//! Because the layout is row-major, both flavors always address a single
//! contiguous range of the base buffer, computed once at construction. The
//! borrow checker ties every view to its base array: while an
//! [`ArraySliceMut`] is alive nothing else can read or write the array.
//!
//! Indices passed to a view are relative to the view, so `view.element(0)` is
//! the first row of the view even when the view is a subarray that starts
//! further into the base.
//!
//! # Examples
//!
//! ```
//! use shaped_core::ShapedArray;
//!
//! let array = ShapedArray::new((0..60).collect::<Vec<i32>>(), &[3, 4, 5]);
//! let plane = array.element(2).unwrap();
//! assert_eq!(plane.shape(), &[4, 5]);
//! assert_eq!(plane.scalars(), (40..60).collect::<Vec<_>>().as_slice());
//!
//! let scalar = plane.element(0).unwrap().element(3).unwrap();
//! assert!(scalar.is_scalar());
//! assert_eq!(scalar.scalars(), &[43]);
//! ```

use super::types::ShapedArray;
use crate::error::{Result, ShapeError};
use crate::shape::{numel, ravel_with_strides, strides_for_shape};
use crate::types::Shape;
use std::fmt;
use std::ops::Range;

/// Resolved addressing of a view into a base buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SliceSpec {
    base_indices: Shape,
    bounds: Option<Range<usize>>,
    shape: Shape,
    scalar_range: Range<usize>,
}

impl SliceSpec {
    /// Validate base indices and bounds against `base_shape` and resolve them.
    pub(crate) fn new(
        base_shape: &[usize],
        base_indices: Shape,
        bounds: Option<Range<usize>>,
    ) -> Result<Self> {
        let depth = base_indices.len();
        if depth > base_shape.len()
            || base_indices
                .iter()
                .zip(base_shape)
                .any(|(&index, &dim)| index >= dim)
        {
            return Err(ShapeError::index_out_of_bounds(&base_indices, base_shape));
        }
        if let Some(bounds) = &bounds {
            if depth == base_shape.len()
                || bounds.start > bounds.end
                || bounds.end > base_shape[depth]
            {
                return Err(ShapeError::index_out_of_bounds(
                    &[bounds.start, bounds.end],
                    &base_shape[depth.min(base_shape.len())..],
                ));
            }
        }
        Ok(Self::resolve(base_shape, base_indices, bounds))
    }

    /// The view covering the entire base array.
    pub(crate) fn whole(base_shape: &[usize]) -> Self {
        Self::resolve(base_shape, Shape::new(), None)
    }

    fn resolve(base_shape: &[usize], base_indices: Shape, bounds: Option<Range<usize>>) -> Self {
        let depth = base_indices.len();
        let shape: Shape = match &bounds {
            Some(bounds) => std::iter::once(bounds.len())
                .chain(base_shape[depth + 1..].iter().copied())
                .collect(),
            None => Shape::from_slice(&base_shape[depth..]),
        };
        let scalar_range = scalar_range(base_shape, &base_indices, bounds.as_ref());
        Self {
            base_indices,
            bounds,
            shape,
            scalar_range,
        }
    }

    pub(crate) fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub(crate) fn scalar_range(&self) -> Range<usize> {
        self.scalar_range.clone()
    }

    /// Strip the leading dimension at the view-relative `index`.
    pub(crate) fn element(&self, base_shape: &[usize], index: usize) -> Result<Self> {
        match self.shape.first() {
            Some(&leading) if index < leading => {
                let absolute = self.bounds.as_ref().map_or(index, |b| b.start + index);
                let mut base_indices = self.base_indices.clone();
                base_indices.push(absolute);
                Self::new(base_shape, base_indices, None)
            }
            _ => Err(ShapeError::index_out_of_bounds(&[index], &self.shape)),
        }
    }

    /// Narrow the leading dimension to the view-relative `range`.
    pub(crate) fn subarray(&self, base_shape: &[usize], range: Range<usize>) -> Result<Self> {
        match self.shape.first() {
            Some(&leading) if range.start <= range.end && range.end <= leading => {
                let offset = self.bounds.as_ref().map_or(0, |b| b.start);
                let bounds = offset + range.start..offset + range.end;
                Self::new(base_shape, self.base_indices.clone(), Some(bounds))
            }
            _ => Err(ShapeError::index_out_of_bounds(
                &[range.start, range.end],
                &self.shape,
            )),
        }
    }
}

/// Contiguous buffer range addressed by `base_indices` and `bounds`.
///
/// Each base index consumes one leading dimension and contributes
/// `index * stride` to the offset. The trailing stride is the scalar count of
/// one entry of the first unconsumed dimension; bounds select a run of those
/// entries relative to the resolved offset.
pub(crate) fn scalar_range(
    base_shape: &[usize],
    base_indices: &[usize],
    bounds: Option<&Range<usize>>,
) -> Range<usize> {
    let strides = strides_for_shape(base_shape);
    let depth = base_indices.len();
    let offset = ravel_with_strides(base_indices, &strides[..depth]);
    if depth == base_shape.len() {
        return offset..offset + 1;
    }
    let trailing = strides[depth];
    match bounds {
        Some(bounds) => offset + bounds.start * trailing..offset + bounds.end * trailing,
        None => offset..offset + numel(&base_shape[depth..]),
    }
}

/// Read-only view into a [`ShapedArray`]
pub struct ArraySlice<'a, T> {
    base: &'a [T],
    base_shape: &'a [usize],
    spec: SliceSpec,
}

/// Mutable view into a [`ShapedArray`]; writes go straight to the base buffer
pub struct ArraySliceMut<'a, T> {
    base: &'a mut [T],
    base_shape: &'a [usize],
    spec: SliceSpec,
}

impl<'a, T> ArraySlice<'a, T> {
    pub(crate) fn from_spec(array: &'a ShapedArray<T>, spec: SliceSpec) -> Self {
        Self {
            base: &array.buffer,
            base_shape: &array.shape,
            spec,
        }
    }

    /// Shape of the view
    pub fn shape(&self) -> &[usize] {
        self.spec.shape()
    }

    /// Rank of the view
    pub fn rank(&self) -> usize {
        self.spec.shape().len()
    }

    /// Number of scalars visible through the view
    pub fn scalar_count(&self) -> usize {
        self.spec.scalar_range.len()
    }

    /// Whether the view addresses a single scalar (rank 0)
    pub fn is_scalar(&self) -> bool {
        self.spec.shape().is_empty()
    }

    /// Range of the base buffer this view covers
    pub fn scalar_range(&self) -> Range<usize> {
        self.spec.scalar_range()
    }

    /// The scalars of the view, in row-major order
    pub fn scalars(&self) -> &'a [T] {
        &self.base[self.spec.scalar_range()]
    }

    /// Element-array view at `index` along the view's leading dimension.
    ///
    /// # Errors
    ///
    /// [`ShapeError::Index`] if the view is rank 0 or `index` is out of range.
    pub fn element(&self, index: usize) -> Result<ArraySlice<'a, T>> {
        let spec = self.spec.element(self.base_shape, index)?;
        Ok(ArraySlice {
            base: self.base,
            base_shape: self.base_shape,
            spec,
        })
    }

    /// Subarray view narrowing the view's leading dimension to `range`.
    ///
    /// # Errors
    ///
    /// [`ShapeError::Index`] if the view is rank 0 or `range` does not fit.
    pub fn subarray(&self, range: Range<usize>) -> Result<ArraySlice<'a, T>> {
        let spec = self.spec.subarray(self.base_shape, range)?;
        Ok(ArraySlice {
            base: self.base,
            base_shape: self.base_shape,
            spec,
        })
    }

    /// Iterate over the element-array views along the leading dimension.
    pub fn elements(&self) -> Elements<'a, T> {
        Elements {
            base: self.base,
            base_shape: self.base_shape,
            parent: self.spec.clone(),
            next: 0,
            end: self.spec.shape().first().copied().unwrap_or(0),
        }
    }
}

impl<T: Clone> ArraySlice<'_, T> {
    /// Copy the view into a new owning array.
    pub fn to_owned_array(&self) -> ShapedArray<T> {
        ShapedArray::from_parts(self.scalars().to_vec(), self.spec.shape.clone())
    }
}

impl<T> Clone for ArraySlice<'_, T> {
    fn clone(&self) -> Self {
        Self {
            base: self.base,
            base_shape: self.base_shape,
            spec: self.spec.clone(),
        }
    }
}

impl<'a, T> ArraySliceMut<'a, T> {
    pub(crate) fn from_spec(array: &'a mut ShapedArray<T>, spec: SliceSpec) -> Self {
        Self {
            base: &mut array.buffer,
            base_shape: &array.shape,
            spec,
        }
    }

    /// Shape of the view
    pub fn shape(&self) -> &[usize] {
        self.spec.shape()
    }

    /// Rank of the view
    pub fn rank(&self) -> usize {
        self.spec.shape().len()
    }

    /// Number of scalars visible through the view
    pub fn scalar_count(&self) -> usize {
        self.spec.scalar_range.len()
    }

    /// Whether the view addresses a single scalar (rank 0)
    pub fn is_scalar(&self) -> bool {
        self.spec.shape().is_empty()
    }

    /// Range of the base buffer this view covers
    pub fn scalar_range(&self) -> Range<usize> {
        self.spec.scalar_range()
    }

    /// The scalars of the view, in row-major order
    pub fn scalars(&self) -> &[T] {
        &self.base[self.spec.scalar_range()]
    }

    /// Mutable access to the scalars of the view
    pub fn scalars_mut(&mut self) -> &mut [T] {
        &mut self.base[self.spec.scalar_range()]
    }

    /// Reborrow as a read-only view
    pub fn as_slice(&self) -> ArraySlice<'_, T> {
        ArraySlice {
            base: &*self.base,
            base_shape: self.base_shape,
            spec: self.spec.clone(),
        }
    }

    /// Mutable element-array view at `index`, reborrowing this view.
    pub fn element_mut(&mut self, index: usize) -> Result<ArraySliceMut<'_, T>> {
        let spec = self.spec.element(self.base_shape, index)?;
        Ok(ArraySliceMut {
            base: &mut *self.base,
            base_shape: self.base_shape,
            spec,
        })
    }

    /// Mutable subarray view over `range`, reborrowing this view.
    pub fn subarray_mut(&mut self, range: Range<usize>) -> Result<ArraySliceMut<'_, T>> {
        let spec = self.spec.subarray(self.base_shape, range)?;
        Ok(ArraySliceMut {
            base: &mut *self.base,
            base_shape: self.base_shape,
            spec,
        })
    }

    /// Mutable element-array view at `index`, consuming this view.
    pub fn into_element(self, index: usize) -> Result<ArraySliceMut<'a, T>> {
        let spec = self.spec.element(self.base_shape, index)?;
        Ok(ArraySliceMut {
            base: self.base,
            base_shape: self.base_shape,
            spec,
        })
    }

    /// Mutable subarray view over `range`, consuming this view.
    pub fn into_subarray(self, range: Range<usize>) -> Result<ArraySliceMut<'a, T>> {
        let spec = self.spec.subarray(self.base_shape, range)?;
        Ok(ArraySliceMut {
            base: self.base,
            base_shape: self.base_shape,
            spec,
        })
    }
}

impl<T: Clone> ArraySliceMut<'_, T> {
    /// Overwrite the view with `value`, whose shape must equal the view's shape.
    ///
    /// # Errors
    ///
    /// [`ShapeError::ShapeMismatch`] if the shapes differ.
    pub fn assign(&mut self, value: &ShapedArray<T>) -> Result<()> {
        if value.shape() != self.shape() {
            return Err(ShapeError::shape_mismatch(self.shape(), value.shape()));
        }
        self.scalars_mut().clone_from_slice(value.scalars());
        Ok(())
    }

    /// Overwrite the element at `index` with `value`.
    pub fn assign_element(&mut self, index: usize, value: &ShapedArray<T>) -> Result<()> {
        self.element_mut(index)?.assign(value)
    }

    /// Overwrite the subarray over `range` with `value`.
    pub fn assign_subarray(&mut self, range: Range<usize>, value: &ShapedArray<T>) -> Result<()> {
        self.subarray_mut(range)?.assign(value)
    }

    /// Set every scalar of the view to `value`.
    pub fn fill(&mut self, value: T) {
        self.scalars_mut().fill(value);
    }

    /// Copy the view into a new owning array.
    pub fn to_owned_array(&self) -> ShapedArray<T> {
        self.as_slice().to_owned_array()
    }
}

/// Iterator over the element-array views along a leading dimension.
///
/// Created by [`ShapedArray::elements`] and [`ArraySlice::elements`].
pub struct Elements<'a, T> {
    base: &'a [T],
    base_shape: &'a [usize],
    parent: SliceSpec,
    next: usize,
    end: usize,
}

impl<'a, T> Elements<'a, T> {
    pub(crate) fn new(array: &'a ShapedArray<T>) -> Self {
        ArraySlice::from_spec(array, SliceSpec::whole(&array.shape)).elements()
    }
}

impl<'a, T> Iterator for Elements<'a, T> {
    type Item = ArraySlice<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let spec = self.parent.element(self.base_shape, self.next).ok()?;
        self.next += 1;
        Some(ArraySlice {
            base: self.base,
            base_shape: self.base_shape,
            spec,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Elements<'_, T> {}

impl<T: PartialEq> PartialEq for ArraySlice<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.scalars() == other.scalars()
    }
}

impl<T: PartialEq> PartialEq<ShapedArray<T>> for ArraySlice<'_, T> {
    fn eq(&self, other: &ShapedArray<T>) -> bool {
        self.shape() == other.shape() && self.scalars() == other.scalars()
    }
}

impl<T: PartialEq> PartialEq<ArraySlice<'_, T>> for ShapedArray<T> {
    fn eq(&self, other: &ArraySlice<'_, T>) -> bool {
        other == self
    }
}

impl<T: fmt::Debug> fmt::Debug for ArraySlice<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArraySlice")
            .field("shape", &self.shape())
            .field("scalar_range", &self.spec.scalar_range)
            .field("scalars", &self.scalars())
            .finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for ArraySliceMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArraySliceMut")
            .field("shape", &self.shape())
            .field("scalar_range", &self.spec.scalar_range)
            .field("scalars", &self.scalars())
            .finish()
    }
}

impl<T: Clone> From<ArraySlice<'_, T>> for ShapedArray<T> {
    fn from(slice: ArraySlice<'_, T>) -> Self {
        slice.to_owned_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iota(shape: &[usize]) -> ShapedArray<i32> {
        ShapedArray::new((0..numel(shape) as i32).collect(), shape)
    }

    #[test]
    fn test_scalar_range_element_and_bounds() {
        let shape = [3, 4, 5];
        assert_eq!(scalar_range(&shape, &[], None), 0..60);
        assert_eq!(scalar_range(&shape, &[2], None), 40..60);
        assert_eq!(scalar_range(&shape, &[2, 1], None), 45..50);
        assert_eq!(scalar_range(&shape, &[2, 1, 3], None), 48..49);
        assert_eq!(scalar_range(&shape, &[], Some(&(1..3))), 20..60);
        assert_eq!(scalar_range(&shape, &[1], Some(&(2..4))), 30..40);
    }

    #[test]
    fn test_scalar_range_matches_direct_copy() {
        let array = iota(&[2, 3, 4]);
        for i in 0..2 {
            for j in 0..3 {
                let view = array.element(i).unwrap().element(j).unwrap();
                let expected: Vec<i32> = (0..4).map(|k| (i * 12 + j * 4 + k) as i32).collect();
                assert_eq!(view.scalars(), expected.as_slice());
            }
        }
    }

    #[test]
    fn test_spec_validation() {
        assert!(SliceSpec::new(&[2, 3], Shape::from_slice(&[1, 2]), None).is_ok());
        assert!(SliceSpec::new(&[2, 3], Shape::from_slice(&[2]), None).is_err());
        assert!(SliceSpec::new(&[2, 3], Shape::from_slice(&[0, 0, 0]), None).is_err());
        assert!(SliceSpec::new(&[2, 3], Shape::from_slice(&[1, 1]), Some(0..1)).is_err());
        assert!(SliceSpec::new(&[2, 3], Shape::from_slice(&[1]), Some(2..4)).is_err());
        assert!(SliceSpec::new(&[2, 3], Shape::from_slice(&[1]), Some(1..3)).is_ok());
    }

    #[test]
    fn test_element_of_subarray_is_relative() {
        let array = iota(&[4, 2]);
        let middle = array.subarray(1..3).unwrap();
        assert_eq!(middle.shape(), &[2, 2]);
        assert_eq!(middle.scalars(), &[2, 3, 4, 5]);

        let first = middle.element(0).unwrap();
        assert_eq!(first.scalars(), &[2, 3]);
        assert!(middle.element(2).is_err());

        let nested = middle.subarray(1..2).unwrap();
        assert_eq!(nested.scalars(), &[4, 5]);
        assert_eq!(nested.scalar_range(), 4..6);
    }

    #[test]
    fn test_rank_zero_view_cannot_be_indexed() {
        let array = iota(&[2]);
        let scalar = array.element(1).unwrap();
        assert!(scalar.is_scalar());
        assert_eq!(
            scalar.element(0).unwrap_err(),
            ShapeError::Index {
                index: vec![0],
                shape: vec![]
            }
        );
        assert!(scalar.subarray(0..0).is_err());
    }

    #[test]
    fn test_empty_subarray() {
        let array = iota(&[3, 2]);
        let empty = array.subarray(2..2).unwrap();
        assert_eq!(empty.shape(), &[0, 2]);
        assert_eq!(empty.scalar_count(), 0);
        assert!(array.subarray(2..4).is_err());
    }

    #[test]
    fn test_mutation_through_view() {
        let mut array = iota(&[2, 2, 2]);
        {
            let mut plane = array.element_mut(1).unwrap();
            plane.fill(0);
            let mut row = plane.element_mut(0).unwrap();
            row.scalars_mut()[1] = 9;
        }
        assert_eq!(array.scalars(), &[0, 1, 2, 3, 0, 9, 0, 0]);
    }

    #[test]
    fn test_assign_checks_shape() {
        let mut array = iota(&[3, 2]);
        let mut view = array.subarray_mut(0..2).unwrap();
        let wrong = ShapedArray::new(vec![7, 7], &[2]);
        assert_eq!(
            view.assign(&wrong),
            Err(ShapeError::ShapeMismatch {
                lhs: vec![2, 2],
                rhs: vec![2]
            })
        );
        view.assign_element(1, &wrong).unwrap();
        assert_eq!(array.scalars(), &[0, 1, 7, 7, 4, 5]);
    }

    #[test]
    fn test_view_equality_and_copy() {
        let array = iota(&[2, 3]);
        let row = array.element(1).unwrap();
        let owned = row.to_owned_array();
        assert_eq!(owned, ShapedArray::new(vec![3, 4, 5], &[3]));
        assert!(row == owned);
        assert!(owned == row);
        assert_eq!(row.clone(), row);
    }

    #[test]
    fn test_elements_iterator() {
        let array = iota(&[3, 2]);
        let rows: Vec<Vec<i32>> = array.elements().map(|row| row.scalars().to_vec()).collect();
        assert_eq!(rows, vec![vec![0, 1], vec![2, 3], vec![4, 5]]);
        assert_eq!(array.elements().len(), 3);
        assert_eq!(ShapedArray::scalar(1).elements().count(), 0);
    }
}
