//! Shape math: strides, ravel/unravel, axis validation and broadcasting rules.
//!
//! Everything here is a pure function of shapes and coordinates. The dense array,
//! its views, the reduction engine and the broadcast engine all address their
//! buffers through these functions, so a layout question has exactly one answer.
//!
//! Layout is always row-major (C order): the last dimension is contiguous and
//! the stride of dimension `i` is the product of all sizes after `i`.
//!
//! # Examples
//!
//! ```
//! use shaped_core::shape::{ravel, strides_for_shape, unravel};
//!
//! assert_eq!(strides_for_shape(&[1, 2, 3, 4]).as_slice(), &[24, 12, 4, 1]);
//! assert_eq!(unravel(1621, &[6, 7, 8, 9]).unwrap(), vec![3, 1, 4, 1]);
//! assert_eq!(ravel(&[3, 1, 4, 1], &[6, 7, 8, 9]).unwrap(), 1621);
//! ```

use crate::error::{Result, ShapeError};
use crate::types::{Axis, Shape, Strides};

/// Total number of scalars described by a shape.
///
/// A rank-0 shape describes exactly one scalar.
///
/// ```
/// use shaped_core::shape::numel;
///
/// assert_eq!(numel(&[2, 3, 4]), 24);
/// assert_eq!(numel(&[]), 1);
/// assert_eq!(numel(&[3, 0]), 0);
/// ```
pub fn numel(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Number of scalars described by a shape, or `None` if it does not fit in
/// `usize`.
///
/// Zero-sized dimensions are counted as 1 for the overflow check, so every
/// shape accepted here also has representable strides.
///
/// ```
/// use shaped_core::shape::checked_numel;
///
/// assert_eq!(checked_numel(&[2, 3, 4]), Some(24));
/// assert_eq!(checked_numel(&[0, 5]), Some(0));
/// assert_eq!(checked_numel(&[1 << 62, 4]), None);
/// assert_eq!(checked_numel(&[0, 1 << 62, 4]), None);
/// ```
pub fn checked_numel(shape: &[usize]) -> Option<usize> {
    shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim.max(1)))?;
    Some(numel(shape))
}

/// Like [`checked_numel`], reporting overflow as [`ShapeError::Overflow`].
pub(crate) fn try_numel(shape: &[usize]) -> Result<usize> {
    checked_numel(shape).ok_or_else(|| ShapeError::Overflow {
        shape: shape.to_vec(),
    })
}

/// Compute row-major strides for a shape.
///
/// The trailing dimension has stride 1; a rank-0 shape has no strides.
///
/// # Complexity
///
/// O(rank)
pub fn strides_for_shape(shape: &[usize]) -> Strides {
    let mut strides: Strides = Strides::from_elem(0, shape.len());
    let mut stride = 1;
    for (axis, &dim) in shape.iter().enumerate().rev() {
        strides[axis] = stride;
        stride *= dim;
    }
    strides
}

/// Convert a coordinate into a linear buffer offset.
///
/// # Errors
///
/// Returns [`ShapeError::Index`] if the coordinate rank differs from the shape
/// rank, or if any component is not smaller than its dimension.
pub fn ravel(index: &[usize], shape: &[usize]) -> Result<usize> {
    if index.len() != shape.len() || index.iter().zip(shape).any(|(&i, &dim)| i >= dim) {
        return Err(ShapeError::index_out_of_bounds(index, shape));
    }
    Ok(ravel_with_strides(index, &strides_for_shape(shape)))
}

/// Dot product of a coordinate with strides. No bounds checks.
pub(crate) fn ravel_with_strides(index: &[usize], strides: &[usize]) -> usize {
    index.iter().zip(strides).map(|(&i, &stride)| i * stride).sum()
}

/// Convert a linear buffer offset into a coordinate.
///
/// Components are produced most-significant dimension first by successive
/// division and remainder with the row-major strides.
///
/// # Errors
///
/// Returns [`ShapeError::Index`] carrying the offset and the shape when
/// `linear >= numel(shape)`.
///
/// ```
/// use shaped_core::shape::unravel;
/// use shaped_core::ShapeError;
///
/// assert_eq!(
///     unravel(2, &[1]),
///     Err(ShapeError::Index { index: vec![2], shape: vec![1] })
/// );
/// ```
pub fn unravel(linear: usize, shape: &[usize]) -> Result<Vec<usize>> {
    if linear >= numel(shape) {
        return Err(ShapeError::index_out_of_bounds(&[linear], shape));
    }
    let mut remaining = linear;
    Ok(strides_for_shape(shape)
        .iter()
        .map(|&stride| {
            let component = remaining / stride;
            remaining %= stride;
            component
        })
        .collect())
}

/// Advance a coordinate to its row-major successor in place.
///
/// Returns `false` once the coordinate wraps around past the last position.
pub(crate) fn increment_index(index: &mut [usize], shape: &[usize]) -> bool {
    for axis in (0..shape.len()).rev() {
        index[axis] += 1;
        if index[axis] < shape[axis] {
            return true;
        }
        index[axis] = 0;
    }
    false
}

/// Normalize a possibly negative axis against a rank.
///
/// An axis is valid iff `-rank <= axis < rank`; negative axes map to `axis + rank`.
///
/// ```
/// use shaped_core::shape::normalize_axis;
///
/// assert_eq!(normalize_axis(-1, 3).unwrap(), 2);
/// assert!(normalize_axis(3, 3).is_err());
/// assert!(normalize_axis(0, 0).is_err());
/// ```
pub fn normalize_axis(axis: Axis, rank: usize) -> Result<usize> {
    let signed_rank = rank as isize;
    if axis < -signed_rank || axis >= signed_rank {
        return Err(ShapeError::invalid_axis(axis, rank));
    }
    let normalized = if axis < 0 { axis + signed_rank } else { axis };
    Ok(normalized as usize)
}

/// Normalize an insertion position, which may also equal `rank` (append).
///
/// Valid positions are `-(rank + 1) ..= rank`. The error reports the rank the
/// caller passed in.
pub fn normalize_insertion_axis(axis: Axis, rank: usize) -> Result<usize> {
    normalize_axis(axis, rank + 1).map_err(|_| ShapeError::invalid_axis(axis, rank))
}

/// Normalize and jointly validate a set of axes.
///
/// Each axis must be valid on its own and no two axes may normalize to the same
/// dimension. The normalized axes are returned in the order given.
///
/// # Errors
///
/// [`ShapeError::Axis`] naming every out-of-range axis, or else every axis
/// taking part in a duplicate.
///
/// ```
/// use shaped_core::shape::normalize_axes;
/// use shaped_core::ShapeError;
///
/// assert_eq!(normalize_axes(&[0, -1], 3).unwrap(), vec![0, 2]);
/// assert_eq!(
///     normalize_axes(&[2, -1], 3),
///     Err(ShapeError::Axis { axes: vec![2, -1], rank: 3 })
/// );
/// ```
pub fn normalize_axes(axes: &[Axis], rank: usize) -> Result<Vec<usize>> {
    let out_of_range: Vec<Axis> = axes
        .iter()
        .copied()
        .filter(|&axis| normalize_axis(axis, rank).is_err())
        .collect();
    if !out_of_range.is_empty() {
        return Err(ShapeError::Axis {
            axes: out_of_range,
            rank,
        });
    }

    let normalized: Vec<usize> = axes
        .iter()
        .map(|&axis| normalize_axis(axis, rank))
        .collect::<Result<_>>()?;

    let duplicated: Vec<Axis> = axes
        .iter()
        .zip(&normalized)
        .filter(|&(_, n)| normalized.iter().filter(|&m| m == n).count() > 1)
        .map(|(&axis, _)| axis)
        .collect();
    if !duplicated.is_empty() {
        return Err(ShapeError::Axis {
            axes: duplicated,
            rank,
        });
    }

    Ok(normalized)
}

/// Resolve the shape two operands broadcast to.
///
/// Shapes are aligned at their trailing dimensions; the shorter one is padded
/// with leading size-1 dimensions. Each aligned pair must be equal or contain a
/// 1, and the result takes the larger size.
///
/// # Errors
///
/// [`ShapeError::ShapeMismatch`] naming both shapes.
///
/// ```
/// use shaped_core::shape::broadcast_shape;
///
/// assert_eq!(broadcast_shape(&[4, 1], &[3]).unwrap().as_slice(), &[4, 3]);
/// assert_eq!(broadcast_shape(&[3, 1, 5], &[5, 5]).unwrap().as_slice(), &[3, 5, 5]);
/// assert!(broadcast_shape(&[2, 3], &[4]).is_err());
/// ```
pub fn broadcast_shape(lhs: &[usize], rhs: &[usize]) -> Result<Shape> {
    let rank = lhs.len().max(rhs.len());
    let mut result = Shape::from_elem(0, rank);
    for axis in 0..rank {
        let l = aligned_dim(lhs, rank, axis);
        let r = aligned_dim(rhs, rank, axis);
        result[axis] = match (l, r) {
            (l, r) if l == r => l,
            (1, r) => r,
            (l, 1) => l,
            _ => return Err(ShapeError::shape_mismatch(lhs, rhs)),
        };
    }
    try_numel(&result)?;
    Ok(result)
}

/// Size of `shape` at `axis` once left-padded with ones to `rank` dimensions.
pub(crate) fn aligned_dim(shape: &[usize], rank: usize, axis: usize) -> usize {
    let pad = rank - shape.len();
    if axis < pad {
        1
    } else {
        shape[axis - pad]
    }
}

/// Iterator over every coordinate of a shape in row-major order.
///
/// A rank-0 shape yields a single empty coordinate; a shape containing a zero
/// yields nothing.
///
/// ```
/// use shaped_core::shape::Indices;
///
/// let coords: Vec<Vec<usize>> = Indices::new(&[2, 2]).collect();
/// assert_eq!(coords, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
/// ```
#[derive(Debug, Clone)]
pub struct Indices {
    shape: Shape,
    next: Option<Vec<usize>>,
    remaining: usize,
}

impl Indices {
    /// Create an iterator over the coordinates of `shape`.
    pub fn new(shape: &[usize]) -> Self {
        let remaining = numel(shape);
        Self {
            shape: Shape::from_slice(shape),
            next: (remaining > 0).then(|| vec![0; shape.len()]),
            remaining,
        }
    }
}

impl Iterator for Indices {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.remaining -= 1;
        let mut successor = current.clone();
        if increment_index(&mut successor, &self.shape) {
            self.next = Some(successor);
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Indices {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strides() {
        assert_eq!(strides_for_shape(&[1, 2, 3, 4]).as_slice(), &[24, 12, 4, 1]);
        assert!(strides_for_shape(&[]).is_empty());
        assert_eq!(strides_for_shape(&[5]).as_slice(), &[1]);
    }

    #[test]
    fn test_unravel_known_value() {
        assert_eq!(unravel(1621, &[6, 7, 8, 9]).unwrap(), vec![3, 1, 4, 1]);
    }

    #[test]
    fn test_unravel_out_of_bounds() {
        let err = unravel(2, &[1]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::Index {
                index: vec![2],
                shape: vec![1]
            }
        );
    }

    #[test]
    fn test_unravel_rank_zero() {
        assert_eq!(unravel(0, &[]).unwrap(), Vec::<usize>::new());
        assert!(unravel(1, &[]).is_err());
    }

    #[test]
    fn test_ravel_rejects_bad_coordinates() {
        assert!(ravel(&[2, 0], &[2, 3]).is_err());
        assert!(ravel(&[0], &[2, 3]).is_err());
        assert_eq!(ravel(&[1, 2], &[2, 3]).unwrap(), 5);
        assert_eq!(ravel(&[], &[]).unwrap(), 0);
    }

    #[test]
    fn test_round_trip_every_offset() {
        let shape = [3, 1, 4, 2];
        for linear in 0..numel(&shape) {
            let index = unravel(linear, &shape).unwrap();
            assert_eq!(ravel(&index, &shape).unwrap(), linear);
        }
    }

    #[test]
    fn test_normalize_axes() {
        assert_eq!(normalize_axes(&[], 2).unwrap(), Vec::<usize>::new());
        assert_eq!(normalize_axes(&[-2, 1], 2).unwrap(), vec![0, 1]);
        assert_eq!(
            normalize_axes(&[0, 5, -4], 3),
            Err(ShapeError::Axis {
                axes: vec![5, -4],
                rank: 3
            })
        );
        assert_eq!(
            normalize_axes(&[1, 0, -2], 2),
            Err(ShapeError::Axis {
                axes: vec![0, -2],
                rank: 2
            })
        );
    }

    #[test]
    fn test_insertion_axis() {
        assert_eq!(normalize_insertion_axis(2, 2).unwrap(), 2);
        assert_eq!(normalize_insertion_axis(-1, 2).unwrap(), 2);
        assert_eq!(normalize_insertion_axis(-3, 2).unwrap(), 0);
        assert_eq!(
            normalize_insertion_axis(3, 2),
            Err(ShapeError::Axis {
                axes: vec![3],
                rank: 2
            })
        );
    }

    #[test]
    fn test_broadcast_shape() {
        assert_eq!(broadcast_shape(&[], &[2, 2]).unwrap().as_slice(), &[2, 2]);
        assert_eq!(broadcast_shape(&[1], &[0]).unwrap().as_slice(), &[0]);
        assert_eq!(
            broadcast_shape(&[2, 3], &[3, 3]),
            Err(ShapeError::ShapeMismatch {
                lhs: vec![2, 3],
                rhs: vec![3, 3]
            })
        );
    }

    #[test]
    fn test_broadcast_shape_overflow() {
        assert_eq!(
            broadcast_shape(&[1 << 40, 1], &[1 << 40]),
            Err(ShapeError::Overflow {
                shape: vec![1 << 40, 1 << 40]
            })
        );
    }

    #[test]
    fn test_checked_numel() {
        assert_eq!(checked_numel(&[]), Some(1));
        assert_eq!(checked_numel(&[3, 0, 2]), Some(0));
        assert_eq!(checked_numel(&[usize::MAX, 1]), Some(usize::MAX));
        assert_eq!(checked_numel(&[usize::MAX, 2]), None);
        assert!(try_numel(&[1 << 62, 4]).is_err());
    }

    #[test]
    fn test_indices_iterator() {
        assert_eq!(Indices::new(&[]).collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
        assert_eq!(Indices::new(&[2, 0]).count(), 0);
        let all: Vec<_> = Indices::new(&[2, 3, 2]).collect();
        assert_eq!(all.len(), 12);
        for (linear, index) in all.iter().enumerate() {
            assert_eq!(ravel(index, &[2, 3, 2]).unwrap(), linear);
        }
    }
}
