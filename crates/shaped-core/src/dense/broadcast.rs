//! Broadcasting elementwise operations
//!
//! Two shapes broadcast when, aligned at their trailing dimensions, every pair
//! of sizes is equal or contains a 1; the shorter shape is padded with leading
//! 1s. A size-1 dimension is stretched by reading its single entry for every
//! output position, which is done here by giving it a zero stride.
//!
//! ```text
//! [4, 1]    + [3]    -> [4, 3]
//! [3, 1, 5] + [5, 5] -> [3, 5, 5]
//! [2, 3]    + [4]    -> error
//! ```
//!
//! Outputs are always fully materialized.

use super::types::ShapedArray;
use crate::error::{Result, ShapeError};
use crate::math::{BinaryOp, VectorMath};
use crate::shape::{broadcast_shape, increment_index, numel, ravel_with_strides, strides_for_shape};
use crate::types::Strides;
use scirs2_core::numeric::Num;

/// Strides that read `source` as if it had the broadcast shape `target`.
///
/// Padded and stretched dimensions get stride 0.
fn broadcast_strides(source: &[usize], target: &[usize]) -> Strides {
    let strides = strides_for_shape(source);
    let pad = target.len() - source.len();
    (0..target.len())
        .map(|axis| {
            if axis < pad || source[axis - pad] == 1 {
                0
            } else {
                strides[axis - pad]
            }
        })
        .collect()
}

impl<T> ShapedArray<T> {
    /// Combine two arrays elementwise after broadcasting them to a common shape.
    ///
    /// # Arguments
    ///
    /// * `other` - Right-hand operand; its scalar type may differ
    /// * `op` - Called as `op(lhs, rhs)` once per output scalar, in row-major order
    ///
    /// # Errors
    ///
    /// [`ShapeError::ShapeMismatch`] naming both shapes if they do not broadcast.
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let column = ShapedArray::new(vec![0, 10, 20, 30], &[4, 1]);
    /// let row = ShapedArray::new(vec![1, 2, 3], &[3]);
    /// let table = column.broadcast_op(&row, |a, b| a + b)?;
    /// assert_eq!(table.shape(), &[4, 3]);
    /// assert_eq!(table.scalars(), &[1, 2, 3, 11, 12, 13, 21, 22, 23, 31, 32, 33]);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn broadcast_op<U, V, F>(&self, other: &ShapedArray<U>, mut op: F) -> Result<ShapedArray<V>>
    where
        F: FnMut(&T, &U) -> V,
    {
        if self.shape() == other.shape() {
            let buffer = self
                .buffer
                .iter()
                .zip(&other.buffer)
                .map(|(l, r)| op(l, r))
                .collect();
            return Ok(ShapedArray::from_parts(buffer, self.shape.clone()));
        }

        let shape = broadcast_shape(self.shape(), other.shape())?;
        tracing::trace!(lhs = ?self.shape(), rhs = ?other.shape(), output = ?shape, "broadcast");
        let lhs_strides = broadcast_strides(self.shape(), &shape);
        let rhs_strides = broadcast_strides(other.shape(), &shape);

        let count = numel(&shape);
        let mut buffer = Vec::with_capacity(count);
        let mut index = vec![0; shape.len()];
        for _ in 0..count {
            let l = ravel_with_strides(&index, &lhs_strides);
            let r = ravel_with_strides(&index, &rhs_strides);
            buffer.push(op(&self.buffer[l], &other.buffer[r]));
            increment_index(&mut index, &shape);
        }
        Ok(ShapedArray::from_parts(buffer, shape))
    }
}

impl<T: Clone> ShapedArray<T> {
    /// Materialize the array at a larger shape it broadcasts to.
    ///
    /// # Errors
    ///
    /// [`ShapeError::ShapeMismatch`] unless broadcasting the array against
    /// `shape` yields exactly `shape`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let row = ShapedArray::new(vec![1, 2, 3], &[3]);
    /// let grid = row.broadcast_to(&[2, 3])?;
    /// assert_eq!(grid.scalars(), &[1, 2, 3, 1, 2, 3]);
    /// assert!(grid.broadcast_to(&[3]).is_err());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn broadcast_to(&self, shape: &[usize]) -> Result<Self> {
        let target = broadcast_shape(self.shape(), shape)?;
        if target.as_slice() != shape {
            return Err(ShapeError::shape_mismatch(self.shape(), shape));
        }
        if self.shape() == shape {
            return Ok(self.clone());
        }
        let strides = broadcast_strides(self.shape(), shape);
        let count = numel(shape);
        let mut buffer = Vec::with_capacity(count);
        let mut index = vec![0; shape.len()];
        for _ in 0..count {
            buffer.push(self.buffer[ravel_with_strides(&index, &strides)].clone());
            increment_index(&mut index, shape);
        }
        Ok(ShapedArray::from_parts(buffer, target))
    }
}

impl<T> ShapedArray<T>
where
    T: Clone + Num,
{
    /// Broadcasting arithmetic with a [`BinaryOp`]
    pub fn broadcast_binary(&self, other: &Self, op: BinaryOp) -> Result<Self> {
        self.broadcast_op(other, |l, r| op.apply(l.clone(), r.clone()))
    }

    /// Broadcasting addition
    pub fn broadcast_add(&self, other: &Self) -> Result<Self> {
        self.broadcast_binary(other, BinaryOp::Add)
    }

    /// Broadcasting subtraction
    pub fn broadcast_sub(&self, other: &Self) -> Result<Self> {
        self.broadcast_binary(other, BinaryOp::Sub)
    }

    /// Broadcasting multiplication
    pub fn broadcast_mul(&self, other: &Self) -> Result<Self> {
        self.broadcast_binary(other, BinaryOp::Mul)
    }

    /// Broadcasting division
    pub fn broadcast_div(&self, other: &Self) -> Result<Self> {
        self.broadcast_binary(other, BinaryOp::Div)
    }

    /// Broadcasting arithmetic evaluated by a [`VectorMath`] backend.
    ///
    /// Operands whose shapes differ are first materialized at the broadcast
    /// shape, so the backend always sees two flat buffers of equal length.
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::{BinaryOp, ScalarMath, ShapedArray};
    ///
    /// let a = ShapedArray::new(vec![1.0, 2.0], &[2, 1]);
    /// let b = ShapedArray::new(vec![10.0, 20.0, 30.0], &[3]);
    /// let product = a.binary_with(&ScalarMath, &b, BinaryOp::Mul)?;
    /// assert_eq!(product.scalars(), &[10.0, 20.0, 30.0, 20.0, 40.0, 60.0]);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn binary_with<M>(&self, backend: &M, other: &Self, op: BinaryOp) -> Result<Self>
    where
        M: VectorMath<T> + ?Sized,
    {
        let shape = broadcast_shape(self.shape(), other.shape())?;
        let lhs = self.broadcast_to(&shape)?;
        let rhs = other.broadcast_to(&shape)?;
        let mut output = lhs.buffer.clone();
        backend.binary(op, &lhs.buffer, &rhs.buffer, &mut output)?;
        Ok(ShapedArray::from_parts(output, shape))
    }
}

macro_rules! impl_binary_operator {
    ($trait:ident, $method:ident, $op:expr, $name:literal) => {
        impl<'b, T> std::ops::$trait<&'b ShapedArray<T>> for &ShapedArray<T>
        where
            T: Clone + Num,
        {
            type Output = ShapedArray<T>;

            fn $method(self, rhs: &'b ShapedArray<T>) -> Self::Output {
                self.broadcast_binary(rhs, $op).unwrap_or_else(|err| {
                    panic!("Shapes are not broadcastable for {}: {}", $name, err)
                })
            }
        }

        impl<T> std::ops::$trait<T> for &ShapedArray<T>
        where
            T: Clone + Num,
        {
            type Output = ShapedArray<T>;

            fn $method(self, scalar: T) -> Self::Output {
                self.map(|x| $op.apply(x.clone(), scalar.clone()))
            }
        }
    };
}

impl_binary_operator!(Add, add, BinaryOp::Add, "addition");
impl_binary_operator!(Sub, sub, BinaryOp::Sub, "subtraction");
impl_binary_operator!(Mul, mul, BinaryOp::Mul, "multiplication");
impl_binary_operator!(Div, div, BinaryOp::Div, "division");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::ScalarMath;

    fn iota(shape: &[usize]) -> ShapedArray<i32> {
        ShapedArray::new((0..numel(shape) as i32).collect(), shape)
    }

    #[test]
    fn test_outer_sum() {
        let column = ShapedArray::new(vec![1, 2, 3, 4], &[4, 1]);
        let row = ShapedArray::new(vec![10, 20, 30], &[3]);
        let sum = column.broadcast_add(&row).unwrap();
        assert_eq!(sum.shape(), &[4, 3]);
        for i in 0..4 {
            for j in 0..3 {
                assert_eq!(sum[&[i, j]], column.scalars()[i] + row.scalars()[j]);
            }
        }
    }

    #[test]
    fn test_leading_padding() {
        let a = iota(&[3, 1, 5]);
        let b = iota(&[5, 5]);
        let sum = a.broadcast_add(&b).unwrap();
        assert_eq!(sum.shape(), &[3, 5, 5]);
        assert_eq!(sum[&[2, 4, 1]], a[&[2, 0, 1]] + b[&[4, 1]]);
    }

    #[test]
    fn test_incompatible_shapes() {
        let a = iota(&[2, 3]);
        let b = iota(&[4]);
        assert_eq!(
            a.broadcast_mul(&b),
            Err(ShapeError::ShapeMismatch {
                lhs: vec![2, 3],
                rhs: vec![4]
            })
        );
    }

    #[test]
    fn test_scalar_operand() {
        let a = iota(&[2, 2]);
        let two = ShapedArray::scalar(2);
        assert_eq!(a.broadcast_mul(&two).unwrap().scalars(), &[0, 2, 4, 6]);
        assert_eq!(two.broadcast_sub(&a).unwrap().scalars(), &[2, 1, 0, -1]);
    }

    #[test]
    fn test_broadcast_op_mixed_types() {
        let mask = ShapedArray::new(vec![true, false], &[2, 1]);
        let values = ShapedArray::new(vec![1.5, 2.5], &[2]);
        let picked = mask
            .broadcast_op(&values, |&keep, &x| if keep { x } else { 0.0 })
            .unwrap();
        assert_eq!(picked.scalars(), &[1.5, 2.5, 0.0, 0.0]);
    }

    #[test]
    fn test_broadcast_to() {
        let a = ShapedArray::new(vec![1, 2], &[2, 1]);
        let b = a.broadcast_to(&[3, 2, 2]).unwrap();
        assert_eq!(b.scalars(), &[1, 1, 2, 2, 1, 1, 2, 2, 1, 1, 2, 2]);
        assert!(a.broadcast_to(&[2]).is_err());
        assert!(a.broadcast_to(&[4, 1]).is_err());
    }

    #[test]
    fn test_zero_sized_broadcast() {
        let empty = ShapedArray::<i32>::zeros(&[0, 3]);
        let row = iota(&[3]);
        let sum = empty.broadcast_add(&row).unwrap();
        assert_eq!(sum.shape(), &[0, 3]);
        assert!(sum.is_empty());
    }

    #[test]
    fn test_binary_with_backend() {
        let a = ShapedArray::new(vec![1.0_f64, 2.0, 3.0, 4.0], &[2, 2]);
        let b = ShapedArray::new(vec![2.0_f64, 4.0], &[2]);
        let quotient = a.binary_with(&ScalarMath, &b, BinaryOp::Div).unwrap();
        assert_eq!(quotient, a.broadcast_div(&b).unwrap());
    }

    #[test]
    fn test_operators() {
        let a = iota(&[2, 2]);
        let b = ShapedArray::new(vec![1, 1], &[2]);
        assert_eq!((&a + &b).scalars(), &[1, 2, 3, 4]);
        assert_eq!((&a - &b).scalars(), &[-1, 0, 1, 2]);
        assert_eq!((&a * 3).scalars(), &[0, 3, 6, 9]);
        assert_eq!((&a / 2).scalars(), &[0, 0, 1, 1]);
        assert_eq!((&a + 1).scalars(), &[1, 2, 3, 4]);
    }

    #[test]
    #[should_panic(expected = "not broadcastable for addition")]
    fn test_operator_panics_on_mismatch() {
        let _ = &iota(&[2, 3]) + &iota(&[2]);
    }
}
