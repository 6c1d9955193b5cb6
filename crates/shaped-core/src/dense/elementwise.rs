//! Element-wise mathematical functions on shaped arrays
//!
//! Unary functions are described by [`UnaryOp`] and evaluated either directly
//! or through a caller-supplied [`VectorMath`] backend. The output always has
//! the input's shape.

use super::types::ShapedArray;
use crate::error::Result;
use crate::math::{UnaryOp, VectorMath};
use scirs2_core::numeric::Float;

impl<T: Clone> ShapedArray<T> {
    /// Apply `op` to every scalar through `backend`.
    ///
    /// # Errors
    ///
    /// Whatever the backend reports; [`ScalarMath`](crate::ScalarMath) never
    /// fails for equal-length buffers.
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::{ScalarMath, ShapedArray, UnaryOp};
    ///
    /// let array = ShapedArray::new(vec![1.0, 4.0, 9.0, 16.0], &[2, 2]);
    /// let roots = array.map_unary_with(&ScalarMath, UnaryOp::Sqrt)?;
    /// assert_eq!(roots.shape(), &[2, 2]);
    /// assert_eq!(roots.scalars(), &[1.0, 2.0, 3.0, 4.0]);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn map_unary_with<M>(&self, backend: &M, op: UnaryOp) -> Result<Self>
    where
        M: VectorMath<T> + ?Sized,
    {
        let mut output = self.buffer.clone();
        backend.unary(op, &self.buffer, &mut output)?;
        Ok(ShapedArray::from_parts(output, self.shape.clone()))
    }
}

impl<T: Float> ShapedArray<T> {
    /// Apply `op` to every scalar.
    ///
    /// # Complexity
    ///
    /// O(n) where n is the number of scalars
    pub fn map_unary(&self, op: UnaryOp) -> Self {
        self.map(|&x| op.apply(x))
    }

    /// Element-wise square root
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let array = ShapedArray::new(vec![1.0, 4.0, 9.0, 16.0], &[2, 2]);
    /// let roots = array.sqrt();
    /// assert_eq!(roots[&[0, 0]], 1.0);
    /// assert_eq!(roots[&[1, 1]], 4.0);
    /// ```
    pub fn sqrt(&self) -> Self {
        self.map_unary(UnaryOp::Sqrt)
    }

    /// Element-wise cosine
    pub fn cos(&self) -> Self {
        self.map_unary(UnaryOp::Cos)
    }

    /// Element-wise sine
    pub fn sin(&self) -> Self {
        self.map_unary(UnaryOp::Sin)
    }

    /// Element-wise tangent
    pub fn tan(&self) -> Self {
        self.map_unary(UnaryOp::Tan)
    }

    /// Element-wise natural exponential
    pub fn exp(&self) -> Self {
        self.map_unary(UnaryOp::Exp)
    }

    /// Element-wise natural logarithm
    ///
    /// Non-positive inputs follow the floating-point rules (`-inf`, NaN).
    pub fn ln(&self) -> Self {
        self.map_unary(UnaryOp::Ln)
    }

    /// Element-wise absolute value
    pub fn abs(&self) -> Self {
        self.map_unary(UnaryOp::Abs)
    }

    /// Element-wise hyperbolic tangent
    pub fn tanh(&self) -> Self {
        self.map_unary(UnaryOp::Tanh)
    }

    /// Element-wise square
    pub fn square(&self) -> Self {
        self.map_unary(UnaryOp::Square)
    }
}

impl<T> std::ops::Neg for &ShapedArray<T>
where
    T: Clone + std::ops::Neg<Output = T>,
{
    type Output = ShapedArray<T>;

    fn neg(self) -> Self::Output {
        self.map(|x| -x.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShapeError;
    use crate::math::{BinaryOp, ScalarMath};

    struct ShortBackend;

    impl VectorMath<f64> for ShortBackend {
        fn unary(&self, _op: UnaryOp, input: &[f64], _output: &mut [f64]) -> Result<()> {
            Err(ShapeError::shape_mismatch(&[input.len()], &[0]))
        }

        fn binary(&self, _op: BinaryOp, lhs: &[f64], _rhs: &[f64], _output: &mut [f64]) -> Result<()> {
            Err(ShapeError::shape_mismatch(&[lhs.len()], &[0]))
        }
    }

    #[test]
    fn test_shorthands_keep_shape() {
        let array = ShapedArray::new(vec![0.0_f64, 1.0, 2.0, 3.0, 4.0, 5.0], &[3, 2]);
        for result in [array.sin(), array.cos(), array.exp(), array.tanh(), array.square()] {
            assert_eq!(result.shape(), &[3, 2]);
        }
        assert_eq!(array.square().scalars(), &[0.0, 1.0, 4.0, 9.0, 16.0, 25.0]);
        assert_eq!(array.exp().ln(), array.map(|&x| x.exp().ln()));
    }

    #[test]
    fn test_backend_and_direct_agree() {
        let array = ShapedArray::new(vec![-1.5_f32, 0.25, 3.0], &[3]);
        for op in [UnaryOp::Abs, UnaryOp::Neg, UnaryOp::Tan, UnaryOp::Square] {
            assert_eq!(array.map_unary_with(&ScalarMath, op).unwrap(), array.map_unary(op));
        }
    }

    #[test]
    fn test_backend_errors_propagate() {
        let array = ShapedArray::new(vec![1.0, 2.0], &[2]);
        assert!(array.map_unary_with(&ShortBackend, UnaryOp::Exp).is_err());
        assert!(array.binary_with(&ShortBackend, &array, BinaryOp::Add).is_err());
    }

    #[test]
    fn test_neg_operator() {
        let array = ShapedArray::new(vec![1, -2, 3], &[3]);
        assert_eq!((-&array).scalars(), &[-1, 2, -3]);
    }

    #[test]
    fn test_abs_on_rank_zero() {
        let scalar = ShapedArray::scalar(-2.0_f64);
        assert_eq!(scalar.abs().scalar_value(), Some(&2.0));
    }
}
