//! Flat-buffer elementwise math
//!
//! Arrays never compute transcendental functions themselves: they hand their
//! row-major buffers to a [`VectorMath`] implementation together with an
//! operation tag. [`ScalarMath`] is the portable implementation, evaluating
//! one scalar at a time; accelerated backends (SIMD, BLAS-style vector
//! libraries) can implement the same trait and be passed to
//! [`ShapedArray::map_unary_with`](crate::ShapedArray::map_unary_with) and
//! [`ShapedArray::binary_with`](crate::ShapedArray::binary_with).
//!
//! # Examples
//!
//! ```
//! use shaped_core::{ScalarMath, UnaryOp, VectorMath};
//!
//! let input = [1.0_f64, 4.0, 9.0];
//! let mut output = [0.0; 3];
//! ScalarMath.unary(UnaryOp::Sqrt, &input, &mut output)?;
//! assert_eq!(output, [1.0, 2.0, 3.0]);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::error::{Result, ShapeError};
use scirs2_core::numeric::{Float, Num};

/// Single-operand elementwise operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Square root
    Sqrt,
    /// Cosine
    Cos,
    /// Sine
    Sin,
    /// Tangent
    Tan,
    /// Natural exponential
    Exp,
    /// Natural logarithm
    Ln,
    /// Absolute value
    Abs,
    /// Negation
    Neg,
    /// Hyperbolic tangent
    Tanh,
    /// `x * x`
    Square,
}

impl UnaryOp {
    /// Evaluate the operation on one scalar.
    pub fn apply<T: Float>(self, x: T) -> T {
        match self {
            UnaryOp::Sqrt => x.sqrt(),
            UnaryOp::Cos => x.cos(),
            UnaryOp::Sin => x.sin(),
            UnaryOp::Tan => x.tan(),
            UnaryOp::Exp => x.exp(),
            UnaryOp::Ln => x.ln(),
            UnaryOp::Abs => x.abs(),
            UnaryOp::Neg => -x,
            UnaryOp::Tanh => x.tanh(),
            UnaryOp::Square => x * x,
        }
    }
}

/// Two-operand elementwise arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// Evaluate the operation on one pair of scalars.
    ///
    /// Integer division by zero panics as it does for the primitive types.
    pub fn apply<T: Num>(self, lhs: T, rhs: T) -> T {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
        }
    }
}

/// Elementwise math over flat scalar buffers.
///
/// Every buffer passed to one call must have the same length; implementations
/// report a difference as [`ShapeError::ShapeMismatch`] and leave `output`
/// untouched.
pub trait VectorMath<T> {
    /// Write `op(input[i])` to `output[i]` for every `i`.
    fn unary(&self, op: UnaryOp, input: &[T], output: &mut [T]) -> Result<()>;

    /// Write `op(lhs[i], rhs[i])` to `output[i]` for every `i`.
    fn binary(&self, op: BinaryOp, lhs: &[T], rhs: &[T], output: &mut [T]) -> Result<()>;
}

/// Portable scalar-at-a-time [`VectorMath`] implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarMath;

impl<T: Float> VectorMath<T> for ScalarMath {
    fn unary(&self, op: UnaryOp, input: &[T], output: &mut [T]) -> Result<()> {
        check_lengths(input.len(), output.len())?;
        for (out, &x) in output.iter_mut().zip(input) {
            *out = op.apply(x);
        }
        Ok(())
    }

    fn binary(&self, op: BinaryOp, lhs: &[T], rhs: &[T], output: &mut [T]) -> Result<()> {
        check_lengths(lhs.len(), rhs.len())?;
        check_lengths(lhs.len(), output.len())?;
        for ((out, &l), &r) in output.iter_mut().zip(lhs).zip(rhs) {
            *out = op.apply(l, r);
        }
        Ok(())
    }
}

fn check_lengths(lhs: usize, rhs: usize) -> Result<()> {
    if lhs != rhs {
        return Err(ShapeError::shape_mismatch(&[lhs], &[rhs]));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unary_ops() {
        let input = [0.0_f64, 1.0, 4.0];
        let mut output = [0.0; 3];

        ScalarMath.unary(UnaryOp::Square, &input, &mut output).unwrap();
        assert_eq!(output, [0.0, 1.0, 16.0]);

        ScalarMath.unary(UnaryOp::Neg, &input, &mut output).unwrap();
        assert_eq!(output, [-0.0, -1.0, -4.0]);

        ScalarMath.unary(UnaryOp::Exp, &[0.0], &mut output[..1]).unwrap();
        assert_eq!(output[0], 1.0);
    }

    #[test]
    fn test_trig_identity() {
        let input: Vec<f64> = (0..8).map(|i| i as f64 * 0.4).collect();
        let mut sin = vec![0.0; 8];
        let mut cos = vec![0.0; 8];
        ScalarMath.unary(UnaryOp::Sin, &input, &mut sin).unwrap();
        ScalarMath.unary(UnaryOp::Cos, &input, &mut cos).unwrap();
        for (s, c) in sin.iter().zip(&cos) {
            assert!((s * s + c * c - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_binary_ops() {
        let lhs = [6.0_f32, 8.0];
        let rhs = [2.0_f32, 4.0];
        let mut output = [0.0_f32; 2];
        ScalarMath.binary(BinaryOp::Div, &lhs, &rhs, &mut output).unwrap();
        assert_eq!(output, [3.0, 2.0]);
        ScalarMath.binary(BinaryOp::Sub, &lhs, &rhs, &mut output).unwrap();
        assert_eq!(output, [4.0, 4.0]);
    }

    #[test]
    fn test_length_mismatch() {
        let mut output = [0.0_f64; 2];
        assert_eq!(
            ScalarMath.unary(UnaryOp::Abs, &[1.0, 2.0, 3.0], &mut output),
            Err(ShapeError::ShapeMismatch {
                lhs: vec![3],
                rhs: vec![2]
            })
        );
        assert!(ScalarMath
            .binary(BinaryOp::Add, &[1.0], &[1.0, 2.0], &mut output)
            .is_err());
    }

    #[test]
    fn test_binary_op_on_integers() {
        assert_eq!(BinaryOp::Sub.apply(3_i64, 5), -2);
        assert_eq!(BinaryOp::Div.apply(7_u32, 2), 3);
    }
}
