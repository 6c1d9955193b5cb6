//! Shaped array type definition and basic operations
//!
//! This module defines the core `ShapedArray<T>` type and provides creation and
//! accessor methods. Indexing, views, reductions, shape transforms and
//! broadcasting live in sibling modules.

use crate::error::{Result, ShapeError};
use crate::shape::{checked_numel, increment_index, numel, strides_for_shape, try_numel};
use crate::types::{Shape, Strides};
use scirs2_core::numeric::Num;

/// Dense, row-major, N-dimensional array owning a contiguous buffer
///
/// The buffer always holds exactly `product(shape)` scalars. A rank-0 array
/// (empty shape) holds exactly one scalar.
///
/// # Type Parameters
///
/// * `T` - The scalar type. Most operations only need `Clone`; arithmetic
///   needs [`Num`], means additionally need `NumCast`, and transcendental
///   functions need `Float`.
///
/// # Examples
///
/// ```
/// use shaped_core::ShapedArray;
///
/// let array = ShapedArray::new((0..6).collect::<Vec<i32>>(), &[2, 3]);
/// assert_eq!(array.shape(), &[2, 3]);
/// assert_eq!(array.rank(), 2);
/// assert_eq!(array.scalars(), &[0, 1, 2, 3, 4, 5]);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ShapedArray<T> {
    pub(crate) buffer: Vec<T>,
    pub(crate) shape: Shape,
}

/// Scalar count of a shape passed to an infallible constructor.
fn required_scalars(shape: &[usize]) -> usize {
    match checked_numel(shape) {
        Some(count) => count,
        None => panic!("Shape {:?} describes more scalars than fit in memory", shape),
    }
}

impl<T> ShapedArray<T> {
    /// Create an array from a flat row-major buffer and a shape.
    ///
    /// # Panics
    ///
    /// Panics if `scalars.len()` differs from the product of `shape`, or if
    /// that product overflows `usize`. This is a programming error; use
    /// [`from_vec`](Self::from_vec) for data whose length is only known at
    /// runtime.
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let array = ShapedArray::new(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]);
    /// assert_eq!(array.scalar_count(), 4);
    /// ```
    pub fn new(scalars: Vec<T>, shape: &[usize]) -> Self {
        let expected = required_scalars(shape);
        assert_eq!(
            scalars.len(),
            expected,
            "Shape {:?} requires {} scalars, but got {}",
            shape,
            expected,
            scalars.len()
        );
        Self {
            buffer: scalars,
            shape: Shape::from_slice(shape),
        }
    }

    /// Create an array from a flat row-major buffer, validating its length.
    ///
    /// # Errors
    ///
    /// [`ShapeError::Construction`] if the scalar count does not match the shape,
    /// [`ShapeError::Overflow`] if the shape's product does not fit in `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// assert!(ShapedArray::from_vec(vec![1, 2, 3], &[3]).is_ok());
    /// assert!(ShapedArray::from_vec(vec![1, 2, 3], &[2, 2]).is_err());
    /// ```
    pub fn from_vec(scalars: Vec<T>, shape: &[usize]) -> Result<Self> {
        let expected = try_numel(shape)?;
        if scalars.len() != expected {
            return Err(ShapeError::Construction {
                shape: shape.to_vec(),
                expected,
                actual: scalars.len(),
            });
        }
        Ok(Self {
            buffer: scalars,
            shape: Shape::from_slice(shape),
        })
    }

    /// Create a rank-0 array holding a single scalar.
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let scalar = ShapedArray::scalar(7u8);
    /// assert!(scalar.is_scalar());
    /// assert_eq!(scalar.scalar_value(), Some(&7));
    /// ```
    pub fn scalar(value: T) -> Self {
        Self {
            buffer: vec![value],
            shape: Shape::new(),
        }
    }

    /// Create an array by evaluating `f` at every coordinate in row-major order.
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let array = ShapedArray::from_shape_fn(&[2, 3], |idx| idx[0] * 10 + idx[1]);
    /// assert_eq!(array.scalars(), &[0, 1, 2, 10, 11, 12]);
    /// ```
    pub fn from_shape_fn<F>(shape: &[usize], mut f: F) -> Self
    where
        F: FnMut(&[usize]) -> T,
    {
        let count = required_scalars(shape);
        let mut buffer = Vec::with_capacity(count);
        let mut index = vec![0; shape.len()];
        for _ in 0..count {
            buffer.push(f(&index));
            increment_index(&mut index, shape);
        }
        Self {
            buffer,
            shape: Shape::from_slice(shape),
        }
    }

    /// Assemble an array from parts whose consistency the caller guarantees.
    pub(crate) fn from_parts(buffer: Vec<T>, shape: Shape) -> Self {
        debug_assert_eq!(buffer.len(), numel(&shape));
        Self { buffer, shape }
    }

    /// Get the shape of this array
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Get the rank (number of dimensions) of this array
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Get the total number of scalars
    pub fn scalar_count(&self) -> usize {
        self.buffer.len()
    }

    /// Check whether the array holds no scalars (some dimension is zero)
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Check whether this is a rank-0 array
    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    /// The single scalar of a rank-0 array, `None` for any other rank.
    pub fn scalar_value(&self) -> Option<&T> {
        if self.is_scalar() {
            self.buffer.first()
        } else {
            None
        }
    }

    /// Row-major strides derived from the shape.
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let array = ShapedArray::<f32>::zeros(&[2, 3, 4]);
    /// assert_eq!(array.strides().as_slice(), &[12, 4, 1]);
    /// ```
    pub fn strides(&self) -> Strides {
        strides_for_shape(&self.shape)
    }

    /// Borrow the flat row-major buffer
    pub fn scalars(&self) -> &[T] {
        &self.buffer
    }

    /// Mutably borrow the flat row-major buffer
    pub fn scalars_mut(&mut self) -> &mut [T] {
        &mut self.buffer
    }

    /// Consume the array and return its flat row-major buffer
    pub fn into_scalars(self) -> Vec<T> {
        self.buffer
    }

    /// Iterate over all scalars in row-major order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.buffer.iter()
    }

    /// Mutably iterate over all scalars in row-major order
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.buffer.iter_mut()
    }

    /// Check if two arrays have the same shape
    pub fn same_shape<U>(&self, other: &ShapedArray<U>) -> bool {
        self.shape() == other.shape()
    }

    /// Apply `f` to every scalar, producing an array of the same shape.
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let array = ShapedArray::new(vec![1, 2, 3], &[3]);
    /// let doubled = array.map(|x| x * 2);
    /// assert_eq!(doubled.scalars(), &[2, 4, 6]);
    /// ```
    pub fn map<U, F>(&self, f: F) -> ShapedArray<U>
    where
        F: FnMut(&T) -> U,
    {
        ShapedArray {
            buffer: self.buffer.iter().map(f).collect(),
            shape: self.shape.clone(),
        }
    }

    /// Apply `f` to every scalar in place.
    pub fn map_inplace<F>(&mut self, f: F)
    where
        F: FnMut(&mut T),
    {
        self.buffer.iter_mut().for_each(f);
    }
}

impl<T: Clone> ShapedArray<T> {
    /// Create an array of the given shape with every scalar set to `value`.
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let fives = ShapedArray::repeating(5, &[2, 3]);
    /// assert_eq!(fives.scalars(), &[5; 6]);
    /// ```
    pub fn repeating(value: T, shape: &[usize]) -> Self {
        Self {
            buffer: vec![value; required_scalars(shape)],
            shape: Shape::from_slice(shape),
        }
    }

    /// Copy the scalars into a new vector
    pub fn to_vec(&self) -> Vec<T> {
        self.buffer.clone()
    }

    /// Overwrite every scalar with `value`.
    pub fn fill(&mut self, value: T) {
        self.buffer.fill(value);
    }
}

impl<T> ShapedArray<T>
where
    T: Clone + Num,
{
    /// Create an array of zeros
    ///
    /// ```
    /// use shaped_core::ShapedArray;
    ///
    /// let zeros = ShapedArray::<f64>::zeros(&[2, 3, 4]);
    /// assert!(zeros.iter().all(|&x| x == 0.0));
    /// ```
    pub fn zeros(shape: &[usize]) -> Self {
        Self::repeating(T::zero(), shape)
    }

    /// Create an array of ones
    pub fn ones(shape: &[usize]) -> Self {
        Self::repeating(T::one(), shape)
    }
}
