//! Standard trait implementations for `ShapedArray`
//!
//! - `Index` / `IndexMut` by coordinate (`&[usize]` or `&[usize; N]`), panicking
//!   on an invalid coordinate like slice indexing does
//! - `Debug` and `Display`
//! - `From<Vec<T>>` for rank-1 arrays

use super::types::ShapedArray;
use crate::describe::{describe, PrintOptions};
use crate::shape::ravel;
use crate::types::Shape;
use std::fmt;

impl<T> ShapedArray<T> {
    fn offset_or_panic(&self, index: &[usize]) -> usize {
        ravel(index, &self.shape).unwrap_or_else(|err| panic!("{}", err))
    }
}

impl<T> std::ops::Index<&[usize]> for ShapedArray<T> {
    type Output = T;

    fn index(&self, index: &[usize]) -> &Self::Output {
        &self.buffer[self.offset_or_panic(index)]
    }
}

impl<T> std::ops::IndexMut<&[usize]> for ShapedArray<T> {
    fn index_mut(&mut self, index: &[usize]) -> &mut Self::Output {
        let offset = self.offset_or_panic(index);
        &mut self.buffer[offset]
    }
}

impl<T, const N: usize> std::ops::Index<&[usize; N]> for ShapedArray<T> {
    type Output = T;

    fn index(&self, index: &[usize; N]) -> &Self::Output {
        &self[index.as_slice()]
    }
}

impl<T, const N: usize> std::ops::IndexMut<&[usize; N]> for ShapedArray<T> {
    fn index_mut(&mut self, index: &[usize; N]) -> &mut Self::Output {
        &mut self[index.as_slice()]
    }
}

impl<T: fmt::Debug> fmt::Debug for ShapedArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapedArray")
            .field("shape", &self.shape())
            .field("rank", &self.rank())
            .field("scalars", &self.scalars())
            .finish()
    }
}

/// Nested-bracket rendering with default [`PrintOptions`]; `{:#}` summarizes
/// long axes.
impl<T: fmt::Display> fmt::Display for ShapedArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = PrintOptions::default().with_summarizing(f.alternate());
        f.write_str(&describe(self.shape(), self.scalars(), &options))
    }
}

impl<T: fmt::Display> ShapedArray<T> {
    /// Render the array with explicit options.
    ///
    /// # Examples
    ///
    /// ```
    /// use shaped_core::describe::PrintOptions;
    /// use shaped_core::ShapedArray;
    ///
    /// let array = ShapedArray::new((0..100).collect::<Vec<i32>>(), &[100]);
    /// let options = PrintOptions::default().with_summarizing(true);
    /// assert_eq!(array.description(&options), "[ 0,  1,  2, ..., 97, 98, 99]");
    /// ```
    pub fn description(&self, options: &PrintOptions) -> String {
        describe(self.shape(), self.scalars(), options)
    }
}

impl<T> From<Vec<T>> for ShapedArray<T> {
    fn from(scalars: Vec<T>) -> Self {
        let shape: Shape = std::iter::once(scalars.len()).collect();
        ShapedArray::from_parts(scalars, shape)
    }
}
