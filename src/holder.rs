//! Parameter storage.
//!
//! Control points live in an index-addressed store. The spline code only
//! ever holds indices into it; the store decides where the scalars are.
//! [`VectorHolder`] owns its storage and backs a
//! [`UniformR3SplineTrajectory`](crate::UniformR3SplineTrajectory).
//! [`SliceHolder`] borrows the blocks an optimizer passes to a residual,
//! so the same evaluator runs on whatever scalar type it uses.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An index-addressed store of fixed-size parameter blocks.
pub trait DataHolder<T> {
    /// Number of blocks in the store.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Block `i`.
    ///
    /// # Panics
    /// If `i >= self.len()`.
    fn parameter(&self, i: usize) -> &[T];
}

/// A [`DataHolder`] that can grow and be written to.
pub trait DataHolderMut<T>: DataHolder<T> {
    /// Allocates a new zero-initialized block of `size` scalars and
    /// returns its index.
    fn add_parameter(&mut self, size: usize) -> usize;

    /// Mutable block `i`.
    ///
    /// # Panics
    /// If `i >= self.len()`.
    fn parameter_mut(&mut self, i: usize) -> &mut [T];
}

/// Owned, append-only arena of parameter blocks.
///
/// All blocks share one contiguous buffer; `offsets[i]..offsets[i + 1]`
/// is block `i`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VectorHolder<T> {
    data: Vec<T>,
    offsets: Vec<usize>,
}

impl<T> Default for VectorHolder<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            offsets: vec![0],
        }
    }
}

impl<T> VectorHolder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of block `i`, or `None` if it does not exist.
    pub fn block_size(&self, i: usize) -> Option<usize> {
        Some(self.offsets.get(i + 1)? - self.offsets[i])
    }

    /// All scalars of all blocks, in allocation order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> DataHolder<T> for VectorHolder<T> {
    #[inline]
    fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline]
    fn parameter(&self, i: usize) -> &[T] {
        &self.data[self.offsets[i]..self.offsets[i + 1]]
    }
}

impl<T: Clone + num_traits::Zero> DataHolderMut<T> for VectorHolder<T> {
    fn add_parameter(&mut self, size: usize) -> usize {
        let index = self.len();
        self.data.resize(self.data.len() + size, T::zero());
        self.offsets.push(self.data.len());
        index
    }

    #[inline]
    fn parameter_mut(&mut self, i: usize) -> &mut [T] {
        let range = self.offsets[i]..self.offsets[i + 1];
        &mut self.data[range]
    }
}

/// Borrowed view over parameter blocks, e.g. the ones an optimizer
/// passes to a residual evaluation.
///
/// Block `i` of the view is `blocks[i]`, so the blocks must be in the
/// order they were registered in.
#[derive(Clone, Copy, Debug)]
pub struct SliceHolder<'a, T> {
    blocks: &'a [&'a [T]],
}

impl<'a, T> SliceHolder<'a, T> {
    pub fn new(blocks: &'a [&'a [T]]) -> Self {
        Self { blocks }
    }
}

impl<T> DataHolder<T> for SliceHolder<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    fn parameter(&self, i: usize) -> &[T] {
        self.blocks[i]
    }
}
