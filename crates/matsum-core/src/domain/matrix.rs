//! Square matrix of protocol words.
//!
//! A matrix travels on the wire as its size word N followed by exactly N²
//! value words in row-major order. This type stores the values the same way
//! they are transmitted, so encoding is a straight iteration over
//! [`Matrix::words`] and decoding never reshuffles anything.

use thiserror::Error;

/// Errors from constructing a [`Matrix`] out of raw words.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatrixError {
    /// The word count does not equal size².
    #[error("{words} words do not form a {size}x{size} matrix")]
    DimensionMismatch { size: u32, words: usize },
}

/// Square N×N grid of unsigned 32-bit words, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    size: u32,
    words: Vec<u32>,
}

impl Matrix {
    /// Builds a matrix from row-major words, checking that the count is size².
    pub fn from_words(size: u32, words: Vec<u32>) -> Result<Self, MatrixError> {
        let expected = (size as usize) * (size as usize);
        if words.len() != expected {
            return Err(MatrixError::DimensionMismatch {
                size,
                words: words.len(),
            });
        }
        Ok(Self { size, words })
    }

    /// Builds a matrix by evaluating `f(row, col)` for every cell in
    /// row-major order. Cannot fail: the word count is correct by
    /// construction.
    pub fn from_fn(size: u32, mut f: impl FnMut(u32, u32) -> u32) -> Self {
        let mut words = Vec::with_capacity((size as usize) * (size as usize));
        for row in 0..size {
            for col in 0..size {
                words.push(f(row, col));
            }
        }
        Self { size, words }
    }

    /// Edge length N.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of value words (N²), excluding the size word.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// All values in row-major transmission order.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Value at (row, col), or `None` when either index is out of bounds.
    pub fn get(&self, row: u32, col: u32) -> Option<u32> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.words
            .get(row as usize * self.size as usize + col as usize)
            .copied()
    }

    /// Iterates over the rows as word slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        // max(1) keeps chunks() happy for the degenerate 0x0 matrix, whose
        // empty word vector yields no chunks either way.
        self.words.chunks((self.size as usize).max(1))
    }
}
