//! Transient (row, col, value) triples produced by the entry reader

use crate::scalar::{MtxIndex, MtxValue};

/// One ingested matrix entry, 0-based
///
/// Entries only live between ingestion and the builder step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry<I, V> {
    pub row: I,
    pub col: I,
    pub val: V,
}

impl<I: MtxIndex, V: MtxValue> Entry<I, V> {
    pub fn new(row: I, col: I, val: V) -> Self {
        Self { row, col, val }
    }

    /// Whether the entry sits on the main diagonal
    pub fn is_diagonal(&self) -> bool {
        self.row == self.col
    }

    /// Whether the entry belongs to the lower triangle (diagonal included)
    pub fn is_lower(&self) -> bool {
        self.row >= self.col
    }

    /// The mirrored entry (col, row, val)
    pub fn transposed(&self) -> Self {
        Self {
            row: self.col,
            col: self.row,
            val: self.val,
        }
    }
}
