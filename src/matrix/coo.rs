//! Coordinate list (COO) matrix format implementation

use crate::error::{MmioError, Result};
use crate::matrix::Entry;
use crate::scalar::{MtxIndex, MtxValue};

/// A sparse matrix as three parallel arrays of row, column and value
///
/// No ordering is guaranteed. `values` is `None` when the caller declined
/// value allocation for a pattern matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CooMatrix<I, V> {
    /// Number of rows in the matrix
    pub n_rows: usize,

    /// Number of columns in the matrix
    pub n_cols: usize,

    /// Row index of each entry (size: nnz)
    pub row: Vec<I>,

    /// Column index of each entry (size: nnz)
    pub col: Vec<I>,

    /// Value of each entry (size: nnz), absent for pattern-only storage
    pub values: Option<Vec<V>>,
}

impl<I: MtxIndex, V: MtxValue> CooMatrix<I, V> {
    /// Allocates a zero-filled COO matrix with room for `nnz` entries
    pub fn create(n_rows: usize, n_cols: usize, nnz: usize, alloc_values: bool) -> Self {
        Self {
            n_rows,
            n_cols,
            row: vec![I::default(); nnz],
            col: vec![I::default(); nnz],
            values: alloc_values.then(|| vec![V::zero(); nnz]),
        }
    }

    /// Creates a COO matrix from raw arrays, checking lengths and bounds
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row: Vec<I>,
        col: Vec<I>,
        values: Option<Vec<V>>,
    ) -> Result<Self> {
        let matrix = Self {
            n_rows,
            n_cols,
            row,
            col,
            values,
        };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Checks that the arrays agree in length and every entry is inside the shape
    pub fn validate(&self) -> Result<()> {
        if self.row.len() != self.col.len() {
            return Err(MmioError::InvalidMatrix(format!(
                "{} row indices for {} column indices",
                self.row.len(),
                self.col.len()
            )));
        }
        if let Some(values) = &self.values {
            if values.len() != self.row.len() {
                return Err(MmioError::InvalidMatrix(format!(
                    "{} values for {} entries",
                    values.len(),
                    self.row.len()
                )));
            }
        }
        for (&r, &c) in self.row.iter().zip(&self.col) {
            if r.to_usize() >= self.n_rows || c.to_usize() >= self.n_cols {
                return Err(MmioError::EntryOutOfBounds {
                    row: r.to_u64(),
                    col: c.to_u64(),
                    n_rows: self.n_rows,
                    n_cols: self.n_cols,
                });
            }
        }
        Ok(())
    }

    /// Returns the number of stored entries
    pub fn nnz(&self) -> usize {
        self.row.len()
    }

    /// Whether a value array is held
    pub fn has_values(&self) -> bool {
        self.values.is_some()
    }

    /// Iterates over the stored entries in storage order
    ///
    /// Pattern storage yields a value of one for every entry.
    pub fn iter(&self) -> impl Iterator<Item = Entry<I, V>> + '_ {
        let values = self.values.as_deref();
        self.row
            .iter()
            .zip(&self.col)
            .enumerate()
            .map(move |(k, (&row, &col))| Entry::new(row, col, values.map_or(V::one(), |v| v[k])))
    }
}
