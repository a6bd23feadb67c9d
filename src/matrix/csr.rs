//! Compressed Sparse Row (CSR) matrix format implementation

use std::fmt;
use std::ops::Range;

use crate::error::{MmioError, Result};
use crate::scalar::{MtxIndex, MtxValue};

/// A sparse matrix in Compressed Sparse Row (CSR) format
///
/// The CSR format stores a sparse matrix using three arrays:
/// - row_ptr: Array of size n_rows + 1 containing offsets into col_idx and values
/// - col_idx: Array of size nnz containing column indices of non-zero elements
/// - values: Optional array of size nnz containing the non-zero values
///
/// `values` is `None` for pattern matrices read without explicit values.
/// Readers in this crate produce column indices sorted ascending within each row.
#[derive(Clone, PartialEq)]
pub struct CsrMatrix<I, V> {
    /// Number of rows in the matrix
    pub n_rows: usize,

    /// Number of columns in the matrix
    pub n_cols: usize,

    /// Row pointers (size: n_rows + 1)
    /// row_ptr[i] is the offset in col_idx and values where row i starts
    /// row_ptr[n_rows] is equal to nnz
    pub row_ptr: Vec<I>,

    /// Column indices (size: nnz)
    pub col_idx: Vec<I>,

    /// Non-zero values (size: nnz), absent for pattern-only storage
    pub values: Option<Vec<V>>,
}

impl<I: MtxIndex, V: MtxValue> CsrMatrix<I, V> {
    /// Allocates a zero-filled CSR matrix
    ///
    /// # Arguments
    ///
    /// * `n_rows` - Number of rows
    /// * `n_cols` - Number of columns
    /// * `nnz` - Number of stored entries
    /// * `alloc_values` - Whether to allocate the value array
    pub fn create(n_rows: usize, n_cols: usize, nnz: usize, alloc_values: bool) -> Self {
        Self {
            n_rows,
            n_cols,
            row_ptr: vec![I::default(); n_rows + 1],
            col_idx: vec![I::default(); nnz],
            values: alloc_values.then(|| vec![V::zero(); nnz]),
        }
    }

    /// Creates a CSR matrix from raw arrays, checking their consistency
    ///
    /// # Errors
    ///
    /// Returns `InvalidMatrix` if:
    /// - row_ptr.len() is not n_rows + 1
    /// - row_ptr does not start at 0, decreases, or does not end at col_idx.len()
    /// - values are present with a length different from col_idx.len()
    /// - a column index is out of bounds
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row_ptr: Vec<I>,
        col_idx: Vec<I>,
        values: Option<Vec<V>>,
    ) -> Result<Self> {
        if row_ptr.len() != n_rows + 1 {
            return Err(MmioError::InvalidMatrix(format!(
                "row_ptr has {} elements, expected {}",
                row_ptr.len(),
                n_rows + 1
            )));
        }
        if row_ptr[0].to_usize() != 0 || row_ptr[n_rows].to_usize() != col_idx.len() {
            return Err(MmioError::InvalidMatrix(
                "row_ptr must start at 0 and end at nnz".to_string(),
            ));
        }
        if row_ptr.windows(2).any(|w| w[0] > w[1]) {
            return Err(MmioError::InvalidMatrix(
                "row_ptr must be non-decreasing".to_string(),
            ));
        }
        if let Some(values) = &values {
            if values.len() != col_idx.len() {
                return Err(MmioError::InvalidMatrix(format!(
                    "{} values for {} column indices",
                    values.len(),
                    col_idx.len()
                )));
            }
        }
        if let Some(&col) = col_idx.iter().find(|c| c.to_usize() >= n_cols) {
            return Err(MmioError::InvalidMatrix(format!(
                "column index {} out of bounds (n_cols = {})",
                col, n_cols
            )));
        }

        Ok(Self {
            n_rows,
            n_cols,
            row_ptr,
            col_idx,
            values,
        })
    }

    /// Returns the number of stored entries
    pub fn nnz(&self) -> usize {
        self.col_idx.len()
    }

    /// Whether a value array is held
    pub fn has_values(&self) -> bool {
        self.values.is_some()
    }

    /// Offsets of row i in col_idx and values
    pub fn row_range(&self, i: usize) -> Range<usize> {
        assert!(i < self.n_rows, "Row index out of bounds");
        self.row_ptr[i].to_usize()..self.row_ptr[i + 1].to_usize()
    }

    /// Returns an iterator over the stored elements in row i
    ///
    /// Each item is a tuple (col_idx, value). Pattern storage yields ones.
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (I, V)> + '_ {
        let range = self.row_range(i);
        let start = range.start;
        let values = self.values.as_deref();

        self.col_idx[range]
            .iter()
            .enumerate()
            .map(move |(k, &col)| (col, values.map_or(V::one(), |v| v[start + k])))
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self::create(n_rows, n_cols, 0, true)
    }
}

impl<I: MtxIndex, V: MtxValue> fmt::Debug for CsrMatrix<I, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CsrMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;
        writeln!(f, "  values: {}", if self.has_values() { "yes" } else { "pattern" })?;

        // Print a sample of the matrix content
        let max_rows_to_print = 5.min(self.n_rows);

        if max_rows_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for i in 0..max_rows_to_print {
                write!(f, "    row {}: ", i)?;
                let len = self.row_range(i).len();

                if len == 0 {
                    writeln!(f, "(empty)")?;
                } else {
                    let max_elements = 5.min(len);

                    for (col, val) in self.row_iter(i).take(max_elements) {
                        write!(f, "({}, {:?}) ", col, val)?;
                    }

                    if len > max_elements {
                        write!(f, "... ({} more)", len - max_elements)?;
                    }

                    writeln!(f)?;
                }
            }

            if self.n_rows > max_rows_to_print {
                writeln!(f, "    ... ({} more rows)", self.n_rows - max_rows_to_print)?;
            }
        }

        write!(f, "}}")
    }
}
