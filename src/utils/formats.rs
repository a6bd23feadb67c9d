//! Utilities for converting between our matrix formats and external libraries

use ndarray::Array2;
use sprs::{CsMat, TriMat};

use crate::error::{MmioError, Result};
use crate::matrix::{CooMatrix, CsrMatrix};
use crate::mmio::validation::required_bytes_index;
use crate::scalar::{MtxIndex, MtxValue};

/// Converts our COO matrix to sprs triplet format
///
/// Pattern storage is given explicit ones.
pub fn coo_to_sprs<I, V>(matrix: &CooMatrix<I, V>) -> TriMat<V>
where
    I: MtxIndex,
    V: MtxValue,
{
    let rows = matrix.row.iter().map(|r| r.to_usize()).collect();
    let cols = matrix.col.iter().map(|c| c.to_usize()).collect();
    let data = match &matrix.values {
        Some(values) => values.clone(),
        None => vec![V::one(); matrix.nnz()],
    };

    TriMat::from_triplets((matrix.n_rows, matrix.n_cols), rows, cols, data)
}

/// Converts our CSR matrix to sprs CsMat format
///
/// sprs does not allow repeated column indices within a row, so duplicate
/// entries are summed.
pub fn csr_to_sprs<I, V>(matrix: &CsrMatrix<I, V>) -> CsMat<V>
where
    I: MtxIndex,
    V: MtxValue,
{
    let mut tri = TriMat::with_capacity((matrix.n_rows, matrix.n_cols), matrix.nnz());
    for i in 0..matrix.n_rows {
        for (col, val) in matrix.row_iter(i) {
            tri.add_triplet(i, col.to_usize(), val);
        }
    }
    tri.to_csr()
}

/// Converts sprs CsMat to our CSR format, narrowing indices to `I`
///
/// # Errors
///
/// `IndexTooNarrow` if a column index or row offset does not fit in `I`.
pub fn csr_from_sprs<I, V>(matrix: CsMat<V>) -> Result<CsrMatrix<I, V>>
where
    I: MtxIndex,
    V: MtxValue,
{
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let (n_rows, n_cols) = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    CsrMatrix::new(
        n_rows,
        n_cols,
        narrow(indptr)?,
        narrow(indices)?,
        Some(data),
    )
}

fn narrow<I: MtxIndex>(values: Vec<usize>) -> Result<Vec<I>> {
    values
        .into_iter()
        .map(|v| {
            I::from_usize(v).ok_or(MmioError::IndexTooNarrow {
                required: required_bytes_index(v as u64),
                available: I::BYTES,
            })
        })
        .collect()
}

impl<I: MtxIndex, V: MtxValue> CsrMatrix<I, V> {
    /// Expands the matrix into a dense row-major array
    ///
    /// Duplicate entries are summed and pattern storage contributes ones.
    pub fn to_dense(&self) -> Array2<V> {
        let mut dense = Array2::zeros((self.n_rows, self.n_cols));
        for i in 0..self.n_rows {
            for (col, val) in self.row_iter(i) {
                let cell = &mut dense[[i, col.to_usize()]];
                *cell = *cell + val;
            }
        }
        dense
    }
}
