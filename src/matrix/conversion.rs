//! Builders turning ingested entries into COO or CSR storage

use log::debug;

use crate::error::{MmioError, Result};
use crate::matrix::{CooMatrix, CsrMatrix, Entry};
use crate::mmio::validation::required_bytes_index;
use crate::scalar::{MtxIndex, MtxValue};

/// Converts a usize offset into the index type, failing if it does not fit
fn offset_to_index<I: MtxIndex>(offset: usize) -> Result<I> {
    I::from_usize(offset).ok_or(MmioError::IndexTooNarrow {
        required: required_bytes_index(offset as u64),
        available: I::BYTES,
    })
}

/// Splits entries into row/col/value arrays in ingestion order
///
/// # Arguments
///
/// * `entries` - Ingested entries, 0-based
/// * `n_rows` - Number of rows
/// * `n_cols` - Number of columns
/// * `alloc_values` - Whether to keep entry values
pub fn entries_to_coo<I, V>(
    entries: &[Entry<I, V>],
    n_rows: usize,
    n_cols: usize,
    alloc_values: bool,
) -> CooMatrix<I, V>
where
    I: MtxIndex,
    V: MtxValue,
{
    debug!("Building COO matrix from {} entries", entries.len());

    CooMatrix {
        n_rows,
        n_cols,
        row: entries.iter().map(|e| e.row).collect(),
        col: entries.iter().map(|e| e.col).collect(),
        values: alloc_values.then(|| entries.iter().map(|e| e.val).collect()),
    }
}

/// Sorts entries by (row, col) and compresses them into CSR storage
///
/// The sort is unstable: entries sharing a (row, col) pair keep no particular
/// order among themselves. Duplicates are stored as-is, not summed.
///
/// # Errors
///
/// - `IndexTooNarrow` if the entry count cannot be stored in `row_ptr`
/// - `EntryOutOfBounds` if an entry lies outside the shape
pub fn entries_to_csr<I, V>(
    entries: &mut [Entry<I, V>],
    n_rows: usize,
    n_cols: usize,
    alloc_values: bool,
) -> Result<CsrMatrix<I, V>>
where
    I: MtxIndex,
    V: MtxValue,
{
    let nnz = entries.len();
    offset_to_index::<I>(nnz)?;

    debug!("Building CSR matrix from {} entries", nnz);

    // Sort by row, then column
    entries.sort_unstable_by(|a, b| a.row.cmp(&b.row).then(a.col.cmp(&b.col)));

    if let Some(e) = entries
        .iter()
        .find(|e| e.row.to_usize() >= n_rows || e.col.to_usize() >= n_cols)
    {
        return Err(MmioError::EntryOutOfBounds {
            row: e.row.to_u64(),
            col: e.col.to_u64(),
            n_rows,
            n_cols,
        });
    }

    let mut row_ptr = Vec::with_capacity(n_rows + 1);
    let mut col_idx = Vec::with_capacity(nnz);
    let mut values = alloc_values.then(|| Vec::with_capacity(nnz));

    let mut cursor = 0;
    for row in 0..n_rows {
        row_ptr.push(offset_to_index(cursor)?);
        while cursor < nnz && entries[cursor].row.to_usize() == row {
            col_idx.push(entries[cursor].col);
            if let Some(values) = values.as_mut() {
                values.push(entries[cursor].val);
            }
            cursor += 1;
        }
    }
    row_ptr.push(offset_to_index(nnz)?);

    Ok(CsrMatrix {
        n_rows,
        n_cols,
        row_ptr,
        col_idx,
        values,
    })
}

impl<I: MtxIndex, V: MtxValue> CooMatrix<I, V> {
    /// Converts this COO matrix to CSR format
    ///
    /// Values are carried over only if this matrix holds them.
    pub fn to_csr(&self) -> Result<CsrMatrix<I, V>> {
        let mut entries: Vec<_> = self.iter().collect();
        entries_to_csr(&mut entries, self.n_rows, self.n_cols, self.has_values())
    }
}

impl<I: MtxIndex, V: MtxValue> CsrMatrix<I, V> {
    /// Converts this CSR matrix back to COO format in row-major order
    ///
    /// # Errors
    ///
    /// `IndexTooNarrow` if a non-empty row's index does not fit the index type.
    pub fn to_coo(&self) -> Result<CooMatrix<I, V>> {
        let mut row = Vec::with_capacity(self.nnz());

        for i in 0..self.n_rows {
            let len = self.row_range(i).len();
            if len > 0 {
                let idx: I = offset_to_index(i)?;
                row.extend(std::iter::repeat(idx).take(len));
            }
        }

        Ok(CooMatrix {
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            row,
            col: self.col_idx.clone(),
            values: self.values.clone(),
        })
    }
}
