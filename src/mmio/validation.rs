//! Index-width and size sanity checks
//!
//! Runs after the size line is known and before any entry buffer is
//! allocated.

use log::debug;

use crate::error::{MmioError, Result};
use crate::mmio::size_line::SizeLine;
use crate::mmio::typecode::BinaryWidths;
use crate::scalar::MtxIndex;

/// Minimal byte width (1, 2, 4 or 8) able to hold `maxval`
pub fn required_bytes_index(maxval: u64) -> usize {
    if maxval <= u8::MAX as u64 {
        1
    } else if maxval <= u16::MAX as u64 {
        2
    } else if maxval <= u32::MAX as u64 {
        4
    } else {
        8
    }
}

/// Byte width required to address every row and column of the matrix
///
/// Empty dimensions need a single byte.
pub fn required_bytes_for_dims(n_rows: u64, n_cols: u64) -> usize {
    required_bytes_index(n_rows.max(n_cols).saturating_sub(1))
}

/// Checks that both the file's declared width and the index type `I` can
/// address the matrix
///
/// A malformed BMTX header is reported before a caller type mismatch.
///
/// # Errors
///
/// - `HeaderIndexTooNarrow` if `widths` declares fewer bytes than required
/// - `IndexTooNarrow` if `I` is narrower than required
pub fn check_index_width<I: MtxIndex>(
    size: &SizeLine,
    widths: Option<BinaryWidths>,
) -> Result<usize> {
    let required = required_bytes_for_dims(size.n_rows, size.n_cols);

    if let Some(widths) = widths {
        if (widths.idx_bytes as usize) < required {
            return Err(MmioError::HeaderIndexTooNarrow {
                declared: widths.idx_bytes as usize,
                required,
            });
        }
    }

    if I::BYTES < required {
        return Err(MmioError::IndexTooNarrow {
            required,
            available: I::BYTES,
        });
    }

    debug!(
        "Index width check passed: need {} bytes, have {}",
        required,
        I::BYTES
    );
    Ok(required)
}

/// Rejects size lines declaring more entries than the matrix has cells
///
/// A symmetric matrix must also be square.
pub fn check_declared_size(size: &SizeLine, symmetric: bool) -> Result<()> {
    let cells = (size.n_rows as u128) * (size.n_cols as u128);
    if size.nnz as u128 > cells || (symmetric && size.n_rows != size.n_cols) {
        return Err(MmioError::InconsistentSize {
            n_rows: size.n_rows,
            n_cols: size.n_cols,
            nnz: size.nnz,
        });
    }
    Ok(())
}

/// Worst-case entry count after symmetric expansion
pub fn expanded_capacity(nnz: u64, symmetric: bool) -> Result<usize> {
    let factor = if symmetric { 2 } else { 1 };
    nnz.checked_mul(factor)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| MmioError::InvalidMatrix(format!("{} entries do not fit in memory", nnz)))
}
