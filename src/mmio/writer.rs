//! Encoder for text and BMTX output
//!
//! Symmetric matrices are written as the lower triangle plus diagonal
//! (entries with row >= col), the inverse of the mirroring done on read.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::constants::{SUPPORTED_INDEX_BYTES, SUPPORTED_VALUE_BYTES};
use crate::error::{MmioError, Result};
use crate::matrix::{CooMatrix, Entry};
use crate::mmio::header::write_banner;
use crate::mmio::metadata::{FileFormat, MatrixMetadata};
use crate::mmio::size_line::{write_size_line, SizeLine};
use crate::mmio::symmetry::is_retained;
use crate::mmio::validation::required_bytes_for_dims;
use crate::scalar::{MtxIndex, MtxValue};

/// Writes `coo` to `path`, as BMTX if `as_binary` is set
///
/// The banner classification and comment block come from `metadata`; for
/// BMTX output so do the record widths.
///
/// # Errors
///
/// - `InvalidMatrix` if the matrix is inconsistent or lacks values for a
///   non-pattern typecode
/// - `IndexTooNarrow` if `metadata.idx_bytes` cannot address the matrix
/// - `UnsupportedType` for widths other than 1/2/4/8 index or 4/8 value bytes
/// - `Io` if the file cannot be created or written
pub fn write_coo<I, V, P>(
    coo: &CooMatrix<I, V>,
    path: P,
    as_binary: bool,
    metadata: &MatrixMetadata,
) -> Result<()>
where
    I: MtxIndex,
    V: MtxValue,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let format = if as_binary {
        FileFormat::Bmtx
    } else {
        FileFormat::MatrixMarket
    };

    // Validate before touching the filesystem
    let plan = plan_output(coo, format, metadata)?;

    debug!("Writing {} to {}", format.extension(), path.display());
    let mut writer = BufWriter::new(File::create(path)?);
    encode(coo, &mut writer, &plan, metadata)?;
    writer.flush()?;
    Ok(())
}

/// Writes `coo` to an arbitrary stream in the given format
pub fn write_coo_to<I, V, W>(
    coo: &CooMatrix<I, V>,
    writer: &mut W,
    format: FileFormat,
    metadata: &MatrixMetadata,
) -> Result<()>
where
    I: MtxIndex,
    V: MtxValue,
    W: Write,
{
    let plan = plan_output(coo, format, metadata)?;
    encode(coo, writer, &plan, metadata)
}

/// Record layout decided before any byte is written
struct OutputPlan {
    /// `(idx_bytes, val_bytes)` for BMTX, `None` for text
    widths: Option<(usize, usize)>,
    symmetric: bool,
    pattern: bool,
}

fn plan_output<I, V>(
    coo: &CooMatrix<I, V>,
    format: FileFormat,
    metadata: &MatrixMetadata,
) -> Result<OutputPlan>
where
    I: MtxIndex,
    V: MtxValue,
{
    coo.validate()?;

    let typecode = metadata.typecode;
    typecode.ensure_supported()?;

    let pattern = typecode.is_pattern();
    if !pattern && !coo.has_values() {
        return Err(MmioError::InvalidMatrix(format!(
            "{} matrix has no values",
            typecode.field
        )));
    }

    let widths = if format.is_binary() {
        let required = required_bytes_for_dims(coo.n_rows as u64, coo.n_cols as u64);
        let idx_bytes = metadata.idx_bytes.map_or(required, usize::from);
        let val_bytes = metadata.val_bytes as usize;

        if !SUPPORTED_INDEX_BYTES.contains(&(idx_bytes as u8)) {
            return Err(MmioError::UnsupportedType(format!(
                "{}-byte indices",
                idx_bytes
            )));
        }
        if idx_bytes < required {
            return Err(MmioError::IndexTooNarrow {
                required,
                available: idx_bytes,
            });
        }
        if !pattern && !SUPPORTED_VALUE_BYTES.contains(&metadata.val_bytes) {
            return Err(MmioError::UnsupportedType(format!(
                "{}-byte values",
                val_bytes
            )));
        }
        Some((idx_bytes, val_bytes))
    } else {
        None
    };

    Ok(OutputPlan {
        widths,
        symmetric: typecode.is_symmetric(),
        pattern,
    })
}

fn encode<I, V, W>(
    coo: &CooMatrix<I, V>,
    writer: &mut W,
    plan: &OutputPlan,
    metadata: &MatrixMetadata,
) -> Result<()>
where
    I: MtxIndex,
    V: MtxValue,
    W: Write,
{
    let retained: Vec<Entry<I, V>> = coo
        .iter()
        .filter(|e| !plan.symmetric || is_retained(e))
        .collect();
    if retained.len() != coo.nnz() {
        debug!(
            "Symmetric output keeps {} of {} entries",
            retained.len(),
            coo.nnz()
        );
    }

    let typecode = match plan.widths {
        Some((idx, val)) => metadata.typecode.with_widths(idx as u8, val as u8),
        None => metadata.typecode.without_widths(),
    };
    write_banner(writer, &typecode)?;
    for comment in &metadata.comments {
        writer.write_all(comment)?;
        writer.write_all(b"\n")?;
    }
    write_size_line(
        writer,
        &SizeLine::new(coo.n_rows as u64, coo.n_cols as u64, retained.len() as u64),
    )?;

    match plan.widths {
        Some((idx_bytes, val_bytes)) => {
            for entry in &retained {
                writer.write_all(&entry.row.to_u64().to_le_bytes()[..idx_bytes])?;
                writer.write_all(&entry.col.to_u64().to_le_bytes()[..idx_bytes])?;
                if !plan.pattern {
                    write_binary_value(writer, entry.val, val_bytes)?;
                }
            }
        }
        None => {
            for entry in &retained {
                if plan.pattern {
                    writeln!(writer, "{} {}", entry.row.to_u64() + 1, entry.col.to_u64() + 1)?;
                } else {
                    writeln!(
                        writer,
                        "{} {} {}",
                        entry.row.to_u64() + 1,
                        entry.col.to_u64() + 1,
                        entry.val
                    )?;
                }
            }
        }
    }

    debug!("Encoded {} entries", retained.len());
    Ok(())
}

fn write_binary_value<V: MtxValue, W: Write>(writer: &mut W, val: V, width: usize) -> Result<()> {
    match width {
        4 => writer.write_all(&val.cast_to_f32().to_le_bytes())?,
        _ => writer.write_all(&val.cast_to_f64().to_le_bytes())?,
    }
    Ok(())
}
