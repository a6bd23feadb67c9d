//! Entry reader for text and BMTX records
//!
//! Text records are `row col [value]` with 1-based indices, separated by any
//! whitespace. BMTX records are fixed-width little-endian fields with 0-based
//! indices.

use std::io::{BufRead, Read};
use std::str::FromStr;

use crate::constants::{SUPPORTED_INDEX_BYTES, SUPPORTED_VALUE_BYTES};
use crate::error::{eof_or_io, MmioError, Result};
use crate::matrix::Entry;
use crate::mmio::metadata::FileFormat;
use crate::mmio::typecode::{BinaryWidths, Typecode};
use crate::mmio::validation::required_bytes_index;
use crate::scalar::{MtxIndex, MtxValue};

/// Reads `nnz` entries of the given format into `entries`
///
/// # Arguments
///
/// * `reader` - Stream positioned just after the size line
/// * `typecode` - Decoded banner; pattern matrices carry no value field
/// * `format` - Text or BMTX records
/// * `dims` - Declared (n_rows, n_cols), used to bounds-check every entry
/// * `nnz` - Number of records to read
/// * `entries` - Buffer the entries are appended to
///
/// # Errors
///
/// `PrematureEof` as soon as a field cannot be read completely; the buffer
/// contents are unspecified on error and must be discarded.
pub fn read_entries<I, V, R>(
    reader: &mut R,
    typecode: &Typecode,
    format: FileFormat,
    dims: (usize, usize),
    nnz: usize,
    entries: &mut Vec<Entry<I, V>>,
) -> Result<()>
where
    I: MtxIndex,
    V: MtxValue,
    R: BufRead,
{
    match format {
        FileFormat::MatrixMarket => {
            read_text_entries(reader, typecode.is_pattern(), dims, nnz, entries)
        }
        FileFormat::Bmtx => {
            let widths = typecode.widths.ok_or_else(|| {
                MmioError::UnsupportedType("binary records need header byte widths".to_string())
            })?;
            read_binary_entries(reader, widths, typecode.is_pattern(), dims, nnz, entries)
        }
    }
}

/// Reads whitespace-separated text records, converting indices to 0-based
pub fn read_text_entries<I, V, R>(
    reader: &mut R,
    pattern: bool,
    dims: (usize, usize),
    nnz: usize,
    entries: &mut Vec<Entry<I, V>>,
) -> Result<()>
where
    I: MtxIndex,
    V: MtxValue,
    R: BufRead,
{
    let mut tokens = TokenScanner::new(reader);

    for _ in 0..nnz {
        let row: u64 = tokens.next("row index")?;
        let col: u64 = tokens.next("column index")?;
        let val = if pattern {
            V::one()
        } else {
            tokens.next::<V>("value")?
        };

        // Files are 1-based
        if row == 0 || col == 0 || row > dims.0 as u64 || col > dims.1 as u64 {
            return Err(out_of_bounds(row, col, dims));
        }
        entries.push(checked_entry(row - 1, col - 1, val, dims)?);
    }

    Ok(())
}

/// Reads fixed-width BMTX records; indices are already 0-based on disk
pub fn read_binary_entries<I, V, R>(
    reader: &mut R,
    widths: BinaryWidths,
    pattern: bool,
    dims: (usize, usize),
    nnz: usize,
    entries: &mut Vec<Entry<I, V>>,
) -> Result<()>
where
    I: MtxIndex,
    V: MtxValue,
    R: Read,
{
    if !SUPPORTED_INDEX_BYTES.contains(&widths.idx_bytes) {
        return Err(MmioError::UnsupportedType(format!(
            "{}-byte indices",
            widths.idx_bytes
        )));
    }
    if !pattern && !SUPPORTED_VALUE_BYTES.contains(&widths.val_bytes) {
        return Err(MmioError::UnsupportedType(format!(
            "{}-byte values",
            widths.val_bytes
        )));
    }
    let idx_bytes = widths.idx_bytes as usize;

    for _ in 0..nnz {
        let row = read_uint(reader, idx_bytes, "row index")?;
        let col = read_uint(reader, idx_bytes, "column index")?;
        let val = if pattern {
            V::one()
        } else {
            read_value(reader, widths.val_bytes)?
        };

        entries.push(checked_entry(row, col, val, dims)?);
    }

    Ok(())
}

/// Reads a little-endian unsigned integer of `width` bytes, zero-extended
fn read_uint<R: Read>(reader: &mut R, width: usize, context: &'static str) -> Result<u64> {
    let mut buf = [0u8; 8];
    reader
        .read_exact(&mut buf[..width])
        .map_err(|e| eof_or_io(e, context))?;
    Ok(u64::from_le_bytes(buf))
}

/// Reads an IEEE value of `width` bytes and converts it to the working type
fn read_value<V: MtxValue, R: Read>(reader: &mut R, width: u8) -> Result<V> {
    match width {
        4 => {
            let mut buf = [0u8; 4];
            reader
                .read_exact(&mut buf)
                .map_err(|e| eof_or_io(e, "value"))?;
            Ok(V::cast_from_f32(f32::from_le_bytes(buf)))
        }
        8 => {
            let mut buf = [0u8; 8];
            reader
                .read_exact(&mut buf)
                .map_err(|e| eof_or_io(e, "value"))?;
            Ok(V::cast_from_f64(f64::from_le_bytes(buf)))
        }
        other => Err(MmioError::UnsupportedType(format!(
            "{}-byte values",
            other
        ))),
    }
}

/// Bounds-checks a 0-based entry and narrows it to the working index type
fn checked_entry<I: MtxIndex, V: MtxValue>(
    row: u64,
    col: u64,
    val: V,
    dims: (usize, usize),
) -> Result<Entry<I, V>> {
    let (n_rows, n_cols) = dims;
    if row >= n_rows as u64 || col >= n_cols as u64 {
        return Err(out_of_bounds(row, col, dims));
    }

    match (I::from_u64(row), I::from_u64(col)) {
        (Some(r), Some(c)) => Ok(Entry::new(r, c, val)),
        _ => Err(MmioError::IndexTooNarrow {
            required: required_bytes_index(row.max(col)),
            available: I::BYTES,
        }),
    }
}

fn out_of_bounds(row: u64, col: u64, dims: (usize, usize)) -> MmioError {
    MmioError::EntryOutOfBounds {
        row,
        col,
        n_rows: dims.0,
        n_cols: dims.1,
    }
}

/// Pulls whitespace-separated tokens from a line-oriented stream
///
/// Records may be split across lines arbitrarily. A line that is not valid
/// UTF-8 is reported as an invalid token.
struct TokenScanner<'a, R> {
    reader: &'a mut R,
    line: String,
    pos: usize,
}

impl<'a, R: BufRead> TokenScanner<'a, R> {
    fn new(reader: &'a mut R) -> Self {
        Self {
            reader,
            line: String::new(),
            pos: 0,
        }
    }

    fn next<T: FromStr>(&mut self, context: &'static str) -> Result<T> {
        loop {
            let rest = &self.line[self.pos..];
            let start = self.pos + (rest.len() - rest.trim_start().len());

            if start < self.line.len() {
                let tail = &self.line[start..];
                let end = start + tail.find(char::is_whitespace).unwrap_or(tail.len());
                let parsed = self.line[start..end]
                    .parse::<T>()
                    .map_err(|_| MmioError::InvalidToken {
                        context,
                        token: self.line[start..end].to_string(),
                    });
                self.pos = end;
                return parsed;
            }

            self.pos = 0;
            let mut bytes = Vec::new();
            if self.reader.read_until(b'\n', &mut bytes)? == 0 {
                return Err(MmioError::PrematureEof(context));
            }
            self.line = String::from_utf8(bytes).map_err(|e| MmioError::InvalidToken {
                context,
                token: String::from_utf8_lossy(e.as_bytes()).trim().to_string(),
            })?;
        }
    }
}
