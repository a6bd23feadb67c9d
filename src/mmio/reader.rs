//! Read pipeline: banner → size line → entries → expansion → builder
//!
//! The entry buffer is local to one parse. It is reserved once at the
//! worst-case expanded size and dropped on every error path, so a failed read
//! never yields a partial matrix.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::error::{MmioError, Result};
use crate::matrix::{entries_to_coo, entries_to_csr, CooMatrix, CsrMatrix, Entry};
use crate::mmio::entries::read_entries;
use crate::mmio::header::read_banner;
use crate::mmio::metadata::{FileFormat, MatrixMetadata, ReadOptions};
use crate::mmio::size_line::read_size_line;
use crate::mmio::symmetry::expand_symmetric;
use crate::mmio::validation::{check_declared_size, check_index_width, expanded_capacity};
use crate::scalar::{MtxIndex, MtxValue};

/// Everything a builder needs after ingestion
struct ParsedFile<I, V> {
    n_rows: usize,
    n_cols: usize,
    entries: Vec<Entry<I, V>>,
    metadata: MatrixMetadata,
}

impl<I, V> ParsedFile<I, V> {
    fn alloc_values(&self, options: &ReadOptions) -> bool {
        options.explicit_pattern_values || !self.metadata.typecode.is_pattern()
    }
}

fn to_usize(value: u64, what: &str) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| MmioError::InvalidMatrix(format!("{} {} exceeds the address space", what, value)))
}

fn parse_stream<I, V, R>(reader: &mut R, format: FileFormat) -> Result<ParsedFile<I, V>>
where
    I: MtxIndex,
    V: MtxValue,
    R: BufRead,
{
    let typecode = read_banner(reader, format.is_binary())?;
    typecode.ensure_supported()?;

    let mut comments = Vec::new();
    let size = read_size_line(reader, &mut comments)?;
    check_declared_size(&size, typecode.is_symmetric())?;
    check_index_width::<I>(&size, typecode.widths)?;

    let n_rows = to_usize(size.n_rows, "row count")?;
    let n_cols = to_usize(size.n_cols, "column count")?;
    let nnz = to_usize(size.nnz, "entry count")?;

    let capacity = expanded_capacity(size.nnz, typecode.is_symmetric())?;
    let mut entries = Vec::new();
    entries.try_reserve_exact(capacity).map_err(|_| {
        MmioError::InvalidMatrix(format!("cannot allocate room for {} entries", capacity))
    })?;

    read_entries(reader, &typecode, format, (n_rows, n_cols), nnz, &mut entries)?;

    if typecode.is_symmetric() {
        expand_symmetric(&mut entries);
    }

    let val_bytes = match typecode.widths {
        Some(w) => w.val_bytes,
        None => V::BYTES as u8,
    };
    let metadata = MatrixMetadata::new(typecode)
        .with_comments(comments)
        .with_val_bytes(val_bytes);

    debug!(
        "Parsed {} matrix {}x{} with {} entries ({} declared)",
        format.extension(),
        n_rows,
        n_cols,
        entries.len(),
        nnz
    );

    Ok(ParsedFile {
        n_rows,
        n_cols,
        entries,
        metadata,
    })
}

fn open<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
    let path = path.as_ref();
    debug!("Opening {}", path.display());
    Ok(BufReader::new(File::open(path)?))
}

/// Reads a COO matrix and its metadata from a stream
///
/// Entries appear in file order, mirrored entries of a symmetric matrix after
/// all stored ones.
pub fn read_coo_from<I, V, R>(
    reader: &mut R,
    format: FileFormat,
    options: &ReadOptions,
) -> Result<(CooMatrix<I, V>, MatrixMetadata)>
where
    I: MtxIndex,
    V: MtxValue,
    R: BufRead,
{
    let parsed = parse_stream::<I, V, R>(reader, format)?;
    let coo = entries_to_coo(
        &parsed.entries,
        parsed.n_rows,
        parsed.n_cols,
        parsed.alloc_values(options),
    );
    Ok((coo, parsed.metadata))
}

/// Reads a CSR matrix and its metadata from a stream
pub fn read_csr_from<I, V, R>(
    reader: &mut R,
    format: FileFormat,
    options: &ReadOptions,
) -> Result<(CsrMatrix<I, V>, MatrixMetadata)>
where
    I: MtxIndex,
    V: MtxValue,
    R: BufRead,
{
    let mut parsed = parse_stream::<I, V, R>(reader, format)?;
    let alloc_values = parsed.alloc_values(options);
    let csr = entries_to_csr(
        &mut parsed.entries,
        parsed.n_rows,
        parsed.n_cols,
        alloc_values,
    )?;
    Ok((csr, parsed.metadata))
}

/// Reads a COO matrix and its metadata from a file
///
/// The format follows the extension unless `options.format` is set.
pub fn read_coo_with_metadata<I, V, P>(
    path: P,
    options: &ReadOptions,
) -> Result<(CooMatrix<I, V>, MatrixMetadata)>
where
    I: MtxIndex,
    V: MtxValue,
    P: AsRef<Path>,
{
    let format = options.format_for(&path);
    read_coo_from(&mut open(path)?, format, options)
}

/// Reads a CSR matrix and its metadata from a file
pub fn read_csr_with_metadata<I, V, P>(
    path: P,
    options: &ReadOptions,
) -> Result<(CsrMatrix<I, V>, MatrixMetadata)>
where
    I: MtxIndex,
    V: MtxValue,
    P: AsRef<Path>,
{
    let format = options.format_for(&path);
    read_csr_from(&mut open(path)?, format, options)
}

/// Reads a COO matrix from a file
pub fn read_coo<I, V, P>(path: P, options: &ReadOptions) -> Result<CooMatrix<I, V>>
where
    I: MtxIndex,
    V: MtxValue,
    P: AsRef<Path>,
{
    read_coo_with_metadata(path, options).map(|(coo, _)| coo)
}

/// Reads a CSR matrix from a file
pub fn read_csr<I, V, P>(path: P, options: &ReadOptions) -> Result<CsrMatrix<I, V>>
where
    I: MtxIndex,
    V: MtxValue,
    P: AsRef<Path>,
{
    read_csr_with_metadata(path, options).map(|(csr, _)| csr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn coo_from(text: &str) -> Result<(CooMatrix<u32, f64>, MatrixMetadata)> {
        read_coo_from(
            &mut Cursor::new(text),
            FileFormat::MatrixMarket,
            &ReadOptions::default(),
        )
    }

    #[test]
    fn test_general_csr() {
        let text = "%%MatrixMarket matrix coordinate real general\n2 2 2\n1 1 5.0\n2 2 3.0\n";
        let (csr, _) = read_csr_from::<u32, f64, _>(
            &mut Cursor::new(text),
            FileFormat::MatrixMarket,
            &ReadOptions::default(),
        )
        .unwrap();

        assert_eq!(csr.row_ptr, vec![0, 1, 2]);
        assert_eq!(csr.col_idx, vec![0, 1]);
        assert_eq!(csr.values, Some(vec![5.0, 3.0]));
    }

    #[test]
    fn test_metadata_captured() {
        let text = "%%MatrixMarket matrix coordinate integer general\n% made by hand\n1 1 1\n1 1 3\n";
        let (coo, meta) = coo_from(text).unwrap();

        assert_eq!(coo.values, Some(vec![3.0]));
        assert!(meta.typecode.is_integer());
        assert_eq!(meta.comments, vec![b"% made by hand".to_vec()]);
        assert_eq!(meta.idx_bytes, None);
        assert_eq!(meta.val_bytes, 8);
    }

    #[test]
    fn test_pattern_values_only_on_request() {
        let text = "%%MatrixMarket matrix coordinate pattern general\n2 2 1\n2 1\n";

        let (coo, _) = coo_from(text).unwrap();
        assert!(coo.values.is_none());

        let (coo, _) = read_coo_from::<u32, f64, _>(
            &mut Cursor::new(text),
            FileFormat::MatrixMarket,
            &ReadOptions::default().with_pattern_values(true),
        )
        .unwrap();
        assert_eq!(coo.values, Some(vec![1.0]));
    }

    #[test]
    fn test_excluded_types_rejected() {
        for banner in [
            "%%MatrixMarket matrix coordinate complex general",
            "%%MatrixMarket matrix array real general",
            "%%MatrixMarket matrix coordinate real hermitian",
            "%%MatrixMarket matrix coordinate real skew-symmetric",
        ] {
            let text = format!("{}\n1 1 1\n1 1 1.0\n", banner);
            assert!(matches!(
                coo_from(&text),
                Err(MmioError::UnsupportedType(_))
            ));
        }
    }

    #[test]
    fn test_truncated_data() {
        let text = "%%MatrixMarket matrix coordinate real general\n3 3 3\n1 1 1.0\n2 2 2.0\n";
        assert!(matches!(coo_from(text), Err(MmioError::PrematureEof(_))));
    }

    #[test]
    fn test_non_square_symmetric_rejected() {
        let text = "%%MatrixMarket matrix coordinate real symmetric\n3 2 1\n3 1 2.0\n";
        assert!(matches!(
            coo_from(text),
            Err(MmioError::InconsistentSize {
                n_rows: 3,
                n_cols: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_oversized_nnz_rejected() {
        let text = "%%MatrixMarket matrix coordinate real general\n1 1 2\n1 1 1.0\n1 1 1.0\n";
        assert!(matches!(
            coo_from(text),
            Err(MmioError::InconsistentSize { .. })
        ));
    }
}
