//! Integration tests for reading Matrix Market text files from disk

use std::io::Write;

use sparse_mmio::{
    destroy, read_coo, read_coo_with_metadata, read_csr, CooMatrix, CsrMatrix, MmioError,
    ReadOptions,
};
use tempfile::NamedTempFile;

/// Writes `contents` to a temporary `.mtx` file
fn mtx_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".mtx").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_general_diagonal_to_csr() {
    let file = mtx_file("%%MatrixMarket matrix coordinate real general\n2 2 2\n1 1 5.0\n2 2 3.0\n");

    let csr: CsrMatrix<u32, f64> = read_csr(file.path(), &ReadOptions::default()).unwrap();

    assert_eq!(csr.n_rows, 2);
    assert_eq!(csr.n_cols, 2);
    assert_eq!(csr.row_ptr, vec![0, 1, 2]);
    assert_eq!(csr.col_idx, vec![0, 1]);
    assert_eq!(csr.values, Some(vec![5.0, 3.0]));
}

#[test]
fn test_symmetric_pattern_expansion() {
    let file = mtx_file("%%MatrixMarket matrix coordinate pattern symmetric\n3 3 2\n2 1\n3 3\n");

    let coo: CooMatrix<u32, f32> = read_coo(file.path(), &ReadOptions::default()).unwrap();

    // (1,0) mirrored to (0,1), diagonal (2,2) kept once
    assert_eq!(coo.nnz(), 3);
    assert_eq!(coo.row, vec![1, 2, 0]);
    assert_eq!(coo.col, vec![0, 2, 1]);
    assert!(coo.values.is_none());

    let coo: CooMatrix<u32, f32> =
        read_coo(file.path(), &ReadOptions::default().with_pattern_values(true)).unwrap();
    assert_eq!(coo.values, Some(vec![1.0, 1.0, 1.0]));
}

#[test]
fn test_symmetric_csr_is_full_matrix() {
    let file = mtx_file(
        "%%MatrixMarket matrix coordinate real symmetric\n\
         % lower triangle only\n\
         3 3 4\n\
         1 1 4.0\n\
         2 1 -1.0\n\
         3 2 -1.0\n\
         3 3 4.0\n",
    );

    let csr: CsrMatrix<u64, f64> = read_csr(file.path(), &ReadOptions::default()).unwrap();

    assert_eq!(csr.nnz(), 6);
    assert_eq!(csr.row_ptr, vec![0, 2, 4, 6]);
    assert_eq!(csr.col_idx, vec![0, 1, 0, 2, 1, 2]);
    assert_eq!(csr.values, Some(vec![4.0, -1.0, -1.0, -1.0, -1.0, 4.0]));
}

#[test]
fn test_index_type_too_narrow() {
    let file = mtx_file("%%MatrixMarket matrix coordinate real general\n70000 70000 1\n1 1 1.0\n");

    let result = read_csr::<u16, f64, _>(file.path(), &ReadOptions::default());
    assert!(matches!(
        result,
        Err(MmioError::IndexTooNarrow {
            required: 4,
            available: 2
        })
    ));

    let csr: CsrMatrix<u32, f64> = read_csr(file.path(), &ReadOptions::default()).unwrap();
    assert_eq!(csr.nnz(), 1);
}

#[test]
fn test_complex_rejected() {
    let file = mtx_file("%%MatrixMarket matrix coordinate complex general\n1 1 1\n1 1 1.0 0.0\n");

    let result = read_coo::<u32, f64, _>(file.path(), &ReadOptions::default());
    assert!(matches!(result, Err(MmioError::UnsupportedType(_))));
}

#[test]
fn test_missing_banner() {
    let file = mtx_file("%MatrixMarket matrix coordinate real general\n1 1 1\n1 1 1.0\n");

    let result = read_coo::<u32, f64, _>(file.path(), &ReadOptions::default());
    assert!(matches!(result, Err(MmioError::NoHeader)));
}

#[test]
fn test_premature_eof_yields_no_matrix() {
    let file = mtx_file("%%MatrixMarket matrix coordinate real general\n4 4 3\n1 1 1.0\n2 2\n");

    let result = read_csr::<u32, f64, _>(file.path(), &ReadOptions::default());
    assert!(matches!(result, Err(MmioError::PrematureEof(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.mtx");

    let result = read_coo::<u32, f64, _>(&path, &ReadOptions::default());
    assert!(matches!(result, Err(MmioError::Io(_))));
}

#[test]
fn test_comments_and_blank_size_line() {
    let file = mtx_file(
        "%%MatrixMarket matrix coordinate integer general\n\
         %first\n\
         %second\n\
         \n\
         2 3 1\n\
         2 3 -7\n",
    );

    let (coo, meta) =
        read_coo_with_metadata::<u32, f32, _>(file.path(), &ReadOptions::default()).unwrap();

    assert_eq!(meta.comments, vec![b"%first".to_vec(), b"%second".to_vec()]);
    assert!(meta.typecode.is_integer());
    assert_eq!(meta.val_bytes, 4);
    assert_eq!((coo.n_rows, coo.n_cols), (2, 3));
    assert_eq!(coo.row, vec![1]);
    assert_eq!(coo.col, vec![2]);
    assert_eq!(coo.values, Some(vec![-7.0]));
}

#[test]
fn test_entry_outside_shape() {
    let file = mtx_file("%%MatrixMarket matrix coordinate real general\n2 2 1\n3 1 1.0\n");

    let result = read_coo::<u32, f64, _>(file.path(), &ReadOptions::default());
    assert!(matches!(
        result,
        Err(MmioError::EntryOutOfBounds { row: 3, col: 1, .. })
    ));
}

#[test]
fn test_non_square_symmetric_rejected() {
    // (3,1) fits the declared shape but its mirror (1,3) would not
    let file = mtx_file("%%MatrixMarket matrix coordinate real symmetric\n3 2 1\n3 1 2.0\n");

    let coo = read_coo::<u32, f64, _>(file.path(), &ReadOptions::default());
    assert!(matches!(
        coo,
        Err(MmioError::InconsistentSize {
            n_rows: 3,
            n_cols: 2,
            nnz: 1
        })
    ));

    let csr = read_csr::<u32, f64, _>(file.path(), &ReadOptions::default());
    assert!(matches!(csr, Err(MmioError::InconsistentSize { .. })));
}

#[test]
fn test_empty_matrix() {
    let file = mtx_file("%%MatrixMarket matrix coordinate real general\n0 0 0\n");

    let csr: CsrMatrix<u8, f64> = read_csr(file.path(), &ReadOptions::default()).unwrap();
    assert_eq!(csr.nnz(), 0);
    assert_eq!(csr.row_ptr, vec![0]);
}

#[test]
fn test_destroy_after_read() {
    let file = mtx_file("%%MatrixMarket matrix coordinate real general\n1 1 1\n1 1 2.0\n");

    let mut handle = Some(read_coo::<u32, f64, _>(file.path(), &ReadOptions::default()).unwrap());
    destroy(&mut handle);
    assert!(handle.is_none());
    destroy(&mut handle);
}
