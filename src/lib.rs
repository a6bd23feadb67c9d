//! # sparse-mmio: Matrix Market and BMTX sparse matrix I/O
//!
//! Reads the text-based Matrix Market coordinate format and its compact
//! binary companion BMTX into COO or CSR storage, and writes COO matrices back
//! to either format.
//!
//! ## Overview
//!
//! The read pipeline runs in a fixed order:
//!
//! 1. **Header**: banner line decoded into a [`Typecode`], plus the two byte
//!    widths of BMTX files.
//! 2. **Size line**: `nrows ncols nnz` after the `%` comment block.
//! 3. **Validation**: the caller's index type (and a BMTX file's declared
//!    width) must be able to address the matrix.
//! 4. **Entries**: 1-based text records or 0-based fixed-width binary records.
//! 5. **Symmetric expansion**: every stored off-diagonal entry is mirrored.
//! 6. **Builder**: entries are kept in file order (COO) or sorted by
//!    (row, col) and compressed (CSR).
//!
//! Writing filters symmetric matrices back to their lower triangle.
//!
//! Index and value widths are independent generic choices: any of
//! `u8`/`u16`/`u32`/`u64` for indices and `f32`/`f64` for values.
//!
//! ## Usage
//!
//! ```
//! use std::io::Cursor;
//! use sparse_mmio::{read_csr_from, FileFormat, ReadOptions};
//!
//! let text = "%%MatrixMarket matrix coordinate real symmetric\n2 2 2\n1 1 4.0\n2 1 -1.0\n";
//! let (csr, meta) = read_csr_from::<u32, f64, _>(
//!     &mut Cursor::new(text),
//!     FileFormat::MatrixMarket,
//!     &ReadOptions::default(),
//! )
//! .unwrap();
//!
//! assert!(meta.typecode.is_symmetric());
//! assert_eq!(csr.nnz(), 3);
//! assert_eq!(csr.row_ptr, vec![0, 2, 3]);
//! ```

pub mod constants;
pub mod error;
pub mod matrix;
pub mod mmio;
pub mod scalar;
pub mod utils;

// Re-export primary components
pub use error::{MmioError, Result};
pub use matrix::{destroy, CooMatrix, CsrMatrix, Entry};
pub use mmio::{
    read_coo, read_coo_from, read_coo_with_metadata, read_csr, read_csr_from,
    read_csr_with_metadata, write_coo, write_coo_to,
};
pub use mmio::{Field, FileFormat, MatrixMetadata, ReadOptions, Shape, Symmetry, Typecode};
pub use scalar::{MtxIndex, MtxValue};
pub use utils::{coo_to_sprs, csr_from_sprs, csr_to_sprs};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
