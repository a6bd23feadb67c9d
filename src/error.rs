//! Error types for Matrix Market and BMTX operations

use thiserror::Error;

/// Errors that can occur while parsing, building or encoding a matrix
#[derive(Debug, Error)]
pub enum MmioError {
    /// The stream ended before the named item could be read completely
    #[error("premature end of file while reading {0}")]
    PrematureEof(&'static str),

    /// The first token of the file is not the Matrix Market banner
    #[error("missing %%MatrixMarket banner")]
    NoHeader,

    /// Unknown or explicitly excluded matrix classification
    #[error("unsupported matrix type: {0}")]
    UnsupportedType(String),

    /// The index type cannot represent the matrix indices
    #[error("index type too narrow: need at least {required} bytes, got {available} bytes")]
    IndexTooNarrow { required: usize, available: usize },

    /// A BMTX header declares an index width that cannot address its own dimensions
    #[error("file declares {declared}-byte indices but its dimensions require {required} bytes")]
    HeaderIndexTooNarrow { declared: usize, required: usize },

    /// A numeric token failed to parse
    #[error("malformed {context}: {token:?}")]
    InvalidToken { context: &'static str, token: String },

    /// The size line declares more entries than the matrix has cells, or a
    /// non-square shape for a symmetric matrix
    #[error("size line `{n_rows} {n_cols} {nnz}` is inconsistent with the typecode")]
    InconsistentSize { n_rows: u64, n_cols: u64, nnz: u64 },

    /// An entry lies outside the declared matrix shape
    #[error("entry ({row}, {col}) lies outside the {n_rows}x{n_cols} matrix")]
    EntryOutOfBounds {
        row: u64,
        col: u64,
        n_rows: usize,
        n_cols: usize,
    },

    /// An in-memory matrix has inconsistent contents
    #[error("invalid matrix: {0}")]
    InvalidMatrix(String),

    /// Underlying I/O failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for Matrix Market operations
pub type Result<T> = std::result::Result<T, MmioError>;

/// Maps an I/O error raised mid-record to the error taxonomy.
///
/// `UnexpectedEof` from `read_exact` means the stream ran dry, everything
/// else is an OS-level failure.
pub(crate) fn eof_or_io(err: std::io::Error, context: &'static str) -> MmioError {
    if err.kind() == std::io::ErrorKind::UnexpectedEof {
        MmioError::PrematureEof(context)
    } else {
        MmioError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = MmioError::IndexTooNarrow {
            required: 4,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "index type too narrow: need at least 4 bytes, got 2 bytes"
        );

        let err = MmioError::PrematureEof("size line");
        assert_eq!(err.to_string(), "premature end of file while reading size line");
    }

    #[test]
    fn test_eof_mapping() {
        let eof = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short");
        assert!(matches!(
            eof_or_io(eof, "entry"),
            MmioError::PrematureEof("entry")
        ));

        let other = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(eof_or_io(other, "entry"), MmioError::Io(_)));
    }
}
