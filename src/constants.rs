//! Centralized constants for Matrix Market and BMTX I/O
//!
//! All literal tokens recognized by the header codec and all default widths
//! live here rather than being scattered throughout the code.

// ============================================================================
// BANNER AND CLASSIFICATION TOKENS
// ============================================================================

/// Required prefix of the first token of every Matrix Market file
pub const MATRIX_MARKET_BANNER: &str = "%%MatrixMarket";

/// Marker that starts a comment line
pub const COMMENT_MARKER: char = '%';

/// Object token: the only supported object kind
pub const MTX_STR: &str = "matrix";

/// Storage token for sparse (coordinate) matrices
pub const SPARSE_STR: &str = "coordinate";

/// Storage token for dense (array) matrices
pub const DENSE_STR: &str = "array";

/// Field token for real-valued entries
pub const REAL_STR: &str = "real";

/// Field token for complex-valued entries
pub const COMPLEX_STR: &str = "complex";

/// Field token for structure-only entries
pub const PATTERN_STR: &str = "pattern";

/// Field token for integer-valued entries
pub const INT_STR: &str = "integer";

/// Symmetry token for unstructured matrices
pub const GENERAL_STR: &str = "general";

/// Symmetry token for symmetric matrices
pub const SYMM_STR: &str = "symmetric";

/// Symmetry token for Hermitian matrices
pub const HERM_STR: &str = "hermitian";

/// Symmetry token for skew-symmetric matrices
pub const SKEW_STR: &str = "skew-symmetric";

// ============================================================================
// TOKEN COUNTS
// ============================================================================

/// Tokens on a text banner line
pub const TEXT_BANNER_TOKENS: usize = 5;

/// Tokens on a BMTX banner line (text tokens plus two byte widths)
pub const BINARY_BANNER_TOKENS: usize = 7;

// ============================================================================
// BINARY WIDTHS
// ============================================================================

/// Byte widths an index field may have in a BMTX file
pub const SUPPORTED_INDEX_BYTES: [u8; 4] = [1, 2, 4, 8];

/// Byte widths a value field may have in a BMTX file
pub const SUPPORTED_VALUE_BYTES: [u8; 2] = [4, 8];

/// Value width used by the conversion tool unless `--double-val` is given
pub const DEFAULT_TOOL_VALUE_BYTES: u8 = 4;

// ============================================================================
// FILE EXTENSIONS
// ============================================================================

/// Extension of Matrix Market text files
pub const MTX_EXTENSION: &str = "mtx";

/// Extension that marks a file as BMTX
pub const BMTX_EXTENSION: &str = "bmtx";
