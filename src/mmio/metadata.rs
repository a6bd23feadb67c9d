//! Read options, file format selection and captured file metadata

use std::path::Path;

use crate::constants::{BMTX_EXTENSION, MTX_EXTENSION};
use crate::mmio::typecode::Typecode;

/// On-disk representation of a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFormat {
    /// Matrix Market text
    #[default]
    MatrixMarket,
    /// Matrix Market header followed by fixed-width binary records
    Bmtx,
}

impl FileFormat {
    /// Detects the format from the file extension (`.bmtx` is binary)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case(BMTX_EXTENSION) => FileFormat::Bmtx,
            _ => FileFormat::MatrixMarket,
        }
    }

    /// Whether the file carries binary records
    pub fn is_binary(&self) -> bool {
        matches!(self, FileFormat::Bmtx)
    }

    /// Conventional extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::MatrixMarket => MTX_EXTENSION,
            FileFormat::Bmtx => BMTX_EXTENSION,
        }
    }
}

/// Options for the read pipeline
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Allocate a value array of ones even for pattern matrices
    pub explicit_pattern_values: bool,

    /// Overrides extension-based format detection when set
    pub format: Option<FileFormat>,
}

impl ReadOptions {
    pub fn with_pattern_values(mut self, explicit: bool) -> Self {
        self.explicit_pattern_values = explicit;
        self
    }

    pub fn with_format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Format for `path`, honoring the override
    pub fn format_for<P: AsRef<Path>>(&self, path: P) -> FileFormat {
        self.format.unwrap_or_else(|| FileFormat::from_path(path))
    }
}

/// Header information carried from a read to a later write
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixMetadata {
    /// Classification of the matrix
    pub typecode: Typecode,

    /// Comment lines as raw bytes, including the leading `%` but no line ending
    pub comments: Vec<Vec<u8>>,

    /// Index width for BMTX output; `None` picks the minimal width
    pub idx_bytes: Option<u8>,

    /// Value width for BMTX output (4 or 8)
    pub val_bytes: u8,
}

impl MatrixMetadata {
    /// Metadata with no comments, minimal index width and 8-byte values
    pub fn new(typecode: Typecode) -> Self {
        let (idx_bytes, val_bytes) = match typecode.widths {
            Some(w) => (Some(w.idx_bytes), w.val_bytes),
            None => (None, 8),
        };
        Self {
            typecode: typecode.without_widths(),
            comments: Vec::new(),
            idx_bytes,
            val_bytes,
        }
    }

    pub fn with_idx_bytes(mut self, idx_bytes: Option<u8>) -> Self {
        self.idx_bytes = idx_bytes;
        self
    }

    pub fn with_val_bytes(mut self, val_bytes: u8) -> Self {
        self.val_bytes = val_bytes;
        self
    }

    pub fn with_comments<C>(mut self, comments: impl IntoIterator<Item = C>) -> Self
    where
        C: Into<Vec<u8>>,
    {
        self.comments = comments.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mmio::typecode::{Field, Symmetry};

    #[test]
    fn test_format_from_path() {
        assert_eq!(FileFormat::from_path("a/b/c.bmtx"), FileFormat::Bmtx);
        assert_eq!(FileFormat::from_path("C.BMTX"), FileFormat::Bmtx);
        assert_eq!(FileFormat::from_path("c.mtx"), FileFormat::MatrixMarket);
        assert_eq!(FileFormat::from_path("noext"), FileFormat::MatrixMarket);
        assert_eq!(FileFormat::Bmtx.extension(), "bmtx");
    }

    #[test]
    fn test_read_options_override() {
        let opts = ReadOptions::default().with_format(FileFormat::Bmtx);
        assert_eq!(opts.format_for("x.mtx"), FileFormat::Bmtx);
        assert_eq!(ReadOptions::default().format_for("x.mtx"), FileFormat::MatrixMarket);
    }

    #[test]
    fn test_metadata_takes_file_widths() {
        let code = Typecode::coordinate(Field::Real, Symmetry::General).with_widths(2, 4);
        let meta = MatrixMetadata::new(code);

        assert_eq!(meta.idx_bytes, Some(2));
        assert_eq!(meta.val_bytes, 4);
        assert!(meta.typecode.widths.is_none());
    }
}
