//! Decoded classification of a Matrix Market file

use std::fmt;

use crate::constants::*;
use crate::error::{MmioError, Result};

/// Storage shape token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Sparse coordinate storage
    Coordinate,
    /// Dense column-major storage
    Array,
}

/// Entry field token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Real,
    Complex,
    Pattern,
    Integer,
}

/// Symmetry token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    General,
    Symmetric,
    Hermitian,
    Skew,
}

/// On-disk byte widths of a BMTX file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryWidths {
    /// Bytes per row/column index
    pub idx_bytes: u8,
    /// Bytes per value (ignored for pattern matrices)
    pub val_bytes: u8,
}

/// Typecode of a Matrix Market file
///
/// The object kind is always "matrix"; it is not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Typecode {
    pub shape: Shape,
    pub field: Field,
    pub symmetry: Symmetry,
    /// Present only for BMTX headers
    pub widths: Option<BinaryWidths>,
}

impl Typecode {
    /// Creates a coordinate typecode without binary widths
    pub fn coordinate(field: Field, symmetry: Symmetry) -> Self {
        Self {
            shape: Shape::Coordinate,
            field,
            symmetry,
            widths: None,
        }
    }

    pub fn is_matrix(&self) -> bool {
        true
    }

    pub fn is_sparse(&self) -> bool {
        self.shape == Shape::Coordinate
    }

    pub fn is_dense(&self) -> bool {
        self.shape == Shape::Array
    }

    pub fn is_real(&self) -> bool {
        self.field == Field::Real
    }

    pub fn is_complex(&self) -> bool {
        self.field == Field::Complex
    }

    pub fn is_pattern(&self) -> bool {
        self.field == Field::Pattern
    }

    pub fn is_integer(&self) -> bool {
        self.field == Field::Integer
    }

    pub fn is_general(&self) -> bool {
        self.symmetry == Symmetry::General
    }

    pub fn is_symmetric(&self) -> bool {
        self.symmetry == Symmetry::Symmetric
    }

    pub fn is_hermitian(&self) -> bool {
        self.symmetry == Symmetry::Hermitian
    }

    pub fn is_skew(&self) -> bool {
        self.symmetry == Symmetry::Skew
    }

    /// Rejects the classifications this crate does not materialize
    ///
    /// Complex fields, dense arrays, Hermitian and skew-symmetric storage all
    /// fail with `UnsupportedType`.
    pub fn ensure_supported(&self) -> Result<()> {
        if self.is_complex() {
            return Err(MmioError::UnsupportedType(
                "complex-valued matrices cannot be parsed".to_string(),
            ));
        }
        if self.is_dense() {
            return Err(MmioError::UnsupportedType(
                "array matrices cannot be parsed".to_string(),
            ));
        }
        if self.is_hermitian() || self.is_skew() {
            return Err(MmioError::UnsupportedType(format!(
                "{} storage is not supported",
                self.symmetry
            )));
        }
        Ok(())
    }

    /// Returns a copy with the given binary widths attached
    pub fn with_widths(mut self, idx_bytes: u8, val_bytes: u8) -> Self {
        self.widths = Some(BinaryWidths {
            idx_bytes,
            val_bytes,
        });
        self
    }

    /// Returns a copy without binary widths
    pub fn without_widths(mut self) -> Self {
        self.widths = None;
        self
    }

    /// The full banner line, without the trailing newline
    pub fn banner(&self) -> String {
        match self.widths {
            Some(w) => format!(
                "{} {} {} {}",
                MATRIX_MARKET_BANNER, self, w.idx_bytes, w.val_bytes
            ),
            None => format!("{} {}", MATRIX_MARKET_BANNER, self),
        }
    }
}

impl Shape {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            SPARSE_STR => Some(Shape::Coordinate),
            DENSE_STR => Some(Shape::Array),
            _ => None,
        }
    }
}

impl Field {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            REAL_STR => Some(Field::Real),
            COMPLEX_STR => Some(Field::Complex),
            PATTERN_STR => Some(Field::Pattern),
            INT_STR => Some(Field::Integer),
            _ => None,
        }
    }
}

impl Symmetry {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            GENERAL_STR => Some(Symmetry::General),
            SYMM_STR => Some(Symmetry::Symmetric),
            HERM_STR => Some(Symmetry::Hermitian),
            SKEW_STR => Some(Symmetry::Skew),
            _ => None,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Coordinate => write!(f, "{}", SPARSE_STR),
            Shape::Array => write!(f, "{}", DENSE_STR),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Field::Real => REAL_STR,
            Field::Complex => COMPLEX_STR,
            Field::Pattern => PATTERN_STR,
            Field::Integer => INT_STR,
        };
        write!(f, "{}", token)
    }
}

impl fmt::Display for Symmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Symmetry::General => GENERAL_STR,
            Symmetry::Symmetric => SYMM_STR,
            Symmetry::Hermitian => HERM_STR,
            Symmetry::Skew => SKEW_STR,
        };
        write!(f, "{}", token)
    }
}

impl fmt::Display for Typecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            MTX_STR, self.shape, self.field, self.symmetry
        )
    }
}
