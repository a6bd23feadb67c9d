//! Index and value type constraints for the generic read/build/encode pipeline
//!
//! The pipeline is parameterized over two orthogonal choices: the working
//! index type (how wide row/column indices are in memory) and the working
//! value type (the precision entries are stored at). Both are independent of
//! the widths a BMTX file uses on disk.

use num_traits::Float;
use std::fmt;
use std::str::FromStr;

/// Unsigned integer types usable as row/column indices
pub trait MtxIndex:
    Copy + Ord + Default + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Width of the index type in bytes
    const BYTES: usize;

    /// Narrowing conversion, `None` if `value` does not fit
    fn from_u64(value: u64) -> Option<Self>;

    /// Narrowing conversion, `None` if `value` does not fit
    fn from_usize(value: usize) -> Option<Self>;

    /// Widening conversion
    fn to_u64(self) -> u64;

    /// Conversion for slice indexing
    fn to_usize(self) -> usize;
}

macro_rules! impl_mtx_index {
    ($($t:ty),*) => {
        $(
            impl MtxIndex for $t {
                const BYTES: usize = std::mem::size_of::<$t>();

                fn from_u64(value: u64) -> Option<Self> {
                    <$t>::try_from(value).ok()
                }

                fn from_usize(value: usize) -> Option<Self> {
                    <$t>::try_from(value).ok()
                }

                fn to_u64(self) -> u64 {
                    self as u64
                }

                fn to_usize(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_mtx_index!(u8, u16, u32, u64);

/// Floating point types usable as entry values
///
/// Conversions between f32 and f64 follow `as` semantics: narrowing rounds to
/// nearest and saturates to infinity.
pub trait MtxValue:
    Float + FromStr + Default + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Width of the value type in bytes
    const BYTES: usize;

    fn cast_from_f32(value: f32) -> Self;

    fn cast_from_f64(value: f64) -> Self;

    fn cast_to_f32(self) -> f32;

    fn cast_to_f64(self) -> f64;
}

impl MtxValue for f32 {
    const BYTES: usize = 4;

    fn cast_from_f32(value: f32) -> Self {
        value
    }

    fn cast_from_f64(value: f64) -> Self {
        value as f32
    }

    fn cast_to_f32(self) -> f32 {
        self
    }

    fn cast_to_f64(self) -> f64 {
        self as f64
    }
}

impl MtxValue for f64 {
    const BYTES: usize = 8;

    fn cast_from_f32(value: f32) -> Self {
        value as f64
    }

    fn cast_from_f64(value: f64) -> Self {
        value
    }

    fn cast_to_f32(self) -> f32 {
        self as f32
    }

    fn cast_to_f64(self) -> f64 {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_widths() {
        assert_eq!(<u8 as MtxIndex>::BYTES, 1);
        assert_eq!(<u16 as MtxIndex>::BYTES, 2);
        assert_eq!(<u32 as MtxIndex>::BYTES, 4);
        assert_eq!(<u64 as MtxIndex>::BYTES, 8);
    }

    #[test]
    fn test_index_narrowing() {
        assert_eq!(<u16 as MtxIndex>::from_u64(65_535), Some(65_535u16));
        assert_eq!(<u16 as MtxIndex>::from_u64(65_536), None);
        assert_eq!(<u8 as MtxIndex>::from_usize(256), None);
        assert_eq!(<u32 as MtxIndex>::to_u64(7u32), 7u64);
    }

    #[test]
    fn test_value_casts() {
        assert_eq!(<f64 as MtxValue>::cast_from_f32(1.5f32), 1.5f64);
        assert_eq!(<f32 as MtxValue>::cast_from_f64(0.25f64), 0.25f32);
        assert!(<f32 as MtxValue>::cast_from_f64(1e300).is_infinite());
    }
}
