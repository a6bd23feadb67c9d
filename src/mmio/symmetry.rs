//! Symmetric expansion on read and lower-triangle filtering on write
//!
//! Symmetric files store one triangle only. Reading mirrors every stored
//! off-diagonal entry; writing keeps entries with row >= col.

use log::trace;

use crate::matrix::Entry;
use crate::scalar::{MtxIndex, MtxValue};

/// Appends the mirror (col, row, val) of every off-diagonal entry
///
/// Mirrors are appended after all stored entries; diagonal entries are not
/// duplicated. Returns the final entry count, `declared + off-diagonal`.
pub fn expand_symmetric<I: MtxIndex, V: MtxValue>(entries: &mut Vec<Entry<I, V>>) -> usize {
    let declared = entries.len();

    for k in 0..declared {
        let entry = entries[k];
        if !entry.is_diagonal() {
            entries.push(entry.transposed());
        }
    }

    trace!(
        "Symmetric expansion: {} stored entries, {} mirrored",
        declared,
        entries.len() - declared
    );
    entries.len()
}

/// Whether an entry is emitted when writing a symmetric matrix
pub fn is_retained<I: MtxIndex, V: MtxValue>(entry: &Entry<I, V>) -> bool {
    entry.is_lower()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_diagonal_mirrored() {
        let mut entries = vec![Entry::new(0u32, 1u32, 1.0f64)];
        let total = expand_symmetric(&mut entries);

        assert_eq!(total, 2);
        assert_eq!(entries, vec![Entry::new(0, 1, 1.0), Entry::new(1, 0, 1.0)]);
    }

    #[test]
    fn test_diagonal_kept_once() {
        let mut entries = vec![
            Entry::new(0u64, 0u64, 4.0f32),
            Entry::new(2, 1, -1.0),
            Entry::new(2, 2, 4.0),
            Entry::new(1, 0, 3.0),
        ];
        let total = expand_symmetric(&mut entries);

        assert_eq!(total, 4 + 2);
        assert_eq!(entries[4], Entry::new(1, 2, -1.0));
        assert_eq!(entries[5], Entry::new(0, 1, 3.0));
        assert_eq!(entries.iter().filter(|e| e.is_diagonal()).count(), 2);
    }

    #[test]
    fn test_retained_is_lower_triangle() {
        assert!(is_retained(&Entry::new(1u32, 0u32, 1.0f64)));
        assert!(is_retained(&Entry::new(3u32, 3u32, 1.0f64)));
        assert!(!is_retained(&Entry::new(0u32, 1u32, 1.0f64)));
    }
}
