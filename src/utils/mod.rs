//! Interop with the sprs and ndarray ecosystems

pub mod formats;

pub use formats::{coo_to_sprs, csr_from_sprs, csr_to_sprs};
