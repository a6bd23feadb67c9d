// Matrix data structures and builders

pub mod conversion;
pub mod coo;
pub mod csr;
pub mod entry;

pub use conversion::{entries_to_coo, entries_to_csr};
pub use coo::CooMatrix;
pub use csr::CsrMatrix;
pub use entry::Entry;

use log::trace;

/// Releases the matrix held by `handle`, leaving `None` behind
///
/// Index arrays, the optional value array and the struct itself are released
/// together. Calling it again on the emptied handle does nothing.
pub fn destroy<M>(handle: &mut Option<M>) {
    if let Some(matrix) = handle.take() {
        trace!("Releasing {}", std::any::type_name::<M>());
        drop(matrix);
    }
}
