//! Record store collaborators.
//!
//! The search engine only ever reads full snapshots through [`RecordStore`].
//! Writes happen upstream; after any write the owner calls
//! [`SearchEngine::refresh`](crate::search::SearchEngine::refresh).

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::StoreResult;
use crate::record::PersonRecord;

/// Source of person records
pub trait RecordStore: Send + Sync {
    /// Fetch every record in a stable order.
    ///
    /// Snapshot order is significant: similarity index rows are aligned to it.
    fn load_all_records(&self) -> StoreResult<Vec<PersonRecord>>;
}

impl<S: RecordStore + ?Sized> RecordStore for std::sync::Arc<S> {
    fn load_all_records(&self) -> StoreResult<Vec<PersonRecord>> {
        (**self).load_all_records()
    }
}
