//! Genealogical record search.
//!
//! Person records are answered by exact/partial field matching first and by
//! TF-IDF cosine similarity over their free-text attributes when nothing
//! matches exactly.

pub mod config;
pub mod display;
pub mod error;
pub mod indexing;
pub mod io;
pub mod record;
pub mod search;
pub mod storage;
pub mod types;

// Explicit exports for better API clarity
pub use config::{SearchConfig, Settings};
pub use error::{LineageError, LineageResult, StoreError, StoreResult};
pub use indexing::FeatureIndex;
pub use record::{MatchKind, PersonRecord};
pub use search::{
    OutcomeKind, SearchEngine, SearchHit, SearchOutcome, SearchQuery, Snapshot, SnapshotStats,
};
pub use storage::{JsonFileStore, MemoryStore, RecordStore};
pub use types::Scalar;
