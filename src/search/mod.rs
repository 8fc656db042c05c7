//! Query resolution over a record snapshot.
//!
//! A query is answered by the first stage that produces anything:
//! all records for an empty query, then exact/partial field matching,
//! then TF-IDF similarity over record signatures.

pub mod engine;
pub mod exact;
pub mod query;
pub mod similarity;
pub mod snapshot;

pub use engine::{
    EngineState, OutcomeKind, OwnedImmediateFamily, SearchEngine, SearchHit, SearchOutcome,
};
pub use exact::{exact_matches, record_matches};
pub use query::SearchQuery;
pub use similarity::similarity_matches;
pub use snapshot::{ImmediateFamily, Snapshot, SnapshotStats};
