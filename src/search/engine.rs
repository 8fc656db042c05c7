//! Search engine owning the snapshot and its feature index.

use crate::config::SearchConfig;
use crate::error::LineageResult;
use crate::indexing::FeatureIndex;
use crate::record::PersonRecord;
use crate::search::exact::exact_matches;
use crate::search::query::SearchQuery;
use crate::search::similarity::similarity_matches;
use crate::search::snapshot::{ImmediateFamily, Snapshot, SnapshotStats};
use crate::storage::RecordStore;
use parking_lot::RwLock;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// One returned record. Only similarity results carry a score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub record: PersonRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
}

impl SearchHit {
    pub fn unscored(record: PersonRecord) -> Self {
        Self {
            record,
            similarity_score: None,
        }
    }

    pub fn scored(record: PersonRecord, score: f64) -> Self {
        Self {
            record,
            similarity_score: Some(score),
        }
    }
}

/// Which resolution stage produced a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    AllRecords,
    Exact,
    Similar,
    Empty,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::AllRecords => "all_records",
            OutcomeKind::Exact => "exact",
            OutcomeKind::Similar => "similar",
            OutcomeKind::Empty => "empty",
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one search.
///
/// Exactly one stage answers a query; exact and similarity hits are never
/// mixed in one outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    AllRecords(Vec<SearchHit>),
    Exact(Vec<SearchHit>),
    Similar(Vec<SearchHit>),
    Empty,
}

impl SearchOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            SearchOutcome::AllRecords(_) => OutcomeKind::AllRecords,
            SearchOutcome::Exact(_) => OutcomeKind::Exact,
            SearchOutcome::Similar(_) => OutcomeKind::Similar,
            SearchOutcome::Empty => OutcomeKind::Empty,
        }
    }

    pub fn hits(&self) -> &[SearchHit] {
        match self {
            SearchOutcome::AllRecords(hits)
            | SearchOutcome::Exact(hits)
            | SearchOutcome::Similar(hits) => hits,
            SearchOutcome::Empty => &[],
        }
    }

    pub fn into_hits(self) -> Vec<SearchHit> {
        match self {
            SearchOutcome::AllRecords(hits)
            | SearchOutcome::Exact(hits)
            | SearchOutcome::Similar(hits) => hits,
            SearchOutcome::Empty => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.hits().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits().is_empty()
    }
}

/// A snapshot and the index built from it. Never mutated after build.
#[derive(Debug)]
pub struct EngineState {
    snapshot: Snapshot,
    index: FeatureIndex,
    config: SearchConfig,
}

impl EngineState {
    pub fn build(records: Vec<PersonRecord>, config: SearchConfig) -> Self {
        let index = FeatureIndex::build(&records, &config);
        let snapshot = Snapshot::new(records);
        Self {
            snapshot,
            index,
            config,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn index(&self) -> &FeatureIndex {
        &self.index
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Resolve a query: all records, then exact matches, then similarity.
    pub fn search(&self, query: &SearchQuery) -> SearchOutcome {
        let records = self.snapshot.records();

        if query.is_empty() {
            let hits = records.iter().cloned().map(SearchHit::unscored).collect();
            return SearchOutcome::AllRecords(hits);
        }

        let exact = exact_matches(records, query);
        if !exact.is_empty() {
            tracing::debug!("Exact stage matched {} records", exact.len());
            return SearchOutcome::Exact(
                exact
                    .into_iter()
                    .map(|position| SearchHit::unscored(records[position].clone()))
                    .collect(),
            );
        }

        let similar = similarity_matches(records, &self.index, query, &self.config);
        if !similar.is_empty() {
            tracing::debug!("Similarity stage matched {} records", similar.len());
            return SearchOutcome::Similar(
                similar
                    .into_iter()
                    .map(|(position, score)| SearchHit::scored(records[position].clone(), score))
                    .collect(),
            );
        }

        tracing::debug!("No stage matched the query");
        SearchOutcome::Empty
    }
}

/// Hybrid search over a record store.
///
/// Holds the current [`EngineState`] behind a lock. Readers clone the `Arc`
/// and work on a consistent snapshot/index pair while a refresh builds the
/// next pair and swaps it in whole.
pub struct SearchEngine<S: RecordStore> {
    store: S,
    config: SearchConfig,
    state: RwLock<Arc<EngineState>>,
}

impl<S: RecordStore> fmt::Debug for SearchEngine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("SearchEngine")
            .field("records", &state.snapshot.len())
            .field("vocabulary", &state.index.vocabulary_len())
            .field("config", &self.config)
            .finish()
    }
}

impl<S: RecordStore> SearchEngine<S> {
    /// Validate `config`, load the store and build the first index
    pub fn new(store: S, config: SearchConfig) -> LineageResult<Self> {
        config.validate()?;
        let state = Self::load_state(&store, &config)?;
        Ok(Self {
            store,
            config,
            state: RwLock::new(Arc::new(state)),
        })
    }

    fn load_state(store: &S, config: &SearchConfig) -> LineageResult<EngineState> {
        let start = Instant::now();
        let records = store.load_all_records()?;
        let state = EngineState::build(records, config.clone());
        tracing::info!(
            "Indexed {} records ({} terms) in {:?}",
            state.snapshot.len(),
            state.index.vocabulary_len(),
            start.elapsed()
        );
        Ok(state)
    }

    /// Reload every record and rebuild the index.
    ///
    /// The new state replaces the old one in a single swap. On error the
    /// previous state stays in place.
    pub fn refresh(&self) -> LineageResult<()> {
        let state = Self::load_state(&self.store, &self.config)?;
        *self.state.write() = Arc::new(state);
        Ok(())
    }

    /// Current snapshot/index pair; stays valid across later refreshes
    pub fn state(&self) -> Arc<EngineState> {
        Arc::clone(&self.state.read())
    }

    pub fn search(&self, query: &SearchQuery) -> SearchOutcome {
        self.state().search(query)
    }

    pub fn stats(&self) -> SnapshotStats {
        self.state().snapshot.stats()
    }

    pub fn person(&self, person_id: &str) -> Option<PersonRecord> {
        self.state().snapshot.person(person_id).cloned()
    }

    pub fn family(&self, family_id: &str) -> Vec<PersonRecord> {
        self.state()
            .snapshot
            .family(family_id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn children_of(&self, person_id: &str) -> Vec<PersonRecord> {
        self.state()
            .snapshot
            .children_of(person_id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Owned view of [`Snapshot::immediate_family`]
    pub fn immediate_family(&self, person_id: &str) -> Option<OwnedImmediateFamily> {
        let state = self.state();
        state
            .snapshot
            .immediate_family(person_id)
            .map(OwnedImmediateFamily::from)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

/// [`ImmediateFamily`] detached from the snapshot it was read from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnedImmediateFamily {
    pub person: PersonRecord,
    pub spouse: Option<PersonRecord>,
    pub children: Vec<PersonRecord>,
}

impl OwnedImmediateFamily {
    pub fn size(&self) -> usize {
        1 + usize::from(self.spouse.is_some()) + self.children.len()
    }
}

impl From<ImmediateFamily<'_>> for OwnedImmediateFamily {
    fn from(family: ImmediateFamily<'_>) -> Self {
        Self {
            person: family.person.clone(),
            spouse: family.spouse.cloned(),
            children: family.children.into_iter().cloned().collect(),
        }
    }
}
