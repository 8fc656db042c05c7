//! Invariants that hold for every query over the fixture snapshot.

use crate::common::memory_engine;
use lineage::search::record_matches;
use lineage::{OutcomeKind, SearchQuery};

fn sample_queries() -> Vec<SearchQuery> {
    vec![
        SearchQuery::new().with("name", "sharma").with("bloodGroup", "O+"),
        SearchQuery::new().with("generation", 3i64).with("gender", "male"),
        SearchQuery::new().with("lastName", "iyer").with("passion", "cric"),
        SearchQuery::new().with("familyId", "F1").with("nature", "gentle"),
        SearchQuery::new().with("familyId", "F2").with("nature", "gentle"),
        SearchQuery::new().with("nature", "gentle music"),
        SearchQuery::new().with("passion", "cooking").with("familyId", "F2"),
        SearchQuery::new().with("name", "Zzyx").with("trait", "stern"),
        SearchQuery::new().with("about", "temple").with("generation", "3"),
    ]
}

#[test]
fn test_exact_results_match_every_field() {
    let engine = memory_engine();
    let state = engine.state();

    for query in sample_queries() {
        let outcome = state.search(&query);
        if outcome.kind() != OutcomeKind::Exact {
            continue;
        }
        let returned: Vec<&str> = outcome
            .hits()
            .iter()
            .map(|hit| hit.record.person_id.as_str())
            .collect();
        for record in state.snapshot().records() {
            assert_eq!(
                record_matches(record, &query),
                returned.contains(&record.person_id.as_str()),
                "query {query:?} disagrees on {}",
                record.person_id
            );
        }
    }
}

#[test]
fn test_outcomes_never_mix_stages() {
    let engine = memory_engine();

    for query in sample_queries() {
        let outcome = engine.search(&query);
        let scored = outcome
            .hits()
            .iter()
            .filter(|hit| hit.similarity_score.is_some())
            .count();
        match outcome.kind() {
            OutcomeKind::Similar => assert_eq!(scored, outcome.len()),
            _ => assert_eq!(scored, 0),
        }
    }
}

#[test]
fn test_family_scope_holds_in_every_stage() {
    let engine = memory_engine();

    for query in sample_queries() {
        let Some(family) = query.family_id() else {
            continue;
        };
        for hit in engine.search(&query).hits() {
            assert_eq!(hit.record.family_line_id, family, "query {query:?}");
        }
    }
}

#[test]
fn test_family_scoped_similarity() {
    let engine = memory_engine();
    let outcome = engine.search(&SearchQuery::new().with("familyId", "F2").with("nature", "gentle soul"));

    assert_eq!(outcome.kind(), OutcomeKind::Similar);
    let ids: Vec<_> = outcome
        .hits()
        .iter()
        .map(|hit| hit.record.person_id.as_str())
        .collect();
    assert_eq!(ids, vec!["P4"]);
}

#[test]
fn test_scores_exceed_threshold_and_descend() {
    let engine = memory_engine();
    let threshold = engine.config().similarity_threshold;

    for query in sample_queries() {
        let outcome = engine.search(&query);
        let scores: Vec<f64> = outcome
            .hits()
            .iter()
            .filter_map(|hit| hit.similarity_score)
            .collect();
        assert!(scores.iter().all(|score| *score > threshold));
        assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
    }
}

#[test]
fn test_index_rows_track_snapshot_length() {
    let engine = memory_engine();
    let state = engine.state();
    assert_eq!(state.index().len(), state.snapshot().len());

    engine
        .store()
        .insert(crate::common::person("P6", "F3", "Meera"))
        .unwrap();
    engine.refresh().unwrap();

    let state = engine.state();
    assert_eq!(state.snapshot().len(), 6);
    assert_eq!(state.index().len(), 6);
}
