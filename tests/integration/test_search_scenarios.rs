//! End-to-end search behavior over small hand-built snapshots.

use crate::common::{engine_with, memory_engine, person};
use lineage::{OutcomeKind, PersonRecord, Scalar, SearchOutcome, SearchQuery};

fn ids(outcome: &SearchOutcome) -> Vec<&str> {
    outcome
        .hits()
        .iter()
        .map(|hit| hit.record.person_id.as_str())
        .collect()
}

fn rama_and_rami() -> Vec<PersonRecord> {
    vec![person("P1", "F1", "Rama"), person("P2", "F1", "Rami")]
}

#[test]
fn test_person_id_returns_single_exact_match() {
    let engine = engine_with(rama_and_rami());
    let outcome = engine.search(&SearchQuery::new().with("personId", "P1"));

    assert_eq!(outcome.kind(), OutcomeKind::Exact);
    assert_eq!(ids(&outcome), vec!["P1"]);
    assert!(outcome.hits()[0].similarity_score.is_none());
}

#[test]
fn test_name_substring_returns_both_unscored() {
    let engine = engine_with(rama_and_rami());
    let outcome = engine.search(&SearchQuery::new().with("name", "ram"));

    assert_eq!(outcome.kind(), OutcomeKind::Exact);
    assert_eq!(ids(&outcome), vec!["P1", "P2"]);
    assert!(outcome.hits().iter().all(|hit| hit.similarity_score.is_none()));
}

#[test]
fn test_generation_stored_as_text_matches_integer_query() {
    let record = PersonRecord {
        generation: Some(Scalar::Text("3".to_string())),
        ..person("P1", "F1", "Rama")
    };
    let engine = engine_with(vec![record]);

    let outcome = engine.search(&SearchQuery::new().with("generation", 3i64));
    assert_eq!(ids(&outcome), vec!["P1"]);
}

#[test]
fn test_no_exact_hit_falls_back_to_similarity() {
    let engine = memory_engine();
    let query = SearchQuery::new()
        .with("name", "Zzyx")
        .with("nature", "gentle");
    let outcome = engine.search(&query);

    assert_eq!(outcome.kind(), OutcomeKind::Similar);
    let found = ids(&outcome);
    assert!(found.contains(&"P1"));
    assert!(found.contains(&"P4"));
    for hit in outcome.hits() {
        let score = hit.similarity_score.expect("similarity hits are scored");
        assert!(score > 0.1);
    }
}

#[test]
fn test_empty_snapshot_never_panics() {
    let engine = engine_with(Vec::new());

    for query in [
        SearchQuery::new().with("personId", "P1"),
        SearchQuery::new().with("nature", "gentle"),
        SearchQuery::new().with("nature", "placeholder"),
        SearchQuery::new().with("generation", "three"),
    ] {
        assert_eq!(engine.search(&query), SearchOutcome::Empty);
    }
    assert_eq!(engine.state().index().len(), 0);
}

#[test]
fn test_empty_query_returns_whole_snapshot() {
    let engine = memory_engine();
    let outcome = engine.search(&SearchQuery::new());

    assert_eq!(outcome.kind(), OutcomeKind::AllRecords);
    assert_eq!(ids(&outcome), vec!["P1", "P2", "P3", "P4", "P5"]);
    assert!(outcome.hits().iter().all(|hit| hit.similarity_score.is_none()));
}

#[test]
fn test_blank_values_count_as_absent() {
    let engine = memory_engine();
    let query: SearchQuery =
        serde_json::from_str(r#"{"name": "", "bloodGroup": null, "about": "   "}"#).unwrap();

    assert_eq!(engine.search(&query).kind(), OutcomeKind::AllRecords);
}

#[test]
fn test_family_only_query_returns_that_family() {
    let engine = memory_engine();
    let outcome = engine.search(&SearchQuery::new().with("familyId", "F2"));

    assert_eq!(outcome.kind(), OutcomeKind::Exact);
    assert_eq!(ids(&outcome), vec!["P4", "P5"]);
}

#[test]
fn test_categorical_fields_ignore_case() {
    let engine = memory_engine();
    let outcome = engine.search(&SearchQuery::new().with("bloodGroup", "o+").with("eyeColor", "BROWN"));
    assert_eq!(ids(&outcome), vec!["P1"]);
}

#[test]
fn test_unknown_field_is_a_non_match() {
    let engine = memory_engine();
    let outcome = engine.search(&SearchQuery::new().with("favouriteColour", "blue"));
    assert_eq!(outcome, SearchOutcome::Empty);
}

#[test]
fn test_malformed_numeric_value_is_a_non_match() {
    let engine = memory_engine();
    let outcome = engine.search(&SearchQuery::new().with("generation", "third"));
    assert_eq!(outcome, SearchOutcome::Empty);
}

#[test]
fn test_query_json_round_trips_through_engine() {
    let engine = memory_engine();
    let query: SearchQuery =
        serde_json::from_str(r#"{"familyId": "F1", "generation": 3, "gender": "female"}"#)
            .unwrap();
    assert_eq!(ids(&engine.search(&query)), vec!["P2"]);
}

#[test]
fn test_similarity_results_serialize_with_score() {
    let engine = memory_engine();
    let outcome = engine.search(&SearchQuery::new().with("passion", "astronomy telescopes"));
    assert_eq!(outcome.kind(), OutcomeKind::Similar);

    let json = serde_json::to_value(outcome.hits()).unwrap();
    assert_eq!(json[0]["personId"], "P3");
    assert!(json[0]["similarity_score"].as_f64().unwrap() > 0.1);
}
