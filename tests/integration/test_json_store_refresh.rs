//! Engine over a JSON export that changes between refreshes.

use crate::common::{FAMILIES_JSON, TestData};
use lineage::{
    JsonFileStore, LineageError, OutcomeKind, SearchConfig, SearchEngine, SearchQuery, StoreError,
};

#[test]
fn test_engine_loads_wrapped_export() {
    let data = TestData::new();
    let path = data.write("families.json", FAMILIES_JSON);

    let engine = SearchEngine::new(JsonFileStore::new(path), SearchConfig::default()).unwrap();
    let stats = engine.stats();

    assert_eq!(stats.total_members, 5);
    assert_eq!(stats.total_families, 2);
    assert_eq!(stats.families.get("F1"), Some(&3));
    assert_eq!(stats.families.get("F2"), Some(&2));
}

#[test]
fn test_immediate_family_from_export() {
    let data = TestData::new();
    let path = data.write("families.json", FAMILIES_JSON);
    let engine = SearchEngine::new(JsonFileStore::new(path), SearchConfig::default()).unwrap();

    let family = engine.immediate_family("P1").unwrap();
    assert_eq!(family.spouse.as_ref().map(|s| s.person_id.as_str()), Some("P2"));
    let children: Vec<_> = family.children.iter().map(|c| c.person_id.as_str()).collect();
    assert_eq!(children, vec!["P3"]);
    assert_eq!(family.size(), 3);

    let children: Vec<_> = engine
        .children_of("P4")
        .into_iter()
        .map(|c| c.person_id)
        .collect();
    assert_eq!(children, vec!["P5"]);
    assert!(engine.immediate_family("P404").is_none());
}

#[test]
fn test_refresh_rereads_file() {
    let data = TestData::new();
    let path = data.write(
        "data.json",
        r#"[{"personId": "P1", "familyId": "F1", "firstName": "Rama", "nature": "Gentle"}]"#,
    );
    let engine = SearchEngine::new(JsonFileStore::new(&path), SearchConfig::default()).unwrap();
    let query = SearchQuery::new().with("firstName", "Sita");
    assert!(engine.search(&query).is_empty());

    data.write(
        "data.json",
        r#"[
            {"personId": "P1", "familyId": "F1", "firstName": "Rama", "nature": "Gentle"},
            {"personId": "P2", "familyId": "F1", "firstName": "Sita", "nature": "Patient"}
        ]"#,
    );
    engine.refresh().unwrap();

    let outcome = engine.search(&query);
    assert_eq!(outcome.kind(), OutcomeKind::Exact);
    assert_eq!(engine.state().index().len(), 2);
}

#[test]
fn test_refresh_to_empty_snapshot() {
    let data = TestData::new();
    let path = data.write("data.json", FAMILIES_JSON);
    let engine = SearchEngine::new(JsonFileStore::new(&path), SearchConfig::default()).unwrap();

    data.write("data.json", "[]");
    engine.refresh().unwrap();

    let state = engine.state();
    assert_eq!(state.snapshot().len(), 0);
    assert_eq!(state.index().len(), 0);
    assert!(engine.search(&SearchQuery::new().with("nature", "gentle")).is_empty());
    assert_eq!(engine.search(&SearchQuery::new()).kind(), OutcomeKind::AllRecords);
}

#[test]
fn test_failed_refresh_keeps_previous_state() {
    let data = TestData::new();
    let path = data.write("data.json", FAMILIES_JSON);
    let engine = SearchEngine::new(JsonFileStore::new(&path), SearchConfig::default()).unwrap();

    data.write("data.json", "{ not json");
    let err = engine.refresh().unwrap_err();
    assert!(matches!(err, LineageError::Store(StoreError::Parse { .. })));
    assert_eq!(err.status_code(), "PARSE_ERROR");

    assert_eq!(engine.state().snapshot().len(), 5);
}

#[test]
fn test_missing_file_fails_engine_start() {
    let data = TestData::new();
    let result = SearchEngine::new(
        JsonFileStore::new(data.path().join("absent.json")),
        SearchConfig::default(),
    );
    assert!(matches!(
        result,
        Err(LineageError::Store(StoreError::FileRead { .. }))
    ));
}
