//! Settings files driving engine behavior.

use crate::common::{FAMILIES_JSON, TestData};
use lineage::{JsonFileStore, LineageError, OutcomeKind, SearchEngine, SearchQuery, Settings};

#[test]
fn test_threshold_from_settings_file() {
    let data = TestData::new();
    let records = data.write("data.json", FAMILIES_JSON);
    // No nature contains this phrase, so only the similarity stage can answer
    let query = SearchQuery::new().with("nature", "gentle soul");

    let defaults = data.write(".lineage/settings.toml", "[search]\n");
    let settings = Settings::load_from(&defaults).unwrap();
    let engine = SearchEngine::new(JsonFileStore::new(&records), settings.search).unwrap();
    let outcome = engine.search(&query);
    assert_eq!(outcome.kind(), OutcomeKind::Similar);
    let ids: Vec<_> = outcome
        .hits()
        .iter()
        .map(|hit| hit.record.person_id.as_str())
        .collect();
    assert!(ids.contains(&"P1") && ids.contains(&"P4"));

    let strict = data.write(
        ".lineage/settings.toml",
        "[search]\nsimilarity_threshold = 0.95\n",
    );
    let settings = Settings::load_from(&strict).unwrap();
    let engine = SearchEngine::new(JsonFileStore::new(&records), settings.search).unwrap();
    assert_eq!(engine.search(&query).kind(), OutcomeKind::Empty);
}

#[test]
fn test_unigram_only_settings() {
    let data = TestData::new();
    let records = data.write("data.json", FAMILIES_JSON);
    let settings_path = data.write(".lineage/settings.toml", "[search]\nngram_max = 1\n");

    let settings = Settings::load_from(&settings_path).unwrap();
    let engine = SearchEngine::new(JsonFileStore::new(records), settings.search).unwrap();

    let vectorizer = engine.state().index().vectorizer().clone();
    assert!(vectorizer.term_index("gentle").is_some());
    assert!(vectorizer.term_index("kind gentle").is_none());
}

#[test]
fn test_invalid_search_settings_are_rejected() {
    let data = TestData::new();
    let records = data.write("data.json", FAMILIES_JSON);
    let settings_path = data.write(
        ".lineage/settings.toml",
        "[search]\nngram_min = 2\nngram_max = 1\n",
    );

    let settings = Settings::load_from(&settings_path).unwrap();
    let result = SearchEngine::new(JsonFileStore::new(records), settings.search);
    assert!(matches!(result, Err(LineageError::Config { .. })));
}

#[test]
fn test_saved_settings_reload() {
    let data = TestData::new();
    let path = data.path().join(".lineage").join("settings.toml");

    let mut settings = Settings::default();
    settings.search.stop_words = false;
    settings.data_path = "exports/tree.json".into();
    settings.save(&path).unwrap();

    let loaded = Settings::load_from(&path).unwrap();
    assert!(!loaded.search.stop_words);
    assert_eq!(loaded.data_path, std::path::PathBuf::from("exports/tree.json"));
}
