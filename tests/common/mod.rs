#![allow(dead_code)]

use lineage::{JsonFileStore, MemoryStore, PersonRecord, SearchConfig, SearchEngine};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub const FAMILIES_JSON: &str = include_str!("../fixtures/families.json");

/// Records of the shared fixture file, in file order
pub fn family_records() -> Vec<PersonRecord> {
    JsonFileStore::parse_str(FAMILIES_JSON).expect("fixture parses")
}

pub fn person(id: &str, family: &str, first: &str) -> PersonRecord {
    PersonRecord {
        first_name: Some(first.to_string()),
        ..PersonRecord::new(id, family)
    }
}

/// Engine over an in-memory copy of the fixture records
pub fn memory_engine() -> SearchEngine<Arc<MemoryStore>> {
    engine_with(family_records())
}

pub fn engine_with(records: Vec<PersonRecord>) -> SearchEngine<Arc<MemoryStore>> {
    let store = Arc::new(MemoryStore::with_records(records));
    SearchEngine::new(store, SearchConfig::default()).expect("engine builds")
}

/// Temporary directory holding record and settings files
pub struct TestData {
    pub dir: TempDir,
}

impl TestData {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let file_path = self.dir.path().join(name);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
