use crate::error::{StoreError, StoreResult};
use crate::record::PersonRecord;
use crate::storage::RecordStore;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Keys under which exported files keep their record array
const RECORD_ARRAY_KEYS: &[&str] = &["mockFamilyMembers", "members"];

/// Read-only store backed by a JSON export.
///
/// The file is re-read on every load so a refresh picks up edits made by
/// other processes.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse records from JSON text in any accepted layout
    pub fn parse_str(content: &str) -> StoreResult<Vec<PersonRecord>> {
        Self::new("<inline>").parse(content)
    }

    fn parse(&self, content: &str) -> StoreResult<Vec<PersonRecord>> {
        let value: Value = serde_json::from_str(content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;

        let array = match value {
            Value::Array(items) => Value::Array(items),
            Value::Object(mut map) => RECORD_ARRAY_KEYS
                .iter()
                .find_map(|key| map.remove(*key))
                .ok_or_else(|| StoreError::UnsupportedLayout {
                    path: self.path.clone(),
                    reason: format!(
                        "object has none of the record keys {RECORD_ARRAY_KEYS:?}"
                    ),
                })?,
            other => {
                return Err(StoreError::UnsupportedLayout {
                    path: self.path.clone(),
                    reason: format!("expected an array or object, found {other}"),
                });
            }
        };

        serde_json::from_value(array).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

impl RecordStore for JsonFileStore {
    fn load_all_records(&self) -> StoreResult<Vec<PersonRecord>> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| StoreError::FileRead {
            path: self.path.clone(),
            source,
        })?;
        let records = self.parse(&content)?;
        tracing::debug!(
            "Loaded {} records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}
