//! Error types for the genealogical search system
//!
//! This module provides structured error types using thiserror for better
//! error handling and actionable error messages. Search itself never fails:
//! degenerate vocabularies, empty snapshots, malformed query values and
//! unknown field names all resolve to empty or partial results. Errors only
//! arise at the edges, when records are loaded or configuration is read.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by record store collaborators
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read records from '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse records in '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Unrecognized record file layout in '{path}': {reason}")]
    UnsupportedLayout { path: PathBuf, reason: String },

    #[error("Person '{id}' already exists in the store")]
    DuplicatePerson { id: String },

    #[error("Person '{id}' not found in the store")]
    PersonNotFound { id: String },
}

impl StoreError {
    /// Get a stable status code for this error type.
    pub fn status_code(&self) -> &'static str {
        match self {
            Self::FileRead { .. } => "FILE_READ_ERROR",
            Self::Parse { .. } => "PARSE_ERROR",
            Self::UnsupportedLayout { .. } => "UNSUPPORTED_LAYOUT",
            Self::DuplicatePerson { .. } => "DUPLICATE_PERSON",
            Self::PersonNotFound { .. } => "PERSON_NOT_FOUND",
        }
    }
}

/// Main error type for engine and CLI level operations
#[derive(Error, Debug)]
pub enum LineageError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration errors
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    /// General errors for cases where we need to preserve existing behavior
    #[error("{0}")]
    General(String),
}

impl LineageError {
    /// Get a stable status code for this error type.
    ///
    /// Returns a string identifier that can be used in JSON responses
    /// for programmatic error handling.
    pub fn status_code(&self) -> String {
        match self {
            Self::Store(inner) => inner.status_code(),
            Self::Config { .. } => "CONFIG_ERROR",
            Self::General(_) => "GENERAL_ERROR",
        }
        .to_string()
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::Store(StoreError::FileRead { .. }) => vec![
                "Check that the data file exists and you have read permissions",
                "Point 'data_path' in .lineage/settings.toml at the exported records",
            ],
            Self::Store(StoreError::Parse { .. } | StoreError::UnsupportedLayout { .. }) => vec![
                "The file must hold a JSON array of records",
                "An object with a 'mockFamilyMembers' or 'members' array is also accepted",
            ],
            Self::Store(StoreError::DuplicatePerson { .. }) => {
                vec!["Use update instead of insert for an existing person"]
            }
            Self::Store(StoreError::PersonNotFound { .. }) => {
                vec!["Insert the person before updating it"]
            }
            Self::Config { .. } => vec![
                "Run 'lineage init --force' to regenerate the configuration",
                "Check LINEAGE_* environment variables for typos",
            ],
            Self::General(_) => vec![],
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for engine operations
pub type LineageResult<T> = Result<T, LineageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_pass_through_store_errors() {
        let err = LineageError::from(StoreError::PersonNotFound {
            id: "P9".to_string(),
        });
        assert_eq!(err.status_code(), "PERSON_NOT_FOUND");
        assert_eq!(err.to_string(), "Person 'P9' not found in the store");
        assert!(!err.recovery_suggestions().is_empty());
    }

    #[test]
    fn test_config_error_message() {
        let err = LineageError::Config {
            reason: "ngram_min must be at least 1".to_string(),
        };
        assert_eq!(err.status_code(), "CONFIG_ERROR");
        assert!(err.to_string().contains("ngram_min"));
    }
}
