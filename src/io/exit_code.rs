//! Exit codes for CLI operations following Unix conventions.
//!
//! # Exit Code Semantics
//!
//! - `0`: Success - operation completed and produced results
//! - `1`: General error - unspecified failure
//! - `3`: The search or lookup matched nothing
//! - `4-6`: Record parse, file I/O and configuration failures
//! - `126-255`: Reserved by shell

use crate::error::{LineageError, StoreError};
use crate::search::SearchOutcome;

/// Standard exit codes for CLI operations.
///
/// These codes follow Unix conventions where 0 indicates success,
/// and non-zero values indicate various error conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Operation succeeded (code 0)
    Success = 0,

    /// Unspecified error occurred (code 1)
    GeneralError = 1,

    /// Nothing matched but the command executed successfully (code 3)
    NotFound = 3,

    /// Record file could not be parsed (code 4)
    ParseError = 4,

    /// File I/O error (code 5)
    IoError = 5,

    /// Configuration error (code 6)
    ConfigError = 6,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

impl ExitCode {
    /// Determine exit code for a lookup based on result presence.
    ///
    /// Returns `Success` if data is found, `NotFound` if empty.
    pub fn from_lookup<T>(result: &Option<T>) -> Self {
        match result {
            Some(_) => ExitCode::Success,
            None => ExitCode::NotFound,
        }
    }

    /// `NotFound` when a search resolved to nothing
    pub fn from_outcome(outcome: &SearchOutcome) -> Self {
        if outcome.is_empty() {
            ExitCode::NotFound
        } else {
            ExitCode::Success
        }
    }

    /// Convert a `LineageError` to the appropriate exit code.
    ///
    /// Maps specific error types to semantic exit codes that scripts
    /// can use to determine appropriate recovery actions.
    pub fn from_error(error: &LineageError) -> Self {
        match error {
            LineageError::Store(StoreError::FileRead { .. }) => ExitCode::IoError,
            LineageError::Store(StoreError::Parse { .. })
            | LineageError::Store(StoreError::UnsupportedLayout { .. }) => ExitCode::ParseError,
            LineageError::Store(StoreError::PersonNotFound { .. }) => ExitCode::NotFound,
            LineageError::Store(StoreError::DuplicatePerson { .. }) => ExitCode::GeneralError,
            LineageError::Config { .. } => ExitCode::ConfigError,
            LineageError::General(_) => ExitCode::GeneralError,
        }
    }
}
