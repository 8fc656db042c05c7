//! Input/Output handling for the CLI.
//!
//! This module provides:
//! - Unified output formatting (text, JSON)
//! - Consistent error handling and exit codes
//! - Parsing of `key=value` search filters

pub mod exit_code;
pub mod filters;
pub mod format;

pub use exit_code::ExitCode;
pub use filters::parse_filters;
pub use format::{ErrorDetails, JsonResponse, OutputFormat, ResponseMeta};
