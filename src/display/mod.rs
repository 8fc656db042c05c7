//! Rich terminal display utilities for CLI output.
//!
//! Provides styled tables and themed status lines.

pub mod tables;
pub mod theme;

pub use tables::{create_family_table, create_results_table, create_stats_table};
pub use theme::{THEME, Theme};
