//! Configuration module for the genealogical search system.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `LINEAGE_` and use double underscores
//! to separate nested levels:
//! - `LINEAGE_SEARCH__SIMILARITY_THRESHOLD=0.2` sets `search.similarity_threshold`
//! - `LINEAGE_SEARCH__STOP_WORDS=false` sets `search.stop_words`
//! - `LINEAGE_LOGGING__LEVEL=debug` sets `logging.level`

use crate::error::{LineageError, LineageResult};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const CONFIG_DIR: &str = ".lineage";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// JSON export the CLI loads records from
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Workspace root directory (where .lineage is located)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_root: Option<PathBuf>,

    /// Global debug mode
    #[serde(default = "default_false")]
    pub debug: bool,

    /// Search tuning
    #[serde(default)]
    pub search: SearchConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tuning parameters of the feature index and the similarity fallback.
///
/// None of these are correctness requirements; the defaults reproduce the
/// long-standing behavior of the search endpoint.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SearchConfig {
    /// Similarity results must score strictly above this value
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Smallest n-gram length in the vocabulary
    #[serde(default = "default_ngram_min")]
    pub ngram_min: usize,

    /// Largest n-gram length in the vocabulary
    #[serde(default = "default_ngram_max")]
    pub ngram_max: usize,

    /// Drop English stop words before building n-grams
    #[serde(default = "default_true")]
    pub stop_words: bool,

    /// Text fitted in place of an empty snapshot
    #[serde(default = "default_placeholder_signature")]
    pub placeholder_signature: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable logs
    #[serde(default = "default_false")]
    pub json: bool,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_data_path() -> PathBuf {
    PathBuf::from("data.json")
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_similarity_threshold() -> f64 {
    0.1
}
fn default_ngram_min() -> usize {
    1
}
fn default_ngram_max() -> usize {
    2
}
fn default_placeholder_signature() -> String {
    "placeholder".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            data_path: default_data_path(),
            workspace_root: None,
            debug: false,
            search: SearchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            ngram_min: default_ngram_min(),
            ngram_max: default_ngram_max(),
            stop_words: true,
            placeholder_signature: default_placeholder_signature(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl SearchConfig {
    /// Reject parameter combinations the indexer cannot work with
    pub fn validate(&self) -> LineageResult<()> {
        if self.ngram_min == 0 {
            return Err(LineageError::Config {
                reason: "search.ngram_min must be at least 1".to_string(),
            });
        }
        if self.ngram_min > self.ngram_max {
            return Err(LineageError::Config {
                reason: format!(
                    "search.ngram_min ({}) exceeds search.ngram_max ({})",
                    self.ngram_min, self.ngram_max
                ),
            });
        }
        if !(0.0..1.0).contains(&self.similarity_threshold) {
            return Err(LineageError::Config {
                reason: format!(
                    "search.similarity_threshold must be in [0, 1), got {}",
                    self.similarity_threshold
                ),
            });
        }
        Ok(())
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        // Try to find the workspace root by looking for .lineage directory
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join("settings.toml"));

        Self::figment(config_path)
            .extract()
            .map_err(Box::new)
            .map(|mut settings: Settings| {
                // If workspace_root is not set in config, detect it
                if settings.workspace_root.is_none() {
                    settings.workspace_root = Self::workspace_root();
                }
                settings
            })
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment(path.as_ref().to_path_buf())
            .extract()
            .map_err(Box::new)
    }

    fn figment(config_path: PathBuf) -> Figment {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(config_path))
            // Double underscore separates nesting levels; single underscores
            // stay part of the field name
            .merge(Env::prefixed("LINEAGE_").map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
    }

    /// Find the settings file by looking for a .lineage directory
    /// from the current directory up to the filesystem root
    fn find_workspace_config() -> Option<PathBuf> {
        Self::workspace_root().map(|root| root.join(CONFIG_DIR).join("settings.toml"))
    }

    /// Get the workspace root directory (where .lineage is located)
    pub fn workspace_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let config_dir = ancestor.join(CONFIG_DIR);
            if config_dir.is_dir() {
                return Some(ancestor.to_path_buf());
            }
        }

        None
    }

    /// Check if configuration is properly initialized
    pub fn check_init() -> Result<(), String> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join("settings.toml"));

        if !config_path.exists() {
            return Err("No configuration file found".to_string());
        }

        match std::fs::read_to_string(&config_path) {
            Ok(content) => {
                if let Err(e) = toml::from_str::<Settings>(&content) {
                    return Err(format!(
                        "Configuration file is corrupted: {e}\nRun 'lineage init --force' to regenerate."
                    ));
                }
            }
            Err(e) => {
                return Err(format!("Cannot read configuration file: {e}"));
            }
        }

        Ok(())
    }

    /// Resolve the data file against the workspace root when it is relative
    pub fn resolved_data_path(&self) -> PathBuf {
        match &self.workspace_root {
            Some(root) if self.data_path.is_relative() => root.join(&self.data_path),
            _ => self.data_path.clone(),
        }
    }

    /// Save current configuration to file
    pub fn save(
        &self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file with helpful comments
    pub fn init_config_file(force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = PathBuf::from(CONFIG_DIR).join("settings.toml");

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = r#"# Lineage Configuration File

# Version of the configuration schema
version = 1

# JSON export of person records (relative to the workspace root)
data_path = "data.json"

# Global debug mode
debug = false

[search]
# Similarity matches must score strictly above this threshold (0.0 to 1.0)
similarity_threshold = 0.1

# N-gram range of the TF-IDF vocabulary
ngram_min = 1
ngram_max = 2

# Remove English stop words before building n-grams.
# Indexing falls back to keeping them when nothing else is left.
stop_words = true

# Text fitted when the record store is empty
placeholder_signature = "placeholder"

[logging]
# Default log filter when RUST_LOG is not set: error, warn, info, debug, trace
level = "warn"

# Emit JSON log lines
json = false
"#;

        std::fs::write(&config_path, template)?;

        if force {
            println!("Overwrote configuration at: {}", config_path.display());
        } else {
            println!(
                "Created default configuration at: {}",
                config_path.display()
            );
        }

        Ok(config_path)
    }
}
