//! Configuration file handling for the docseek CLI.
//!
//! The file is TOML and every field is optional:
//!
//! ```toml
//! [search]
//! max_concurrency = 16
//!
//! [extract]
//! doc_converter = "antiword"
//! ```

use directories::ProjectDirs;
use docseek_core::{Error, Result};
use docseek_extract::ExtractorConfig;
use docseek_search::SearchConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Search configuration
    #[serde(default)]
    pub search: SearchSection,

    /// Extraction configuration
    #[serde(default)]
    pub extract: ExtractSection,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Search-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSection {
    /// Maximum files evaluated at once (1-32). Unset sizes from the CPU count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<usize>,

    /// Paths buffered between the directory walk and evaluation
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_queue_capacity() -> usize {
    256
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            max_concurrency: None,
            queue_capacity: default_queue_capacity(),
        }
    }
}

/// Extraction-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractSection {
    /// Program converting `.doc` files to text. Empty disables it.
    #[serde(default = "default_doc_converter")]
    pub doc_converter: String,

    /// Scan raw `.doc` bytes when no converter is available
    #[serde(default = "default_doc_raw_fallback")]
    pub doc_raw_fallback: bool,
}

fn default_doc_converter() -> String {
    "antiword".to_string()
}

fn default_doc_raw_fallback() -> bool {
    true
}

impl Default for ExtractSection {
    fn default() -> Self {
        Self {
            doc_converter: default_doc_converter(),
            doc_raw_fallback: default_doc_raw_fallback(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

const SAMPLE_TOML: &str = r#"# docseek configuration

[search]
# Maximum files evaluated at once (1-32). Defaults to min(32, CPUs * 5).
# max_concurrency = 16

# Paths buffered between the directory walk and evaluation.
queue_capacity = 256

[extract]
# Program used to turn legacy .doc files into text, looked up on PATH.
# Set to "" to never run a converter.
doc_converter = "antiword"

# Scan raw .doc bytes when no converter is available (best effort).
doc_raw_fallback = true

[logging]
# One of: error, warn, info, debug, trace
level = "info"
"#;

impl Config {
    /// Load from the default location, falling back to defaults if absent.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Default config file location.
    pub fn config_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Commented sample configuration.
    pub fn sample_toml() -> &'static str {
        SAMPLE_TOML
    }

    /// Search settings, with an optional command-line override for concurrency.
    pub fn search_config(&self, jobs: Option<usize>) -> SearchConfig {
        SearchConfig {
            max_concurrency: jobs.or(self.search.max_concurrency),
            queue_capacity: self.search.queue_capacity,
        }
    }

    /// Extractor settings.
    pub fn extractor_config(&self) -> ExtractorConfig {
        let converter = self.extract.doc_converter.trim();
        ExtractorConfig {
            doc_converter: (!converter.is_empty()).then(|| converter.to_string()),
            doc_raw_fallback: self.extract.doc_raw_fallback,
        }
    }
}

/// Get the config directory for docseek.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("DOCSEEK_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }

    ProjectDirs::from("", "", "docseek").map(|dirs| dirs.config_dir().to_path_buf())
}
