//! Core types for docseek.
//!
//! ## Requests
//! - [`Keyword`]: A trimmed, case-folded search keyword
//! - [`SearchRequest`]: Root directory plus keyword for one search
//!
//! ## Results
//! - [`CandidatePath`]: A file discovered during traversal
//! - [`file_extension`]: The extension a candidate is dispatched on
//! - [`MatchResult`]: A file whose content contains the keyword
//! - [`SearchSummary`]: Terminal report delivered once per search

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::SearchError;

// ============================================================================
// Requests
// ============================================================================

/// A search keyword.
///
/// Stores the caller's text and its lowercase fold; every comparison goes
/// through [`Keyword::matches`] so all extractors agree on what a hit is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    original: String,
    folded: String,
}

impl Keyword {
    /// Build a keyword, rejecting empty or whitespace-only input.
    pub fn new(keyword: impl Into<String>) -> Result<Self, SearchError> {
        let original = keyword.into();
        if original.trim().is_empty() {
            return Err(SearchError::InvalidRequest("keyword is empty".to_string()));
        }
        let folded = original.to_lowercase();
        Ok(Self { original, folded })
    }

    /// The keyword as supplied by the caller.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// The lowercase form used for comparison.
    #[must_use]
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Case-insensitive substring test.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.folded)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

/// Parameters of one search. Immutable once built.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Directory whose subtree is searched
    pub root: PathBuf,
    /// Keyword to look for
    pub keyword: Keyword,
}

impl SearchRequest {
    /// Create a request. The caller is expected to have trimmed both values.
    pub fn new(root: impl Into<PathBuf>, keyword: impl Into<String>) -> Result<Self, SearchError> {
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(SearchError::InvalidRequest("root path is empty".to_string()));
        }
        Ok(Self {
            root,
            keyword: Keyword::new(keyword)?,
        })
    }
}

// ============================================================================
// Results
// ============================================================================

/// A file path produced by traversal, absolute or relative to the root.
pub type CandidatePath = PathBuf;

/// The extension a file is dispatched on, without the dot.
///
/// A dotfile whose whole name is an extension, such as `.txt`, counts as
/// having that extension.
#[must_use]
pub fn file_extension(path: &Path) -> Option<&str> {
    if let Some(ext) = path.extension() {
        return ext.to_str();
    }
    let name = path.file_name()?.to_str()?;
    name.strip_prefix('.').filter(|rest| !rest.is_empty())
}

/// A file whose content contains the keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub path: CandidatePath,
}

impl MatchResult {
    #[must_use]
    pub fn new(path: impl Into<CandidatePath>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Terminal report for one search, delivered exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSummary {
    /// Number of matches delivered to the sink
    pub match_count: u64,
    /// Whether the search was cancelled before finishing
    pub cancelled: bool,
    /// Candidates handed to an extractor
    pub scanned: u64,
    /// Candidates whose extraction failed
    pub failed: u64,
    /// Why the root could not be listed, if it could not
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_error: Option<String>,
}

impl SearchSummary {
    /// Summary of a search that never had any candidates because the root was unreadable.
    #[must_use]
    pub fn root_unreadable(reason: impl Into<String>) -> Self {
        Self {
            root_error: Some(reason.into()),
            ..Self::default()
        }
    }
}
