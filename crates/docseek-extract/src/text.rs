//! Plain text matcher.

use async_trait::async_trait;
use docseek_core::{ContentMatcher, ExtractError, Keyword};
use std::path::Path;
use tokio::fs;

/// Matcher for plain text files.
///
/// Bytes are decoded permissively: invalid UTF-8 sequences are replaced
/// rather than failing the file.
pub struct TextExtractor;

impl TextExtractor {
    /// Create a new text extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentMatcher for TextExtractor {
    fn name(&self) -> &str {
        "text"
    }

    fn extensions(&self) -> &[&str] {
        &[".txt"]
    }

    async fn evaluate(&self, path: &Path, keyword: &Keyword) -> Result<bool, ExtractError> {
        let bytes = fs::read(path).await?;
        let content = String::from_utf8_lossy(&bytes);
        Ok(keyword.matches(&content))
    }
}
