//! Delimited text (CSV) matcher.

use async_trait::async_trait;
use docseek_core::{ContentMatcher, ExtractError, Keyword};
use std::path::Path;

use crate::run_blocking;

/// Matcher for comma-separated files. Every field of every row is scanned.
pub struct DelimitedExtractor {
    delimiter: u8,
}

impl DelimitedExtractor {
    /// Create a new comma-delimited extractor.
    #[must_use]
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Use a different field delimiter.
    #[must_use]
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl Default for DelimitedExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentMatcher for DelimitedExtractor {
    fn name(&self) -> &str {
        "delimited"
    }

    fn extensions(&self) -> &[&str] {
        &[".csv"]
    }

    async fn evaluate(&self, path: &Path, keyword: &Keyword) -> Result<bool, ExtractError> {
        let bytes = tokio::fs::read(path).await?;
        let keyword = keyword.clone();
        let delimiter = self.delimiter;

        run_blocking(move || scan_fields(&bytes, delimiter, &keyword)).await
    }
}

/// Scan fields row by row, stopping at the first hit.
fn scan_fields(bytes: &[u8], delimiter: u8, keyword: &Keyword) -> Result<bool, ExtractError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes);

    for record in reader.byte_records() {
        let record = record.map_err(|e| ExtractError::Parse(e.to_string()))?;
        let hit = record
            .iter()
            .filter(|field| !field.is_empty())
            .any(|field| keyword.matches(&String::from_utf8_lossy(field)));
        if hit {
            return Ok(true);
        }
    }

    Ok(false)
}
