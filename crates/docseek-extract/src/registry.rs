//! Extractor registry mapping file extensions to content matchers.

use docseek_core::{file_extension, ContentMatcher, ExtractError, Keyword};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::{
    DelimitedExtractor, DocExtractor, DocxExtractor, PdfExtractor, TextExtractor, XlsxExtractor,
};

/// Settings for the built-in extractors.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Program used to convert legacy `.doc` files to text, looked up on `PATH`.
    /// `None` disables the converter.
    pub doc_converter: Option<String>,
    /// Decode `.doc` bytes directly when no converter is available.
    pub doc_raw_fallback: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            doc_converter: Some("antiword".to_string()),
            doc_raw_fallback: true,
        }
    }
}

/// Registry of content matchers keyed by normalized extension.
///
/// Built once, then shared read-only across concurrent evaluations.
pub struct ExtractorRegistry {
    /// Named matchers
    extractors: HashMap<String, Arc<dyn ContentMatcher>>,
    /// Extension (lowercase, dot-prefixed) to matcher name
    extension_mapping: HashMap<String, String>,
}

impl ExtractorRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
            extension_mapping: HashMap::new(),
        }
    }

    /// Create a registry holding every built-in format.
    #[must_use]
    pub fn builtin(config: &ExtractorConfig) -> Self {
        let mut registry = Self::new();
        registry.register("text", TextExtractor::new());
        registry.register("delimited", DelimitedExtractor::new());
        registry.register(
            "doc",
            DocExtractor::from_config(config.doc_converter.as_deref(), config.doc_raw_fallback),
        );
        registry.register("docx", DocxExtractor::new());
        registry.register("xlsx", XlsxExtractor::new());
        registry.register("pdf", PdfExtractor::new());
        registry
    }

    /// Register a matcher under `name` for every extension it declares.
    ///
    /// A later registration of the same extension replaces the earlier one.
    pub fn register<E: ContentMatcher + 'static>(&mut self, name: &str, extractor: E) {
        let extractor = Arc::new(extractor);
        for ext in extractor.extensions() {
            self.extension_mapping
                .insert(normalize_extension(ext), name.to_string());
        }
        self.extractors.insert(name.to_string(), extractor);
    }

    /// Look up the matcher for an extension such as `".PDF"` or `"pdf"`.
    #[must_use]
    pub fn lookup(&self, extension: &str) -> Option<Arc<dyn ContentMatcher>> {
        self.extension_mapping
            .get(&normalize_extension(extension))
            .and_then(|name| self.extractors.get(name))
            .cloned()
    }

    /// Look up the matcher for a file by its extension.
    ///
    /// A dotfile named exactly like an extension (`.txt`) is looked up by
    /// that extension.
    #[must_use]
    pub fn lookup_path(&self, path: &Path) -> Option<Arc<dyn ContentMatcher>> {
        self.lookup(file_extension(path)?)
    }

    /// Registered extensions, sorted.
    #[must_use]
    pub fn extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.extension_mapping.keys().map(String::as_str).collect();
        exts.sort_unstable();
        exts
    }

    /// Evaluate a file with the matcher registered for its extension.
    pub async fn evaluate(&self, path: &Path, keyword: &Keyword) -> Result<bool, ExtractError> {
        let extractor = self.lookup_path(path).ok_or_else(|| {
            ExtractError::Failed(format!("no extractor registered for {}", path.display()))
        })?;

        extractor.evaluate(path, keyword).await
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase an extension and give it a leading dot.
#[must_use]
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().trim_start_matches('.').to_lowercase();
    format!(".{ext}")
}
