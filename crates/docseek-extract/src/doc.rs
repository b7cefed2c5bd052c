//! Legacy binary word-processor (`.doc`) matcher.
//!
//! Prefers an external converter (`antiword` by default) found on `PATH`.
//! Without one, the raw file bytes are decoded as UTF-8 and scanned, which is
//! best effort only: binary content can produce false hits or misses.

use async_trait::async_trait;
use docseek_core::{ContentMatcher, ExtractError, Keyword};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Matcher for legacy `.doc` documents.
pub struct DocExtractor {
    /// Resolved converter executable
    converter: Option<PathBuf>,
    /// Decode raw bytes when no converter is available
    raw_fallback: bool,
}

impl DocExtractor {
    /// Create an extractor using `antiword` if installed, raw decoding otherwise.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(Some("antiword"), true)
    }

    /// Resolve `program` on `PATH`; a missing program leaves the converter unset.
    #[must_use]
    pub fn from_config(program: Option<&str>, raw_fallback: bool) -> Self {
        let converter = program.and_then(|name| match which::which(name) {
            Ok(path) => Some(path),
            Err(e) => {
                debug!("Converter {} not available: {}", name, e);
                None
            }
        });
        Self::with_converter(converter, raw_fallback)
    }

    /// Use an already resolved converter executable.
    #[must_use]
    pub fn with_converter(converter: Option<PathBuf>, raw_fallback: bool) -> Self {
        Self {
            converter,
            raw_fallback,
        }
    }

    /// The converter this extractor will run, if any.
    #[must_use]
    pub fn converter(&self) -> Option<&Path> {
        self.converter.as_deref()
    }

    async fn convert(&self, converter: &Path, path: &Path) -> Result<String, ExtractError> {
        let output = Command::new(converter)
            .arg(path)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| ExtractError::Converter(format!("{}: {e}", converter.display())))?;

        if !output.status.success() {
            return Err(ExtractError::Converter(format!(
                "{} exited with {}",
                converter.display(),
                output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for DocExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentMatcher for DocExtractor {
    fn name(&self) -> &str {
        "doc"
    }

    fn extensions(&self) -> &[&str] {
        &[".doc"]
    }

    async fn evaluate(&self, path: &Path, keyword: &Keyword) -> Result<bool, ExtractError> {
        // A converter failure fails the file; raw decoding is only for hosts without one.
        if let Some(converter) = &self.converter {
            let text = self.convert(converter, path).await?;
            return Ok(keyword.matches(&text));
        }

        if !self.raw_fallback {
            return Err(ExtractError::ConverterMissing(".doc".to_string()));
        }

        let bytes = tokio::fs::read(path).await?;
        Ok(keyword.matches(&String::from_utf8_lossy(&bytes)))
    }
}
