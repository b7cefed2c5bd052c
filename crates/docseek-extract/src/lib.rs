//! # docseek-extract
//!
//! Per-format keyword matchers for docseek.
//!
//! Each matcher turns one file into text (or a sequence of text units) and
//! reports whether any unit contains the keyword, case-insensitively.
//!
//! ## Supported Formats
//!
//! | Matcher | Formats | Unit of comparison |
//! |---------|---------|--------------------|
//! | [`TextExtractor`] | `.txt` | Whole file, decoded permissively |
//! | [`DelimitedExtractor`] | `.csv` | Each field of each row |
//! | [`DocExtractor`] | `.doc` | Converter output, or raw bytes as a fallback |
//! | [`DocxExtractor`] | `.docx` | Each body paragraph |
//! | [`XlsxExtractor`] | `.xlsx` | Each non-empty cell of each sheet |
//! | [`PdfExtractor`] | `.pdf` | Each page's text |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use docseek_core::Keyword;
//! use docseek_extract::{ExtractorConfig, ExtractorRegistry};
//! use std::path::Path;
//!
//! let registry = ExtractorRegistry::builtin(&ExtractorConfig::default());
//! let keyword = Keyword::new("invoice")?;
//! let hit = registry.evaluate(Path::new("report.pdf"), &keyword).await?;
//! ```
//!
//! Parsing is CPU-bound and runs on tokio's blocking pool so evaluations
//! never stall the async workers that drive a search.

pub mod delimited;
pub mod doc;
pub mod docx;
pub mod pdf;
pub mod registry;
pub mod text;
pub mod xlsx;

pub use delimited::DelimitedExtractor;
pub use doc::DocExtractor;
pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use registry::{normalize_extension, ExtractorConfig, ExtractorRegistry};
pub use text::TextExtractor;
pub use xlsx::XlsxExtractor;

use docseek_core::ExtractError;

/// Run a parsing closure on the blocking pool.
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, ExtractError>
where
    F: FnOnce() -> Result<T, ExtractError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ExtractError::Failed(format!("Task join error: {e}")))?
}
