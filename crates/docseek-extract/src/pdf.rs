//! PDF matcher.
//!
//! Uses lopdf to pull text out of one page at a time, stopping at the first
//! page that contains the keyword.

use async_trait::async_trait;
use docseek_core::{ContentMatcher, ExtractError, Keyword};
use lopdf::Document;
use std::path::Path;
use tracing::debug;

use crate::run_blocking;

/// Matcher for PDF files.
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create a new PDF extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentMatcher for PdfExtractor {
    fn name(&self) -> &str {
        "pdf"
    }

    fn extensions(&self) -> &[&str] {
        &[".pdf"]
    }

    async fn evaluate(&self, path: &Path, keyword: &Keyword) -> Result<bool, ExtractError> {
        debug!("Scanning PDF: {:?}", path);

        // Read PDF file
        let bytes = tokio::fs::read(path).await?;
        let keyword = keyword.clone();

        // Parsing and text extraction are blocking
        run_blocking(move || scan_pages(&bytes, &keyword)).await
    }
}

/// Check each page in order; pages that yield no text are skipped.
fn scan_pages(bytes: &[u8], keyword: &Keyword) -> Result<bool, ExtractError> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| ExtractError::Parse(format!("PDF load failed: {e}")))?;

    for page_num in doc.get_pages().into_keys() {
        match doc.extract_text(&[page_num]) {
            Ok(text) => {
                if keyword.matches(&text) {
                    return Ok(true);
                }
            }
            Err(e) => {
                debug!("Skipping PDF page {}: {}", page_num, e);
            }
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};
    use tempfile::tempdir;

    fn keyword(text: &str) -> Keyword {
        Keyword::new(text).unwrap()
    }

    /// Build a PDF with one text line per page.
    fn build_pdf(pages: &[&str]) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    fn to_bytes(mut doc: Document) -> Vec<u8> {
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_scan_finds_keyword_on_later_page() {
        let bytes = to_bytes(build_pdf(&["Cover page", "Contents", "Invoice total 42"]));
        assert!(scan_pages(&bytes, &keyword("invoice")).unwrap());
        assert!(!scan_pages(&bytes, &keyword("receipt")).unwrap());
    }

    #[test]
    fn test_scan_does_not_join_pages() {
        let bytes = to_bytes(build_pdf(&["Inv", "oice"]));
        assert!(!scan_pages(&bytes, &keyword("invoice")).unwrap());
    }

    #[test]
    fn test_scan_skips_unreadable_pages() {
        let mut doc = build_pdf(&["Cover", "Appendix", "Invoice total 42"]);
        let pages: Vec<_> = doc.get_pages().into_values().collect();

        // Page 1 points at a missing content object
        doc.get_object_mut(pages[0])
            .unwrap()
            .as_dict_mut()
            .unwrap()
            .set("Contents", Object::Reference((9999, 0)));

        // Page 2 claims Flate compression but holds garbage
        let garbage = doc.add_object(Stream::new(
            dictionary! { "Filter" => "FlateDecode" },
            b"definitely not deflate data".to_vec(),
        ));
        doc.get_object_mut(pages[1])
            .unwrap()
            .as_dict_mut()
            .unwrap()
            .set("Contents", garbage);

        let bytes = to_bytes(doc);
        assert!(scan_pages(&bytes, &keyword("invoice")).unwrap());
        assert!(!scan_pages(&bytes, &keyword("receipt")).unwrap());
    }

    #[test]
    fn test_scan_invalid_pdf() {
        let result = scan_pages(b"not a pdf at all", &keyword("invoice"));
        assert!(matches!(result, Err(ExtractError::Parse(_))));
    }

    #[tokio::test]
    async fn test_evaluate_pdf_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("report.pdf");
        std::fs::write(
            &file_path,
            to_bytes(build_pdf(&["Summary", "Details", "INVOICE 2024"])),
        )
        .unwrap();

        let extractor = PdfExtractor::new();
        assert!(extractor.evaluate(&file_path, &keyword("invoice")).await.unwrap());
    }

    #[tokio::test]
    async fn test_evaluate_truncated_pdf() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("broken.pdf");
        let bytes = to_bytes(build_pdf(&["Invoice"]));
        std::fs::write(&file_path, &bytes[..bytes.len() / 3]).unwrap();

        let extractor = PdfExtractor::new();
        let result = extractor.evaluate(&file_path, &keyword("invoice")).await;
        assert!(!matches!(result, Ok(true)));
    }

    #[tokio::test]
    async fn test_evaluate_nonexistent_file() {
        let extractor = PdfExtractor::new();
        let result = extractor
            .evaluate(Path::new("/nonexistent/report.pdf"), &keyword("x"))
            .await;
        assert!(matches!(result, Err(ExtractError::Io(_))));
    }

    #[test]
    fn test_handles_pdf() {
        let extractor = PdfExtractor::new();
        assert!(extractor.handles(Path::new("/docs/a.pdf")));
        assert!(extractor.handles(Path::new("/docs/a.PDF")));
        assert!(!extractor.handles(Path::new("/docs/a.txt")));
    }
}
