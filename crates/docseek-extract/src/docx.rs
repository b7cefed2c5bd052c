//! Office Open XML word-processor (`.docx`) matcher.
//!
//! Reads `word/document.xml` from the package and compares the keyword
//! against each body paragraph. Paragraphs inside tables and text boxes are
//! not part of the body and are skipped, as are headers and footers.

use async_trait::async_trait;
use docseek_core::{ContentMatcher, ExtractError, Keyword};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::debug;

use crate::run_blocking;

const DOCUMENT_PART: &str = "word/document.xml";

/// Matcher for `.docx` documents.
pub struct DocxExtractor;

impl DocxExtractor {
    /// Create a new docx extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentMatcher for DocxExtractor {
    fn name(&self) -> &str {
        "docx"
    }

    fn extensions(&self) -> &[&str] {
        &[".docx"]
    }

    async fn evaluate(&self, path: &Path, keyword: &Keyword) -> Result<bool, ExtractError> {
        debug!("Scanning docx: {:?}", path);

        let bytes = tokio::fs::read(path).await?;
        let keyword = keyword.clone();

        run_blocking(move || {
            let xml = read_document_part(bytes)?;
            scan_paragraphs(&xml, &keyword)
        })
        .await
    }
}

/// Pull the main document part out of the zip package.
fn read_document_part(bytes: Vec<u8>) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Parse(format!("invalid docx package: {e}")))?;

    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractError::Parse(format!("{DOCUMENT_PART}: {e}")))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| ExtractError::Parse(format!("{DOCUMENT_PART}: {e}")))?;
    Ok(xml)
}

/// Walk the document XML, testing each body paragraph as it closes.
fn scan_paragraphs(xml: &str, keyword: &Keyword) -> Result<bool, ExtractError> {
    let mut reader = Reader::from_str(xml);

    // Depth of enclosing tables and text boxes
    let mut nested = 0usize;
    let mut paragraph: Option<String> = None;
    let mut in_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ExtractError::Parse(format!("{DOCUMENT_PART}: {e}")))?;

        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"tbl" | b"txbxContent" => nested += 1,
                b"p" if nested == 0 => paragraph = Some(String::new()),
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => {
                if let (0, Some(text)) = (nested, paragraph.as_mut()) {
                    match e.local_name().as_ref() {
                        b"tab" => text.push('\t'),
                        b"br" | b"cr" => text.push('\n'),
                        _ => {}
                    }
                }
            }
            Event::Text(e) => {
                if let (true, 0, Some(text)) = (in_text, nested, paragraph.as_mut()) {
                    let unescaped = e
                        .unescape()
                        .map_err(|e| ExtractError::Parse(format!("{DOCUMENT_PART}: {e}")))?;
                    text.push_str(&unescaped);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"tbl" | b"txbxContent" => nested = nested.saturating_sub(1),
                b"p" if nested == 0 => {
                    if let Some(text) = paragraph.take() {
                        if keyword.matches(&text) {
                            return Ok(true);
                        }
                    }
                }
                b"t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    fn keyword(text: &str) -> Keyword {
        Keyword::new(text).unwrap()
    }

    fn document(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        )
    }

    fn write_docx(path: &Path, body: &str) {
        let file = std::fs::File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(b"<?xml version=\"1.0\"?><Types/>").unwrap();
        zip.start_file(DOCUMENT_PART, options).unwrap();
        zip.write_all(document(body).as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn test_scan_single_paragraph() {
        let xml = document("<w:p><w:r><w:t>Invoice for March</w:t></w:r></w:p>");
        assert!(scan_paragraphs(&xml, &keyword("invoice")).unwrap());
        assert!(!scan_paragraphs(&xml, &keyword("receipt")).unwrap());
    }

    #[test]
    fn test_scan_joins_runs_within_paragraph() {
        let xml = document(
            "<w:p><w:r><w:t>In</w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>voice</w:t></w:r></w:p>",
        );
        assert!(scan_paragraphs(&xml, &keyword("invoice")).unwrap());
    }

    #[test]
    fn test_scan_does_not_join_paragraphs() {
        let xml = document("<w:p><w:r><w:t>In</w:t></w:r></w:p><w:p><w:r><w:t>voice</w:t></w:r></w:p>");
        assert!(!scan_paragraphs(&xml, &keyword("invoice")).unwrap());
    }

    #[test]
    fn test_scan_skips_tables() {
        let xml = document(
            "<w:p><w:r><w:t>Summary</w:t></w:r></w:p>\
             <w:tbl><w:tr><w:tc><w:p><w:r><w:t>invoice</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
        );
        assert!(!scan_paragraphs(&xml, &keyword("invoice")).unwrap());
        assert!(scan_paragraphs(&xml, &keyword("summary")).unwrap());
    }

    #[test]
    fn test_scan_skips_text_boxes() {
        let xml = document(
            "<w:p><w:r><w:t>Cover</w:t></w:r><w:r><w:txbxContent>\
             <w:p><w:r><w:t>invoice</w:t></w:r></w:p></w:txbxContent></w:r></w:p>",
        );
        assert!(!scan_paragraphs(&xml, &keyword("invoice")).unwrap());
        assert!(scan_paragraphs(&xml, &keyword("cover")).unwrap());
    }

    #[test]
    fn test_scan_unescapes_entities() {
        let xml = document("<w:p><w:r><w:t>Smith &amp; Co</w:t></w:r></w:p>");
        assert!(scan_paragraphs(&xml, &keyword("smith & co")).unwrap());
    }

    #[test]
    fn test_scan_tab_and_break() {
        let xml = document("<w:p><w:r><w:t>Total</w:t><w:tab/><w:t>42</w:t></w:r></w:p>");
        assert!(scan_paragraphs(&xml, &keyword("total\t42")).unwrap());
    }

    #[test]
    fn test_scan_malformed_xml() {
        let xml = "<w:document><w:body><w:p></w:body></w:document>";
        let result = scan_paragraphs(xml, &keyword("x"));
        assert!(matches!(result, Err(ExtractError::Parse(_))));
    }

    #[tokio::test]
    async fn test_evaluate_docx_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("letter.docx");
        write_docx(
            &file_path,
            "<w:p><w:r><w:t>Dear customer,</w:t></w:r></w:p><w:p><w:r><w:t>Your INVOICE is attached.</w:t></w:r></w:p>",
        );

        let extractor = DocxExtractor::new();
        assert!(extractor.evaluate(&file_path, &keyword("invoice")).await.unwrap());
        assert!(!extractor.evaluate(&file_path, &keyword("refund")).await.unwrap());
    }

    #[tokio::test]
    async fn test_evaluate_not_a_zip() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("broken.docx");
        std::fs::write(&file_path, b"this is not a zip archive").unwrap();

        let extractor = DocxExtractor::new();
        let result = extractor.evaluate(&file_path, &keyword("invoice")).await;
        assert!(matches!(result, Err(ExtractError::Parse(_))));
    }

    #[tokio::test]
    async fn test_evaluate_missing_document_part() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("empty.docx");
        let file = std::fs::File::create(&file_path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file("docProps/app.xml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<Properties/>").unwrap();
        zip.finish().unwrap();

        let extractor = DocxExtractor::new();
        let result = extractor.evaluate(&file_path, &keyword("invoice")).await;
        assert!(matches!(result, Err(ExtractError::Parse(_))));
    }
}
