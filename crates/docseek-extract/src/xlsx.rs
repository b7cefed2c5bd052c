//! Spreadsheet (`.xlsx`) matcher.

use async_trait::async_trait;
use calamine::{Data, Reader, Xlsx};
use docseek_core::{ContentMatcher, ExtractError, Keyword};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

use crate::run_blocking;

/// Matcher for `.xlsx` workbooks.
///
/// Every non-empty cell of every worksheet is rendered as text and compared
/// on its own; text never joins across cells. Formula cells are compared by
/// their cached value, and date cells by their calendar rendering.
pub struct XlsxExtractor;

impl XlsxExtractor {
    /// Create a new xlsx extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for XlsxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentMatcher for XlsxExtractor {
    fn name(&self) -> &str {
        "xlsx"
    }

    fn extensions(&self) -> &[&str] {
        &[".xlsx"]
    }

    async fn evaluate(&self, path: &Path, keyword: &Keyword) -> Result<bool, ExtractError> {
        debug!("Scanning xlsx: {:?}", path);

        let bytes = tokio::fs::read(path).await?;
        let keyword = keyword.clone();

        run_blocking(move || scan_cells(bytes, &keyword)).await
    }
}

fn scan_cells(bytes: Vec<u8>, keyword: &Keyword) -> Result<bool, ExtractError> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Parse(format!("invalid workbook: {e}")))?;

    for sheet in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| ExtractError::Parse(format!("sheet {sheet}: {e}")))?;

        if range
            .used_cells()
            .any(|(_, _, cell)| keyword.matches(&cell_text(cell)))
        {
            return Ok(true);
        }
    }

    Ok(false)
}

/// Render a cell the way it reads in the sheet.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::DateTime(dt) => dt.as_datetime().map_or_else(
            || cell.to_string(),
            |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        ),
        _ => cell.to_string(),
    }
}
