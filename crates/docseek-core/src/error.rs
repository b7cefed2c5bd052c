//! Error types for docseek.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for docseek operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Content extraction failed
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractError),

    /// A search could not be started
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// Opening a file externally failed
    #[error("open error: {0}")]
    Open(#[from] OpenError),

    /// I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Why a single file could not be evaluated.
///
/// The coordinator treats every variant as "not matched" for that file.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("no converter available for {0}")]
    ConverterMissing(String),

    #[error("converter failed: {0}")]
    Converter(String),

    #[error("extraction failed: {0}")]
    Failed(String),
}

/// Reasons a search request is refused at the boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("another search is already running")]
    Busy,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Failure reasons for opening a matched file in an external viewer.
#[derive(Error, Debug)]
pub enum OpenError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("no suitable opener found for this platform")]
    NoOpener,

    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for docseek operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    // ========== ExtractError Tests ==========

    #[test]
    fn test_extract_error_parse_display() {
        let err = ExtractError::Parse("missing word/document.xml".to_string());
        assert_eq!(err.to_string(), "parse error: missing word/document.xml");
    }

    #[test]
    fn test_extract_error_io_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ExtractError::Io(io_err);
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_extract_error_converter_missing_display() {
        let err = ExtractError::ConverterMissing(".doc".to_string());
        assert_eq!(err.to_string(), "no converter available for .doc");
    }

    #[test]
    fn test_extract_error_converter_display() {
        let err = ExtractError::Converter("antiword exited with status 1".to_string());
        assert_eq!(err.to_string(), "converter failed: antiword exited with status 1");
    }

    #[test]
    fn test_extract_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: ExtractError = io_err.into();
        assert!(matches!(err, ExtractError::Io(_)));
    }

    // ========== SearchError Tests ==========

    #[test]
    fn test_search_error_busy_display() {
        assert_eq!(
            SearchError::Busy.to_string(),
            "another search is already running"
        );
    }

    #[test]
    fn test_search_error_invalid_request_display() {
        let err = SearchError::InvalidRequest("keyword is empty".to_string());
        assert_eq!(err.to_string(), "invalid request: keyword is empty");
    }

    // ========== OpenError Tests ==========

    #[test]
    fn test_open_error_not_found_display() {
        let err = OpenError::NotFound(PathBuf::from("/tmp/missing.pdf"));
        assert_eq!(err.to_string(), "file not found: /tmp/missing.pdf");
    }

    #[test]
    fn test_open_error_launch_keeps_source() {
        use std::error::Error as _;

        let err = OpenError::Launch {
            program: "xdg-open".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().starts_with("failed to launch xdg-open"));
        assert!(err.source().is_some());
    }

    // ========== Main Error Tests ==========

    #[test]
    fn test_error_from_extract_error() {
        let err: Error = ExtractError::Parse("bad zip".to_string()).into();
        assert!(matches!(err, Error::Extraction(_)));
        assert!(err.to_string().contains("bad zip"));
    }

    #[test]
    fn test_error_from_search_error() {
        let err: Error = SearchError::Busy.into();
        assert!(matches!(err, Error::Search(SearchError::Busy)));
    }

    #[test]
    fn test_error_from_open_error() {
        let err: Error = OpenError::NoOpener.into();
        assert!(matches!(err, Error::Open(OpenError::NoOpener)));
    }

    #[test]
    fn test_error_config_display() {
        let err = Error::Config("invalid max_concurrency".to_string());
        assert_eq!(err.to_string(), "config error: invalid max_concurrency");
    }

    #[test]
    fn test_error_chain_io_to_extract_to_main() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "report.pdf not found");
        let extract_err: ExtractError = io_err.into();
        let main_err: Error = extract_err.into();

        assert!(matches!(main_err, Error::Extraction(ExtractError::Io(_))));
        assert!(main_err.to_string().contains("extraction error"));
    }

    #[test]
    fn test_result_type_alias() {
        fn example_function() -> Result<i32> {
            Ok(42)
        }

        fn failing_function() -> Result<i32> {
            Err(Error::Other("test failure".to_string()))
        }

        assert!(example_function().is_ok());
        assert!(failing_function().is_err());
    }
}
