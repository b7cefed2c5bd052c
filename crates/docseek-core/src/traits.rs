//! Core traits for docseek components.
//!
//! - [`ContentMatcher`]: Decide whether a file's text contains a keyword
//! - [`ResultSink`]: Receive matches and the terminal summary of a search
//! - [`Opener`]: Open a matched file in an external viewer
//!
//! Format support is added by implementing [`ContentMatcher`] and registering
//! it; nothing else in the pipeline changes.

use async_trait::async_trait;
use std::path::Path;

use crate::error::{ExtractError, OpenError};
use crate::types::{file_extension, Keyword, SearchSummary};

// ============================================================================
// Content Matching
// ============================================================================

/// Format-specific "can this file's text contain the keyword?" capability.
///
/// Implementations are stateless with respect to a single evaluation and may
/// be invoked concurrently on distinct paths.
#[async_trait]
pub trait ContentMatcher: Send + Sync {
    /// Short name of this matcher.
    fn name(&self) -> &str;

    /// Lowercase, dot-prefixed extensions this matcher handles.
    fn extensions(&self) -> &[&str];

    /// Check if this matcher handles the given file by extension.
    fn handles(&self, path: &Path) -> bool {
        file_extension(path).is_some_and(|ext| {
            self.extensions()
                .iter()
                .any(|known| known.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
    }

    /// Scan the file's textual content for the keyword.
    ///
    /// Malformed, empty, or unreadable input is reported as an
    /// [`ExtractError`], never as a panic.
    async fn evaluate(&self, path: &Path, keyword: &Keyword) -> Result<bool, ExtractError>;
}

// ============================================================================
// Result Delivery
// ============================================================================

/// Consumer of a search's results.
///
/// Calls are serialized by the coordinator. Implementations should return
/// quickly and defer slow work.
pub trait ResultSink: Send + Sync {
    /// A file matched. Called at most once per path.
    fn on_match(&self, path: &Path);

    /// The search finished. Called exactly once, after every `on_match`.
    fn on_complete(&self, summary: &SearchSummary);
}

/// A [`ResultSink`] assembled from two closures.
pub struct FnSink<M, C> {
    on_match: M,
    on_complete: C,
}

impl<M, C> FnSink<M, C>
where
    M: Fn(&Path) + Send + Sync,
    C: Fn(&SearchSummary) + Send + Sync,
{
    pub fn new(on_match: M, on_complete: C) -> Self {
        Self {
            on_match,
            on_complete,
        }
    }
}

impl<M, C> ResultSink for FnSink<M, C>
where
    M: Fn(&Path) + Send + Sync,
    C: Fn(&SearchSummary) + Send + Sync,
{
    fn on_match(&self, path: &Path) {
        (self.on_match)(path);
    }

    fn on_complete(&self, summary: &SearchSummary) {
        (self.on_complete)(summary);
    }
}

// ============================================================================
// External Viewer
// ============================================================================

/// Opens a file with whatever the host considers its default application.
pub trait Opener: Send + Sync {
    fn open(&self, path: &Path) -> Result<(), OpenError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    struct FixedMatcher;

    #[async_trait]
    impl ContentMatcher for FixedMatcher {
        fn name(&self) -> &str {
            "fixed"
        }

        fn extensions(&self) -> &[&str] {
            &[".txt", ".text"]
        }

        async fn evaluate(&self, _path: &Path, _keyword: &Keyword) -> Result<bool, ExtractError> {
            Ok(true)
        }
    }

    #[test]
    fn test_handles_by_extension() {
        let matcher = FixedMatcher;
        assert!(matcher.handles(Path::new("/notes/a.txt")));
        assert!(matcher.handles(Path::new("/notes/b.text")));
        assert!(!matcher.handles(Path::new("/notes/c.pdf")));
    }

    #[test]
    fn test_handles_case_insensitive() {
        let matcher = FixedMatcher;
        assert!(matcher.handles(Path::new("/notes/README.TXT")));
    }

    #[test]
    fn test_handles_no_extension() {
        let matcher = FixedMatcher;
        assert!(!matcher.handles(Path::new("/notes/Makefile")));
    }

    #[tokio::test]
    async fn test_evaluate_through_trait_object() {
        let matcher: Box<dyn ContentMatcher> = Box::new(FixedMatcher);
        let keyword = Keyword::new("anything").unwrap();
        assert!(matcher.evaluate(Path::new("x.txt"), &keyword).await.unwrap());
    }

    #[test]
    fn test_fn_sink_forwards_calls() {
        let seen = Mutex::new(Vec::<PathBuf>::new());
        let completed = AtomicU64::new(0);

        let sink = FnSink::new(
            |path: &Path| seen.lock().unwrap().push(path.to_path_buf()),
            |summary: &SearchSummary| completed.store(summary.match_count, Ordering::SeqCst),
        );

        sink.on_match(Path::new("/a.txt"));
        sink.on_match(Path::new("/b.txt"));
        sink.on_complete(&SearchSummary {
            match_count: 2,
            ..Default::default()
        });

        assert_eq!(seen.lock().unwrap().len(), 2);
        assert_eq!(completed.load(Ordering::SeqCst), 2);
    }
}
