//! Per-search state owned by the coordinating task.

use docseek_core::{CandidatePath, ContentMatcher, ExtractError, Keyword, ResultSink, SearchSummary};
use std::sync::Arc;
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Outcome of evaluating one candidate.
#[derive(Debug)]
pub struct Evaluation {
    pub path: CandidatePath,
    pub outcome: Result<bool, ExtractError>,
}

/// State of one running search.
///
/// Only the coordinating task touches a session, so the counters need no
/// synchronization. The cancellation token is the one piece shared with
/// other threads.
pub struct SearchSession {
    keyword: Keyword,
    cancel: CancellationToken,
    summary: SearchSummary,
    in_flight: JoinSet<Evaluation>,
}

impl SearchSession {
    /// Create a session for `keyword`, observing `cancel`.
    pub fn new(keyword: Keyword, cancel: CancellationToken) -> Self {
        Self {
            keyword,
            cancel,
            summary: SearchSummary::default(),
            in_flight: JoinSet::new(),
        }
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Number of evaluations dispatched and not yet settled.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Matches delivered so far.
    #[must_use]
    pub fn match_count(&self) -> u64 {
        self.summary.match_count
    }

    /// Start evaluating `path` with `matcher` as an independent task.
    pub fn dispatch(&mut self, path: CandidatePath, matcher: Arc<dyn ContentMatcher>) {
        let keyword = self.keyword.clone();
        self.summary.scanned += 1;
        self.in_flight.spawn(async move {
            let outcome = matcher.evaluate(&path, &keyword).await;
            Evaluation { path, outcome }
        });
    }

    /// Wait for the next evaluation to finish, in completion order.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<Result<Evaluation, JoinError>> {
        self.in_flight.join_next().await
    }

    /// Account for a finished evaluation, emitting a match unless cancelled.
    pub fn settle(&mut self, joined: Result<Evaluation, JoinError>, sink: &dyn ResultSink) {
        let Evaluation { path, outcome } = match joined {
            Ok(evaluation) => evaluation,
            Err(e) => {
                warn!("Evaluation task failed: {}", e);
                self.summary.failed += 1;
                return;
            }
        };

        match outcome {
            Ok(true) => {
                if self.is_cancelled() {
                    debug!("Discarding match after cancellation: {:?}", path);
                    return;
                }
                self.summary.match_count += 1;
                sink.on_match(&path);
            }
            Ok(false) => {}
            Err(e) => {
                debug!("Extraction failed for {:?}: {}", path, e);
                self.summary.failed += 1;
            }
        }
    }

    /// Close the session and produce its summary.
    #[must_use]
    pub fn finish(self) -> SearchSummary {
        SearchSummary {
            cancelled: self.cancel.is_cancelled(),
            ..self.summary
        }
    }
}
