//! Search coordinator.
//!
//! Drives one search at a time: pulls candidates from the walker, dispatches
//! evaluations under a concurrency ceiling, and delivers matches to the sink
//! in completion order.

use docseek_core::{Error, Result, ResultSink, SearchError, SearchRequest, SearchSummary};
use docseek_extract::ExtractorRegistry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::SearchConfig;
use crate::session::SearchSession;
use crate::walker;

/// Runs keyword searches over directory trees.
pub struct SearchCoordinator {
    /// Extractor registry
    registry: Arc<ExtractorRegistry>,
    /// Configuration
    config: SearchConfig,
    /// Set while a search is running
    active: Arc<AtomicBool>,
}

impl SearchCoordinator {
    /// Create a new coordinator.
    pub fn new(registry: Arc<ExtractorRegistry>, config: SearchConfig) -> Self {
        Self {
            registry,
            config,
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the extractor registry.
    pub fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    /// Get the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Whether a search is currently running.
    pub fn is_busy(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Start a search in the background.
    ///
    /// Matches go to `sink.on_match` as they complete, then `sink.on_complete`
    /// is called exactly once. Cancelling `cancel` (or calling
    /// [`SearchHandle::cancel`]) stops new work and suppresses further
    /// matches; evaluations already running are left to finish.
    ///
    /// Returns [`SearchError::Busy`] if a search is already running on this
    /// coordinator.
    ///
    /// # Panics
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_search(
        &self,
        request: SearchRequest,
        sink: Arc<dyn ResultSink>,
        cancel: CancellationToken,
    ) -> Result<SearchHandle, SearchError> {
        if self
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Rejecting search of {:?}: busy", request.root);
            return Err(SearchError::Busy);
        }
        let guard = ActiveGuard(Arc::clone(&self.active));

        let registry = Arc::clone(&self.registry);
        let config = self.config.clone();
        let task = tokio::spawn({
            let cancel = cancel.clone();
            async move {
                let summary = run_search(registry, config, request, sink.as_ref(), cancel).await;
                drop(guard);
                summary
            }
        });

        Ok(SearchHandle { cancel, task })
    }

    /// Run a search to completion.
    pub async fn search(
        &self,
        request: SearchRequest,
        sink: Arc<dyn ResultSink>,
    ) -> Result<SearchSummary> {
        self.start_search(request, sink, CancellationToken::new())?
            .wait()
            .await
    }
}

/// Handle to a running search.
pub struct SearchHandle {
    cancel: CancellationToken,
    task: JoinHandle<SearchSummary>,
}

impl SearchHandle {
    /// Request cancellation. Safe to call repeatedly or after completion.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// The token observed by this search.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Whether the search has finished and delivered its summary.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the search to finish.
    pub async fn wait(self) -> Result<SearchSummary> {
        self.task
            .await
            .map_err(|e| Error::Other(format!("search task failed: {e}")))
    }
}

/// Clears the busy flag when the search task ends, including by panic.
struct ActiveGuard(Arc<AtomicBool>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Body of the coordinating task.
async fn run_search(
    registry: Arc<ExtractorRegistry>,
    config: SearchConfig,
    request: SearchRequest,
    sink: &dyn ResultSink,
    cancel: CancellationToken,
) -> SearchSummary {
    let started = Instant::now();
    let SearchRequest { root, keyword } = request;
    info!("Searching {:?} for {:?}", root, keyword.as_str());

    // An unlistable root is reported as an empty search
    if let Err(e) = tokio::fs::read_dir(&root).await {
        warn!("Cannot read search root {:?}: {}", root, e);
        let summary = SearchSummary::root_unreadable(e.to_string());
        sink.on_complete(&summary);
        return summary;
    }

    let limit = config.effective_concurrency();
    let (tx, mut rx) = mpsc::channel(config.queue_capacity.max(1));
    let walk = tokio::task::spawn_blocking({
        let root = root.clone();
        let cancel = cancel.clone();
        move || walker::feed(&root, &tx, &cancel)
    });

    let mut session = SearchSession::new(keyword, cancel.clone());
    let mut walking = true;
    let mut cancel_seen = false;

    loop {
        if (!walking || session.is_cancelled()) && session.in_flight() == 0 {
            break;
        }

        tokio::select! {
            biased;

            () = cancel.cancelled(), if !cancel_seen => {
                debug!("Search of {:?} cancelled with {} in flight", root, session.in_flight());
                cancel_seen = true;
            }

            Some(joined) = session.next_completion(), if session.in_flight() > 0 => {
                session.settle(joined, sink);
            }

            next = rx.recv(), if walking && !session.is_cancelled() && session.in_flight() < limit => {
                match next {
                    Some(path) => match registry.lookup_path(&path) {
                        Some(matcher) => session.dispatch(path, matcher),
                        None => debug!("Skipping {:?}: no extractor", path),
                    },
                    None => walking = false,
                }
            }

            else => break,
        }
    }

    // Stop the walker if it is still producing
    drop(rx);
    match walk.await {
        Ok(stats) => debug!(
            "Walker finished: {} entries visited, {} candidates sent",
            stats.visited, stats.sent
        ),
        Err(e) => warn!("Walker task failed: {}", e),
    }

    let summary = session.finish();
    info!(
        "Search of {:?} finished: {} matches, {} scanned, {} failed, cancelled={} ({:?})",
        root,
        summary.match_count,
        summary.scanned,
        summary.failed,
        summary.cancelled,
        started.elapsed()
    );
    sink.on_complete(&summary);
    summary
}
