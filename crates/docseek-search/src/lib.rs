//! Concurrent keyword search over directory trees.
//!
//! This crate turns a [`SearchRequest`](docseek_core::SearchRequest) into a
//! stream of matches:
//! traversal → extension lookup → bounded concurrent evaluation → sink.
//!
//! # Components
//!
//! - [`SearchCoordinator`]: Runs one search at a time and rejects overlap
//! - [`SearchHandle`]: Cancels or awaits a running search
//! - [`SearchSession`]: Counters and in-flight work of one search
//! - [`enumerate`]: Lazy walk of every file under a root
//! - [`SearchConfig`]: Concurrency ceiling and queue sizing
//! - [`SystemOpener`]: Opens a matched file with the default application
//!
//! # Example
//!
//! ```rust,ignore
//! use docseek_core::{FnSink, SearchRequest};
//! use docseek_extract::{ExtractorConfig, ExtractorRegistry};
//! use docseek_search::{SearchConfig, SearchCoordinator};
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! let registry = Arc::new(ExtractorRegistry::builtin(&ExtractorConfig::default()));
//! let coordinator = SearchCoordinator::new(registry, SearchConfig::default());
//!
//! let sink = Arc::new(FnSink::new(
//!     |path| println!("{}", path.display()),
//!     |summary| println!("Done: {} results", summary.match_count),
//! ));
//!
//! let handle = coordinator.start_search(
//!     SearchRequest::new("/data", "invoice")?,
//!     sink,
//!     CancellationToken::new(),
//! )?;
//! let summary = handle.wait().await?;
//! ```

pub mod config;
pub mod coordinator;
pub mod opener;
pub mod session;
pub mod walker;

pub use config::{default_concurrency, SearchConfig, MAX_CONCURRENCY};
pub use coordinator::{SearchCoordinator, SearchHandle};
pub use opener::{Launcher, SystemOpener};
pub use session::{Evaluation, SearchSession};
pub use walker::{enumerate, Candidates};
