//! # docseek-core
//!
//! Core types and traits for docseek, a concurrent multi-format file content
//! search engine.
//!
//! - **Matching**: [`ContentMatcher`] decides whether one file contains a keyword
//! - **Delivery**: [`ResultSink`] receives matches as they complete and a final summary
//! - **Viewing**: [`Opener`] hands a matched file to the host's default application
//!
//! ## Architecture
//!
//! ```text
//! Walker → (path) → Coordinator → ExtractorRegistry → ContentMatcher
//!                        ↓
//!                   ResultSink (on_match*, on_complete)
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`SearchRequest`] | Root directory and keyword for one search |
//! | [`Keyword`] | Case-folded keyword with the shared substring test |
//! | [`MatchResult`] | A file whose content contains the keyword |
//! | [`SearchSummary`] | Match count, cancellation and diagnostics |
//!
//! ## Related Crates
//!
//! - `docseek-extract`: Per-format matchers and the extension registry
//! - `docseek-search`: Traversal, coordination and cancellation

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, ExtractError, OpenError, Result, SearchError};
pub use traits::*;
pub use types::*;
