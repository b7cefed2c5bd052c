//! Search tuning.

use std::num::NonZeroUsize;

/// Hard ceiling on concurrent evaluations.
pub const MAX_CONCURRENCY: usize = 32;

/// Workers per available CPU when no explicit limit is set.
const WORKERS_PER_CPU: usize = 5;

/// Configuration for the search coordinator.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum evaluations in flight. `None` sizes the pool from the host.
    pub max_concurrency: Option<usize>,
    /// Capacity of the channel between the walker and the coordinator
    pub queue_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: None,
            queue_capacity: 256,
        }
    }
}

impl SearchConfig {
    /// Set an explicit concurrency limit.
    #[must_use]
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = Some(max);
        self
    }

    /// The concurrency ceiling actually applied, always in `1..=MAX_CONCURRENCY`.
    #[must_use]
    pub fn effective_concurrency(&self) -> usize {
        match self.max_concurrency {
            Some(max) => max.clamp(1, MAX_CONCURRENCY),
            None => default_concurrency(),
        }
    }
}

/// `min(MAX_CONCURRENCY, cpus * 5)`.
#[must_use]
pub fn default_concurrency() -> usize {
    let cpus = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
    cpus.saturating_mul(WORKERS_PER_CPU).min(MAX_CONCURRENCY)
}
