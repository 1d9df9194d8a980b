//! Statistics aggregation
//!
//! This module collects trial results as they arrive from the worker pool.
//! Results are kept per worker so a run can show how the trials were spread
//! over the pool, and merged on demand into one aggregate.
//!
//! # Example
//!
//! ```
//! use vocabsim::stats::aggregator::StatisticsAggregator;
//! use vocabsim::worker::TrialRecord;
//! use std::time::Duration;
//!
//! let mut aggregator = StatisticsAggregator::new();
//! aggregator.add_record(&TrialRecord { trial_index: 0, worker_id: 0, words_read: 100, elapsed: Duration::ZERO });
//! aggregator.add_record(&TrialRecord { trial_index: 1, worker_id: 1, words_read: 300, elapsed: Duration::ZERO });
//!
//! let aggregate = aggregator.aggregate();
//! assert_eq!(aggregate.count(), 2);
//! assert_eq!(aggregate.mean(), Some(200.0));
//! ```

use crate::stats::TrialStats;
use crate::worker::TrialRecord;
use std::collections::BTreeMap;
use std::time::Duration;

/// Statistics aggregator for trial results
///
/// # Usage
///
/// 1. Create aggregator with `new()`
/// 2. Add each finished trial with `add_record()`
/// 3. Get aggregate view with `aggregate()`
/// 4. Get per-worker view with `per_worker()`
#[derive(Debug, Default)]
pub struct StatisticsAggregator {
    /// Per-worker statistics (worker_id → stats)
    workers: BTreeMap<usize, TrialStats>,

    /// Cached aggregate statistics (None when stale)
    aggregate_cache: Option<TrialStats>,

    /// Sum of per-trial wall time across all workers
    busy_time: Duration,
}

impl StatisticsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one finished trial
    pub fn add_record(&mut self, record: &TrialRecord) {
        self.workers
            .entry(record.worker_id)
            .or_default()
            .record(record.words_read);
        self.busy_time += record.elapsed;
        self.aggregate_cache = None;
    }

    /// Number of workers that completed at least one trial
    pub fn num_workers(&self) -> usize {
        self.workers.len()
    }

    /// Total trials collected
    pub fn num_trials(&self) -> u64 {
        self.workers.values().map(TrialStats::count).sum()
    }

    /// Wall time spent inside trials, summed over workers
    pub fn busy_time(&self) -> Duration {
        self.busy_time
    }

    /// Aggregate statistics across all workers
    ///
    /// The result is cached until the next record is added.
    pub fn aggregate(&mut self) -> &TrialStats {
        self.aggregate_cache.get_or_insert_with(|| {
            let mut aggregate = TrialStats::new();
            for stats in self.workers.values() {
                // Histograms share bounds, merging cannot fail
                let _ = aggregate.merge(stats);
            }
            aggregate
        })
    }

    /// Per-worker statistics, ordered by worker id
    pub fn per_worker(&self) -> impl Iterator<Item = (usize, &TrialStats)> {
        self.workers.iter().map(|(&id, stats)| (id, stats))
    }
}
