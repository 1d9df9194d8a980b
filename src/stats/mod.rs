//! Trial statistics
//!
//! This module accumulates trial results into the aggregate statistic that is
//! reported: the mean words read, and from it the approximate number of books.
//!
//! # Accuracy
//!
//! The mean is computed from an exact running sum (`u128`), never from the
//! histogram, so it does not depend on histogram precision or on the order
//! results arrive in. The histogram only feeds percentiles.
//!
//! # Example
//!
//! ```
//! use vocabsim::stats::TrialStats;
//!
//! let mut stats = TrialStats::new();
//! stats.record(170_000);
//! stats.record(255_000);
//!
//! assert_eq!(stats.mean(), Some(212_500.0));
//! assert_eq!(stats.books(85_000), Some(2.5));
//! ```

pub mod aggregator;
pub mod histogram;

use crate::Result;
use histogram::WordCountHistogram;

/// Aggregate of a set of trial results
#[derive(Debug, Clone, Default)]
pub struct TrialStats {
    count: u64,
    sum: u128,
    min: Option<u64>,
    max: Option<u64>,
    histogram: WordCountHistogram,
}

impl TrialStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one trial result (words read)
    pub fn record(&mut self, words_read: u64) {
        self.count += 1;
        self.sum += words_read as u128;
        self.min = Some(self.min.map_or(words_read, |m| m.min(words_read)));
        self.max = Some(self.max.map_or(words_read, |m| m.max(words_read)));
        self.histogram.record(words_read);
    }

    /// Merge statistics from another set of trials
    pub fn merge(&mut self, other: &TrialStats) -> Result<()> {
        self.count += other.count;
        self.sum += other.sum;
        self.min = match (self.min, other.min) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.max = match (self.max, other.max) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        self.histogram.merge(&other.histogram)
    }

    /// Number of trials recorded
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sum of words read over all trials
    pub fn total_words(&self) -> u128 {
        self.sum
    }

    /// Mean words read per trial, None if no trials
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(self.sum as f64 / self.count as f64)
    }

    /// Mean number of books read, None if no trials
    pub fn books(&self, words_per_book: u64) -> Option<f64> {
        self.mean().map(|mean| mean / words_per_book as f64)
    }

    pub fn min(&self) -> Option<u64> {
        self.min
    }

    pub fn max(&self) -> Option<u64> {
        self.max
    }

    /// Words read at a percentile (0.0 - 100.0), approximate to 0.1%
    pub fn percentile(&self, percentile: f64) -> Option<u64> {
        self.histogram.percentile(percentile)
    }

    /// Standard deviation of words read, approximate to 0.1%
    pub fn stddev(&self) -> Option<f64> {
        self.histogram.stddev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = TrialStats::new();
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.mean(), None);
        assert_eq!(stats.books(85_000), None);
        assert_eq!(stats.min(), None);
        assert_eq!(stats.max(), None);
        assert_eq!(stats.percentile(50.0), None);
    }

    #[test]
    fn test_single_trial_mean_is_the_result() {
        let mut stats = TrialStats::new();
        stats.record(123_457);
        assert_eq!(stats.mean(), Some(123_457.0));
        assert_eq!(stats.min(), Some(123_457));
        assert_eq!(stats.max(), Some(123_457));
    }

    #[test]
    fn test_mean_is_order_independent() {
        let results = [17u64, 4_000_000, 3, 999, 52_000, 52_000];

        let mut forward = TrialStats::new();
        results.iter().for_each(|&r| forward.record(r));

        let mut backward = TrialStats::new();
        results.iter().rev().for_each(|&r| backward.record(r));

        assert_eq!(forward.mean(), backward.mean());
        assert_eq!(forward.total_words(), backward.total_words());
        assert_eq!(forward.min(), Some(3));
        assert_eq!(forward.max(), Some(4_000_000));
    }

    #[test]
    fn test_sum_does_not_overflow() {
        let mut stats = TrialStats::new();
        stats.record(u64::MAX);
        stats.record(u64::MAX);
        assert_eq!(stats.total_words(), 2 * u64::MAX as u128);
    }

    #[test]
    fn test_books() {
        let mut stats = TrialStats::new();
        stats.record(850_000);
        assert_eq!(stats.books(85_000), Some(10.0));
    }

    #[test]
    fn test_merge() {
        let mut a = TrialStats::new();
        a.record(10);
        a.record(30);

        let mut b = TrialStats::new();
        b.record(5);

        let empty = TrialStats::new();

        a.merge(&b).unwrap();
        a.merge(&empty).unwrap();
        assert_eq!(a.count(), 3);
        assert_eq!(a.mean(), Some(15.0));
        assert_eq!(a.min(), Some(5));
        assert_eq!(a.max(), Some(30));
    }
}
