//! Words-read histogram using HdrHistogram
//!
//! Trial results span several orders of magnitude (a small model finishes in
//! hundreds of words, the default model in hundreds of millions), so the
//! distribution is tracked with HdrHistogram rather than fixed buckets.
//!
//! # Example
//!
//! ```
//! use vocabsim::stats::histogram::WordCountHistogram;
//!
//! let mut hist = WordCountHistogram::new();
//! hist.record(1_000);
//! hist.record(2_000);
//! hist.record(3_000);
//!
//! let p50 = hist.percentile(50.0).unwrap();
//! assert!(p50 >= 1_990 && p50 <= 2_010);
//! ```

use crate::Result;
use hdrhistogram::Histogram;

/// Largest trackable trial result (10^15 words)
const MAX_WORDS: u64 = 1_000_000_000_000_000;

/// Histogram of words read per trial
///
/// Configured for 1 to 10^15 words with 3 significant digits, so any
/// percentile is within 0.1% of the true value.
#[derive(Debug, Clone)]
pub struct WordCountHistogram {
    histogram: Histogram<u64>,
}

impl WordCountHistogram {
    /// Create a new histogram
    pub fn new() -> Self {
        let histogram = Histogram::new_with_bounds(1, MAX_WORDS, 3)
            .expect("Failed to create histogram with valid bounds");

        Self { histogram }
    }

    /// Record one trial result
    ///
    /// Values outside [1, 10^15] are clamped.
    #[inline]
    pub fn record(&mut self, words_read: u64) {
        let value = words_read.clamp(1, MAX_WORDS);
        let _ = self.histogram.record(value);
    }

    /// Value at a percentile (0.0 - 100.0), None if empty
    pub fn percentile(&self, percentile: f64) -> Option<u64> {
        if self.histogram.len() == 0 {
            return None;
        }
        Some(self.histogram.value_at_percentile(percentile))
    }

    /// Standard deviation, None if empty
    pub fn stddev(&self) -> Option<f64> {
        if self.histogram.len() == 0 {
            return None;
        }
        Some(self.histogram.stdev())
    }

    /// Number of recorded trials
    pub fn len(&self) -> u64 {
        self.histogram.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histogram.len() == 0
    }

    /// Merge another histogram into this one
    pub fn merge(&mut self, other: &WordCountHistogram) -> Result<()> {
        self.histogram
            .add(&other.histogram)
            .map_err(|e| anyhow::anyhow!("Failed to merge histograms: {:?}", e))
    }
}

impl Default for WordCountHistogram {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_histogram() {
        let hist = WordCountHistogram::new();
        assert!(hist.is_empty());
        assert_eq!(hist.len(), 0);
        assert_eq!(hist.percentile(50.0), None);
        assert_eq!(hist.stddev(), None);
    }

    #[test]
    fn test_percentiles() {
        let mut hist = WordCountHistogram::new();
        for words in 1..=1000u64 {
            hist.record(words * 1000);
        }

        let p50 = hist.percentile(50.0).unwrap();
        let p99 = hist.percentile(99.0).unwrap();
        assert!((499_000..=501_000).contains(&p50), "p50 = {}", p50);
        assert!((989_000..=991_000).contains(&p99), "p99 = {}", p99);
    }

    #[test]
    fn test_clamps_out_of_range() {
        let mut hist = WordCountHistogram::new();
        hist.record(0);
        hist.record(u64::MAX);
        assert_eq!(hist.len(), 2);
    }

    #[test]
    fn test_merge() {
        let mut a = WordCountHistogram::new();
        let mut b = WordCountHistogram::new();
        a.record(10);
        b.record(20);
        b.record(30);

        a.merge(&b).unwrap();
        assert_eq!(a.len(), 3);
    }
}
