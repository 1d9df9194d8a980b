//! Frequency-threshold learning model
//!
//! A word is learned the moment it has been read `threshold` times, no matter
//! how those sightings were spread out. This ignores forgetting entirely and
//! gives a lower bound for the spaced-repetition model.

use super::TrialParams;
use crate::distribution::RankSampler;

/// Run one simple trial
///
/// Draws ranks until `words_to_learn` distinct tracked ranks have each been
/// sighted `threshold` times. Ranks at or beyond `words_to_learn` are drawn
/// and discarded but still count as words read.
///
/// Returns the number of draws (words read).
pub fn run<S: RankSampler>(params: &TrialParams, sampler: &mut S) -> u64 {
    let mut seen = vec![0u64; params.words_to_learn as usize];
    let mut learned_words = 0u64;
    let mut words_read = 0u64;

    while learned_words < params.words_to_learn {
        let word = sampler.next_rank();
        words_read += 1;

        // Beyond the vocabulary we're interested in
        if word >= params.words_to_learn {
            continue;
        }

        let count = &mut seen[word as usize];
        *count += 1;
        if *count == params.threshold {
            learned_words += 1;
        }
    }

    words_read
}
