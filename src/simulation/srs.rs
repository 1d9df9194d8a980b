//! Spaced-repetition learning model
//!
//! Same reading stream and target as the simple model, but a sighting only
//! counts when it is well spaced: the gap (in words read) since the word's
//! last credited sighting must exceed `2 * 2^credited`. Each credit doubles
//! the spacing required for the next one, the way SRS review intervals grow.
//!
//! # Clock
//!
//! The clock is the 0-based index of the current draw. Every record starts
//! with `last_credited = 0`, so a word's first gap is simply the current tick.
//! The clock only resets on a credited sighting: a sighting that comes too
//! soon bumps `total_sightings` and nothing else.

use super::TrialParams;
use crate::distribution::RankSampler;

/// Highest threshold that is reachable at all
///
/// The last credit needs a gap greater than 2^threshold, which must fit in
/// the 64-bit clock.
pub const MAX_SRS_THRESHOLD: u64 = 63;

/// Per-word exposure state for one trial
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExposureRecord {
    /// Every sighting of the word, credited or not
    pub total_sightings: u64,
    /// Sightings that met the spacing requirement
    pub credited: u64,
    /// Tick of the last credited sighting
    pub last_credited: u64,
}

impl ExposureRecord {
    /// Gap that the next sighting has to exceed to be credited
    #[inline]
    pub fn required_gap(&self) -> u64 {
        if self.credited >= MAX_SRS_THRESHOLD {
            u64::MAX
        } else {
            2 << self.credited
        }
    }
}

/// Result of one SRS trial with the final per-word state
#[derive(Debug, Clone)]
pub struct SrsOutcome {
    /// Words read until the target was reached
    pub words_read: u64,
    /// Final exposure record per tracked rank
    pub records: Vec<ExposureRecord>,
}

/// Run one SRS trial and return the number of words read
pub fn run<S: RankSampler>(params: &TrialParams, sampler: &mut S) -> u64 {
    run_detailed(params, sampler).words_read
}

/// Run one SRS trial, keeping the exposure records
pub fn run_detailed<S: RankSampler>(params: &TrialParams, sampler: &mut S) -> SrsOutcome {
    let mut records = vec![ExposureRecord::default(); params.words_to_learn as usize];
    let mut learned_words = 0u64;
    let mut clock = 0u64;

    while learned_words < params.words_to_learn {
        let word = sampler.next_rank();
        let now = clock;
        clock += 1;

        if word >= params.words_to_learn {
            continue;
        }

        let record = &mut records[word as usize];
        record.total_sightings += 1;

        if now - record.last_credited > record.required_gap() {
            record.credited += 1;
            record.last_credited = now;
            if record.credited == params.threshold {
                learned_words += 1;
            }
        }
    }

    SrsOutcome {
        words_read: clock,
        records,
    }
}
