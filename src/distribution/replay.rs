//! Scripted rank replay
//!
//! Replays a fixed sequence of ranks, optionally wrapping back to the start
//! when the end is reached. A replayed stream makes a trial fully
//! deterministic, which is how the simulators are compared against each other
//! on the same reading history.

use crate::distribution::RankSampler;

/// Sampler that replays a recorded rank sequence
///
/// Produces `ranks[0], ranks[1], ...`. Once the sequence is exhausted it
/// either wraps to the beginning (`cycle`) or panics, because a simulator
/// asking for more words than were scripted is a broken test setup.
#[derive(Debug, Clone)]
pub struct ReplaySampler {
    ranks: Vec<u64>,
    position: usize,
    wrap: bool,
}

impl ReplaySampler {
    /// Replay `ranks` exactly once
    pub fn new(ranks: Vec<u64>) -> Self {
        Self {
            ranks,
            position: 0,
            wrap: false,
        }
    }

    /// Replay `ranks` forever
    pub fn cycle(ranks: Vec<u64>) -> Self {
        assert!(!ranks.is_empty(), "cannot cycle an empty rank sequence");
        Self {
            ranks,
            position: 0,
            wrap: true,
        }
    }

    /// Record `count` draws from another sampler so they can be replayed
    pub fn record<S: RankSampler>(source: &mut S, count: usize) -> Self {
        Self::new((0..count).map(|_| source.next_rank()).collect())
    }

    /// Number of ranks consumed in the current pass
    pub fn position(&self) -> usize {
        self.position
    }

    /// Rewind to the first rank
    pub fn rewind(&mut self) {
        self.position = 0;
    }
}

impl RankSampler for ReplaySampler {
    fn next_rank(&mut self) -> u64 {
        if self.position >= self.ranks.len() {
            assert!(self.wrap, "replay exhausted after {} ranks", self.ranks.len());
            self.position = 0;
        }

        let rank = self.ranks[self.position];
        self.position += 1;
        rank
    }
}
