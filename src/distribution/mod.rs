//! Word rank samplers
//!
//! This module provides the sources of word ranks consumed by the trial
//! simulators. A rank identifies a word by its position in a frequency list
//! (0 = most frequent word).
//!
//! # Samplers
//!
//! - **Zipf**: Power law over a bounded vocabulary (synthetic reading stream)
//! - **Replay**: Fixed, scripted sequence of ranks (deterministic trials, tests)
//!
//! # Rank-Based Design
//!
//! Samplers only produce ranks. Whether a rank is inside the tracked
//! "words to learn" window is decided by the simulator, so a rank outside the
//! window is still drawn and still costs the reader one word.
//!
//! # Example
//!
//! ```
//! use vocabsim::distribution::{RankSampler, zipf::ZipfSampler};
//!
//! let mut sampler = ZipfSampler::with_seed(1.1, 1.0, 1000, 7).unwrap();
//! let rank = sampler.next_rank();
//! assert!(rank < 1000);
//! ```

/// Source of word ranks for a trial
///
/// Each call yields the rank of the next word the simulated reader encounters.
/// The stream is infinite: implementations never run dry.
///
/// # Thread Safety
///
/// Samplers must be `Send` so a worker thread can build one and own it for the
/// duration of a trial. Samplers are never shared between trials.
pub trait RankSampler: Send {
    /// Draw the next word rank
    fn next_rank(&mut self) -> u64;
}

impl<S: RankSampler + ?Sized> RankSampler for &mut S {
    #[inline]
    fn next_rank(&mut self) -> u64 {
        (**self).next_rank()
    }
}

impl<S: RankSampler + ?Sized> RankSampler for Box<S> {
    #[inline]
    fn next_rank(&mut self) -> u64 {
        (**self).next_rank()
    }
}

pub mod replay;
pub mod zipf;
