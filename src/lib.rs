//! vocabsim - How much do you have to read to learn a vocabulary?
//!
//! vocabsim estimates, by Monte Carlo simulation, how many words a reader has
//! to get through (and so roughly how many books) before learning a target
//! vocabulary, assuming word frequencies follow Zipf's law.
//!
//! # Architecture
//!
//! - **Samplers** ([`distribution`]): Zipf-distributed word ranks, or a replayed sequence
//! - **Simulators** ([`simulation`]): simple threshold model and spaced-repetition model
//! - **Scheduler** ([`worker`]): runs independent trials on a thread pool
//! - **Statistics** ([`stats`]): exact mean plus HdrHistogram percentiles
//! - **Output** ([`output`]): one-line text summary or JSON report

pub mod config;
pub mod distribution;
pub mod logging;
pub mod output;
pub mod simulation;
pub mod stats;
pub mod worker;

// Re-export commonly used types
pub use config::{Config, Experiment};
pub use worker::TrialScheduler;

/// Result type used throughout vocabsim
pub type Result<T> = anyhow::Result<T>;
