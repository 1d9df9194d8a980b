//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//!
//! A run is described by three tables:
//!
//! - `run`: which experiment, how many trials, the learning threshold, and
//!   how the trials are scheduled
//! - `model`: the constants of the synthetic reading model (Zipf parameters,
//!   vocabulary sizes, words per book)
//! - `output`: how the result is reported
//!
//! The resolved [`Config`] is immutable once validated and is shared
//! read-only with every worker.

pub mod cli;
pub mod toml;
pub mod validator;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Zipf skew; s ~= 1 matches word frequency distributions
pub const DEFAULT_ZIPF_S: f64 = 1.00001;

/// Zipf offset
pub const DEFAULT_ZIPF_V: f64 = 1.0;

/// Approximate number of words per book
pub const DEFAULT_WORDS_PER_BOOK: u64 = 85_000;

/// Words an educated native English speaker knows
pub const DEFAULT_WORDS_TO_LEARN: u64 = 35_000;

/// Total English vocabulary size, caps Zipf outliers
pub const DEFAULT_VOCAB_SIZE: u64 = 171_146;

/// Complete simulation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Experiment selection and scheduling
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    /// Learning model to simulate
    #[serde(default)]
    pub experiment: Experiment,
    /// Number of independent trials to average
    #[serde(default = "default_trials")]
    pub trials: u64,
    /// Sightings (credited sightings for SRS) before a word counts as learned
    #[serde(default = "default_threshold")]
    pub threshold: u64,
    /// Worker threads (None = one per available CPU)
    #[serde(default)]
    pub workers: Option<usize>,
    /// Base seed; trial i is seeded with seed + i (None = OS entropy)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_trials() -> u64 {
    10
}

fn default_threshold() -> u64 {
    12
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            experiment: Experiment::default(),
            trials: default_trials(),
            threshold: default_threshold(),
            workers: None,
            seed: None,
        }
    }
}

/// Synthetic reading model constants
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    /// Zipf skew s (> 1)
    #[serde(default = "default_zipf_s")]
    pub zipf_s: f64,
    /// Zipf offset v (>= 1)
    #[serde(default = "default_zipf_v")]
    pub zipf_v: f64,
    /// Vocabulary size cap; ranks are drawn from [0, vocab_size)
    #[serde(default = "default_vocab_size")]
    pub vocab_size: u64,
    /// Size of the tracked prefix [0, words_to_learn)
    #[serde(default = "default_words_to_learn")]
    pub words_to_learn: u64,
    /// Words per book, only used for the books-read estimate
    #[serde(default = "default_words_per_book")]
    pub words_per_book: u64,
}

fn default_zipf_s() -> f64 {
    DEFAULT_ZIPF_S
}

fn default_zipf_v() -> f64 {
    DEFAULT_ZIPF_V
}

fn default_vocab_size() -> u64 {
    DEFAULT_VOCAB_SIZE
}

fn default_words_to_learn() -> u64 {
    DEFAULT_WORDS_TO_LEARN
}

fn default_words_per_book() -> u64 {
    DEFAULT_WORDS_PER_BOOK
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            zipf_s: DEFAULT_ZIPF_S,
            zipf_v: DEFAULT_ZIPF_V,
            vocab_size: DEFAULT_VOCAB_SIZE,
            words_to_learn: DEFAULT_WORDS_TO_LEARN,
            words_per_book: DEFAULT_WORDS_PER_BOOK,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Report format
    #[serde(default)]
    pub format: OutputFormat,
    /// File for the JSON report (None = stdout)
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Print min/max/percentiles and per-worker counts after the summary line
    #[serde(default)]
    pub detailed: bool,
}

/// Learning model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Experiment {
    /// Raw sighting count threshold
    #[default]
    Simple,
    /// Spaced repetition: only well-spaced sightings count
    Srs,
}

impl Experiment {
    pub fn name(&self) -> &'static str {
        match self {
            Experiment::Simple => "simple",
            Experiment::Srs => "srs",
        }
    }
}

impl fmt::Display for Experiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
