//! Trial simulators
//!
//! A trial follows one simulated reader from an empty vocabulary until
//! `words_to_learn` words are learned, and reports how many words were read
//! along the way.
//!
//! # Models
//!
//! - **simple** ([`simple`]): a word is learned after `threshold` sightings
//! - **srs** ([`srs`]): a word is learned after `threshold` *well spaced*
//!   sightings, with the required spacing doubling after each one
//!
//! Both simulators are pure functions of their parameters and the rank
//! stream, so they can be driven by a [`ReplaySampler`] for exact comparisons.
//!
//! [`ReplaySampler`]: crate::distribution::replay::ReplaySampler

pub mod simple;
pub mod srs;

use crate::config::{Config, Experiment, ModelConfig};
use crate::distribution::zipf::{ZipfError, ZipfSampler};
use crate::distribution::RankSampler;
use std::sync::Arc;

/// Parameters shared by both simulators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialParams {
    /// Size of the tracked prefix [0, words_to_learn), also the learning target
    pub words_to_learn: u64,
    /// Sightings (credited sightings for SRS) required to learn a word
    pub threshold: u64,
}

impl TrialParams {
    pub fn from_config(config: &Config) -> Self {
        Self {
            words_to_learn: config.model.words_to_learn,
            threshold: config.run.threshold,
        }
    }
}

/// Run a single trial of `experiment` over `sampler`
pub fn run_trial<S: RankSampler>(experiment: Experiment, params: &TrialParams, sampler: &mut S) -> u64 {
    match experiment {
        Experiment::Simple => simple::run(params, sampler),
        Experiment::Srs => srs::run(params, sampler),
    }
}

/// Build the Zipf sampler for one trial
///
/// With a base seed, trial `i` gets seed `base + i`, so results do not depend
/// on which worker picks up which trial.
pub fn build_sampler(model: &ModelConfig, seed: Option<u64>, trial_index: u64) -> Result<ZipfSampler, ZipfError> {
    match seed {
        Some(base) => ZipfSampler::with_seed(
            model.zipf_s,
            model.zipf_v,
            model.vocab_size,
            base.wrapping_add(trial_index),
        ),
        None => ZipfSampler::new(model.zipf_s, model.zipf_v, model.vocab_size),
    }
}

/// Runs complete trials for a validated configuration
///
/// Cheap to clone; the configuration is shared.
#[derive(Debug, Clone)]
pub struct TrialRunner {
    config: Arc<Config>,
    params: TrialParams,
}

impl TrialRunner {
    pub fn new(config: Arc<Config>) -> Self {
        let params = TrialParams::from_config(&config);
        Self { config, params }
    }

    pub fn experiment(&self) -> Experiment {
        self.config.run.experiment
    }

    pub fn params(&self) -> &TrialParams {
        &self.params
    }

    /// Run trial number `trial_index` with its own fresh sampler
    pub fn run(&self, trial_index: u64) -> anyhow::Result<u64> {
        let mut sampler = build_sampler(&self.config.model, self.config.run.seed, trial_index)?;
        Ok(run_trial(self.experiment(), &self.params, &mut sampler))
    }
}
