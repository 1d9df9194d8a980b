//! Trial scheduling
//!
//! Runs independent trials on a fixed pool of worker threads.
//!
//! # Architecture
//!
//! - A bounded job queue is filled with one token (the trial index) per trial
//!   and closed.
//! - P worker threads pull tokens, run the trial, and push a [`TrialRecord`]
//!   into a bounded result queue.
//! - The calling thread blocks on the result queue until all T results have
//!   arrived, then joins the pool.
//!
//! Workers share no mutable state: every trial builds its own sampler and
//! word-state array. The queues are the only synchronization point, plus a
//! stop flag that keeps the pool from starting new trials once one has failed.
//!
//! # Example
//!
//! ```
//! use vocabsim::worker::TrialScheduler;
//!
//! let scheduler = TrialScheduler::new(4);
//! let aggregator = scheduler.run(8, |trial_index| Ok(trial_index * 10)).unwrap();
//! assert_eq!(aggregator.num_trials(), 8);
//! ```

use crate::config::{Config, Experiment};
use crate::simulation::TrialRunner;
use crate::stats::aggregator::StatisticsAggregator;
use crate::Result;
use anyhow::Context;
use crossbeam::channel::bounded;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// One finished trial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialRecord {
    /// Index of the trial (0..T)
    pub trial_index: u64,
    /// Worker that ran it
    pub worker_id: usize,
    /// Words read until the target was reached
    pub words_read: u64,
    /// Wall time of the trial
    pub elapsed: Duration,
}

/// Get the number of available CPU cores
pub fn num_cpus() -> usize {
    num_cpus::get()
}

/// Warn when more workers are configured than there are CPU cores
///
/// Returns true if the pool is oversubscribed.
pub fn warn_if_oversubscribed(workers: usize) -> bool {
    let cpu_count = num_cpus();
    if workers > cpu_count {
        warn!(
            workers,
            cpu_count,
            "worker count exceeds CPU count; trials are CPU bound and will contend"
        );
        true
    } else {
        false
    }
}

/// Fixed-size pool that runs trials in parallel
#[derive(Debug, Clone, Copy)]
pub struct TrialScheduler {
    workers: usize,
}

impl TrialScheduler {
    /// Create a scheduler with `workers` threads (at least one)
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// One worker per available CPU
    pub fn with_available_parallelism() -> Self {
        Self::new(num_cpus())
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `trials` invocations of `trial` across the pool
    ///
    /// `trial` receives the trial index and returns words read. Blocks until
    /// every trial has completed. Results are collected in completion order;
    /// the aggregate does not depend on it.
    ///
    /// If any trial fails, no new trials are started and the first error is
    /// returned once the pool has shut down.
    pub fn run<F>(&self, trials: u64, trial: F) -> Result<StatisticsAggregator>
    where
        F: Fn(u64) -> Result<u64> + Send + Sync + 'static,
    {
        let capacity = usize::try_from(trials)
            .with_context(|| format!("trial count {} exceeds addressable queue size", trials))?;

        let trial = Arc::new(trial);
        let stop_flag = Arc::new(AtomicBool::new(false));
        let (job_tx, job_rx) = bounded::<u64>(capacity);
        let (result_tx, result_rx) = bounded::<TrialRecord>(capacity);

        for trial_index in 0..trials {
            job_tx
                .send(trial_index)
                .context("Job queue closed before all trials were queued")?;
        }
        drop(job_tx);

        let mut handles = Vec::with_capacity(self.workers);
        for worker_id in 0..self.workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let trial = Arc::clone(&trial);
            let stop_flag = Arc::clone(&stop_flag);

            let handle = thread::Builder::new()
                .name(format!("trial-worker-{}", worker_id))
                .spawn(move || -> Result<()> {
                    for trial_index in job_rx.iter() {
                        if stop_flag.load(Ordering::Relaxed) {
                            break;
                        }

                        let start = Instant::now();
                        let words_read = match trial(trial_index) {
                            Ok(words_read) => words_read,
                            Err(e) => {
                                stop_flag.store(true, Ordering::Relaxed);
                                return Err(e.context(format!("Trial {} failed", trial_index)));
                            }
                        };
                        let elapsed = start.elapsed();

                        debug!(worker_id, trial_index, words_read, elapsed_ms = elapsed.as_millis() as u64, "trial complete");

                        let record = TrialRecord {
                            trial_index,
                            worker_id,
                            words_read,
                            elapsed,
                        };
                        if result_tx.send(record).is_err() {
                            // Collector is gone, nothing left to do
                            break;
                        }
                    }
                    Ok(())
                })
                .context("Failed to spawn worker thread")?;

            handles.push(handle);
        }
        drop(job_rx);
        drop(result_tx);

        let mut aggregator = StatisticsAggregator::new();
        for _ in 0..trials {
            match result_rx.recv() {
                Ok(record) => aggregator.add_record(&record),
                // Every worker has exited early
                Err(_) => break,
            }
        }

        let mut first_error = None;
        for handle in handles {
            let outcome = match handle.join() {
                Ok(outcome) => outcome,
                Err(_) => Err(anyhow::anyhow!("Worker thread panicked")),
            };
            if let Err(e) = outcome {
                first_error.get_or_insert(e);
            }
        }
        if let Some(e) = first_error {
            return Err(e);
        }

        if aggregator.num_trials() != trials {
            anyhow::bail!(
                "Collected {} of {} trial results",
                aggregator.num_trials(),
                trials
            );
        }

        Ok(aggregator)
    }
}

/// Result of a complete experiment
#[derive(Debug)]
pub struct ExperimentOutcome {
    pub experiment: Experiment,
    pub workers: usize,
    pub elapsed: Duration,
    pub aggregator: StatisticsAggregator,
}

/// Run every trial of a validated configuration
pub fn run_experiment(config: Arc<Config>) -> Result<ExperimentOutcome> {
    let scheduler = match config.run.workers {
        Some(workers) => TrialScheduler::new(workers),
        None => TrialScheduler::with_available_parallelism(),
    };
    warn_if_oversubscribed(scheduler.workers());

    let runner = TrialRunner::new(Arc::clone(&config));
    let experiment = runner.experiment();

    info!(
        %experiment,
        trials = config.run.trials,
        threshold = config.run.threshold,
        workers = scheduler.workers(),
        "starting trials"
    );

    let start = Instant::now();
    let aggregator = scheduler.run(config.run.trials, move |trial_index| runner.run(trial_index))?;
    let elapsed = start.elapsed();

    info!(%experiment, elapsed_secs = elapsed.as_secs_f64(), "all trials complete");

    Ok(ExperimentOutcome {
        experiment,
        workers: scheduler.workers(),
        elapsed,
        aggregator,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU64;

    #[test]
    fn test_runs_exactly_t_trials() {
        for workers in [1, 3, 8] {
            let calls = Arc::new(AtomicU64::new(0));
            let counter = Arc::clone(&calls);

            let scheduler = TrialScheduler::new(workers);
            let mut aggregator = scheduler
                .run(25, move |i| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(i + 1)
                })
                .unwrap();

            assert_eq!(calls.load(Ordering::SeqCst), 25);
            assert_eq!(aggregator.num_trials(), 25);
            // Mean of 1..=25
            assert_eq!(aggregator.aggregate().mean(), Some(13.0));
        }
    }

    #[test]
    fn test_single_trial_mean() {
        let mut aggregator = TrialScheduler::new(4).run(1, |_| Ok(4242)).unwrap();
        assert_eq!(aggregator.aggregate().mean(), Some(4242.0));
        assert_eq!(aggregator.num_workers(), 1);
    }

    #[test]
    fn test_more_workers_than_trials() {
        let aggregator = TrialScheduler::new(16).run(2, |i| Ok(i)).unwrap();
        assert_eq!(aggregator.num_trials(), 2);
    }

    #[test]
    fn test_zero_workers_becomes_one() {
        assert_eq!(TrialScheduler::new(0).workers(), 1);
    }

    #[test]
    fn test_failing_trial_propagates() {
        let result = TrialScheduler::new(2).run(10, |i| {
            if i == 3 {
                anyhow::bail!("sampler construction failed");
            }
            Ok(i)
        });

        let err = result.unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains("Trial 3 failed"), "{}", chain);
        assert!(chain.contains("sampler construction failed"), "{}", chain);
    }

    #[test]
    fn test_panicking_trial_is_an_error() {
        let result = TrialScheduler::new(1).run(3, |i| {
            if i == 1 {
                panic!("boom");
            }
            Ok(i)
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_run_experiment_small_model() {
        let mut config = Config::default();
        config.run.experiment = Experiment::Srs;
        config.run.trials = 6;
        config.run.threshold = 3;
        config.run.workers = Some(2);
        config.run.seed = Some(5);
        config.model.vocab_size = 300;
        config.model.words_to_learn = 30;

        let mut outcome = run_experiment(Arc::new(config)).unwrap();
        assert_eq!(outcome.experiment, Experiment::Srs);
        assert_eq!(outcome.workers, 2);
        let stats = outcome.aggregator.aggregate();
        assert_eq!(stats.count(), 6);
        assert!(stats.min().unwrap() >= 30 * 3);
    }

    #[test]
    fn test_seeded_experiment_is_reproducible() {
        let mut config = Config::default();
        config.run.trials = 4;
        config.run.threshold = 2;
        config.run.workers = Some(3);
        config.run.seed = Some(2024);
        config.model.vocab_size = 500;
        config.model.words_to_learn = 25;
        let config = Arc::new(config);

        let mut first = run_experiment(Arc::clone(&config)).unwrap();
        let mut second = run_experiment(config).unwrap();
        assert_eq!(
            first.aggregator.aggregate().total_words(),
            second.aggregator.aggregate().total_words()
        );
    }
}
