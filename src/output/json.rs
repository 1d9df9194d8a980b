//! JSON output formatting
//!
//! Serializes the outcome of a run, together with the configuration that
//! produced it, so results from different runs can be compared by tools.

use crate::config::{Config, Experiment, ModelConfig};
use crate::worker::ExperimentOutcome;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Words-read distribution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonWordsRead {
    pub mean: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stddev: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p50: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p90: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p99: Option<u64>,
}

/// Trials completed by one worker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonWorker {
    pub worker_id: usize,
    pub trials: u64,
    pub mean_words_read: f64,
}

/// Complete report of one run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonReport {
    /// RFC 3339 time the report was produced
    pub timestamp: String,
    pub experiment: Experiment,
    pub trials: u64,
    pub threshold: u64,
    pub workers: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub model: ModelConfig,
    pub mean_words_read: f64,
    pub approx_books: f64,
    pub words_read: JsonWordsRead,
    pub elapsed_secs: f64,
    pub per_worker: Vec<JsonWorker>,
}

impl JsonReport {
    /// Build a report from a finished run
    pub fn build(outcome: &mut ExperimentOutcome, config: &Config) -> Self {
        let stats = outcome.aggregator.aggregate().clone();
        let mean = stats.mean().unwrap_or(0.0);

        let per_worker = outcome
            .aggregator
            .per_worker()
            .map(|(worker_id, worker_stats)| JsonWorker {
                worker_id,
                trials: worker_stats.count(),
                mean_words_read: worker_stats.mean().unwrap_or(0.0),
            })
            .collect();

        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            experiment: outcome.experiment,
            trials: stats.count(),
            threshold: config.run.threshold,
            workers: outcome.workers,
            seed: config.run.seed,
            model: config.model.clone(),
            mean_words_read: mean,
            approx_books: stats.books(config.model.words_per_book).unwrap_or(0.0),
            words_read: JsonWordsRead {
                mean,
                min: stats.min(),
                max: stats.max(),
                stddev: stats.stddev(),
                p50: stats.percentile(50.0),
                p90: stats.percentile(90.0),
                p99: stats.percentile(99.0),
            },
            elapsed_secs: outcome.elapsed.as_secs_f64(),
            per_worker,
        }
    }
}

/// Write the report to a file, or to stdout when `path` is None
pub fn write_report(report: &JsonReport, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create report file: {}", path.display()))?;
            serde_json::to_writer_pretty(file, report)
                .with_context(|| format!("Failed to write report file: {}", path.display()))?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, report).context("Failed to write report")?;
            writeln!(handle).context("Failed to write report")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::aggregator::StatisticsAggregator;
    use crate::worker::TrialRecord;
    use std::time::Duration;

    fn sample_outcome() -> ExperimentOutcome {
        let mut aggregator = StatisticsAggregator::new();
        for (i, words_read) in [85_000u64, 255_000].into_iter().enumerate() {
            aggregator.add_record(&TrialRecord {
                trial_index: i as u64,
                worker_id: i,
                words_read,
                elapsed: Duration::from_millis(10),
            });
        }
        ExperimentOutcome {
            experiment: Experiment::Srs,
            workers: 2,
            elapsed: Duration::from_millis(500),
            aggregator,
        }
    }

    #[test]
    fn test_build_report() {
        let mut config = Config::default();
        config.run.experiment = Experiment::Srs;
        config.run.seed = Some(3);

        let report = JsonReport::build(&mut sample_outcome(), &config);
        assert_eq!(report.experiment, Experiment::Srs);
        assert_eq!(report.trials, 2);
        assert_eq!(report.threshold, 12);
        assert_eq!(report.seed, Some(3));
        assert_eq!(report.mean_words_read, 170_000.0);
        assert_eq!(report.approx_books, 2.0);
        assert_eq!(report.words_read.min, Some(85_000));
        assert_eq!(report.words_read.max, Some(255_000));
        assert_eq!(report.per_worker.len(), 2);
        assert_eq!(report.elapsed_secs, 0.5);
        assert!(chrono::DateTime::parse_from_rfc3339(&report.timestamp).is_ok());
    }

    #[test]
    fn test_report_serializes_experiment_lowercase() {
        let report = JsonReport::build(&mut sample_outcome(), &Config::default());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["experiment"], "srs");
        assert_eq!(value["model"]["words_to_learn"], 35_000);
        assert!(value.get("seed").is_none());
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = JsonReport::build(&mut sample_outcome(), &Config::default());

        write_report(&report, Some(&path)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: JsonReport = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_write_report_bad_path() {
        let report = JsonReport::build(&mut sample_outcome(), &Config::default());
        let err = write_report(&report, Some(Path::new("/nonexistent/dir/report.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to create report file"));
    }
}
