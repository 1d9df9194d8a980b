//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Learning model to simulate
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExperimentType {
    /// Word is learned after `threshold` sightings
    Simple,
    /// Word is learned after `threshold` sightings at doubling intervals
    Srs,
}

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatType {
    /// One human-readable line (plus summary with --detailed)
    Text,
    /// JSON document
    Json,
}

/// vocabsim - How many books does it take to learn a vocabulary?
#[derive(Parser, Debug)]
#[command(name = "vocabsim")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file (CLI options take precedence)
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // === Experiment Options ===
    /// Experiment to run
    #[arg(short = 'e', long, value_enum)]
    pub experiment: Option<ExperimentType>,

    /// Number of trials to run
    #[arg(short = 'n', long)]
    pub trials: Option<u64>,

    /// Number of times to see a word before it's considered learned
    #[arg(short = 't', long)]
    pub threshold: Option<u64>,

    // === Scheduling Options ===
    /// Number of worker threads (default: number of CPUs)
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// Base random seed for reproducible runs (trial i uses seed + i)
    #[arg(long, env = "VOCABSIM_SEED")]
    pub seed: Option<u64>,

    // === Output Options ===
    /// Report format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<FormatType>,

    /// Write the JSON report to a file instead of stdout
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print min/max/percentiles and per-worker trial counts
    #[arg(long)]
    pub detailed: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments
    ///
    /// Catches values that are wrong regardless of any config file. The
    /// merged configuration is validated again by `validator::validate_config`.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.trials == Some(0) {
            anyhow::bail!("trials must be at least 1");
        }

        if self.threshold == Some(0) {
            anyhow::bail!("threshold must be at least 1");
        }

        if self.workers == Some(0) {
            anyhow::bail!("workers must be at least 1");
        }

        if self.output.is_some() && self.format == Some(FormatType::Text) {
            anyhow::bail!("--output is only supported with --format json");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["vocabsim"]).unwrap();
        assert!(cli.experiment.is_none());
        assert!(cli.trials.is_none());
        assert!(cli.threshold.is_none());
        assert!(!cli.detailed);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_parse_experiment_flags() {
        let cli = Cli::try_parse_from([
            "vocabsim", "--experiment", "srs", "--trials", "100", "--threshold", "8",
        ]).unwrap();
        assert_eq!(cli.experiment, Some(ExperimentType::Srs));
        assert_eq!(cli.trials, Some(100));
        assert_eq!(cli.threshold, Some(8));
    }

    #[test]
    fn test_parse_rejects_unknown_experiment() {
        assert!(Cli::try_parse_from(["vocabsim", "--experiment", "anki"]).is_err());
    }

    #[test]
    fn test_validate_zero_trials() {
        let cli = Cli::try_parse_from(["vocabsim", "--trials", "0"]).unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_validate_zero_threshold() {
        let cli = Cli::try_parse_from(["vocabsim", "-t", "0"]).unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_validate_zero_workers() {
        let cli = Cli::try_parse_from(["vocabsim", "-w", "0"]).unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_validate_output_requires_json() {
        let cli = Cli::try_parse_from(["vocabsim", "-f", "text", "-o", "out.json"]).unwrap();
        assert!(cli.validate().is_err());

        let cli = Cli::try_parse_from(["vocabsim", "-f", "json", "-o", "out.json"]).unwrap();
        assert!(cli.validate().is_ok());
    }
}
