//! TOML configuration file parsing

use super::*;
use crate::config::cli::{Cli, ExperimentType, FormatType};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Build the effective configuration for a CLI invocation
///
/// Starts from the `--config` file when given, otherwise from defaults, then
/// applies CLI overrides.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let base = match cli.config {
        Some(ref path) => parse_toml_file(path)?,
        None => Config::default(),
    };

    merge_cli_with_config(cli, base)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    if let Some(experiment) = cli.experiment {
        config.run.experiment = match experiment {
            ExperimentType::Simple => Experiment::Simple,
            ExperimentType::Srs => Experiment::Srs,
        };
    }
    if let Some(trials) = cli.trials {
        config.run.trials = trials;
    }
    if let Some(threshold) = cli.threshold {
        config.run.threshold = threshold;
    }
    if let Some(workers) = cli.workers {
        config.run.workers = Some(workers);
    }
    if let Some(seed) = cli.seed {
        config.run.seed = Some(seed);
    }

    if let Some(format) = cli.format {
        config.output.format = match format {
            FormatType::Text => OutputFormat::Text,
            FormatType::Json => OutputFormat::Json,
        };
    }
    if let Some(ref path) = cli.output {
        config.output.path = Some(path.clone());
        // A report file only makes sense as JSON
        config.output.format = OutputFormat::Json;
    }
    if cli.detailed {
        config.output.detailed = true;
    }

    Ok(config)
}
