//! vocabsim CLI entry point

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;
use vocabsim::config::{cli::Cli, toml, validator};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    vocabsim::logging::init(cli.debug);
    cli.validate()?;

    let config = toml::load_config(&cli)?;
    validator::validate_config(&config).context("Configuration validation failed")?;
    debug!(?config, "resolved configuration");

    let config = Arc::new(config);
    let mut outcome = vocabsim::worker::run_experiment(Arc::clone(&config))?;

    vocabsim::output::report(&mut outcome, &config)
}
