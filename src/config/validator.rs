//! Configuration validation
//!
//! Every degenerate configuration is rejected here, before any worker starts.
//! Once a config passes, trials cannot fail and always terminate.

use super::*;
use crate::distribution::zipf::ZipfSampler;
use crate::simulation::srs::MAX_SRS_THRESHOLD;
use anyhow::{Context, Result};

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_model(&config.model)?;
    validate_run(&config.run)?;
    validate_output(&config.output)?;

    Ok(())
}

/// Validate run configuration
pub fn validate_run(run: &RunConfig) -> Result<()> {
    if run.trials == 0 {
        anyhow::bail!("trials must be at least 1");
    }

    if run.threshold == 0 {
        anyhow::bail!("threshold must be at least 1, otherwise no word is ever learned");
    }

    // Spacing doubles per credit; past this the required gap exceeds any clock
    if run.experiment == Experiment::Srs && run.threshold > MAX_SRS_THRESHOLD {
        anyhow::bail!(
            "srs threshold must be at most {}, got {}",
            MAX_SRS_THRESHOLD,
            run.threshold
        );
    }

    if run.workers == Some(0) {
        anyhow::bail!("workers must be at least 1");
    }

    Ok(())
}

/// Validate model constants
pub fn validate_model(model: &ModelConfig) -> Result<()> {
    // Same checks the sampler itself performs, surfaced at startup
    ZipfSampler::with_seed(model.zipf_s, model.zipf_v, model.vocab_size, 0)
        .context("Invalid Zipf parameters")?;

    if model.words_to_learn == 0 {
        anyhow::bail!("words_to_learn must be at least 1");
    }

    if model.words_to_learn > model.vocab_size {
        anyhow::bail!(
            "words_to_learn ({}) cannot exceed vocab_size ({})",
            model.words_to_learn,
            model.vocab_size
        );
    }

    if usize::try_from(model.words_to_learn).is_err() {
        anyhow::bail!("words_to_learn ({}) does not fit in memory", model.words_to_learn);
    }

    if model.words_per_book == 0 {
        anyhow::bail!("words_per_book must be at least 1");
    }

    Ok(())
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig) -> Result<()> {
    if output.path.is_some() && output.format != OutputFormat::Json {
        anyhow::bail!("an output path is only supported for json reports");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_trials() {
        let mut config = Config::default();
        config.run.trials = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_threshold() {
        let mut config = Config::default();
        config.run.threshold = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("threshold"));
    }

    #[test]
    fn test_srs_threshold_limit() {
        let mut config = Config::default();
        config.run.experiment = Experiment::Srs;
        config.run.threshold = MAX_SRS_THRESHOLD;
        assert!(validate_config(&config).is_ok());

        config.run.threshold = MAX_SRS_THRESHOLD + 1;
        assert!(validate_config(&config).is_err());

        // The simple model has no spacing, so no such limit
        config.run.experiment = Experiment::Simple;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_workers() {
        let mut config = Config::default();
        config.run.workers = Some(0);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_degenerate_zipf_skew() {
        let mut config = Config::default();
        config.model.zipf_s = 1.0;
        let err = validate_config(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("zipf skew"));
    }

    #[test]
    fn test_degenerate_zipf_offset() {
        let mut config = Config::default();
        config.model.zipf_v = 0.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_words_to_learn_bounds() {
        let mut config = Config::default();
        config.model.words_to_learn = 0;
        assert!(validate_config(&config).is_err());

        config.model.words_to_learn = config.model.vocab_size + 1;
        assert!(validate_config(&config).is_err());

        config.model.words_to_learn = config.model.vocab_size;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_words_per_book() {
        let mut config = Config::default();
        config.model.words_per_book = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_output_path_requires_json() {
        let mut config = Config::default();
        config.output.path = Some(PathBuf::from("report.json"));
        assert!(validate_config(&config).is_err());

        config.output.format = OutputFormat::Json;
        assert!(validate_config(&config).is_ok());
    }
}
