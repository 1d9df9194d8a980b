//! Output formatting
//!
//! - **text**: the one-line summary, optionally followed by a detailed block
//! - **json**: a machine-readable report, to stdout or a file

pub mod json;
pub mod text;

use crate::config::{Config, OutputFormat};
use crate::worker::ExperimentOutcome;
use crate::Result;

/// Report a finished run in the configured format
pub fn report(outcome: &mut ExperimentOutcome, config: &Config) -> Result<()> {
    match config.output.format {
        OutputFormat::Text => {
            text::print_results(outcome, config);
            Ok(())
        }
        OutputFormat::Json => {
            let report = json::JsonReport::build(outcome, config);
            json::write_report(&report, config.output.path.as_deref())
        }
    }
}
