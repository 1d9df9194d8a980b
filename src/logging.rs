//! Logging setup
//!
//! Diagnostics go to stderr through `tracing`, so stdout carries only the
//! report and can be piped.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "VOCABSIM_LOG";

/// Initialize the global tracing subscriber
///
/// `--debug` forces the `debug` level. Otherwise `VOCABSIM_LOG` is used if set
/// and valid, falling back to `info`. Calling this more than once is harmless.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice() {
        init(false);
        init(true);
        tracing::info!("logging initialized");
    }
}
