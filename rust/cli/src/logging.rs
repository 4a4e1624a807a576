//! Diagnostic logging for the `holdem` binary.
//!
//! Engine and store events go to stderr through a `tracing` fmt subscriber.
//! The filter comes from `RUST_LOG` and defaults to `warn`, so command output
//! on stdout stays clean.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "warn";

/// Initialize logging for the application.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_initialisation_is_harmless() {
        init_logging();
        init_logging();
        tracing::warn!("logging initialised twice");
    }
}
