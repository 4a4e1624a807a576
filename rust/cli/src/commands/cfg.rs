//! Configuration command handler.
//!
//! Prints the resolved configuration with the source of every value.
//!
//! # Example Output
//!
//! ```json
//! {
//!   "stacks": {
//!     "value": [1000, 1000, 1000, 1000, 1000, 1000],
//!     "source": "default"
//!   },
//!   "small_blind": {
//!     "value": 20,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;
    let display = serde_json::json!({
        "stacks": {
            "value": config.stacks,
            "source": sources.stacks,
        },
        "small_blind": {
            "value": config.small_blind,
            "source": sources.small_blind,
        },
        "big_blind": {
            "value": config.small_blind.saturating_mul(2),
            "source": sources.small_blind,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "db_path": {
            "value": config.db_path,
            "source": sources.db_path,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
