//! Error types for the CLI application.
//!
//! Every command handler returns `Result<(), CliError>`; [`crate::run`] maps
//! any error to exit code `2` after printing it to stderr.
//!
//! ## Batch Validation Errors
//!
//! `BatchValidationError<T>` collects per-item failures with context. The
//! `verify` command uses it to report every broken record in one pass.

use std::fmt;

use holdem_engine::errors::GameError;

use crate::config::ConfigError;
use crate::store::StoreError;

/// Failure of a `holdem` command.
#[derive(Debug)]
pub enum CliError {
    /// Reading input files or writing to the output streams
    Io(std::io::Error),
    /// Bad scripts, rejected actions, failed verification
    InvalidInput(String),
    Config(String),
    /// Table setup refused by the engine
    Engine(String),
    Store(StoreError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
            CliError::Store(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(error: StoreError) -> Self {
        CliError::Store(error)
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

/// A failure tied to one item of a batch (a line number, a hand id).
///
/// # Examples
///
/// ```rust
/// use holdem_cli::BatchValidationError;
///
/// let error = BatchValidationError {
///     item_context: 5,
///     message: "winnings must sum to zero, got 40".to_string(),
/// };
/// assert_eq!(error.to_string(), "5: winnings must sum to zero, got 40");
/// ```
#[derive(Debug)]
pub struct BatchValidationError<T> {
    pub item_context: T,
    pub message: String,
}

impl<T: fmt::Display> fmt::Display for BatchValidationError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item_context, self.message)
    }
}
