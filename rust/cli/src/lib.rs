//! # Hold'em CLI Library
//!
//! Command-line plumbing around the `holdem_engine` hand engine: it resolves
//! the table configuration, drives single hands, stores finished hands in
//! SQLite and checks exported hand records.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Available Subcommands
//!
//! - `deal`: Deal one hand and show the table for the first seat to act
//! - `play`: Play one hand from an action script, optionally saving it
//! - `history`: List, show or delete stored hands
//! - `verify`: Validate a JSONL file of hand records
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
mod macros;
pub mod store;
pub mod ui;
pub mod validation;

use cli::{COMMANDS, Commands, HoldemCli};
use commands::{
    PlayOptions, handle_cfg_command, handle_deal_command, handle_history_command,
    handle_play_command, handle_verify_command,
};
use store::{HandStore, SqliteHandStore};

pub use error::{BatchValidationError, CliError};

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["holdem", "deal", "--seed", "42"];
/// let code = holdem_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                if write!(out, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                return exit_code::SUCCESS;
            }
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "Hold'em CLI");
            write_or_exit!(err, "Usage: holdem <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: holdem --help");
            return exit_code::ERROR;
        }
    };

    match dispatch(cli.cmd, out, err) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn dispatch(cmd: Commands, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    match cmd {
        Commands::Cfg => handle_cfg_command(out),
        Commands::Deal { seed } => {
            let config = config::load()?;
            handle_deal_command(seed, &config, out)
        }
        Commands::Play {
            seed,
            actions,
            save,
            output,
        } => {
            let config = config::load()?;
            let store = if save {
                Some(SqliteHandStore::open(&config.db_path)?)
            } else {
                None
            };
            let opts = PlayOptions {
                seed,
                actions,
                output,
            };
            handle_play_command(
                &opts,
                &config,
                store.as_ref().map(|s| s as &dyn HandStore),
                out,
                err,
            )
        }
        Commands::History { cmd } => {
            let config = config::load()?;
            let store = SqliteHandStore::open(&config.db_path)?;
            handle_history_command(&cmd, &store, out)
        }
        Commands::Verify { input } => {
            let Some(path) = input else {
                return Err(CliError::InvalidInput("--input is required".into()));
            };
            handle_verify_command(&path, out, err)
        }
    }
}
