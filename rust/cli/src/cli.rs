//! Command-line definition for the `holdem` binary.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "holdem",
    version,
    about = "Six-seat Texas Hold'em hand engine"
)]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start one hand and show the table
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play one hand from an action script
    Play {
        #[arg(long)]
        seed: Option<u64>,
        /// Space-separated tokens: f x c b<n> r<n> allin
        #[arg(long, allow_hyphen_values = true)]
        actions: Option<String>,
        /// Store the finished hand in the database
        #[arg(long)]
        save: bool,
        /// Append the finished hand to a JSONL file
        #[arg(long)]
        output: Option<String>,
    },
    /// List, show or delete stored hands
    History {
        #[command(subcommand)]
        cmd: HistoryCommand,
    },
    /// Validate hand records in a JSONL file
    Verify {
        #[arg(long)]
        input: Option<String>,
    },
    /// Print the resolved configuration
    Cfg,
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// List stored hands, newest first
    List,
    /// Print one stored hand as JSON
    Get { hand_id: String },
    /// Delete one stored hand
    Delete { hand_id: String },
}

/// Top-level command names, in help order.
pub const COMMANDS: &[&str] = &["deal", "play", "history", "verify", "cfg"];
