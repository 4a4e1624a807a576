//! Play command handler.
//!
//! Drives one hand to completion from an action script. Each scripted
//! action is applied for whichever seat is active at that point. Once the
//! script is exhausted the active seat checks when it may and calls
//! otherwise, so a short script still produces a finished hand.
//!
//! The finished hand is printed as its action log followed by the JSON hand
//! record, and can be stored in the hand store and appended to a JSONL file.

use std::io::Write;

use holdem_engine::engine::{HandEngine, Phase};
use holdem_engine::errors::GameError;
use holdem_engine::logger::HandLogger;
use holdem_engine::player::{ActionKind, PlayerAction};

use crate::commands::start_hand;
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_action, format_board};
use crate::store::HandStore;
use crate::ui;
use crate::validation::parse_script;

#[derive(Debug, Default, Clone)]
pub struct PlayOptions {
    pub seed: Option<u64>,
    pub actions: Option<String>,
    /// JSONL file to append the finished hand to
    pub output: Option<String>,
}

/// Handle the play command.
///
/// A scripted action the engine rejects aborts the hand with
/// `CliError::InvalidInput` naming the seat and the rejection code. Nothing
/// is stored or written in that case.
pub fn handle_play_command(
    opts: &PlayOptions,
    config: &Config,
    store: Option<&dyn HandStore>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let script = parse_script(opts.actions.as_deref().unwrap_or(""))
        .map_err(CliError::InvalidInput)?;
    let mut eng = start_hand(config, opts.seed)?;

    let mut scripted = script.into_iter();
    while eng.phase() != Phase::Finished {
        let action = match scripted.next() {
            Some(a) => a,
            None => passive_action(&eng),
        };
        apply(&mut eng, action)?;
    }

    let unused = scripted.count();
    if unused > 0 {
        ui::display_warning(
            err,
            &format!("{} scripted action(s) left after the hand finished", unused),
        )?;
    }

    for line in eng.action_log() {
        writeln!(out, "{}", line)?;
    }
    writeln!(out, "Board: {}", format_board(eng.community_cards()))?;

    let record = eng.result()?;
    let json = serde_json::to_string_pretty(&record).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json)?;

    // A hand the store refuses is not exported either.
    if let Some(store) = store {
        store.create(&record)?;
    }
    if let Some(path) = &opts.output {
        HandLogger::create(path)?.write(&record)?;
        tracing::info!(path = %path, hand_id = %record.hand_id, "hand appended");
    }
    if store.is_some() {
        writeln!(out, "Saved hand {}", record.hand_id)?;
    }
    Ok(())
}

fn passive_action(eng: &HandEngine) -> PlayerAction {
    let valid = eng.valid_actions();
    if valid.contains(&ActionKind::Check) {
        PlayerAction::Check
    } else if valid.contains(&ActionKind::Call) {
        PlayerAction::Call
    } else {
        PlayerAction::AllIn
    }
}

fn apply(eng: &mut HandEngine, action: PlayerAction) -> Result<(), CliError> {
    let seat = eng.active_seat();
    match eng.process_action(action) {
        Ok(()) => Ok(()),
        Err(GameError::Rejected(r)) => {
            let who = seat.map_or_else(|| "No seat".to_string(), |s| format!("Seat {}", s));
            Err(CliError::InvalidInput(format!(
                "{} cannot {}: {} [{}]",
                who,
                format_action(&action),
                r,
                r.code()
            )))
        }
        Err(e) => Err(e.into()),
    }
}
