//! History command handler: list, show and delete stored hands.

use std::io::Write;

use crate::cli::HistoryCommand;
use crate::error::CliError;
use crate::store::HandStore;

pub fn handle_history_command(
    cmd: &HistoryCommand,
    store: &dyn HandStore,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    match cmd {
        HistoryCommand::List => {
            let hands = store.list()?;
            if hands.is_empty() {
                writeln!(out, "No hands stored")?;
                return Ok(());
            }
            for h in &hands {
                let p = h.positions;
                writeln!(
                    out,
                    "{}  {}  D{} SB{} BB{}  {}",
                    h.hand_id,
                    h.ts.as_deref().unwrap_or("-"),
                    p.dealer,
                    p.small_blind,
                    p.big_blind,
                    h.action_sequence
                )?;
            }
            writeln!(out, "Total: {}", hands.len())?;
        }
        HistoryCommand::Get { hand_id } => {
            let record = store.get(hand_id)?;
            let json = serde_json::to_string_pretty(&record).map_err(std::io::Error::other)?;
            writeln!(out, "{}", json)?;
        }
        HistoryCommand::Delete { hand_id } => {
            store.delete(hand_id)?;
            writeln!(out, "Deleted hand {}", hand_id)?;
        }
    }
    Ok(())
}
