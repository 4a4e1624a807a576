//! Deal command handler.
//!
//! Starts one hand from the resolved configuration and prints the table as
//! the first seat to act sees it: blinds posted, hole cards dealt, and the
//! actions that seat may take.

use std::io::Write;

use crate::commands::start_hand;
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_seat, format_valid_actions, seat_roles};

/// Handle the deal command.
///
/// # Examples
///
/// ```ignore
/// let mut out = Vec::new();
/// handle_deal_command(Some(42), &Config::default(), &mut out).unwrap();
/// ```
pub fn handle_deal_command(
    seed: Option<u64>,
    config: &Config,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let eng = start_hand(config, seed)?;
    let blinds = eng.blinds();

    writeln!(out, "Hand {}", eng.hand_id())?;
    writeln!(out, "Blinds: {}/{}", blinds.small_blind, blinds.big_blind)?;
    for seat in eng.seats() {
        writeln!(out, "{}", format_seat(seat, &seat_roles(&eng, seat.index())))?;
    }
    writeln!(out, "Pot: {}", eng.pot())?;
    if let Some(active) = eng.active_seat() {
        let to_call = eng
            .current_bet()
            .saturating_sub(eng.seats()[active].current_street_bet());
        writeln!(out, "To act: Seat {} (to call {})", active, to_call)?;
        writeln!(
            out,
            "Valid actions: {}",
            format_valid_actions(&eng.valid_actions())
        )?;
    }
    Ok(())
}
