//! Command handlers for the `holdem` CLI.
//!
//! Each command lives in its own module with the same shape:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) and the hand store passed in by [`crate::run`]
//! - Errors propagated via [`CliError`]

mod cfg;
mod deal;
mod history;
mod play;
mod verify;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use history::handle_history_command;
pub use play::{PlayOptions, handle_play_command};
pub use verify::handle_verify_command;

use holdem_engine::engine::{EngineConfig, HandEngine};

use crate::config::Config;
use crate::error::CliError;

/// Seats the configured stacks and starts one hand.
///
/// An explicit `seed` wins over the configured one; without either the
/// hand is dealt from a random seed.
pub(crate) fn start_hand(config: &Config, seed: Option<u64>) -> Result<HandEngine, CliError> {
    let seed = seed.or(config.seed).unwrap_or_else(rand::random);
    let mut engine = HandEngine::new(EngineConfig {
        small_blind: config.small_blind,
        seed,
    });
    engine.set_starting_stacks(&config.stacks)?;
    engine.start_new_hand()?;
    tracing::debug!(seed, hand_id = engine.hand_id(), "hand started");
    Ok(engine)
}
