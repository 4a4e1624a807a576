//! Parsing of action scripts for the `play` command.
//!
//! A script is a whitespace-separated list of tokens in the same grammar the
//! hand record uses (`f x c b<n> r<n> allin`). Long names (`fold`, `check`,
//! `call`, `all-in`) are accepted as well. Board tokens are recorded by the
//! engine and cannot be scripted.

use holdem_engine::logger::ActionToken;
use holdem_engine::player::PlayerAction;

/// Result type for parsing one script token.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid player action parsed from the token
    Action(PlayerAction),
    /// Invalid token with error message
    Invalid(String),
}

/// Parse one script token into a [`PlayerAction`].
///
/// # Example
///
/// ```rust
/// # use holdem_cli::validation::{parse_script_token, ParseResult};
/// use holdem_engine::player::PlayerAction;
///
/// assert_eq!(parse_script_token("f"), ParseResult::Action(PlayerAction::Fold));
/// assert_eq!(parse_script_token("r120"), ParseResult::Action(PlayerAction::Raise(120)));
///
/// match parse_script_token("limp") {
///     ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_script_token(input: &str) -> ParseResult {
    let raw = input.trim();
    let lower = raw.to_lowercase();
    match lower.as_str() {
        "" => return ParseResult::Invalid("Empty action".to_string()),
        "fold" => return ParseResult::Action(PlayerAction::Fold),
        "check" => return ParseResult::Action(PlayerAction::Check),
        "call" => return ParseResult::Action(PlayerAction::Call),
        "all-in" | "all_in" => return ParseResult::Action(PlayerAction::AllIn),
        _ => {}
    }
    // card codes are case-sensitive, so try the token as written first
    match raw
        .parse::<ActionToken>()
        .or_else(|_| lower.parse::<ActionToken>())
    {
        Ok(ActionToken::Fold) => ParseResult::Action(PlayerAction::Fold),
        Ok(ActionToken::Check) => ParseResult::Action(PlayerAction::Check),
        Ok(ActionToken::Call) => ParseResult::Action(PlayerAction::Call),
        Ok(ActionToken::AllIn) => ParseResult::Action(PlayerAction::AllIn),
        Ok(ActionToken::Bet(0)) | Ok(ActionToken::Raise(0)) => {
            ParseResult::Invalid(format!("Amount must be positive in '{}'", input.trim()))
        }
        Ok(ActionToken::Bet(n)) => ParseResult::Action(PlayerAction::Bet(n)),
        Ok(ActionToken::Raise(n)) => ParseResult::Action(PlayerAction::Raise(n)),
        Ok(ActionToken::Board(_)) => ParseResult::Invalid(format!(
            "Board cards '{}' are dealt by the engine and cannot be scripted",
            input.trim()
        )),
        Err(_) => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: f, x, c, b<amount>, r<amount>, allin",
            input.trim()
        )),
    }
}

/// Parses a whole script, stopping at the first bad token.
///
/// The error names the 1-based position of the offending token.
pub fn parse_script(script: &str) -> Result<Vec<PlayerAction>, String> {
    script
        .split_whitespace()
        .enumerate()
        .map(|(i, tok)| match parse_script_token(tok) {
            ParseResult::Action(a) => Ok(a),
            ParseResult::Invalid(msg) => Err(format!("action {}: {}", i + 1, msg)),
        })
        .collect()
}
