//! Card, board, seat and action formatters for terminal display.
//!
//! Suits render as Unicode symbols (♥ ♦ ♣ ♠) where the terminal supports
//! them and as the letters `h d c s` otherwise. On Windows, support is
//! detected from `WT_SESSION`, `TERM_PROGRAM` or `VSCODE_INJECTION`; other
//! platforms are assumed to support Unicode.
//!
//! ## Example
//!
//! ```rust
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_cli::formatters::{format_card, format_board};
//!
//! let ace_spades = Card { rank: Rank::Ace, suit: Suit::Spades };
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//!
//! let board = vec![ace_spades];
//! assert!(format_board(&board).starts_with("[A"));
//! ```

use holdem_engine::cards::{Card, Suit};
use holdem_engine::engine::HandEngine;
use holdem_engine::player::{ActionKind, PlayerAction, Seat};

pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: Suit) -> char {
    if supports_unicode() {
        match suit {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    } else {
        suit.to_char()
    }
}

/// Format a Card as rank plus suit, e.g. "A♠" (Unicode) or "As" (ASCII).
pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.to_char(), format_suit(card.suit))
}

/// Format a board in bracket notation, `"[A♠ K♥ Q♦]"`, or `"[]"` if empty.
pub fn format_board(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// Role markers for a seat: `D`, `SB`, `BB`, joined with `/`.
pub fn seat_roles(engine: &HandEngine, index: usize) -> String {
    let mut roles = Vec::new();
    if engine.dealer_index() == index {
        roles.push("D");
    }
    if engine.small_blind_index() == index {
        roles.push("SB");
    }
    if engine.big_blind_index() == index {
        roles.push("BB");
    }
    roles.join("/")
}

/// One line per seat: index, roles, hole cards, stack and street bet.
///
/// Seats sitting the hand out print `--` instead of cards.
pub fn format_seat(seat: &Seat, roles: &str) -> String {
    let cards = match seat.hole_cards() {
        Some([a, b]) => format!("{} {}", format_card(&a), format_card(&b)),
        None => "--".to_string(),
    };
    let mut line = format!(
        "Seat {} {:<5} {:<6} stack={} bet={}",
        seat.index(),
        roles,
        cards,
        seat.stack(),
        seat.current_street_bet()
    );
    if seat.is_all_in() {
        line.push_str(" (all-in)");
    } else if seat.is_folded() {
        line.push_str(" (folded)");
    }
    line
}

/// Valid action kinds in lower case, comma separated.
pub fn format_valid_actions(kinds: &[ActionKind]) -> String {
    kinds
        .iter()
        .map(|k| k.to_string().to_lowercase())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format a PlayerAction as a human-readable string.
///
/// ```rust
/// use holdem_engine::player::PlayerAction;
/// # use holdem_cli::formatters::format_action;
///
/// assert_eq!(format_action(&PlayerAction::Fold), "fold");
/// assert_eq!(format_action(&PlayerAction::Bet(100)), "bet 100");
/// assert_eq!(format_action(&PlayerAction::AllIn), "all-in");
/// ```
pub fn format_action(action: &PlayerAction) -> String {
    match action {
        PlayerAction::Fold => "fold".to_string(),
        PlayerAction::Check => "check".to_string(),
        PlayerAction::Call => "call".to_string(),
        PlayerAction::Bet(amount) => format!("bet {}", amount),
        PlayerAction::Raise(amount) => format!("raise to {}", amount),
        PlayerAction::AllIn => "all-in".to_string(),
    }
}
