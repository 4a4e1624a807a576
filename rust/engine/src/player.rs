use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::ActionRejection;

/// Number of seats at the table.
pub const SEAT_COUNT: usize = 6;

/// An action submitted for the active seat.
///
/// `Bet` carries the amount put out on an unopened street; `Raise` carries
/// the raise-to total for the street, not the increment.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    Fold,
    Check,
    Call,
    Bet(u32),
    Raise(u32),
    AllIn,
}

impl PlayerAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            PlayerAction::Fold => ActionKind::Fold,
            PlayerAction::Check => ActionKind::Check,
            PlayerAction::Call => ActionKind::Call,
            PlayerAction::Bet(_) => ActionKind::Bet,
            PlayerAction::Raise(_) => ActionKind::Raise,
            PlayerAction::AllIn => ActionKind::AllIn,
        }
    }

    /// Builds an action from a textual name plus optional amount, the shape
    /// in which API layers receive actions.
    pub fn from_parts(name: &str, amount: Option<u32>) -> Result<Self, ActionRejection> {
        let kind: ActionKind = name.parse()?;
        let need_amount = || amount.ok_or_else(|| ActionRejection::MissingAmount(kind.to_string()));
        Ok(match kind {
            ActionKind::Fold => PlayerAction::Fold,
            ActionKind::Check => PlayerAction::Check,
            ActionKind::Call => PlayerAction::Call,
            ActionKind::Bet => PlayerAction::Bet(need_amount()?),
            ActionKind::Raise => PlayerAction::Raise(need_amount()?),
            ActionKind::AllIn => PlayerAction::AllIn,
        })
    }
}

/// Action type without an amount, as returned by the valid-actions query.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionKind::Fold => "FOLD",
            ActionKind::Check => "CHECK",
            ActionKind::Call => "CALL",
            ActionKind::Bet => "BET",
            ActionKind::Raise => "RAISE",
            ActionKind::AllIn => "ALL_IN",
        };
        f.write_str(s)
    }
}

impl FromStr for ActionKind {
    type Err = ActionRejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fold" => Ok(ActionKind::Fold),
            "check" => Ok(ActionKind::Check),
            "call" => Ok(ActionKind::Call),
            "bet" => Ok(ActionKind::Bet),
            "raise" => Ok(ActionKind::Raise),
            "all_in" | "allin" | "all-in" => Ok(ActionKind::AllIn),
            _ => Err(ActionRejection::UnknownAction(s.to_string())),
        }
    }
}

/// Per-hand betting state of one seat.
///
/// The stack persists across hands; everything else is cleared by
/// [`Seat::reset`] at the start of each hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Seat {
    index: usize,
    stack: u32,
    current_street_bet: u32,
    total_hand_bet: u32,
    hole_cards: Option<[Card; 2]>,
    folded: bool,
    all_in: bool,
    acted_this_street: bool,
}

impl Seat {
    pub fn new(index: usize, stack: u32) -> Self {
        Self {
            index,
            stack,
            current_street_bet: 0,
            total_hand_bet: 0,
            hole_cards: None,
            folded: false,
            all_in: false,
            acted_this_street: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn current_street_bet(&self) -> u32 {
        self.current_street_bet
    }
    pub fn total_hand_bet(&self) -> u32 {
        self.total_hand_bet
    }
    pub fn hole_cards(&self) -> Option<[Card; 2]> {
        self.hole_cards
    }
    pub fn is_folded(&self) -> bool {
        self.folded
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
    pub fn acted_this_street(&self) -> bool {
        self.acted_this_street
    }

    pub fn reset(&mut self) {
        self.current_street_bet = 0;
        self.total_hand_bet = 0;
        self.hole_cards = None;
        self.folded = false;
        self.all_in = false;
        self.acted_this_street = false;
    }

    pub(crate) fn set_stack(&mut self, stack: u32) {
        self.stack = stack;
    }

    pub fn deal_hole_cards(&mut self, cards: [Card; 2]) {
        self.hole_cards = Some(cards);
    }

    /// Commits `min(amount, stack)` chips and returns what was committed.
    pub fn bet(&mut self, amount: u32) -> u32 {
        let committed = self.commit(amount);
        self.acted_this_street = true;
        committed
    }

    /// Forced blind: moves chips like [`Seat::bet`] but leaves the seat
    /// free to act later in the round.
    pub fn post_blind(&mut self, amount: u32) -> u32 {
        self.commit(amount)
    }

    pub fn fold(&mut self) {
        self.folded = true;
        self.acted_this_street = true;
    }

    pub fn check(&mut self) {
        self.acted_this_street = true;
    }

    pub fn call(&mut self, amount_to_call: u32) -> u32 {
        self.bet(amount_to_call.min(self.stack))
    }

    pub fn all_in(&mut self) -> u32 {
        self.bet(self.stack)
    }

    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in && self.stack > 0
    }

    /// Clears the per-street fields when the betting round closes.
    pub fn start_street(&mut self) {
        self.current_street_bet = 0;
        self.acted_this_street = false;
    }

    /// Takes a seat with no chips out of the current hand.
    pub(crate) fn sit_out(&mut self) {
        self.folded = true;
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    fn commit(&mut self, amount: u32) -> u32 {
        let committed = amount.min(self.stack);
        self.stack -= committed;
        self.current_street_bet += committed;
        self.total_hand_bet += committed;
        if self.stack == 0 {
            self.all_in = true;
        }
        committed
    }
}
