use serde::{Deserialize, Serialize};

use crate::errors::ActionRejection;
use crate::player::{ActionKind, PlayerAction as A};

/// Forced bets for a hand. The big blind is always twice the small blind.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Blinds {
    pub small_blind: u32,
    pub big_blind: u32,
}

impl Blinds {
    pub fn from_small_blind(small_blind: u32) -> Self {
        Self {
            small_blind,
            big_blind: small_blind.saturating_mul(2),
        }
    }
}

impl Default for Blinds {
    fn default() -> Self {
        Self::from_small_blind(20)
    }
}

/// Betting situation of the seat about to act.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BettingContext {
    /// Chips behind.
    pub stack: u32,
    /// Chips the seat already committed on this street.
    pub street_bet: u32,
    /// Street bet every seat has to match.
    pub current_bet: u32,
    pub big_blind: u32,
}

impl BettingContext {
    pub fn to_call(&self) -> u32 {
        self.current_bet.saturating_sub(self.street_bet)
    }
}

/// A legal action resolved to the chips it moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Chips committed, capped at the stack.
    Call(u32),
    /// Street bet after the bet.
    Bet(u32),
    /// Raise-to total for the street.
    Raise(u32),
    /// Entire remaining stack.
    AllIn(u32),
}

/// Validates an action for the seat described by `ctx`.
///
/// Bets and raises that would use the whole stack resolve to
/// [`ValidatedAction::AllIn`].
///
/// # Examples
///
/// ```
/// use holdem_engine::errors::ActionRejection;
/// use holdem_engine::player::PlayerAction;
/// use holdem_engine::rules::{validate_action, BettingContext, ValidatedAction};
///
/// let ctx = BettingContext { stack: 1000, street_bet: 0, current_bet: 0, big_blind: 40 };
/// assert_eq!(validate_action(&ctx, PlayerAction::Bet(80)), Ok(ValidatedAction::Bet(80)));
/// assert_eq!(
///     validate_action(&ctx, PlayerAction::Bet(10)),
///     Err(ActionRejection::BetBelowMinimum { amount: 10, minimum: 40 })
/// );
/// ```
pub fn validate_action(ctx: &BettingContext, action: A) -> Result<ValidatedAction, ActionRejection> {
    let to_call = ctx.to_call();
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(ActionRejection::MustCallNotCheck { to_call })
            }
        }
        A::Call => {
            if to_call == 0 {
                Err(ActionRejection::NoBetToCall)
            } else {
                Ok(ValidatedAction::Call(to_call.min(ctx.stack)))
            }
        }
        A::Bet(amount) => {
            if ctx.current_bet > 0 {
                return Err(ActionRejection::BetNotAllowed);
            }
            if amount < ctx.big_blind {
                return Err(ActionRejection::BetBelowMinimum {
                    amount,
                    minimum: ctx.big_blind,
                });
            }
            if ctx.stack < ctx.big_blind {
                return Err(ActionRejection::InsufficientChips);
            }
            if amount >= ctx.stack {
                Ok(ValidatedAction::AllIn(ctx.stack))
            } else {
                Ok(ValidatedAction::Bet(amount))
            }
        }
        A::Raise(to) => {
            if ctx.current_bet == 0 {
                return Err(ActionRejection::RaiseNotAllowed);
            }
            if to <= ctx.current_bet {
                return Err(ActionRejection::RaiseTooSmall {
                    amount: to,
                    current: ctx.current_bet,
                });
            }
            if ctx.stack < to_call.saturating_add(ctx.big_blind) {
                return Err(ActionRejection::InsufficientChips);
            }
            if to - ctx.street_bet >= ctx.stack {
                Ok(ValidatedAction::AllIn(ctx.stack))
            } else {
                Ok(ValidatedAction::Raise(to))
            }
        }
        A::AllIn => {
            if ctx.stack == 0 {
                Err(ActionRejection::InsufficientChips)
            } else {
                Ok(ValidatedAction::AllIn(ctx.stack))
            }
        }
    }
}

/// Legal action types for the seat described by `ctx`, in display order.
///
/// Opening actions are keyed on whether the street has a bet at all, so the
/// big blind facing only limps is offered RAISE rather than BET.
pub fn valid_actions(ctx: &BettingContext) -> Vec<ActionKind> {
    let to_call = ctx.to_call();
    let mut v = vec![ActionKind::Fold];
    if to_call == 0 {
        v.push(ActionKind::Check);
    }
    if ctx.current_bet == 0 && ctx.stack >= ctx.big_blind {
        v.push(ActionKind::Bet);
    }
    if to_call > 0 {
        v.push(ActionKind::Call);
    }
    if ctx.current_bet > 0 && ctx.stack >= to_call.saturating_add(ctx.big_blind) {
        v.push(ActionKind::Raise);
    }
    if ctx.stack > 0 {
        v.push(ActionKind::AllIn);
    }
    v
}
