use thiserror::Error;

/// Top-level error for every mutating [`crate::engine::HandEngine`] operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error(transparent)]
    Rejected(#[from] ActionRejection),
    /// Deck exhaustion. Six seats never deal more than 23 cards, so this
    /// only appears when an upstream invariant has already been broken.
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error("Hand is not finished")]
    HandNotFinished,
}

/// Failures configuring the table or starting a hand. Fatal to the hand.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("Expected {expected} starting stacks, got {actual}")]
    InvalidSeatCount { expected: usize, actual: usize },
    #[error("Fewer than two seats have chips")]
    NoFundedSeats,
    #[error("Starting stacks have not been set")]
    StacksNotConfigured,
    #[error("A hand is already in progress")]
    HandInProgress,
    #[error("Starting stacks total more than {max} chips")]
    ChipTotalTooLarge { max: u32 },
    #[error("Small blind must be at least 1")]
    ZeroSmallBlind,
}

/// Reasons an action is refused. A rejected action never touches pot,
/// stacks, phase or log.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionRejection {
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("It's not seat {actual}'s turn (expected seat {expected})")]
    NotSeatsTurn { expected: usize, actual: usize },
    #[error("Active seat cannot act")]
    SeatCannotAct,
    #[error("Cannot check facing a bet of {to_call}; call, raise or fold")]
    MustCallNotCheck { to_call: u32 },
    #[error("There is no bet to call")]
    NoBetToCall,
    #[error("Cannot bet when a bet is already open; raise instead")]
    BetNotAllowed,
    #[error("Bet of {amount} is below the minimum of {minimum}")]
    BetBelowMinimum { amount: u32, minimum: u32 },
    #[error("Cannot raise when there is no bet; bet instead")]
    RaiseNotAllowed,
    #[error("Raise to {amount} must exceed the current bet of {current}")]
    RaiseTooSmall { amount: u32, current: u32 },
    #[error("Insufficient chips for action")]
    InsufficientChips,
    #[error("Unknown action {0:?}")]
    UnknownAction(String),
    #[error("Action {0:?} requires an amount")]
    MissingAmount(String),
}

impl ActionRejection {
    /// Stable reason code for API collaborators.
    pub fn code(&self) -> &'static str {
        match self {
            ActionRejection::NoHandInProgress => "NoHandInProgress",
            ActionRejection::NotSeatsTurn { .. } => "NotSeatsTurn",
            ActionRejection::SeatCannotAct => "SeatCannotAct",
            ActionRejection::MustCallNotCheck { .. } => "MustCallNotCheck",
            ActionRejection::NoBetToCall => "NoBetToCall",
            ActionRejection::BetNotAllowed => "BetNotAllowed",
            ActionRejection::BetBelowMinimum { .. } => "BetBelowMinimum",
            ActionRejection::RaiseNotAllowed => "RaiseNotAllowed",
            ActionRejection::RaiseTooSmall { .. } => "RaiseTooSmall",
            ActionRejection::InsufficientChips => "InsufficientChips",
            ActionRejection::UnknownAction(_) => "UnknownAction",
            ActionRejection::MissingAmount(_) => "MissingAmount",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("Deck is empty")]
    EmptyDeck,
}
