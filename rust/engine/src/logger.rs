use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{format_cards, parse_cards, Card};
use crate::engine::{HandEngine, Phase};
use crate::errors::GameError;
use crate::player::SEAT_COUNT;

/// One entry of the serialized action sequence.
///
/// Grammar: `f` fold, `x` check, `c` call, `b<amount>` bet,
/// `r<amount>` raise-to total, `allin`, and community reveals written as
/// concatenated card codes (`Ah` for one card, `Tc9h8s` for the flop).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionToken {
    Fold,
    Check,
    Call,
    Bet(u32),
    Raise(u32),
    AllIn,
    Board(Vec<Card>),
}

impl ActionToken {
    pub fn join(tokens: &[ActionToken]) -> String {
        tokens
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ActionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionToken::Fold => f.write_str("f"),
            ActionToken::Check => f.write_str("x"),
            ActionToken::Call => f.write_str("c"),
            ActionToken::Bet(n) => write!(f, "b{}", n),
            ActionToken::Raise(n) => write!(f, "r{}", n),
            ActionToken::AllIn => f.write_str("allin"),
            ActionToken::Board(cards) => f.write_str(&format_cards(cards)),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("unrecognized action token {0:?}")]
    Unknown(String),
}

impl FromStr for ActionToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || TokenError::Unknown(s.to_string());
        match s {
            "f" => return Ok(ActionToken::Fold),
            "x" => return Ok(ActionToken::Check),
            "c" => return Ok(ActionToken::Call),
            "allin" => return Ok(ActionToken::AllIn),
            _ => {}
        }
        if let Some(n) = s.strip_prefix('b') {
            return n.parse().map(ActionToken::Bet).map_err(|_| unknown());
        }
        if let Some(n) = s.strip_prefix('r') {
            return n.parse().map(ActionToken::Raise).map_err(|_| unknown());
        }
        match parse_cards(s) {
            Ok(cards) if matches!(cards.len(), 1 | 3) => Ok(ActionToken::Board(cards)),
            _ => Err(unknown()),
        }
    }
}

/// Splits a space-separated action sequence back into tokens.
pub fn parse_action_sequence(s: &str) -> Result<Vec<ActionToken>, TokenError> {
    s.split_whitespace().map(str::parse).collect()
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Positions {
    pub dealer: usize,
    pub small_blind: usize,
    pub big_blind: usize,
}

/// Information about the showdown when hands were compared.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    /// Seats sharing the main pot
    pub winners: Vec<usize>,
    /// Winning hand category, e.g. "flush"
    #[serde(default)]
    pub notes: Option<String>,
}

/// Immutable summary of a finished hand, handed to the persistence layer.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    pub hand_id: String,
    /// Stacks at the start of the hand, before blinds
    pub stack_settings: Vec<u32>,
    pub positions: Positions,
    /// Seat -> hole cards such as "AhKs"; empty for seats that sat out
    pub hole_cards: BTreeMap<usize, String>,
    pub action_sequence: String,
    /// Seat -> final stack minus starting stack
    pub winnings: BTreeMap<usize, i64>,
    #[serde(default)]
    pub board: Vec<Card>,
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
    /// RFC 3339 time the record was taken
    #[serde(default)]
    pub ts: Option<String>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected 6 stack settings, got {0}")]
    StackCount(usize),
    #[error("position {0} is not a seat")]
    BadPosition(usize),
    #[error("seat {0} does not exist")]
    UnknownSeat(usize),
    #[error("hole cards for seat {seat} must be 4 characters like 'AsKd', got {cards:?}")]
    BadHoleCards { seat: usize, cards: String },
    #[error("duplicate card detected: {0}")]
    DuplicateCard(Card),
    #[error("board has {0} cards")]
    BoardTooLong(usize),
    #[error("winnings must sum to zero, got {0}")]
    Unbalanced(i64),
    #[error(transparent)]
    ActionSequence(#[from] TokenError),
}

impl HandRecord {
    /// Builds the record for a finished hand.
    pub fn from_engine(engine: &HandEngine) -> Result<Self, GameError> {
        if engine.phase() != Phase::Finished {
            return Err(GameError::HandNotFinished);
        }
        let initial = engine.initial_stacks();
        let mut hole_cards = BTreeMap::new();
        let mut winnings = BTreeMap::new();
        for seat in engine.seats() {
            let i = seat.index();
            let cards = seat
                .hole_cards()
                .map(|h| format_cards(&h))
                .unwrap_or_default();
            hole_cards.insert(i, cards);
            winnings.insert(i, i64::from(seat.stack()) - i64::from(initial[i]));
        }
        Ok(Self {
            hand_id: engine.hand_id().to_string(),
            stack_settings: initial.to_vec(),
            positions: Positions {
                dealer: engine.dealer_index(),
                small_blind: engine.small_blind_index(),
                big_blind: engine.big_blind_index(),
            },
            hole_cards,
            action_sequence: engine.action_sequence(),
            winnings,
            board: engine.community_cards().to_vec(),
            showdown: engine.showdown().cloned(),
            ts: Some(now_rfc3339()),
        })
    }

    /// Consistency checks applied before a record is stored.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.stack_settings.len() != SEAT_COUNT {
            return Err(RecordError::StackCount(self.stack_settings.len()));
        }
        let p = self.positions;
        for pos in [p.dealer, p.small_blind, p.big_blind] {
            if pos >= SEAT_COUNT {
                return Err(RecordError::BadPosition(pos));
            }
        }
        if self.board.len() > 5 {
            return Err(RecordError::BoardTooLong(self.board.len()));
        }

        let mut used: HashSet<Card> = HashSet::new();
        for (&seat, cards) in &self.hole_cards {
            if seat >= SEAT_COUNT {
                return Err(RecordError::UnknownSeat(seat));
            }
            if cards.is_empty() {
                continue;
            }
            let bad = || RecordError::BadHoleCards {
                seat,
                cards: cards.clone(),
            };
            if cards.chars().count() != 4 {
                return Err(bad());
            }
            for card in parse_cards(cards).map_err(|_| bad())? {
                if !used.insert(card) {
                    return Err(RecordError::DuplicateCard(card));
                }
            }
        }
        for &card in &self.board {
            if !used.insert(card) {
                return Err(RecordError::DuplicateCard(card));
            }
        }

        if let Some(&seat) = self.winnings.keys().find(|&&s| s >= SEAT_COUNT) {
            return Err(RecordError::UnknownSeat(seat));
        }
        let total: i64 = self.winnings.values().sum();
        if total != 0 {
            return Err(RecordError::Unbalanced(total));
        }

        parse_action_sequence(&self.action_sequence)?;
        Ok(())
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Appends hand records to a JSONL file, one record per line.
pub struct HandLogger {
    writer: BufWriter<File>,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(f),
        })
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(now_rfc3339());
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}
