//! Persistence for finished hands.
//!
//! [`HandStore`] is the collaborator that receives [`HandRecord`]s from the
//! engine. Records are validated before they are written; lookups and
//! deletes on an unknown id report [`StoreError::NotFound`].

use std::path::Path;
use std::sync::RwLock;

use chrono::{SecondsFormat, Utc};
use holdem_engine::cards::{format_cards, parse_cards};
use holdem_engine::logger::{HandRecord, Positions, RecordError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;

use crate::io_utils::ensure_parent_dir;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Hand {0} not found")]
    NotFound(String),
    #[error("Hand {0} already exists")]
    Duplicate(String),
    #[error("Invalid hand record: {0}")]
    Invalid(#[from] RecordError),
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Stored hand {hand_id} is unreadable: {reason}")]
    Corrupt { hand_id: String, reason: String },
    #[error("Storage lock poisoned")]
    Poisoned,
    #[error("Cannot prepare database path: {0}")]
    Path(String),
}

/// CRUD over finished hands keyed by `hand_id`.
pub trait HandStore {
    fn create(&self, record: &HandRecord) -> Result<(), StoreError>;
    /// All stored hands, newest first.
    fn list(&self) -> Result<Vec<HandRecord>, StoreError>;
    fn get(&self, hand_id: &str) -> Result<HandRecord, StoreError>;
    fn delete(&self, hand_id: &str) -> Result<(), StoreError>;
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS hands (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    hand_id TEXT NOT NULL UNIQUE,
    stack_settings TEXT NOT NULL,
    dealer_position INTEGER NOT NULL,
    small_blind_position INTEGER NOT NULL,
    big_blind_position INTEGER NOT NULL,
    hole_cards TEXT NOT NULL,
    action_sequence TEXT NOT NULL,
    winnings TEXT NOT NULL,
    board TEXT NOT NULL DEFAULT '',
    showdown TEXT,
    created_at TEXT NOT NULL,
    CONSTRAINT valid_positions CHECK (
        dealer_position >= 0 AND dealer_position < 6 AND
        small_blind_position >= 0 AND small_blind_position < 6 AND
        big_blind_position >= 0 AND big_blind_position < 6
    )
);
CREATE INDEX IF NOT EXISTS idx_hands_created_at ON hands(created_at);
";

const SELECT_COLUMNS: &str = "SELECT hand_id, stack_settings, dealer_position, small_blind_position,
        big_blind_position, hole_cards, action_sequence, winnings, board, showdown, created_at
 FROM hands";

/// SQLite-backed store. JSON columns hold the stack settings, hole cards,
/// winnings and showdown summary.
pub struct SqliteHandStore {
    conn: Connection,
}

impl SqliteHandStore {
    /// Opens (or creates) the database at `path`, creating parent
    /// directories as needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        ensure_parent_dir(path.as_ref()).map_err(StoreError::Path)?;
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(info, _)
            if info.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, StoreError> {
    // plain maps and vectors of integers and strings always serialize
    serde_json::to_string(value).map_err(|e| StoreError::Corrupt {
        hand_id: String::new(),
        reason: e.to_string(),
    })
}

impl HandStore for SqliteHandStore {
    fn create(&self, record: &HandRecord) -> Result<(), StoreError> {
        record.validate()?;
        let created_at = record.ts.clone().unwrap_or_else(now_rfc3339);
        let showdown = record.showdown.as_ref().map(to_json).transpose()?;
        let p = record.positions;
        let inserted = self.conn.execute(
            "INSERT INTO hands (
                hand_id, stack_settings, dealer_position, small_blind_position,
                big_blind_position, hole_cards, action_sequence, winnings, board,
                showdown, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                record.hand_id,
                to_json(&record.stack_settings)?,
                p.dealer as i64,
                p.small_blind as i64,
                p.big_blind as i64,
                to_json(&record.hole_cards)?,
                record.action_sequence,
                to_json(&record.winnings)?,
                format_cards(&record.board),
                showdown,
                created_at,
            ],
        );
        match inserted {
            Ok(_) => {
                tracing::debug!(hand_id = %record.hand_id, "hand stored");
                Ok(())
            }
            Err(e) if is_unique_violation(&e) => Err(StoreError::Duplicate(record.hand_id.clone())),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> Result<Vec<HandRecord>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC"))?;
        let rows = stmt.query_map([], StoredRow::from_row)?;
        rows.map(|row| row?.into_record()).collect()
    }

    fn get(&self, hand_id: &str) -> Result<HandRecord, StoreError> {
        let row = self
            .conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE hand_id = ?1"),
                [hand_id],
                StoredRow::from_row,
            )
            .optional()?;
        row.ok_or_else(|| StoreError::NotFound(hand_id.to_string()))?
            .into_record()
    }

    fn delete(&self, hand_id: &str) -> Result<(), StoreError> {
        let n = self
            .conn
            .execute("DELETE FROM hands WHERE hand_id = ?1", [hand_id])?;
        if n == 0 {
            return Err(StoreError::NotFound(hand_id.to_string()));
        }
        tracing::debug!(hand_id, "hand deleted");
        Ok(())
    }
}

struct StoredRow {
    hand_id: String,
    stack_settings: String,
    dealer: i64,
    small_blind: i64,
    big_blind: i64,
    hole_cards: String,
    action_sequence: String,
    winnings: String,
    board: String,
    showdown: Option<String>,
    created_at: String,
}

impl StoredRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            hand_id: row.get(0)?,
            stack_settings: row.get(1)?,
            dealer: row.get(2)?,
            small_blind: row.get(3)?,
            big_blind: row.get(4)?,
            hole_cards: row.get(5)?,
            action_sequence: row.get(6)?,
            winnings: row.get(7)?,
            board: row.get(8)?,
            showdown: row.get(9)?,
            created_at: row.get(10)?,
        })
    }

    fn into_record(self) -> Result<HandRecord, StoreError> {
        let hand_id = self.hand_id;
        let corrupt = |reason: String| StoreError::Corrupt {
            hand_id: hand_id.clone(),
            reason,
        };
        let seat = |v: i64| usize::try_from(v).map_err(|_| corrupt(format!("bad seat {}", v)));
        let positions = Positions {
            dealer: seat(self.dealer)?,
            small_blind: seat(self.small_blind)?,
            big_blind: seat(self.big_blind)?,
        };
        let json = |e: serde_json::Error| corrupt(e.to_string());
        let showdown = match self.showdown {
            Some(s) => Some(serde_json::from_str(&s).map_err(json)?),
            None => None,
        };
        Ok(HandRecord {
            stack_settings: serde_json::from_str(&self.stack_settings).map_err(json)?,
            positions,
            hole_cards: serde_json::from_str(&self.hole_cards).map_err(json)?,
            action_sequence: self.action_sequence,
            winnings: serde_json::from_str(&self.winnings).map_err(json)?,
            board: parse_cards(&self.board).map_err(|e| corrupt(e.to_string()))?,
            showdown,
            ts: Some(self.created_at),
            hand_id,
        })
    }
}

/// In-process store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryHandStore {
    hands: RwLock<Vec<HandRecord>>,
}

impl MemoryHandStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HandStore for MemoryHandStore {
    fn create(&self, record: &HandRecord) -> Result<(), StoreError> {
        record.validate()?;
        let mut hands = self.hands.write().map_err(|_| StoreError::Poisoned)?;
        if hands.iter().any(|h| h.hand_id == record.hand_id) {
            return Err(StoreError::Duplicate(record.hand_id.clone()));
        }
        let mut stored = record.clone();
        stored.ts.get_or_insert_with(now_rfc3339);
        hands.push(stored);
        Ok(())
    }

    fn list(&self) -> Result<Vec<HandRecord>, StoreError> {
        let hands = self.hands.read().map_err(|_| StoreError::Poisoned)?;
        Ok(hands.iter().rev().cloned().collect())
    }

    fn get(&self, hand_id: &str) -> Result<HandRecord, StoreError> {
        let hands = self.hands.read().map_err(|_| StoreError::Poisoned)?;
        hands
            .iter()
            .find(|h| h.hand_id == hand_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(hand_id.to_string()))
    }

    fn delete(&self, hand_id: &str) -> Result<(), StoreError> {
        let mut hands = self.hands.write().map_err(|_| StoreError::Poisoned)?;
        let before = hands.len();
        hands.retain(|h| h.hand_id != hand_id);
        if hands.len() == before {
            return Err(StoreError::NotFound(hand_id.to_string()));
        }
        Ok(())
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
