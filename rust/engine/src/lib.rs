//! # holdem-engine: Six-Seat Hold'em Hand Engine
//!
//! A deterministic state machine for a single hand of six-seat No-Limit
//! Texas Hold'em: dealing, blind rotation, turn order, betting legality,
//! street advancement, pot settlement and hand-result serialization.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation and the `Ah` short form
//! - [`deck`] - Seeded, depletable deck shuffled with ChaCha20
//! - [`player`] - Seat betting state and player actions
//! - [`rules`] - Blinds, action validation and the valid-actions query
//! - [`engine`] - The [`engine::HandEngine`] state machine
//! - [`hand`] - Best-of-seven hand evaluation
//! - [`pot`] - Side pots and showdown payouts
//! - [`logger`] - Hand records, action-token grammar and JSONL output
//! - [`errors`] - Setup errors, action rejections and deck exhaustion
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::engine::{EngineConfig, HandEngine, Phase};
//! use holdem_engine::player::{ActionKind, PlayerAction};
//!
//! let mut engine = HandEngine::new(EngineConfig { small_blind: 20, seed: 42 });
//! engine.set_starting_stacks(&[1000; 6]).unwrap();
//! engine.start_new_hand().unwrap();
//!
//! assert_eq!(engine.phase(), Phase::Preflop);
//! assert_eq!(engine.current_bet(), 40);
//! assert!(engine.valid_actions().contains(&ActionKind::Call));
//!
//! engine.process_action(PlayerAction::Call).unwrap();
//! ```
//!
//! ## Deterministic Gameplay
//!
//! The same seed yields the same shuffles and the same hand ids:
//!
//! ```rust
//! use holdem_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(7);
//! let mut b = Deck::new_with_seed(7);
//! a.reset();
//! b.reset();
//! assert_eq!(a.deal(), b.deal());
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
