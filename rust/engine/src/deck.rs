use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::DeckError;

/// A depletable 52-card deck driven by an injected ChaCha RNG.
///
/// Cards are dealt from the top; nothing is ever put back until the next
/// [`Deck::reset`]. Two decks built from the same seed produce identical
/// shuffles.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha20Rng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: ChaCha20Rng) -> Self {
        // Keep initial order until reset is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    /// Regenerates all 52 cards and shuffles them (Fisher-Yates).
    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn deal(&mut self) -> Result<Card, DeckError> {
        let c = *self.cards.get(self.position).ok_or(DeckError::EmptyDeck)?;
        self.position += 1;
        Ok(c)
    }

    pub fn burn(&mut self) -> Result<(), DeckError> {
        self.deal().map(|_| ())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}
